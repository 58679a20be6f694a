//! Relay configuration from the environment.

use duel_core::{EngineConfig, RuleKind, DEFAULT_MAX_BLOCKS_PER_MOVE};
use std::str::FromStr;
use tracing::warn;

pub const DEFAULT_PORT: u16 = 3000;

#[derive(Clone, Debug, PartialEq)]
pub struct RelayConfig {
    pub port: u16,
    pub engine: EngineConfig,
}

impl RelayConfig {
    /// Read `PORT`, `MAX_BLOCKS_PER_MOVE` and `WINNER_RULE`
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let port = parse_or(&lookup, "PORT", DEFAULT_PORT);
        let window = parse_or(&lookup, "MAX_BLOCKS_PER_MOVE", DEFAULT_MAX_BLOCKS_PER_MOVE);
        let rule = parse_or(&lookup, "WINNER_RULE", RuleKind::default());

        let window = if window == 0 {
            warn!("MAX_BLOCKS_PER_MOVE must be positive, using {}", DEFAULT_MAX_BLOCKS_PER_MOVE);
            DEFAULT_MAX_BLOCKS_PER_MOVE
        } else {
            window
        };

        Self {
            port,
            engine: EngineConfig::with_window(window).rule(rule),
        }
    }
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            engine: EngineConfig::default(),
        }
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T
where
    T: FromStr + std::fmt::Display,
{
    match lookup(key) {
        None => default,
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("Invalid {}={:?}, using {}", key, raw, default);
            default
        }),
    }
}
