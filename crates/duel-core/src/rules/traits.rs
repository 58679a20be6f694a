//! Winner rule trait and the configurable rule selector.

use super::{EqualityRule, RpsRule};
use crate::protocol::Role;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Decides a round from the two revealed values.
///
/// Must be total and deterministic: every pair of inputs, valid or not,
/// maps to exactly one winning role.
pub trait WinnerRule: Send + Sync {
    /// Short name for logs
    fn name(&self) -> &'static str;

    fn judge(&self, challenge_reveal: &str, defend_reveal: &str) -> Role;
}

/// Rule selectable from configuration
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleKind {
    /// Equal reveals keep the defender on the hill
    #[default]
    Equality,
    RockPaperScissors,
}

impl RuleKind {
    pub fn build(&self) -> Arc<dyn WinnerRule> {
        match self {
            RuleKind::Equality => Arc::new(EqualityRule),
            RuleKind::RockPaperScissors => Arc::new(RpsRule),
        }
    }
}

impl FromStr for RuleKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "equality" | "equal" => Ok(RuleKind::Equality),
            "rock_paper_scissors" | "rps" => Ok(RuleKind::RockPaperScissors),
            other => Err(format!("unknown winner rule: {}", other)),
        }
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleKind::Equality => write!(f, "equality"),
            RuleKind::RockPaperScissors => write!(f, "rock_paper_scissors"),
        }
    }
}
