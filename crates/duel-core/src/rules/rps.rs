//! Rock-Paper-Scissors rule.

use super::traits::WinnerRule;
use crate::protocol::Role;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Rock-Paper-Scissors gesture
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RpsGesture {
    Rock,
    Paper,
    Scissors,
}

impl RpsGesture {
    /// Check if this gesture beats the other
    pub fn beats(&self, other: &RpsGesture) -> bool {
        matches!(
            (self, other),
            (RpsGesture::Rock, RpsGesture::Scissors)
                | (RpsGesture::Scissors, RpsGesture::Paper)
                | (RpsGesture::Paper, RpsGesture::Rock)
        )
    }
}

impl FromStr for RpsGesture {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rock" => Ok(RpsGesture::Rock),
            "paper" => Ok(RpsGesture::Paper),
            "scissors" => Ok(RpsGesture::Scissors),
            _ => Err(()),
        }
    }
}

/// Standard beats relation; ties stay with the defender.
///
/// An unparseable reveal loses to a valid one. Two unparseable reveals are a
/// tie.
pub struct RpsRule;

impl WinnerRule for RpsRule {
    fn name(&self) -> &'static str {
        "rock_paper_scissors"
    }

    fn judge(&self, challenge_reveal: &str, defend_reveal: &str) -> Role {
        let challenge = challenge_reveal.parse::<RpsGesture>().ok();
        let defend = defend_reveal.parse::<RpsGesture>().ok();

        match (challenge, defend) {
            (Some(c), Some(d)) if c.beats(&d) => Role::Challenger,
            (Some(_), None) => Role::Challenger,
            _ => Role::Defender,
        }
    }
}
