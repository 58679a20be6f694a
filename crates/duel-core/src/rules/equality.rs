//! Equality rule: the challenger must guess the defender's value.

use super::traits::WinnerRule;
use crate::protocol::Role;

/// Defender wins on equal reveals, challenger wins otherwise
pub struct EqualityRule;

impl WinnerRule for EqualityRule {
    fn name(&self) -> &'static str {
        "equality"
    }

    fn judge(&self, challenge_reveal: &str, defend_reveal: &str) -> Role {
        if challenge_reveal == defend_reveal {
            Role::Defender
        } else {
            Role::Challenger
        }
    }
}
