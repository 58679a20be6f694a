//! Winner rules: how a pair of revealed values decides a round.

mod equality;
mod rps;
mod traits;

pub use equality::EqualityRule;
pub use rps::{RpsGesture, RpsRule};
pub use traits::{RuleKind, WinnerRule};
