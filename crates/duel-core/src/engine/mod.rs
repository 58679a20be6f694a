//! Move authorization, turn arbitration and the duel state machine.
//!
//! A submission flows through:
//! - `RelayGateway`: reads the chain height, seals a block per submission
//! - `AuthorizedMove`: signature and hash-chain checks
//! - `TurnArbiter`: phase, turn and deadline legality
//! - `DuelEngine`: commitment checks, then the state write

mod arbiter;
mod authorize;
mod duel;
mod error;
mod game;
mod relay;

pub use arbiter::{TurnArbiter, Verdict};
pub use authorize::AuthorizedMove;
pub use duel::{DuelEngine, MoveReceipt};
pub use error::DuelError;
pub use game::Game;
pub use relay::RelayGateway;
