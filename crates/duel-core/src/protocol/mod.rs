//! Protocol types, messages and events.

mod events;
mod messages;
mod types;

pub use events::{DuelEvent, StartEvent, UpdateStateEvent, WinningEvent};
pub use messages::{chain_digest, MoveRecord, SignedMove, Submission};
pub use types::{GameId, MoveKind, Phase, Role, Seats, Step};
