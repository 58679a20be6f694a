//! Duel Core Library
//!
//! Move-authorization and state-transition engine for a two-party,
//! turn-based commit-reveal duel ("king of the hill"):
//!
//! - `crypto`: Keccak state hash chain, addresses, (v, r, s) signatures, commitments
//! - `protocol`: roles, phases, signed moves, submissions and audit events
//! - `rules`: pluggable winner rules over the two revealed values
//! - `engine`: authorization gate, turn arbiter, duel engine and relay gateway
//! - `chain`: block-height source used for deadline arbitration

pub mod chain;
pub mod config;
pub mod crypto;
pub mod engine;
pub mod protocol;
pub mod rules;

pub use chain::{BlockClock, MockChain};
pub use config::{EngineConfig, DEFAULT_MAX_BLOCKS_PER_MOVE};
pub use crypto::{Address, Commitment, Digest, MoveSignature, Signer, StateHasher};
pub use engine::{DuelEngine, DuelError, MoveReceipt, RelayGateway};
pub use protocol::{DuelEvent, GameId, MoveKind, Phase, Role, SignedMove, Submission};
pub use rules::{RuleKind, WinnerRule};
