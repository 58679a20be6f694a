//! Move rejection reasons.

use crate::crypto::Digest;
use thiserror::Error;

/// Why a move was rejected. Rejections never change engine state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DuelError {
    #[error("signature not right")]
    SignatureInvalid,

    #[error("stale or replayed move: expected prev hash {expected}, got {got}")]
    StaleOrReplayedMove { expected: Digest, got: Digest },

    #[error("not for you now")]
    NotYourTurn,

    #[error("move not allowed")]
    MoveNotAllowed,

    #[error("you are too late")]
    TooLate,

    #[error("reveal does not match commitment")]
    RevealMismatch,

    #[error("malformed commitment")]
    MalformedCommitment,

    #[error("game not started")]
    NoGameYet,

    #[error("somebody still playing")]
    SomebodyStillPlaying,

    #[error("not the winner")]
    NotTheWinner,
}

impl DuelError {
    /// Stable machine-readable name
    pub fn kind(&self) -> &'static str {
        match self {
            DuelError::SignatureInvalid => "signature_invalid",
            DuelError::StaleOrReplayedMove { .. } => "stale_or_replayed_move",
            DuelError::NotYourTurn => "not_your_turn",
            DuelError::MoveNotAllowed => "move_not_allowed",
            DuelError::TooLate => "too_late",
            DuelError::RevealMismatch => "reveal_mismatch",
            DuelError::MalformedCommitment => "malformed_commitment",
            DuelError::NoGameYet => "no_game_yet",
            DuelError::SomebodyStillPlaying => "somebody_still_playing",
            DuelError::NotTheWinner => "not_the_winner",
        }
    }
}
