//! Phase, turn and deadline legality.

use super::{DuelError, Game};
use crate::crypto::Address;
use crate::protocol::{MoveKind, Phase, Role};

/// Transition the arbiter allows for a move
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
    /// First comer takes the empty hill
    SeatDefender,
    /// Caller becomes challenger and a new round begins
    StartRound,
    Defend,
    RevealChallenge,
    RevealDefend,
    /// Round concludes in `winner`'s favour
    Conclude { winner: Role, by_timeout: bool },
}

/// Decides whether `actor` may make a move of `kind` in the current phase.
///
/// Pure: reads the game and the head height only. Timeouts are detected here,
/// lazily, when someone submits a move.
pub struct TurnArbiter;

impl TurnArbiter {
    pub fn judge(game: &Game, kind: MoveKind, actor: &Address, now: u64) -> Result<Verdict, DuelError> {
        let role = game.role_of(actor);

        match (kind, game.phase) {
            (MoveKind::Challenge, Phase::Empty | Phase::Concluded) => {
                if game.defender.is_nobody() {
                    Ok(Verdict::SeatDefender)
                } else if role == Some(Role::Defender) {
                    Err(DuelError::MoveNotAllowed)
                } else {
                    Ok(Verdict::StartRound)
                }
            }
            // Seats stay taken until the round is claimed. Only `ClaimWinning`
            // reopens the hill, even past the deadline.
            (
                MoveKind::Challenge,
                Phase::Started | Phase::Defended | Phase::ChallengeRevealed | Phase::DefendRevealed,
            ) => {
                if game.is_elapsed(now) {
                    Err(DuelError::MoveNotAllowed)
                } else {
                    Err(DuelError::SomebodyStillPlaying)
                }
            }

            (MoveKind::Defend, Phase::Started) => {
                Self::on_turn(game, role, Role::Defender, now).map(|()| Verdict::Defend)
            }
            (MoveKind::Defend, _) => Err(DuelError::MoveNotAllowed),

            (MoveKind::RevealChallenge, Phase::Defended) => {
                Self::on_turn(game, role, Role::Challenger, now).map(|()| Verdict::RevealChallenge)
            }
            (MoveKind::RevealChallenge, _) => Err(DuelError::MoveNotAllowed),

            (MoveKind::RevealDefend, Phase::ChallengeRevealed) => {
                Self::on_turn(game, role, Role::Defender, now).map(|()| Verdict::RevealDefend)
            }
            (MoveKind::RevealDefend, _) => Err(DuelError::MoveNotAllowed),

            (MoveKind::ClaimWinning, Phase::Empty | Phase::Concluded) => Err(DuelError::NoGameYet),
            (MoveKind::ClaimWinning, Phase::DefendRevealed) => match game.winner {
                Some(winner) if role == Some(winner) => Ok(Verdict::Conclude {
                    winner,
                    by_timeout: false,
                }),
                Some(_) => Err(DuelError::NotTheWinner),
                None => Err(DuelError::MoveNotAllowed),
            },
            (MoveKind::ClaimWinning, Phase::Started | Phase::Defended | Phase::ChallengeRevealed) => {
                Self::timeout_claim(game, role, now)
            }
        }
    }

    /// Role entitled to a forced win at `now`, if the mover has stalled
    pub fn timeout_winner(game: &Game, now: u64) -> Option<Role> {
        if !game.phase.is_live() || !game.is_elapsed(now) {
            return None;
        }
        game.phase.turn().map(|mover| mover.opponent())
    }

    fn on_turn(game: &Game, role: Option<Role>, expected: Role, now: u64) -> Result<(), DuelError> {
        if role != Some(expected) {
            return Err(DuelError::NotYourTurn);
        }
        if game.is_elapsed(now) {
            return Err(DuelError::TooLate);
        }
        Ok(())
    }

    fn timeout_claim(game: &Game, role: Option<Role>, now: u64) -> Result<Verdict, DuelError> {
        match Self::timeout_winner(game, now) {
            None => Err(DuelError::SomebodyStillPlaying),
            Some(waiting) if role == Some(waiting) => Ok(Verdict::Conclude {
                winner: waiting,
                by_timeout: true,
            }),
            Some(_) => Err(DuelError::NotTheWinner),
        }
    }
}
