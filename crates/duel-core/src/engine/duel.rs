//! The duel engine: owns the game record and sequences every move.

use super::{AuthorizedMove, DuelError, Game, TurnArbiter, Verdict};
use crate::config::EngineConfig;
use crate::crypto::{Address, Commitment, Digest};
use crate::protocol::{
    DuelEvent, GameId, MoveKind, MoveRecord, Phase, Role, SignedMove, StartEvent, Step,
    Submission, UpdateStateEvent, WinningEvent,
};
use crate::rules::WinnerRule;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Outcome of an accepted move
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MoveReceipt {
    pub kind: MoveKind,
    pub actor: Address,
    /// New `last_state_hash`
    pub digest: Digest,
    /// Height the move executed at
    pub block: u64,
    pub events: Vec<DuelEvent>,
}

/// State change a legal move resolves to, with everything that could still
/// fail already checked
enum Transition {
    SeatDefender,
    StartRound(Commitment),
    Defend(Commitment),
    RevealChallenge,
    RevealDefend { winner: Role },
    Conclude { winner: Role, by_timeout: bool },
}

/// Single-writer state machine for one hill.
///
/// Every move is fully checked (signature, chain position, turn, deadline,
/// commitment) before the first write, so a rejected move leaves the engine
/// exactly as it was.
pub struct DuelEngine {
    game: Game,
    rule: Arc<dyn WinnerRule>,
    events: Vec<DuelEvent>,
    history: Vec<MoveRecord>,
}

impl DuelEngine {
    pub fn new(config: EngineConfig) -> Self {
        let rule = config.rule.build();
        Self::with_rule(config, rule)
    }

    /// Engine deciding rounds with a custom rule
    pub fn with_rule(config: EngineConfig, rule: Arc<dyn WinnerRule>) -> Self {
        let id = config.id.unwrap_or_default();
        if config.max_blocks_per_move == 0 {
            warn!("max_blocks_per_move of 0 leaves no time to move, using 1");
        }
        let window = config.window();
        info!(
            "Created duel {} (window {} blocks, rule {})",
            id,
            window,
            rule.name()
        );
        Self {
            game: Game::new(id, window),
            rule,
            events: Vec::new(),
            history: Vec::new(),
        }
    }

    // === Moves ===

    /// Process one submission with the head of the chain at `now`
    pub fn submit(&mut self, submission: &Submission, now: u64) -> Result<MoveReceipt, DuelError> {
        let signed = &submission.signed;
        let result = self.process(submission, now);

        match &result {
            Ok(receipt) => info!(
                "Accepted {} by {} (submitted by {}) at block {}: {}",
                submission.action, signed.actor, submission.submitter, receipt.block, receipt.digest
            ),
            Err(err) => debug!(
                "Rejected {} by {} (submitted by {}): {}",
                submission.action, signed.actor, submission.submitter, err
            ),
        }

        result
    }

    pub fn challenge(&mut self, signed: &SignedMove, now: u64) -> Result<MoveReceipt, DuelError> {
        self.submit(&Submission::direct(MoveKind::Challenge, signed.clone()), now)
    }

    pub fn defend(&mut self, signed: &SignedMove, now: u64) -> Result<MoveReceipt, DuelError> {
        self.submit(&Submission::direct(MoveKind::Defend, signed.clone()), now)
    }

    pub fn reveal_challenge(&mut self, signed: &SignedMove, now: u64) -> Result<MoveReceipt, DuelError> {
        self.submit(&Submission::direct(MoveKind::RevealChallenge, signed.clone()), now)
    }

    pub fn reveal_defend(&mut self, signed: &SignedMove, now: u64) -> Result<MoveReceipt, DuelError> {
        self.submit(&Submission::direct(MoveKind::RevealDefend, signed.clone()), now)
    }

    pub fn claim_winning(&mut self, signed: &SignedMove, now: u64) -> Result<MoveReceipt, DuelError> {
        self.submit(&Submission::direct(MoveKind::ClaimWinning, signed.clone()), now)
    }

    fn process(&mut self, submission: &Submission, now: u64) -> Result<MoveReceipt, DuelError> {
        let authorized = AuthorizedMove::authorize(&submission.signed, &self.game.last_state_hash)?;
        let actor = authorized.actor();
        let verdict = TurnArbiter::judge(&self.game, submission.action, &actor, now)?;
        let transition = self.prepare(verdict, authorized.payload())?;

        // Nothing below can fail
        let block = crate::chain::execution_height(now);
        let events = self.apply(transition, &authorized, now);

        self.game.last_state_hash = authorized.digest();
        self.history.push(MoveRecord {
            kind: submission.action,
            actor,
            submitter: submission.submitter,
            payload: authorized.payload().to_string(),
            prev_hash: authorized.prev_hash(),
            digest: authorized.digest(),
            block,
        });
        self.events.extend(events.iter().cloned());

        Ok(MoveReceipt {
            kind: submission.action,
            actor,
            digest: authorized.digest(),
            block,
            events,
        })
    }

    fn prepare(&self, verdict: Verdict, payload: &str) -> Result<Transition, DuelError> {
        Ok(match verdict {
            Verdict::SeatDefender => Transition::SeatDefender,
            Verdict::StartRound => Transition::StartRound(Self::parse_commitment(payload)?),
            Verdict::Defend => Transition::Defend(Self::parse_commitment(payload)?),
            Verdict::RevealChallenge => {
                self.check_reveal(Role::Challenger, payload)?;
                Transition::RevealChallenge
            }
            Verdict::RevealDefend => {
                self.check_reveal(Role::Defender, payload)?;
                let challenge_reveal = self
                    .game
                    .reveals
                    .get(Role::Challenger)
                    .ok_or(DuelError::MoveNotAllowed)?;
                Transition::RevealDefend {
                    winner: self.rule.judge(challenge_reveal, payload),
                }
            }
            Verdict::Conclude { winner, by_timeout } => Transition::Conclude { winner, by_timeout },
        })
    }

    fn parse_commitment(payload: &str) -> Result<Commitment, DuelError> {
        Commitment::from_payload(payload).ok_or(DuelError::MalformedCommitment)
    }

    fn check_reveal(&self, role: Role, payload: &str) -> Result<(), DuelError> {
        match self.game.commitments.get(role) {
            Some(commitment) if commitment.verify(payload.as_bytes()) => Ok(()),
            _ => Err(DuelError::RevealMismatch),
        }
    }

    fn apply(&mut self, transition: Transition, authorized: &AuthorizedMove<'_>, now: u64) -> Vec<DuelEvent> {
        let actor = authorized.actor();
        let game = &mut self.game;

        match transition {
            Transition::SeatDefender => {
                game.defender = actor;
                game.deadline_block = crate::chain::execution_height(now);
                info!("{} takes the empty hill", actor);
                vec![WinningEvent {
                    id: game.id,
                    round: game.round,
                    winner: actor,
                    announcer: actor,
                }
                .into()]
            }
            Transition::StartRound(commitment) => {
                game.challenger = actor;
                game.round += 1;
                game.phase = Phase::Started;
                game.commitments.clear();
                game.reveals.clear();
                game.winner = None;
                game.commitments.set(Role::Challenger, commitment);
                game.deadline_block = game.next_deadline(now);
                info!("Round {} started: {} challenges {}", game.round, actor, game.defender);
                vec![
                    StartEvent {
                        id: game.id,
                        round: game.round,
                        challenger: actor,
                        defender: game.defender,
                    }
                    .into(),
                    Self::update_event(game, Step::Challenge, actor),
                ]
            }
            Transition::Defend(commitment) => {
                game.commitments.set(Role::Defender, commitment);
                game.phase = Phase::Defended;
                game.deadline_block = game.next_deadline(now);
                vec![Self::update_event(game, Step::Defend, actor)]
            }
            Transition::RevealChallenge => {
                game.reveals.set(Role::Challenger, authorized.payload().to_string());
                game.phase = Phase::ChallengeRevealed;
                game.deadline_block = game.next_deadline(now);
                vec![Self::update_event(game, Step::RevealChallenge, actor)]
            }
            Transition::RevealDefend { winner } => {
                game.reveals.set(Role::Defender, authorized.payload().to_string());
                game.winner = Some(winner);
                game.phase = Phase::DefendRevealed;
                game.deadline_block = game.next_deadline(now);
                info!("Round {} decided: {} wins", game.round, winner);
                vec![Self::update_event(game, Step::RevealDefend, actor)]
            }
            Transition::Conclude { winner, by_timeout } => {
                let winner_address = game.address_of(winner);
                let event = WinningEvent {
                    id: game.id,
                    round: game.round,
                    winner: winner_address,
                    announcer: actor,
                };
                game.defender = winner_address;
                game.challenger = Address::NOBODY;
                game.commitments.clear();
                game.reveals.clear();
                game.winner = None;
                game.phase = Phase::Concluded;
                game.deadline_block = crate::chain::execution_height(now);
                info!(
                    "Round {} concluded: {} holds the hill{}",
                    game.round,
                    winner_address,
                    if by_timeout { " by timeout" } else { "" }
                );
                vec![event.into()]
            }
        }
    }

    fn update_event(game: &Game, step: Step, actor: Address) -> DuelEvent {
        UpdateStateEvent {
            id: game.id,
            round: game.round,
            step,
            actor,
            opponent: game.opponent(&actor),
            deadline_block: game.deadline_block,
        }
        .into()
    }

    // === Queries ===

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn id(&self) -> GameId {
        self.game.id
    }

    pub fn round(&self) -> u64 {
        self.game.round
    }

    pub fn phase(&self) -> Phase {
        self.game.phase
    }

    pub fn max_blocks_per_move(&self) -> u64 {
        self.game.max_blocks_per_move
    }

    pub fn defender(&self) -> Address {
        self.game.defender
    }

    pub fn challenger(&self) -> Address {
        self.game.challenger
    }

    pub fn last_state_hash(&self) -> Digest {
        self.game.last_state_hash
    }

    pub fn opponent(&self, address: &Address) -> Address {
        self.game.opponent(address)
    }

    /// Winner determined by the reveals of the current round, or `NOBODY`
    pub fn who_wins(&self) -> Address {
        self.game
            .winner
            .map(|role| self.game.address_of(role))
            .unwrap_or(Address::NOBODY)
    }

    /// Player entitled to claim a forced win at `now`, or `NOBODY`
    pub fn timeout_winner(&self, now: u64) -> Address {
        TurnArbiter::timeout_winner(&self.game, now)
            .map(|role| self.game.address_of(role))
            .unwrap_or(Address::NOBODY)
    }

    pub fn rule_name(&self) -> &'static str {
        self.rule.name()
    }

    /// Audit trail of every event emitted so far
    pub fn events(&self) -> &[DuelEvent] {
        &self.events
    }

    /// Hand the pending audit trail to an indexer
    pub fn drain_events(&mut self) -> Vec<DuelEvent> {
        std::mem::take(&mut self.events)
    }

    /// Log of accepted moves, in chain order
    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }
}

impl Default for DuelEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}
