//! The singleton game record.

use crate::chain::execution_height;
use crate::crypto::{Address, Commitment, Digest};
use crate::protocol::{GameId, Phase, Role, Seats};
use serde::Serialize;

/// State of the hill, reused across rounds
#[derive(Clone, Debug, Serialize)]
pub struct Game {
    pub id: GameId,
    pub round: u64,
    pub defender: Address,
    pub challenger: Address,
    pub phase: Phase,
    pub last_state_hash: Digest,
    pub deadline_block: u64,
    pub max_blocks_per_move: u64,
    pub commitments: Seats<Commitment>,
    pub reveals: Seats<String>,
    /// Set once both reveals are in
    pub winner: Option<Role>,
}

impl Game {
    pub fn new(id: GameId, max_blocks_per_move: u64) -> Self {
        Self {
            id,
            round: 0,
            defender: Address::NOBODY,
            challenger: Address::NOBODY,
            phase: Phase::Empty,
            last_state_hash: Digest::ZERO,
            deadline_block: 0,
            max_blocks_per_move,
            commitments: Seats::default(),
            reveals: Seats::default(),
            winner: None,
        }
    }

    /// Seat held by `address`, if any
    pub fn role_of(&self, address: &Address) -> Option<Role> {
        if address.is_nobody() {
            None
        } else if *address == self.defender {
            Some(Role::Defender)
        } else if *address == self.challenger {
            Some(Role::Challenger)
        } else {
            None
        }
    }

    pub fn address_of(&self, role: Role) -> Address {
        match role {
            Role::Challenger => self.challenger,
            Role::Defender => self.defender,
        }
    }

    /// The other seated player, or `NOBODY` for outsiders
    pub fn opponent(&self, address: &Address) -> Address {
        match self.role_of(address) {
            Some(role) => self.address_of(role.opponent()),
            None => Address::NOBODY,
        }
    }

    /// A move processed while the head is at `now` comes after the deadline
    pub fn is_elapsed(&self, now: u64) -> bool {
        execution_height(now) > self.deadline_block
    }

    /// Deadline for the move following one processed at `now`
    pub fn next_deadline(&self, now: u64) -> u64 {
        execution_height(now).saturating_add(self.max_blocks_per_move)
    }
}
