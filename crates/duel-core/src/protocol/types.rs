//! Protocol types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Identifier of an engine instance
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameId(Uuid);

impl GameId {
    /// Create a new random game ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create from UUID
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Get the underlying UUID
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for GameId {
    fn default() -> Self {
        Self::new()
    }
}

impl FromStr for GameId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

impl fmt::Debug for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GameId({})", self.0)
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Seat a player occupies in a round
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Challenger,
    Defender,
}

impl Role {
    /// Get the opponent
    pub fn opponent(&self) -> Role {
        match self {
            Role::Challenger => Role::Defender,
            Role::Defender => Role::Challenger,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Challenger => write!(f, "challenger"),
            Role::Defender => write!(f, "defender"),
        }
    }
}

/// Phase of the current round
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// No round has ever started
    #[default]
    Empty,
    /// Challenger seated and committed, waiting for the defender
    Started,
    /// Both committed, waiting for the challenger's reveal
    Defended,
    /// Waiting for the defender's reveal
    ChallengeRevealed,
    /// Both revealed, winner determined but not yet claimed
    DefendRevealed,
    /// Last round claimed, waiting for the next challenger
    Concluded,
}

impl Phase {
    /// A round is running and someone owes a move
    pub fn is_live(&self) -> bool {
        matches!(
            self,
            Phase::Started | Phase::Defended | Phase::ChallengeRevealed
        )
    }

    /// Role whose move is awaited, if any
    pub fn turn(&self) -> Option<Role> {
        match self {
            Phase::Started | Phase::ChallengeRevealed => Some(Role::Defender),
            Phase::Defended => Some(Role::Challenger),
            Phase::Empty | Phase::DefendRevealed | Phase::Concluded => None,
        }
    }
}

/// Step number reported in state-update events
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Step {
    Challenge = 1,
    Defend = 2,
    RevealChallenge = 3,
    RevealDefend = 4,
    ClaimWinning = 5,
}

impl From<Step> for u8 {
    fn from(step: Step) -> u8 {
        step as u8
    }
}

impl TryFrom<u8> for Step {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Step::Challenge),
            2 => Ok(Step::Defend),
            3 => Ok(Step::RevealChallenge),
            4 => Ok(Step::RevealDefend),
            5 => Ok(Step::ClaimWinning),
            other => Err(format!("unknown step {}", other)),
        }
    }
}

/// Kind of move a signer can submit
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveKind {
    Challenge,
    Defend,
    #[serde(alias = "revealChallenge")]
    RevealChallenge,
    #[serde(alias = "revealDefend")]
    RevealDefend,
    #[serde(alias = "claimWinning")]
    ClaimWinning,
}

impl MoveKind {
    pub const ALL: [MoveKind; 5] = [
        MoveKind::Challenge,
        MoveKind::Defend,
        MoveKind::RevealChallenge,
        MoveKind::RevealDefend,
        MoveKind::ClaimWinning,
    ];

    pub fn step(&self) -> Step {
        match self {
            MoveKind::Challenge => Step::Challenge,
            MoveKind::Defend => Step::Defend,
            MoveKind::RevealChallenge => Step::RevealChallenge,
            MoveKind::RevealDefend => Step::RevealDefend,
            MoveKind::ClaimWinning => Step::ClaimWinning,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MoveKind::Challenge => "challenge",
            MoveKind::Defend => "defend",
            MoveKind::RevealChallenge => "reveal_challenge",
            MoveKind::RevealDefend => "reveal_defend",
            MoveKind::ClaimWinning => "claim_winning",
        }
    }
}

impl FromStr for MoveKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "challenge" => Ok(MoveKind::Challenge),
            "defend" => Ok(MoveKind::Defend),
            "reveal_challenge" | "reveal-challenge" | "revealChallenge" => {
                Ok(MoveKind::RevealChallenge)
            }
            "reveal_defend" | "reveal-defend" | "revealDefend" => Ok(MoveKind::RevealDefend),
            "claim_winning" | "claim-winning" | "claimWinning" => Ok(MoveKind::ClaimWinning),
            other => Err(format!("unknown move kind: {}", other)),
        }
    }
}

impl fmt::Display for MoveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One value per role
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seats<T> {
    pub challenger: Option<T>,
    pub defender: Option<T>,
}

impl<T> Seats<T> {
    pub fn get(&self, role: Role) -> Option<&T> {
        match role {
            Role::Challenger => self.challenger.as_ref(),
            Role::Defender => self.defender.as_ref(),
        }
    }

    pub fn set(&mut self, role: Role, value: T) {
        match role {
            Role::Challenger => self.challenger = Some(value),
            Role::Defender => self.defender = Some(value),
        }
    }

    pub fn clear(&mut self) {
        self.challenger = None;
        self.defender = None;
    }
}

impl<T> Default for Seats<T> {
    fn default() -> Self {
        Self {
            challenger: None,
            defender: None,
        }
    }
}
