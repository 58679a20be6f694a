//! Request and response bodies for the relay API.

use duel_core::{
    protocol::MoveRecord, Address, Digest, DuelEvent, MoveKind, MoveReceipt, MoveSignature,
    SignedMove,
};
use serde::{Deserialize, Serialize};

/// Signed move as posted by a client.
///
/// The signature travels flattened as `v`, `r`, `s` next to the signed fields.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct MoveRequest {
    /// Required on `/duel/move`, implied by the path everywhere else
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<MoveKind>,
    pub prev_hash: Digest,
    pub actor: Address,
    #[serde(default)]
    pub payload: String,
    #[serde(flatten)]
    pub signature: MoveSignature,
}

impl MoveRequest {
    pub fn into_signed(self) -> SignedMove {
        SignedMove {
            prev_hash: self.prev_hash,
            actor: self.actor,
            payload: self.payload,
            signature: self.signature,
        }
    }
}

impl From<SignedMove> for MoveRequest {
    fn from(signed: SignedMove) -> Self {
        Self {
            action: None,
            prev_hash: signed.prev_hash,
            actor: signed.actor,
            payload: signed.payload,
            signature: signed.signature,
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct MoveResponse {
    pub action: MoveKind,
    pub actor: Address,
    pub digest: Digest,
    pub last_state_hash: Digest,
    pub block: u64,
    pub events: Vec<DuelEvent>,
}

impl MoveResponse {
    pub fn new(receipt: MoveReceipt, last_state_hash: Digest) -> Self {
        Self {
            action: receipt.kind,
            actor: receipt.actor,
            digest: receipt.digest,
            last_state_hash,
            block: receipt.block,
            events: receipt.events,
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct WinnerResponse {
    /// Winner determined by the reveals of the current round
    pub winner: Address,
    /// Party entitled to claim because the mover ran out of blocks
    pub timeout_winner: Address,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct HistoryResponse {
    pub history: Vec<MoveRecord>,
    /// Hash chain re-derived from `history`
    pub derived_hash: Digest,
}

#[derive(Debug, Deserialize)]
pub struct MineRequest {
    #[serde(default = "one_block")]
    pub blocks: u64,
}

fn one_block() -> u64 {
    1
}

#[derive(Debug, Deserialize, Serialize)]
pub struct HeightResponse {
    pub height: u64,
}
