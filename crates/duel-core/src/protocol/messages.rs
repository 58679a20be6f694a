//! Protocol messages.

use crate::crypto::{Address, Digest, MoveSignature, Signer, StateHasher};
use crate::protocol::MoveKind;
use serde::{Deserialize, Serialize};

/// A move as authorized by its signer
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedMove {
    pub prev_hash: Digest,
    pub actor: Address,
    #[serde(default)]
    pub payload: String,
    pub signature: MoveSignature,
}

impl SignedMove {
    /// Chain `payload` onto `prev_hash` and sign it with `signer`
    pub fn sign(signer: &Signer, prev_hash: Digest, payload: impl Into<String>) -> Self {
        let payload = payload.into();
        let actor = signer.address();
        let digest = StateHasher::hash(&prev_hash, &actor, payload.as_bytes());
        Self {
            prev_hash,
            actor,
            payload,
            signature: signer.sign_digest(&digest),
        }
    }

    /// Digest this move contributes to the chain
    pub fn digest(&self) -> Digest {
        StateHasher::hash(&self.prev_hash, &self.actor, self.payload.as_bytes())
    }
}

/// A signed move as delivered by whoever paid to submit it
///
/// `submitter` is recorded for auditing only; every authorization decision
/// binds to `signed.actor`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    pub submitter: Address,
    pub action: MoveKind,
    pub signed: SignedMove,
}

impl Submission {
    pub fn new(submitter: Address, action: MoveKind, signed: SignedMove) -> Self {
        Self {
            submitter,
            action,
            signed,
        }
    }

    /// Submission sent by the signer itself
    pub fn direct(action: MoveKind, signed: SignedMove) -> Self {
        Self::new(signed.actor, action, signed)
    }
}

/// Entry in the public log of accepted moves
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub kind: MoveKind,
    pub actor: Address,
    pub submitter: Address,
    pub payload: String,
    pub prev_hash: Digest,
    pub digest: Digest,
    /// Height the move executed at
    pub block: u64,
}

/// Re-derive the last state hash from a move log, starting at the zero seed
pub fn chain_digest<'a>(records: impl IntoIterator<Item = &'a MoveRecord>) -> Digest {
    records.into_iter().fold(Digest::ZERO, |prev, record| {
        StateHasher::hash(&prev, &record.actor, record.payload.as_bytes())
    })
}
