//! Recoverable (v, r, s) move signatures.
//!
//! Signatures are produced over the personal-message form of a state digest:
//!   keccak256("\x19Ethereum Signed Message:\n32" || digest)
//! so that standard wallet `signMessage` output verifies unchanged.

use super::{Address, Digest};
use secp256k1::ecdsa::{RecoverableSignature, RecoveryId};
use secp256k1::{Message, SECP256K1};
use serde::{Deserialize, Serialize};
use std::fmt;

const PERSONAL_MESSAGE_PREFIX: &[u8] = b"\x19Ethereum Signed Message:\n32";

/// Offset added to the recovery id in the `v` component
const V_OFFSET: u8 = 27;

/// Digest that is actually signed for a given state digest
pub fn personal_message_digest(digest: &Digest) -> Digest {
    let mut data = Vec::with_capacity(PERSONAL_MESSAGE_PREFIX.len() + 32);
    data.extend_from_slice(PERSONAL_MESSAGE_PREFIX);
    data.extend_from_slice(digest.as_bytes());
    Digest::of(&data)
}

/// Split secp256k1 signature with recovery byte
#[derive(Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveSignature {
    pub v: u8,
    #[serde(with = "super::hex_serde")]
    pub r: [u8; 32],
    #[serde(with = "super::hex_serde")]
    pub s: [u8; 32],
}

impl MoveSignature {
    pub fn new(v: u8, r: [u8; 32], s: [u8; 32]) -> Self {
        Self { v, r, s }
    }

    pub(crate) fn from_recoverable(sig: &RecoverableSignature) -> Self {
        let (recovery_id, compact) = sig.serialize_compact();
        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&compact[..32]);
        s.copy_from_slice(&compact[32..]);
        Self {
            v: V_OFFSET + recovery_id.to_i32() as u8,
            r,
            s,
        }
    }

    fn to_recoverable(self) -> Option<RecoverableSignature> {
        let recovery = self.v.checked_sub(V_OFFSET).filter(|id| *id <= 1)?;
        let recovery_id = RecoveryId::from_i32(i32::from(recovery)).ok()?;
        let mut compact = [0u8; 64];
        compact[..32].copy_from_slice(&self.r);
        compact[32..].copy_from_slice(&self.s);
        RecoverableSignature::from_compact(&compact, recovery_id).ok()
    }

    /// Recover the signer of `digest`; `None` for any malformed component
    pub fn recover(&self, digest: &Digest) -> Option<Address> {
        let sig = self.to_recoverable()?;
        let message = Message::from_digest(*personal_message_digest(digest).as_bytes());
        let public_key = SECP256K1.recover_ecdsa(&message, &sig).ok()?;
        Some(Address::from_public_key(&public_key))
    }
}

impl fmt::Debug for MoveSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "MoveSignature(v={}, r={}, s={})",
            self.v,
            hex::encode(&self.r[..8]),
            hex::encode(&self.s[..8])
        )
    }
}
