//! Cryptographic gate every move passes before any legality check.

use super::DuelError;
use crate::crypto::{Address, Digest, StateHasher};
use crate::protocol::SignedMove;

/// A move whose signature and chain position have been checked
#[derive(Debug)]
pub struct AuthorizedMove<'a> {
    signed: &'a SignedMove,
    digest: Digest,
}

impl<'a> AuthorizedMove<'a> {
    /// Verify `signed` against the engine's current `last_state_hash`.
    ///
    /// The signature is checked first and independently of game state, so a
    /// forged move is reported as such even when it is also stale.
    pub fn authorize(signed: &'a SignedMove, last_state_hash: &Digest) -> Result<Self, DuelError> {
        let digest = signed.digest();

        if !StateHasher::verify(&digest, &signed.actor, &signed.signature) {
            return Err(DuelError::SignatureInvalid);
        }

        if signed.prev_hash != *last_state_hash {
            return Err(DuelError::StaleOrReplayedMove {
                expected: *last_state_hash,
                got: signed.prev_hash,
            });
        }

        Ok(Self { signed, digest })
    }

    pub fn actor(&self) -> Address {
        self.signed.actor
    }

    pub fn payload(&self) -> &str {
        &self.signed.payload
    }

    pub fn prev_hash(&self) -> Digest {
        self.signed.prev_hash
    }

    /// Becomes the engine's `last_state_hash` once the move is applied
    pub fn digest(&self) -> Digest {
        self.digest
    }
}
