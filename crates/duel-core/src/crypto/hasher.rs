//! Chained state hashing and move-signature verification.

use super::{Address, Digest, MoveSignature};

/// Builds the move hash chain and checks signatures against it.
///
/// A move's digest is `keccak256(prev_hash || actor || payload)` with the
/// three fields tightly packed. The digest of each accepted move is the only
/// `prev_hash` the next move may carry.
pub struct StateHasher;

impl StateHasher {
    pub fn hash(prev_hash: &Digest, actor: &Address, payload: &[u8]) -> Digest {
        let mut data = Vec::with_capacity(32 + 20 + payload.len());
        data.extend_from_slice(prev_hash.as_bytes());
        data.extend_from_slice(actor.as_bytes());
        data.extend_from_slice(payload);
        Digest::of(&data)
    }

    /// True iff `signature` over `digest` was produced by `actor`'s key
    pub fn verify(digest: &Digest, actor: &Address, signature: &MoveSignature) -> bool {
        !actor.is_nobody() && signature.recover(digest) == Some(*actor)
    }
}
