//! Commitment for the commit-reveal steps.

use super::Digest;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Commitment = keccak256(revealed value)
///
/// Travels inside commit payloads as a `0x`-prefixed hex string.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Commitment(Digest);

impl Commitment {
    /// Commit to a value
    pub fn new(value: &[u8]) -> Self {
        Self(Digest::of(value))
    }

    pub fn from_digest(digest: Digest) -> Self {
        Self(digest)
    }

    pub fn as_digest(&self) -> &Digest {
        &self.0
    }

    /// Parse a commit payload; `None` unless it is exactly 32 hex-encoded bytes
    pub fn from_payload(payload: &str) -> Option<Self> {
        if !payload.starts_with("0x") && !payload.starts_with("0X") {
            return None;
        }
        payload.parse().ok().map(Self)
    }

    /// Payload form of this commitment
    pub fn to_payload(&self) -> String {
        self.0.to_hex()
    }

    /// Verify that the given value produces this commitment
    pub fn verify(&self, value: &[u8]) -> bool {
        *self == Self::new(value)
    }
}

impl fmt::Debug for Commitment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Commitment({})", hex::encode(&self.0.as_bytes()[..8]))
    }
}

impl fmt::Display for Commitment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commitment_verification() {
        let commitment = Commitment::new(b"1");

        assert!(commitment.verify(b"1"));
        assert!(!commitment.verify(b"0"));
    }

    #[test]
    fn test_payload_roundtrip() {
        let commitment = Commitment::new(b"Rock");
        let payload = commitment.to_payload();

        assert!(payload.starts_with("0x"));
        assert_eq!(Commitment::from_payload(&payload), Some(commitment));
    }

    #[test]
    fn test_malformed_payloads() {
        assert_eq!(Commitment::from_payload(""), None);
        assert_eq!(Commitment::from_payload("1"), None);
        assert_eq!(Commitment::from_payload("0x1234"), None);
        // 32 bytes without the prefix is a plain value, not a commitment
        assert_eq!(Commitment::from_payload(&"ab".repeat(32)), None);
    }
}
