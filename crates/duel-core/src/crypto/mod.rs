//! Cryptographic primitives for the duel protocol.
//!
//! This module provides:
//! - Digest and the Keccak-256 state hasher for the move hash chain
//! - Address derivation from secp256k1 public keys
//! - Recoverable (v, r, s) move signatures and a local Signer
//! - Commitment for the commit-reveal steps

mod address;
mod commitment;
mod digest;
mod hasher;
mod signature;
mod signer;

pub use address::Address;
pub use commitment::Commitment;
pub use digest::{keccak256, Digest};
pub use hasher::StateHasher;
pub use signature::MoveSignature;
pub use signer::Signer;

/// Error parsing a hex-encoded primitive
#[derive(Debug, thiserror::Error)]
pub enum HexError {
    #[error("invalid hex: {0}")]
    Invalid(#[from] hex::FromHexError),

    #[error("expected {expected} bytes, got {got}")]
    Length { expected: usize, got: usize },
}

/// Decode an optionally `0x`-prefixed hex string into a fixed-size array
pub(crate) fn decode_fixed<const N: usize>(s: &str) -> Result<[u8; N], HexError> {
    let stripped = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s);
    let bytes = hex::decode(stripped)?;
    if bytes.len() != N {
        return Err(HexError::Length {
            expected: N,
            got: bytes.len(),
        });
    }
    let mut arr = [0u8; N];
    arr.copy_from_slice(&bytes);
    Ok(arr)
}

/// Serde helpers shared by the `0x`-hex newtypes
pub(crate) mod hex_serde {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer, const N: usize>(bytes: &[u8; N], s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&format!("0x{}", hex::encode(bytes)))
    }

    pub fn deserialize<'de, D: Deserializer<'de>, const N: usize>(d: D) -> Result<[u8; N], D::Error> {
        let hex_str = String::deserialize(d)?;
        super::decode_fixed(&hex_str).map_err(serde::de::Error::custom)
    }
}
