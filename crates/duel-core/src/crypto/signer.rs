//! Local key holder that signs moves.

use super::{Address, Digest, MoveSignature};
use secp256k1::{Message, PublicKey, SecretKey, SECP256K1};
use std::fmt;

/// A secp256k1 key pair able to sign state digests
#[derive(Clone)]
pub struct Signer {
    secret_key: SecretKey,
    address: Address,
}

impl Signer {
    /// Generate a new random key
    pub fn random() -> Self {
        let secret_key = SecretKey::new(&mut rand::thread_rng());
        Self::from_secret_key(secret_key)
    }

    pub fn from_secret_key(secret_key: SecretKey) -> Self {
        let public_key = PublicKey::from_secret_key(SECP256K1, &secret_key);
        Self {
            secret_key,
            address: Address::from_public_key(&public_key),
        }
    }

    /// Load from 32 raw secret bytes
    pub fn from_secret_bytes(bytes: &[u8]) -> Result<Self, secp256k1::Error> {
        Ok(Self::from_secret_key(SecretKey::from_slice(bytes)?))
    }

    pub fn address(&self) -> Address {
        self.address
    }

    /// Sign the personal-message form of `digest`
    pub fn sign_digest(&self, digest: &Digest) -> MoveSignature {
        let hashed = super::signature::personal_message_digest(digest);
        let message = Message::from_digest(*hashed.as_bytes());
        let sig = SECP256K1.sign_ecdsa_recoverable(&message, &self.secret_key);
        MoveSignature::from_recoverable(&sig)
    }
}

impl fmt::Debug for Signer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Signer({})", self.address)
    }
}
