//! X25519 keypairs derived from 32-byte seeds.

use std::fmt;

use zeroize::{Zeroize, Zeroizing};

use crate::core::{KxError, PUBLIC_KEY_SIZE, SECRET_KEY_SIZE, SEED_SIZE};
use crate::crypto::{dh, hash, random::random_array};

/// An X25519 public key. Not secret.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PublicKey([u8; PUBLIC_KEY_SIZE]);

impl PublicKey {
    /// Create from raw bytes.
    pub fn from_bytes(bytes: [u8; PUBLIC_KEY_SIZE]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub fn as_bytes(&self) -> &[u8; PUBLIC_KEY_SIZE] {
        &self.0
    }
}

impl TryFrom<&[u8]> for PublicKey {
    type Error = KxError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        let key: [u8; PUBLIC_KEY_SIZE] =
            bytes.try_into().map_err(|_| KxError::InvalidPublicKey {
                expected: PUBLIC_KEY_SIZE,
                actual: bytes.len(),
            })?;
        Ok(Self(key))
    }
}

impl AsRef<[u8]> for PublicKey {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// A long-term key exchange keypair.
///
/// The secret key is `BLAKE2b-256(seed)`, the public key `X25519(secret, basepoint)`,
/// matching libsodium `crypto_kx_seed_keypair`. The secret key is zeroized on drop.
#[derive(Clone)]
pub struct KeyPair {
    /// Secret key (32 bytes) - zeroized on drop
    secret: [u8; SECRET_KEY_SIZE],
    /// Public key (32 bytes)
    public: PublicKey,
}

impl KeyPair {
    /// Generate a new random keypair.
    pub fn generate() -> Result<Self, KxError> {
        let seed = Zeroizing::new(random_array::<SEED_SIZE>()?);
        Self::from_seed(&seed[..])
    }

    /// Derive a keypair deterministically from a 32-byte seed.
    ///
    /// The same seed always yields the same keypair.
    pub fn from_seed(seed: &[u8]) -> Result<Self, KxError> {
        if seed.len() != SEED_SIZE {
            return Err(KxError::InvalidSeed {
                expected: SEED_SIZE,
                actual: seed.len(),
            });
        }

        let secret = hash::blake2b_256(seed);
        let public = PublicKey(dh::scalar_mult_base(&secret));
        Ok(Self { secret, public })
    }

    /// Get the public key.
    pub fn public_key(&self) -> &PublicKey {
        &self.public
    }

    /// Get the secret key.
    ///
    /// # Security
    /// Handle with care - this exposes sensitive key material.
    pub fn secret_key(&self) -> &[u8; SECRET_KEY_SIZE] {
        &self.secret
    }
}

impl Drop for KeyPair {
    fn drop(&mut self) {
        self.secret.zeroize();
    }
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("public", &self.public)
            .finish_non_exhaustive()
    }
}
