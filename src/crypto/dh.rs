//! X25519 scalar multiplication.

use x25519_dalek::{PublicKey, StaticSecret};

use crate::core::{CryptoError, PUBLIC_KEY_SIZE, SECRET_KEY_SIZE, SHARED_SECRET_SIZE};

/// `secret · basepoint`. The scalar is clamped by the multiplication, not in place.
pub(crate) fn scalar_mult_base(secret: &[u8; SECRET_KEY_SIZE]) -> [u8; PUBLIC_KEY_SIZE] {
    let secret = StaticSecret::from(*secret);
    PublicKey::from(&secret).to_bytes()
}

/// `secret · public`, rejecting low-order peer points.
pub(crate) fn scalar_mult(
    secret: &[u8; SECRET_KEY_SIZE],
    public: &[u8; PUBLIC_KEY_SIZE],
) -> Result<[u8; SHARED_SECRET_SIZE], CryptoError> {
    let secret = StaticSecret::from(*secret);
    let shared = secret.diffie_hellman(&PublicKey::from(*public));
    if !shared.was_contributory() {
        return Err(CryptoError::LowOrderPoint);
    }
    Ok(shared.to_bytes())
}
