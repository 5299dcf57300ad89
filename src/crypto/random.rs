//! Operating system randomness.

use rand::{rngs::OsRng, RngCore};

use crate::core::CryptoError;

/// Fill `buf` from the OS CSPRNG, surfacing failures instead of panicking.
pub(crate) fn fill_random(buf: &mut [u8]) -> Result<(), CryptoError> {
    OsRng
        .try_fill_bytes(buf)
        .map_err(|e| CryptoError::RandomSource(e.to_string()))
}

/// Draw a fresh random array.
pub(crate) fn random_array<const N: usize>() -> Result<[u8; N], CryptoError> {
    let mut out = [0u8; N];
    fill_random(&mut out)?;
    Ok(out)
}
