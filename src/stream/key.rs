//! Stream keys and headers.

use std::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::core::{
    CryptoError, StreamError, HCHACHA_INPUT_SIZE, HEADER_SIZE, INNER_NONCE_SIZE, STREAM_KEY_SIZE,
};
use crate::crypto::random::random_array;

/// Symmetric key for one stream direction.
///
/// Zeroized on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct StreamKey([u8; STREAM_KEY_SIZE]);

impl StreamKey {
    /// Generate a new random stream key.
    pub fn generate() -> Result<Self, CryptoError> {
        Ok(Self(random_array()?))
    }

    /// Create a stream key from raw bytes.
    pub fn from_bytes(bytes: [u8; STREAM_KEY_SIZE]) -> Self {
        Self(bytes)
    }

    /// Get the raw key bytes.
    ///
    /// # Security
    /// Handle with care - this exposes sensitive key material.
    pub fn as_bytes(&self) -> &[u8; STREAM_KEY_SIZE] {
        &self.0
    }
}

impl TryFrom<&[u8]> for StreamKey {
    type Error = StreamError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        let key: [u8; STREAM_KEY_SIZE] =
            bytes.try_into().map_err(|_| StreamError::InvalidKey {
                expected: STREAM_KEY_SIZE,
                actual: bytes.len(),
            })?;
        Ok(Self(key))
    }
}

impl fmt::Debug for StreamKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("StreamKey(..)")
    }
}

/// Public value that opens a stream.
///
/// Layout:
/// ```text
/// [ hchacha20 input (16) | initial inner nonce (8) ]
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Header([u8; HEADER_SIZE]);

impl Header {
    /// Generate a fresh random header.
    pub fn generate() -> Result<Self, CryptoError> {
        Ok(Self(random_array()?))
    }

    /// Create from raw bytes.
    pub fn from_bytes(bytes: [u8; HEADER_SIZE]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub fn as_bytes(&self) -> &[u8; HEADER_SIZE] {
        &self.0
    }

    pub(crate) fn hchacha_input(&self) -> [u8; HCHACHA_INPUT_SIZE] {
        let mut input = [0u8; HCHACHA_INPUT_SIZE];
        input.copy_from_slice(&self.0[..HCHACHA_INPUT_SIZE]);
        input
    }

    pub(crate) fn inner_nonce(&self) -> [u8; INNER_NONCE_SIZE] {
        let mut nonce = [0u8; INNER_NONCE_SIZE];
        nonce.copy_from_slice(&self.0[HCHACHA_INPUT_SIZE..]);
        nonce
    }
}

impl TryFrom<&[u8]> for Header {
    type Error = StreamError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        let header: [u8; HEADER_SIZE] =
            bytes.try_into().map_err(|_| StreamError::InvalidHeader {
                expected: HEADER_SIZE,
                actual: bytes.len(),
            })?;
        Ok(Self(header))
    }
}

impl AsRef<[u8]> for Header {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}
