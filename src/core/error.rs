//! Error types for the key exchange and secret stream layers.

use thiserror::Error;

/// Errors raised by the underlying primitives.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CryptoError {
    /// The operating system random source failed.
    #[error("random source unavailable: {0}")]
    RandomSource(String),

    /// Peer public key is a low-order point (all-zero shared secret).
    #[error("peer public key is a low-order point")]
    LowOrderPoint,

    /// ChaCha20 keystream position out of range.
    #[error("chacha20 keystream exhausted")]
    KeystreamExhausted,
}

/// Errors in the key exchange layer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum KxError {
    /// Seed has the wrong length.
    #[error("invalid seed: expected {expected} bytes, got {actual}")]
    InvalidSeed {
        /// Expected length.
        expected: usize,
        /// Actual length.
        actual: usize,
    },

    /// Public key has the wrong length.
    #[error("invalid public key: expected {expected} bytes, got {actual}")]
    InvalidPublicKey {
        /// Expected length.
        expected: usize,
        /// Actual length.
        actual: usize,
    },

    /// Primitive error.
    #[error("crypto error: {0}")]
    Crypto(#[from] CryptoError),
}

/// Errors in the secret stream layer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StreamError {
    /// Stream key has the wrong length.
    #[error("invalid key: expected {expected} bytes, got {actual}")]
    InvalidKey {
        /// Expected length.
        expected: usize,
        /// Actual length.
        actual: usize,
    },

    /// Stream header has the wrong length.
    #[error("invalid header: expected {expected} bytes, got {actual}")]
    InvalidHeader {
        /// Expected length.
        expected: usize,
        /// Actual length.
        actual: usize,
    },

    /// Plaintext exceeds the per-chunk limit.
    #[error("message too large: {len} bytes (max {max})")]
    MessageTooLarge {
        /// Plaintext length.
        len: u64,
        /// Maximum accepted length.
        max: u64,
    },

    /// Chunk failed authentication (tampered, wrong key, or out of order).
    #[error("chunk authentication failed")]
    AuthenticationFailed,

    /// Chunk authenticated but carries a tag outside the known set.
    #[error("unknown chunk tag: {0:#04x}")]
    UnknownTag(u8),

    /// The stream already processed a FINAL chunk.
    #[error("stream already closed")]
    StreamAlreadyClosed,

    /// The stream previously failed and cannot be used.
    #[error("stream failed, create a new one")]
    StreamFailed,

    /// The stream ended before a FINAL chunk.
    #[error("stream truncated before final chunk")]
    Truncated,

    /// Primitive error.
    #[error("crypto error: {0}")]
    Crypto(#[from] CryptoError),
}

/// Top-level errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// Key exchange error.
    #[error("key exchange error: {0}")]
    Kx(#[from] KxError),

    /// Secret stream error.
    #[error("secret stream error: {0}")]
    Stream(#[from] StreamError),
}
