//! # secret-channel
//!
//! Secure-channel primitives for two anonymous peers:
//!
//! - **Key exchange**: X25519 keypairs derived from 32-byte seeds, and a
//!   handshake that turns two static keys into a pair of directional session
//!   keys (libsodium `crypto_kx` compatible)
//! - **Secret streams**: a ratcheting XChaCha20-Poly1305 chunk codec that
//!   detects tampering, reordering, duplication and truncation (libsodium
//!   `crypto_secretstream_xchacha20poly1305` compatible)
//!
//! This crate is not a transport. It produces and consumes byte strings; moving
//! the public keys, the stream header and the chunks is up to the caller.
//!
//! ## Feature Flags
//!
//! - `kx` (default): key exchange (X25519 + BLAKE2b)
//! - `stream` (default): secret streams (ChaCha20 + Poly1305)
//!
//! ## Example
//!
//! ```rust
//! # #[cfg(all(feature = "kx", feature = "stream"))]
//! # fn main() -> Result<(), secret_channel::Error> {
//! use secret_channel::prelude::*;
//!
//! let client = KeyPair::generate()?;
//! let server = KeyPair::generate()?;
//!
//! // Public keys are exchanged over the untrusted channel.
//! let client_keys = client.client_session_keys(server.public_key())?;
//! let server_keys = server.server_session_keys(client.public_key())?;
//!
//! // Client -> server direction.
//! let (mut tx, header) = client_keys.encryptor()?;
//! let mut rx = server_keys.decryptor(&header);
//!
//! let chunk = tx.push(b"hello", Tag::Message)?;
//! let last = tx.push(b"bye", Tag::Final)?;
//!
//! assert_eq!(rx.pull(&chunk)?, (b"hello".to_vec(), Tag::Message));
//! assert_eq!(rx.pull(&last)?, (b"bye".to_vec(), Tag::Final));
//! rx.finish()?;
//! # Ok(())
//! # }
//! # #[cfg(not(all(feature = "kx", feature = "stream")))]
//! # fn main() {}
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

// Constants and errors (always included)
pub mod core;

// Primitive adapters
mod crypto;

// Key exchange (feature-gated)
#[cfg(feature = "kx")]
#[cfg_attr(docsrs, doc(cfg(feature = "kx")))]
pub mod kx;

// Secret streams (feature-gated)
#[cfg(feature = "stream")]
#[cfg_attr(docsrs, doc(cfg(feature = "stream")))]
pub mod stream;

#[cfg(test)]
mod proptests;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::core::{CryptoError, Error, KxError, StreamError};

    #[cfg(feature = "kx")]
    pub use crate::kx::{KeyPair, PublicKey, Role, SessionKeys};

    #[cfg(feature = "stream")]
    pub use crate::stream::{Decryptor, Encryptor, Header, StreamKey, StreamPhase, Tag};
}

// Re-export commonly used items at crate root
pub use crate::core::{CryptoError, Error, KxError, StreamError};

#[cfg(feature = "kx")]
pub use kx::{KeyPair, PublicKey, SessionKeys};

#[cfg(feature = "stream")]
pub use stream::{Decryptor, Encryptor, Header, StreamKey, Tag};
