//! Secret streams: ordered, tagged, authenticated chunks.
//!
//! Wire-compatible with libsodium `crypto_secretstream_xchacha20poly1305`.
//!
//! - Header: [`HEADER_SIZE`](crate::core::HEADER_SIZE) = 24 bytes, sent once before the first chunk
//! - Chunk: plaintext length + [`ABYTES`](crate::core::ABYTES) = 17 bytes
//!   (1 encrypted tag byte, 16 byte Poly1305 MAC)
//!
//! Every chunk ratchets the state, so a chunk only decrypts at its original
//! position in the stream. A receiver that reaches end of input without a
//! [`Tag::Final`] chunk must treat the stream as truncated
//! ([`Decryptor::finish`]).

mod key;
mod pull;
mod push;
mod state;
mod tag;

pub use key::*;
pub use pull::*;
pub use push::*;
pub use tag::*;

use crate::core::StreamError;

/// Lifecycle of one stream direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StreamPhase {
    /// No chunk processed yet.
    Initialized,
    /// Last chunk was a MESSAGE or PUSH chunk.
    Streaming,
    /// Key was just ratcheted by a REKEY chunk or an explicit rekey.
    Rekeyed,
    /// A FINAL chunk was processed; no further chunks accepted.
    Finalized,
    /// A chunk failed; the stream is unusable.
    Failed,
}

impl StreamPhase {
    fn check_usable(self) -> Result<(), StreamError> {
        match self {
            StreamPhase::Finalized => Err(StreamError::StreamAlreadyClosed),
            StreamPhase::Failed => Err(StreamError::StreamFailed),
            _ => Ok(()),
        }
    }

    fn after_chunk(self, tag: Tag) -> Self {
        match tag {
            Tag::Message | Tag::Push => StreamPhase::Streaming,
            Tag::Rekey => StreamPhase::Rekeyed,
            Tag::Final => StreamPhase::Finalized,
        }
    }
}

/// Generate a random stream key.
pub fn new_stream_key() -> Result<StreamKey, crate::core::CryptoError> {
    StreamKey::generate()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closed_phases_reject() {
        assert_eq!(
            StreamPhase::Finalized.check_usable(),
            Err(StreamError::StreamAlreadyClosed)
        );
        assert_eq!(StreamPhase::Failed.check_usable(), Err(StreamError::StreamFailed));
        for phase in [
            StreamPhase::Initialized,
            StreamPhase::Streaming,
            StreamPhase::Rekeyed,
        ] {
            assert!(phase.check_usable().is_ok());
        }
    }

    #[test]
    fn test_after_chunk() {
        let p = StreamPhase::Initialized;
        assert_eq!(p.after_chunk(Tag::Message), StreamPhase::Streaming);
        assert_eq!(p.after_chunk(Tag::Push), StreamPhase::Streaming);
        assert_eq!(p.after_chunk(Tag::Rekey), StreamPhase::Rekeyed);
        assert_eq!(p.after_chunk(Tag::Final), StreamPhase::Finalized);
    }

    #[test]
    fn test_new_stream_key() {
        let a = new_stream_key().unwrap();
        let b = new_stream_key().unwrap();
        assert_ne!(a.as_bytes(), b.as_bytes());
    }
}
