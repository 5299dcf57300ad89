//! Sending side of a secret stream.

use std::fmt;

use tracing::{debug, trace};

use crate::core::{StreamError, MESSAGE_MAX};

use super::{
    state::{ChunkState, RekeyCause},
    Header, StreamKey, StreamPhase, Tag,
};

/// Encrypts an ordered sequence of chunks.
///
/// `push` takes `&mut self`: one writer per stream.
pub struct Encryptor {
    state: ChunkState,
    phase: StreamPhase,
    chunks: u64,
}

impl Encryptor {
    /// Open a stream with a raw 32-byte key.
    ///
    /// Returns the encryptor and the header the peer needs to decrypt.
    pub fn new(key: &[u8]) -> Result<(Self, Header), StreamError> {
        let key = StreamKey::try_from(key)?;
        Self::with_key(&key)
    }

    /// Open a stream with a typed key and a fresh random header.
    pub fn with_key(key: &StreamKey) -> Result<(Self, Header), StreamError> {
        let header = Header::generate()?;
        Ok((Self::with_header(key, &header), header))
    }

    /// Open a stream with a caller-chosen header.
    ///
    /// A header must never be reused with the same key.
    pub(crate) fn with_header(key: &StreamKey, header: &Header) -> Self {
        debug!("secret stream opened for sending");
        Self {
            state: ChunkState::new(key, header),
            phase: StreamPhase::Initialized,
            chunks: 0,
        }
    }

    /// Encrypt one chunk.
    ///
    /// The output is `plaintext.len() + ABYTES` bytes.
    pub fn push(&mut self, plaintext: &[u8], tag: Tag) -> Result<Vec<u8>, StreamError> {
        self.push_with_ad(plaintext, &[], tag)
    }

    /// Encrypt one chunk, also authenticating `ad`.
    ///
    /// The receiver must pass the same `ad` to [`Decryptor::pull_with_ad`](super::Decryptor::pull_with_ad).
    pub fn push_with_ad(
        &mut self,
        plaintext: &[u8],
        ad: &[u8],
        tag: Tag,
    ) -> Result<Vec<u8>, StreamError> {
        self.phase.check_usable()?;

        let len = plaintext.len() as u64;
        if len > MESSAGE_MAX {
            return Err(StreamError::MessageTooLarge {
                len,
                max: MESSAGE_MAX,
            });
        }

        let step = self
            .state
            .seal(plaintext, ad, tag.as_byte())
            .and_then(|sealed| {
                let (next, cause) = self.state.ratcheted(&sealed.mac, tag.as_byte())?;
                Ok((sealed.chunk, next, cause))
            });
        let (chunk, next, cause) = match step {
            Ok(step) => step,
            Err(e) => {
                self.phase = StreamPhase::Failed;
                return Err(e.into());
            }
        };

        self.state = next;
        self.chunks += 1;
        self.phase = self.phase.after_chunk(tag);

        trace!(chunk = self.chunks, len, ?tag, "pushed chunk");
        if cause == Some(RekeyCause::CounterWrap) {
            debug!(chunk = self.chunks, "chunk counter wrapped, stream key ratcheted");
        }
        if tag.is_final() {
            debug!(chunks = self.chunks, "secret stream finalized for sending");
        }

        Ok(chunk)
    }

    /// Ratchet the key without emitting a chunk.
    ///
    /// The receiver must call [`Decryptor::rekey`](super::Decryptor::rekey) at the same position.
    pub fn rekey(&mut self) -> Result<(), StreamError> {
        self.phase.check_usable()?;
        match self.state.rekeyed() {
            Ok(next) => {
                self.state = next;
                self.phase = StreamPhase::Rekeyed;
                debug!(chunk = self.chunks, "explicit rekey on sending stream");
                Ok(())
            }
            Err(e) => {
                self.phase = StreamPhase::Failed;
                Err(e.into())
            }
        }
    }

    /// Current phase.
    pub fn phase(&self) -> StreamPhase {
        self.phase
    }

    /// Number of chunks pushed so far.
    pub fn chunks(&self) -> u64 {
        self.chunks
    }

    /// Close the sending side, reporting whether a FINAL chunk was pushed.
    pub fn finish(self) -> Result<(), StreamError> {
        match self.phase {
            StreamPhase::Finalized => Ok(()),
            StreamPhase::Failed => Err(StreamError::StreamFailed),
            _ => Err(StreamError::Truncated),
        }
    }
}

impl fmt::Debug for Encryptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Encryptor")
            .field("phase", &self.phase)
            .field("chunks", &self.chunks)
            .finish_non_exhaustive()
    }
}
