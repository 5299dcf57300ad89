//! Receiving side of a secret stream.

use std::fmt;

use tracing::{debug, trace, warn};

use crate::core::StreamError;

use super::{
    state::{ChunkState, RekeyCause},
    Header, StreamKey, StreamPhase, Tag,
};

/// Decrypts and authenticates an ordered sequence of chunks.
///
/// Any authentication failure is terminal: the stream moves to
/// [`StreamPhase::Failed`] and rejects every later call.
pub struct Decryptor {
    state: ChunkState,
    phase: StreamPhase,
    chunks: u64,
}

impl Decryptor {
    /// Open the receiving side from a raw key and the sender's header.
    pub fn new(key: &[u8], header: &[u8]) -> Result<Self, StreamError> {
        let key = StreamKey::try_from(key)?;
        let header = Header::try_from(header)?;
        Ok(Self::with_key(&key, &header))
    }

    /// Open the receiving side from typed values.
    pub fn with_key(key: &StreamKey, header: &Header) -> Self {
        debug!("secret stream opened for receiving");
        Self {
            state: ChunkState::new(key, header),
            phase: StreamPhase::Initialized,
            chunks: 0,
        }
    }

    /// Decrypt one chunk, returning its plaintext and tag.
    pub fn pull(&mut self, chunk: &[u8]) -> Result<(Vec<u8>, Tag), StreamError> {
        self.pull_with_ad(chunk, &[])
    }

    /// Decrypt one chunk that was pushed with associated data `ad`.
    pub fn pull_with_ad(&mut self, chunk: &[u8], ad: &[u8]) -> Result<(Vec<u8>, Tag), StreamError> {
        self.phase.check_usable()?;

        let (plaintext, tag, next, cause) = match self.open(chunk, ad) {
            Ok(step) => step,
            Err(e) => {
                warn!(chunk = self.chunks + 1, error = %e, "secret stream failed");
                self.phase = StreamPhase::Failed;
                return Err(e);
            }
        };

        self.state = next;
        self.chunks += 1;
        self.phase = self.phase.after_chunk(tag);

        trace!(chunk = self.chunks, len = plaintext.len(), ?tag, "pulled chunk");
        if cause == Some(RekeyCause::CounterWrap) {
            debug!(chunk = self.chunks, "chunk counter wrapped, stream key ratcheted");
        }
        if tag.is_final() {
            debug!(chunks = self.chunks, "secret stream finalized for receiving");
        }

        Ok((plaintext, tag))
    }

    #[allow(clippy::type_complexity)]
    fn open(
        &self,
        chunk: &[u8],
        ad: &[u8],
    ) -> Result<(Vec<u8>, Tag, ChunkState, Option<RekeyCause>), StreamError> {
        let opened = self.state.open(chunk, ad)?;
        let tag = Tag::try_from(opened.tag)?;
        let (next, cause) = self.state.ratcheted(&opened.mac, opened.tag)?;
        Ok((opened.plaintext, tag, next, cause))
    }

    /// Ratchet the key without consuming a chunk, mirroring [`Encryptor::rekey`](super::Encryptor::rekey).
    pub fn rekey(&mut self) -> Result<(), StreamError> {
        self.phase.check_usable()?;
        match self.state.rekeyed() {
            Ok(next) => {
                self.state = next;
                self.phase = StreamPhase::Rekeyed;
                debug!(chunk = self.chunks, "explicit rekey on receiving stream");
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

    /// Number of chunks pulled so far.
    pub fn chunks(&self) -> u64 {
        self.chunks
    }

    /// Whether a FINAL chunk has been pulled.
    pub fn is_finalized(&self) -> bool {
        self.phase == StreamPhase::Finalized
    }

    /// Call at end of input. Errors with [`StreamError::Truncated`] unless the
    /// stream ended with a FINAL chunk.
    pub fn finish(self) -> Result<(), StreamError> {
        match self.phase {
            StreamPhase::Finalized => Ok(()),
            StreamPhase::Failed => Err(StreamError::StreamFailed),
            _ => {
                warn!(chunks = self.chunks, "secret stream ended without a final chunk");
                Err(StreamError::Truncated)
            }
        }
    }
}

impl fmt::Debug for Decryptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Decryptor")
            .field("phase", &self.phase)
            .field("chunks", &self.chunks)
            .finish_non_exhaustive()
    }
}
