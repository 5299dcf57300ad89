//! Ratchet state shared by both stream directions.
//!
//! The state is a ChaCha20 key plus a 12-byte IETF nonce:
//!
//! ```text
//! [ counter (4, LE) | inner nonce (8) ]
//! ```
//!
//! Each chunk `c` under state `(k, n)`:
//!
//! ```text
//! poly_key = ChaCha20(k, n, block 0)[0..32]
//! block    = ChaCha20(k, n, block 1) ^ [tag, 0 x 63]
//! c        = ChaCha20(k, n, block 2..) ^ plaintext
//! mac      = Poly1305(poly_key, ad | pad16(ad) | block | c | pad(c) | le64(|ad|) | le64(64 + |c|))
//! chunk    = block[0] | c | mac
//! ```
//!
//! then `inner ^= mac[0..8]`, `counter += 1`, and the key is rekeyed when the tag
//! has the REKEY bit or the counter wraps to zero.

use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::core::{
    CryptoError, StreamError, ABYTES, CHACHA_BLOCK_SIZE, CHACHA_NONCE_SIZE, COUNTER_SIZE, MAC_SIZE,
    STREAM_KEY_SIZE, TAG_REKEY,
};
use crate::crypto::cipher::{hchacha20, verify_mac, xor_keystream, Poly1305Writer};

use super::{Header, StreamKey};

/// Why the key was ratcheted after a chunk.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum RekeyCause {
    /// The chunk tag carried the REKEY bit.
    Tagged,
    /// The 32-bit chunk counter wrapped to zero.
    CounterWrap,
}

/// A sealed chunk and the MAC that drives the ratchet.
pub(crate) struct Sealed {
    pub(crate) chunk: Vec<u8>,
    pub(crate) mac: [u8; MAC_SIZE],
}

/// An authenticated, decrypted chunk.
pub(crate) struct Opened {
    pub(crate) plaintext: Vec<u8>,
    pub(crate) tag: u8,
    pub(crate) mac: [u8; MAC_SIZE],
}

/// Key and nonce for the next chunk.
///
/// Zeroized on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub(crate) struct ChunkState {
    key: [u8; STREAM_KEY_SIZE],
    nonce: [u8; CHACHA_NONCE_SIZE],
}

impl ChunkState {
    /// Derive the initial state from a stream key and header.
    pub(crate) fn new(key: &StreamKey, header: &Header) -> Self {
        let mut nonce = [0u8; CHACHA_NONCE_SIZE];
        nonce[..COUNTER_SIZE].copy_from_slice(&1u32.to_le_bytes());
        nonce[COUNTER_SIZE..].copy_from_slice(&header.inner_nonce());

        Self {
            key: hchacha20(key.as_bytes(), &header.hchacha_input()),
            nonce,
        }
    }

    fn counter(&self) -> u32 {
        u32::from_le_bytes([self.nonce[0], self.nonce[1], self.nonce[2], self.nonce[3]])
    }

    /// Encrypt and authenticate one chunk. Does not advance the state.
    pub(crate) fn seal(&self, plaintext: &[u8], ad: &[u8], tag: u8) -> Result<Sealed, CryptoError> {
        let mut block = Zeroizing::new([0u8; CHACHA_BLOCK_SIZE]);
        block[0] = tag;
        xor_keystream(&self.key, &self.nonce, 1, &mut block[..])?;

        let mut chunk = Vec::with_capacity(plaintext.len() + ABYTES);
        chunk.push(block[0]);
        chunk.extend_from_slice(plaintext);
        xor_keystream(&self.key, &self.nonce, 2, &mut chunk[1..])?;

        let mac = self.authenticate(ad, &block, &chunk[1..])?;
        chunk.extend_from_slice(&mac);

        Ok(Sealed { chunk, mac })
    }

    /// Verify and decrypt one chunk. Does not advance the state.
    ///
    /// The MAC is checked before any plaintext is produced.
    pub(crate) fn open(&self, chunk: &[u8], ad: &[u8]) -> Result<Opened, StreamError> {
        if chunk.len() < ABYTES {
            return Err(StreamError::AuthenticationFailed);
        }
        let (ciphertext, received_mac) = chunk[1..].split_at(chunk.len() - ABYTES);

        let mut block = Zeroizing::new([0u8; CHACHA_BLOCK_SIZE]);
        block[0] = chunk[0];
        xor_keystream(&self.key, &self.nonce, 1, &mut block[..])?;
        let tag = block[0];
        // The MAC covers the encrypted tag byte, not the decrypted one
        block[0] = chunk[0];

        let mac = self.authenticate(ad, &block, ciphertext)?;
        if !verify_mac(&mac, received_mac) {
            return Err(StreamError::AuthenticationFailed);
        }

        let mut plaintext = ciphertext.to_vec();
        xor_keystream(&self.key, &self.nonce, 2, &mut plaintext)?;

        Ok(Opened {
            plaintext,
            tag,
            mac,
        })
    }

    fn authenticate(
        &self,
        ad: &[u8],
        block: &[u8; CHACHA_BLOCK_SIZE],
        ciphertext: &[u8],
    ) -> Result<[u8; MAC_SIZE], CryptoError> {
        let mut poly_key = Zeroizing::new([0u8; CHACHA_BLOCK_SIZE]);
        xor_keystream(&self.key, &self.nonce, 0, &mut poly_key[..])?;
        let mut one_time_key = Zeroizing::new([0u8; 32]);
        one_time_key.copy_from_slice(&poly_key[..32]);

        let mut mac = Poly1305Writer::new(&one_time_key);
        mac.update(ad);
        mac.update_zeros((0x10 - ad.len() % 0x10) & 0xf);
        mac.update(block);
        mac.update(ciphertext);
        // libsodium pads the ciphertext by (16 - 64 + |c|) mod 16 == |c| mod 16 bytes
        mac.update_zeros(ciphertext.len() & 0xf);
        mac.update(&(ad.len() as u64).to_le_bytes());
        mac.update(&((CHACHA_BLOCK_SIZE + ciphertext.len()) as u64).to_le_bytes());
        Ok(mac.finalize())
    }

    /// State for the next chunk after processing one with `mac` and `tag`.
    pub(crate) fn ratcheted(
        &self,
        mac: &[u8; MAC_SIZE],
        tag: u8,
    ) -> Result<(Self, Option<RekeyCause>), CryptoError> {
        let mut next = self.clone();
        for (n, m) in next.nonce[COUNTER_SIZE..].iter_mut().zip(mac) {
            *n ^= m;
        }
        let counter = self.counter().wrapping_add(1);
        next.nonce[..COUNTER_SIZE].copy_from_slice(&counter.to_le_bytes());

        let cause = if tag & TAG_REKEY != 0 {
            Some(RekeyCause::Tagged)
        } else if counter == 0 {
            Some(RekeyCause::CounterWrap)
        } else {
            None
        };

        match cause {
            Some(_) => Ok((next.rekeyed()?, cause)),
            None => Ok((next, None)),
        }
    }

    /// Replace key and inner nonce with fresh keystream; the old key cannot be recovered.
    pub(crate) fn rekeyed(&self) -> Result<Self, CryptoError> {
        let mut material = Zeroizing::new([0u8; STREAM_KEY_SIZE + CHACHA_NONCE_SIZE - COUNTER_SIZE]);
        material[..STREAM_KEY_SIZE].copy_from_slice(&self.key);
        material[STREAM_KEY_SIZE..].copy_from_slice(&self.nonce[COUNTER_SIZE..]);
        xor_keystream(&self.key, &self.nonce, 0, &mut material[..])?;

        let mut next = Self {
            key: [0u8; STREAM_KEY_SIZE],
            nonce: [0u8; CHACHA_NONCE_SIZE],
        };
        next.key.copy_from_slice(&material[..STREAM_KEY_SIZE]);
        next.nonce[..COUNTER_SIZE].copy_from_slice(&1u32.to_le_bytes());
        next.nonce[COUNTER_SIZE..].copy_from_slice(&material[STREAM_KEY_SIZE..]);
        Ok(next)
    }
}

#[cfg(test)]
impl ChunkState {
    pub(crate) fn set_counter(&mut self, counter: u32) {
        self.nonce[..COUNTER_SIZE].copy_from_slice(&counter.to_le_bytes());
    }
}
