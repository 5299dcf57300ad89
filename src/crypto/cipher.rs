//! ChaCha20 / HChaCha20 / Poly1305 building blocks for the secret stream.
//!
//! The stream construction drives ChaCha20 at explicit block positions and
//! feeds Poly1305 an unaligned transcript, so it cannot go through an AEAD
//! wrapper like `chacha20poly1305`.

use chacha20::{
    cipher::{
        consts::U10, generic_array::GenericArray, KeyIvInit, StreamCipher, StreamCipherSeek,
    },
    hchacha, ChaCha20,
};
use poly1305::{
    universal_hash::{KeyInit, UniversalHash},
    Block, Poly1305,
};
use subtle::ConstantTimeEq;

use crate::core::{CHACHA_BLOCK_SIZE, CHACHA_NONCE_SIZE, CryptoError, HCHACHA_INPUT_SIZE, MAC_SIZE};

/// Derive a subkey with HChaCha20 (20 rounds).
pub(crate) fn hchacha20(key: &[u8; 32], input: &[u8; HCHACHA_INPUT_SIZE]) -> [u8; 32] {
    let derived = hchacha::<U10>(
        chacha20::Key::from_slice(key),
        GenericArray::from_slice(input),
    );
    let mut out = [0u8; 32];
    out.copy_from_slice(&derived);
    out
}

/// XOR `buf` with the IETF ChaCha20 keystream starting at block `block`.
pub(crate) fn xor_keystream(
    key: &[u8; 32],
    nonce: &[u8; CHACHA_NONCE_SIZE],
    block: u32,
    buf: &mut [u8],
) -> Result<(), CryptoError> {
    let mut cipher = ChaCha20::new(
        chacha20::Key::from_slice(key),
        chacha20::Nonce::from_slice(nonce),
    );
    cipher
        .try_seek(u64::from(block) * CHACHA_BLOCK_SIZE as u64)
        .map_err(|_| CryptoError::KeystreamExhausted)?;
    cipher
        .try_apply_keystream(buf)
        .map_err(|_| CryptoError::KeystreamExhausted)
}

/// Incremental Poly1305 over arbitrarily split input.
///
/// The RustCrypto `Poly1305` only accepts whole blocks until finalization, so
/// a partial block is carried between writes.
pub(crate) struct Poly1305Writer {
    mac: Poly1305,
    pending: [u8; MAC_SIZE],
    filled: usize,
}

impl Poly1305Writer {
    /// Start a MAC with a one-time key.
    pub(crate) fn new(key: &[u8; 32]) -> Self {
        Self {
            mac: Poly1305::new(poly1305::Key::from_slice(key)),
            pending: [0u8; MAC_SIZE],
            filled: 0,
        }
    }

    /// Absorb `data`.
    pub(crate) fn update(&mut self, mut data: &[u8]) {
        if self.filled > 0 {
            let take = (MAC_SIZE - self.filled).min(data.len());
            self.pending[self.filled..self.filled + take].copy_from_slice(&data[..take]);
            self.filled += take;
            data = &data[take..];
            if self.filled < MAC_SIZE {
                return;
            }
            self.mac.update(&[Block::clone_from_slice(&self.pending)]);
            self.filled = 0;
        }

        let mut blocks = data.chunks_exact(MAC_SIZE);
        for block in &mut blocks {
            self.mac.update(&[Block::clone_from_slice(block)]);
        }
        let rest = blocks.remainder();
        self.pending[..rest.len()].copy_from_slice(rest);
        self.filled = rest.len();
    }

    /// Absorb `len` zero bytes.
    pub(crate) fn update_zeros(&mut self, len: usize) {
        self.update(&[0u8; MAC_SIZE][..len.min(MAC_SIZE)]);
    }

    /// Finish and return the 16-byte tag.
    pub(crate) fn finalize(self) -> [u8; MAC_SIZE] {
        let tag = self.mac.compute_unpadded(&self.pending[..self.filled]);
        let mut out = [0u8; MAC_SIZE];
        out.copy_from_slice(&tag);
        out
    }
}

/// Constant-time MAC comparison.
pub(crate) fn verify_mac(expected: &[u8; MAC_SIZE], received: &[u8]) -> bool {
    received.len() == MAC_SIZE && bool::from(expected[..].ct_eq(received))
}
