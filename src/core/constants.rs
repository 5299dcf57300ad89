//! Wire and key-size constants.
//!
//! These values are fixed by the libsodium constructions this crate
//! interoperates with and MUST NOT be changed.

// =============================================================================
// KEY EXCHANGE (crypto_kx)
// =============================================================================

/// Seed size for deterministic keypair derivation.
pub const SEED_SIZE: usize = 32;

/// X25519 public key size.
pub const PUBLIC_KEY_SIZE: usize = 32;

/// X25519 secret key size.
pub const SECRET_KEY_SIZE: usize = 32;

/// Size of each directional session key.
pub const SESSION_KEY_SIZE: usize = 32;

/// X25519 shared secret size.
pub const SHARED_SECRET_SIZE: usize = 32;

// =============================================================================
// SECRET STREAM (crypto_secretstream_xchacha20poly1305)
// =============================================================================

/// Stream key size.
pub const STREAM_KEY_SIZE: usize = 32;

/// Stream header size: HChaCha20 input (16) followed by the initial inner nonce (8).
pub const HEADER_SIZE: usize = 24;

/// HChaCha20 input size (first part of the header).
pub const HCHACHA_INPUT_SIZE: usize = 16;

/// Inner nonce size (second part of the header, and the ratcheted part of the state nonce).
pub const INNER_NONCE_SIZE: usize = 8;

/// Block counter size at the start of the state nonce.
pub const COUNTER_SIZE: usize = 4;

/// IETF ChaCha20 nonce size (counter + inner nonce).
pub const CHACHA_NONCE_SIZE: usize = COUNTER_SIZE + INNER_NONCE_SIZE;

/// ChaCha20 block size.
pub const CHACHA_BLOCK_SIZE: usize = 64;

/// Poly1305 authentication tag size.
pub const MAC_SIZE: usize = 16;

/// Per-chunk overhead: encrypted tag byte plus MAC.
pub const ABYTES: usize = 1 + MAC_SIZE;

/// Largest plaintext accepted by a single push.
///
/// Chunk payloads start at ChaCha20 block 2 and the block counter is 32 bits wide.
pub const MESSAGE_MAX: u64 = 64 * ((1u64 << 32) - 2);

// =============================================================================
// CHUNK TAGS
// =============================================================================

/// Ordinary chunk.
pub const TAG_MESSAGE: u8 = 0x00;

/// End of a logical message within the stream.
pub const TAG_PUSH: u8 = 0x01;

/// Ratchet the stream key after this chunk.
pub const TAG_REKEY: u8 = 0x02;

/// Last chunk of the stream (implies rekey).
pub const TAG_FINAL: u8 = TAG_PUSH | TAG_REKEY;
