//! Anonymous key exchange.
//!
//! Wire-compatible with libsodium `crypto_kx`: X25519 for the shared secret,
//! BLAKE2b for the seed hash and the session transcript. Peers are not
//! authenticated; binding a public key to an identity is up to the caller.

mod keys;
mod session;

pub use keys::*;
pub use session::*;
