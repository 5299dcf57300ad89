//! Fixed-size adapters over the external primitives.
//!
//! Everything above this module speaks in byte arrays; the RustCrypto and
//! dalek types never leak out of here.

pub(crate) mod random;

#[cfg(feature = "kx")]
pub(crate) mod dh;
#[cfg(feature = "kx")]
pub(crate) mod hash;

#[cfg(feature = "stream")]
pub(crate) mod cipher;
