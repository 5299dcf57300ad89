//! BLAKE2b (unkeyed), with the output length set in the parameter block.

use blake2::{
    digest::{consts::U32, Digest},
    Blake2b, Blake2b512,
};

type Blake2b256 = Blake2b<U32>;

/// 32-byte BLAKE2b digest of `data`.
pub(crate) fn blake2b_256(data: &[u8]) -> [u8; 32] {
    let digest = Blake2b256::digest(data);
    let mut out = [0u8; 32];
    out.copy_from_slice(&digest);
    out
}

/// 64-byte BLAKE2b digest over the concatenation of `parts`.
pub(crate) fn blake2b_512(parts: &[&[u8]]) -> [u8; 64] {
    let mut hasher = Blake2b512::new();
    for part in parts {
        hasher.update(part);
    }
    let digest = hasher.finalize();
    let mut out = [0u8; 64];
    out.copy_from_slice(&digest);
    out
}
