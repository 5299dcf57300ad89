//! Property-based tests for the key exchange and secret streams.
//!
//! - Determinism of seeded keypairs
//! - Client/server key agreement for arbitrary seeds
//! - Stream roundtrip for arbitrary message sequences and tags
//! - Tamper, reorder and truncation detection

#![cfg(all(feature = "kx", feature = "stream"))]

use proptest::prelude::*;

use crate::core::{StreamError, ABYTES};
use crate::kx::KeyPair;
use crate::stream::{Decryptor, Encryptor, StreamKey, StreamPhase, Tag};

fn any_tag() -> impl Strategy<Value = Tag> {
    prop_oneof![Just(Tag::Message), Just(Tag::Push), Just(Tag::Rekey)]
}

fn messages() -> impl Strategy<Value = Vec<(Vec<u8>, Tag)>> {
    prop::collection::vec((prop::collection::vec(any::<u8>(), 0..300), any_tag()), 1..12)
}

fn stream_pair() -> (Encryptor, Decryptor) {
    let key = StreamKey::generate().unwrap();
    let (enc, header) = Encryptor::with_key(&key).unwrap();
    (enc, Decryptor::with_key(&key, &header))
}

// ==================== Key Exchange Property Tests ====================

proptest! {
    /// Same seed, same keypair.
    #[test]
    fn seeded_keypair_deterministic(seed in any::<[u8; 32]>()) {
        let a = KeyPair::from_seed(&seed).unwrap();
        let b = KeyPair::from_seed(&seed).unwrap();
        prop_assert_eq!(a.public_key(), b.public_key());
        prop_assert_eq!(a.secret_key(), b.secret_key());
    }

    /// Client tx is server rx and client rx is server tx.
    #[test]
    fn session_keys_cross_agree(client_seed in any::<[u8; 32]>(), server_seed in any::<[u8; 32]>()) {
        prop_assume!(client_seed != server_seed);

        let client = KeyPair::from_seed(&client_seed).unwrap();
        let server = KeyPair::from_seed(&server_seed).unwrap();

        let c = client.client_session_keys(server.public_key()).unwrap();
        let s = server.server_session_keys(client.public_key()).unwrap();

        prop_assert_eq!(c.tx(), s.rx());
        prop_assert_eq!(c.rx(), s.tx());
        prop_assert_ne!(c.rx(), c.tx());
    }

    /// Seeds of any other length are rejected.
    #[test]
    fn wrong_seed_length_rejected(seed in prop::collection::vec(any::<u8>(), 0..64)) {
        prop_assume!(seed.len() != 32);
        prop_assert!(KeyPair::from_seed(&seed).is_err());
    }
}

// ==================== Secret Stream Property Tests ====================

proptest! {
    /// Every pushed chunk pulls back to the same plaintext and tag, in order.
    #[test]
    fn stream_roundtrip(msgs in messages()) {
        let (mut enc, mut dec) = stream_pair();

        for (m, t) in &msgs {
            let chunk = enc.push(m, *t).unwrap();
            prop_assert_eq!(chunk.len(), m.len() + ABYTES);
            let (got, tag) = dec.pull(&chunk).unwrap();
            prop_assert_eq!(&got, m);
            prop_assert_eq!(tag, *t);
        }

        let last = enc.push(b"", Tag::Final).unwrap();
        prop_assert_eq!(dec.pull(&last).unwrap().1, Tag::Final);
        prop_assert!(dec.finish().is_ok());
    }

    /// Associated data must match exactly.
    #[test]
    fn stream_ad_binding(
        plaintext in prop::collection::vec(any::<u8>(), 0..200),
        ad1 in prop::collection::vec(any::<u8>(), 0..40),
        ad2 in prop::collection::vec(any::<u8>(), 0..40)
    ) {
        let (mut enc, mut dec) = stream_pair();
        let chunk = enc.push_with_ad(&plaintext, &ad1, Tag::Message).unwrap();

        if ad1 == ad2 {
            prop_assert_eq!(dec.pull_with_ad(&chunk, &ad2).unwrap().0, plaintext);
        } else {
            prop_assert_eq!(dec.pull_with_ad(&chunk, &ad2), Err(StreamError::AuthenticationFailed));
        }
    }

    /// Flipping any bit of any chunk fails that pull and poisons the stream.
    #[test]
    fn stream_tamper_detected(msgs in messages(), pick in any::<prop::sample::Index>(), bit in any::<prop::sample::Index>()) {
        let (mut enc, mut dec) = stream_pair();
        let chunks: Vec<Vec<u8>> = msgs.iter().map(|(m, t)| enc.push(m, *t).unwrap()).collect();

        let target = pick.index(chunks.len());
        for chunk in &chunks[..target] {
            dec.pull(chunk).unwrap();
        }

        let mut tampered = chunks[target].clone();
        let bit = bit.index(tampered.len() * 8);
        tampered[bit / 8] ^= 1 << (bit % 8);

        prop_assert_eq!(dec.pull(&tampered), Err(StreamError::AuthenticationFailed));
        prop_assert_eq!(dec.phase(), StreamPhase::Failed);
        prop_assert_eq!(dec.pull(&chunks[target]), Err(StreamError::StreamFailed));
    }

    /// Skipping ahead fails on the first out-of-place chunk.
    #[test]
    fn stream_skip_detected(msgs in messages(), skip in any::<prop::sample::Index>()) {
        prop_assume!(msgs.len() >= 2);
        let (mut enc, mut dec) = stream_pair();
        let chunks: Vec<Vec<u8>> = msgs.iter().map(|(m, t)| enc.push(m, *t).unwrap()).collect();

        let skipped = skip.index(chunks.len() - 1);
        for chunk in &chunks[..skipped] {
            dec.pull(chunk).unwrap();
        }
        prop_assert_eq!(dec.pull(&chunks[skipped + 1]), Err(StreamError::AuthenticationFailed));
    }

    /// A stream cut anywhere before FINAL is reported as truncated.
    #[test]
    fn stream_truncation_detected(msgs in messages(), cut in any::<prop::sample::Index>()) {
        let (mut enc, mut dec) = stream_pair();
        let mut chunks: Vec<Vec<u8>> = msgs.iter().map(|(m, t)| enc.push(m, *t).unwrap()).collect();
        chunks.push(enc.push(b"end", Tag::Final).unwrap());

        let keep = cut.index(chunks.len());
        for chunk in &chunks[..keep] {
            dec.pull(chunk).unwrap();
        }
        prop_assert_eq!(dec.finish(), Err(StreamError::Truncated));
    }
}
