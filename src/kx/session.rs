//! Directional session keys.
//!
//! ```text
//! q  = X25519(own_secret, peer_public)
//! h  = BLAKE2b-512(q | client_pk | server_pk)
//! client: rx = h[0..32],  tx = h[32..64]
//! server: rx = h[32..64], tx = h[0..32]
//! ```
//!
//! The client's `tx` is the server's `rx` and vice versa.

use std::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::core::{KxError, SESSION_KEY_SIZE};
use crate::crypto::{dh, hash};

use super::{KeyPair, PublicKey};

/// Which side of the exchange the local keypair plays.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Role {
    /// The connecting party.
    Client,
    /// The accepting party.
    Server,
}

/// The two directional keys of one session.
///
/// Zeroized on drop.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct SessionKeys {
    rx: [u8; SESSION_KEY_SIZE],
    tx: [u8; SESSION_KEY_SIZE],
}

impl SessionKeys {
    /// Key for data received from the peer.
    pub fn rx(&self) -> &[u8; SESSION_KEY_SIZE] {
        &self.rx
    }

    /// Key for data sent to the peer.
    pub fn tx(&self) -> &[u8; SESSION_KEY_SIZE] {
        &self.tx
    }
}

impl fmt::Debug for SessionKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionKeys(..)")
    }
}

impl KeyPair {
    /// Session keys for the local keypair acting as `role` towards `peer`.
    pub fn session_keys(&self, peer: &PublicKey, role: Role) -> Result<SessionKeys, KxError> {
        let shared = Zeroizing::new(dh::scalar_mult(self.secret_key(), peer.as_bytes())?);

        let own = self.public_key();
        let (client_pk, server_pk) = match role {
            Role::Client => (own, peer),
            Role::Server => (peer, own),
        };
        let digest = Zeroizing::new(hash::blake2b_512(&[
            &shared[..],
            &client_pk.as_bytes()[..],
            &server_pk.as_bytes()[..],
        ]));

        let mut first = [0u8; SESSION_KEY_SIZE];
        let mut second = [0u8; SESSION_KEY_SIZE];
        first.copy_from_slice(&digest[..SESSION_KEY_SIZE]);
        second.copy_from_slice(&digest[SESSION_KEY_SIZE..]);

        Ok(match role {
            Role::Client => SessionKeys {
                rx: first,
                tx: second,
            },
            Role::Server => SessionKeys {
                rx: second,
                tx: first,
            },
        })
    }

    /// Session keys for a client talking to `server_pk`.
    pub fn client_session_keys(&self, server_pk: &PublicKey) -> Result<SessionKeys, KxError> {
        self.session_keys(server_pk, Role::Client)
    }

    /// Session keys for a server answering `client_pk`.
    pub fn server_session_keys(&self, client_pk: &PublicKey) -> Result<SessionKeys, KxError> {
        self.session_keys(client_pk, Role::Server)
    }
}

#[cfg(feature = "stream")]
mod streams {
    use super::SessionKeys;
    use crate::core::StreamError;
    use crate::stream::{Decryptor, Encryptor, Header, StreamKey};

    impl SessionKeys {
        /// Open the sending stream, keyed with `tx`.
        ///
        /// The returned header must reach the peer before the first chunk.
        pub fn encryptor(&self) -> Result<(Encryptor, Header), StreamError> {
            Encryptor::with_key(&StreamKey::from_bytes(self.tx))
        }

        /// Open the receiving stream, keyed with `rx`, from the peer's header.
        pub fn decryptor(&self, header: &Header) -> Decryptor {
            Decryptor::with_key(&StreamKey::from_bytes(self.rx), header)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CryptoError, SEED_SIZE};

    fn seed() -> [u8; SEED_SIZE] {
        std::array::from_fn(|i| i as u8)
    }

    /// Little-endian increment, as sodium_increment.
    fn seed_increment(seed: &[u8; SEED_SIZE]) -> [u8; SEED_SIZE] {
        let mut out = *seed;
        for byte in out.iter_mut() {
            let (next, carry) = byte.overflowing_add(1);
            *byte = next;
            if !carry {
                break;
            }
        }
        out
    }

    #[test]
    fn test_seeded_session_key_vector() {
        let client = KeyPair::from_seed(&seed()).unwrap();
        let server = KeyPair::from_seed(&seed_increment(&seed())).unwrap();

        let c = client.client_session_keys(server.public_key()).unwrap();
        assert_eq!(
            hex::encode(c.rx()),
            "749519c68059bce69f7cfcc7b387a3de1a1e8237d110991323bf62870115731a"
        );
        assert_eq!(
            hex::encode(c.tx()),
            "62c8f4fa81800abd0577d99918d129b65deb789af8c8351f391feb0cbf238604"
        );

        let s = server.server_session_keys(client.public_key()).unwrap();
        assert_eq!(s.rx(), c.tx());
        assert_eq!(s.tx(), c.rx());
    }

    #[test]
    fn test_random_keypairs_agree() {
        let client = KeyPair::generate().unwrap();
        let server = KeyPair::generate().unwrap();

        let c = client.client_session_keys(server.public_key()).unwrap();
        let s = server.server_session_keys(client.public_key()).unwrap();

        assert_eq!(c.tx(), s.rx());
        assert_eq!(c.rx(), s.tx());
        assert_ne!(c.rx(), c.tx());
    }

    #[test]
    fn test_roles_are_not_interchangeable() {
        let a = KeyPair::generate().unwrap();
        let b = KeyPair::generate().unwrap();

        let both_clients_a = a.client_session_keys(b.public_key()).unwrap();
        let both_clients_b = b.client_session_keys(a.public_key()).unwrap();
        assert_ne!(both_clients_a.tx(), both_clients_b.rx());
    }

    #[test]
    fn test_low_order_peer_rejected() {
        let kp = KeyPair::generate().unwrap();
        let zero = PublicKey::from_bytes([0u8; 32]);
        assert_eq!(
            kp.client_session_keys(&zero),
            Err(KxError::Crypto(CryptoError::LowOrderPoint))
        );
        assert_eq!(
            kp.server_session_keys(&zero),
            Err(KxError::Crypto(CryptoError::LowOrderPoint))
        );
    }

    #[test]
    fn test_session_keys_debug_redacted() {
        let a = KeyPair::generate().unwrap();
        let b = KeyPair::generate().unwrap();
        let keys = a.client_session_keys(b.public_key()).unwrap();
        assert_eq!(format!("{keys:?}"), "SessionKeys(..)");
    }

    #[cfg(feature = "stream")]
    #[test]
    fn test_session_streams_cross_connect() {
        use crate::stream::Tag;

        let client = KeyPair::generate().unwrap();
        let server = KeyPair::generate().unwrap();
        let c = client.client_session_keys(server.public_key()).unwrap();
        let s = server.server_session_keys(client.public_key()).unwrap();

        let (mut to_server, header) = c.encryptor().unwrap();
        let mut from_client = s.decryptor(&header);

        let chunk = to_server.push(b"ping", Tag::Final).unwrap();
        let (msg, tag) = from_client.pull(&chunk).unwrap();
        assert_eq!(msg, b"ping");
        assert_eq!(tag, Tag::Final);
    }
}
