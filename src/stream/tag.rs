//! Chunk tags.

use crate::core::{StreamError, TAG_FINAL, TAG_MESSAGE, TAG_PUSH, TAG_REKEY};

/// One-byte tag carried (encrypted and authenticated) by every chunk.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Tag {
    /// Ordinary chunk (0x00).
    #[default]
    Message = TAG_MESSAGE,
    /// End of a logical message; the stream continues (0x01).
    Push = TAG_PUSH,
    /// Ratchet the stream key after this chunk (0x02).
    Rekey = TAG_REKEY,
    /// Last chunk of the stream (0x03).
    Final = TAG_FINAL,
}

impl Tag {
    /// Get the byte representation.
    pub fn as_byte(self) -> u8 {
        self as u8
    }

    /// Parse a tag byte.
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            TAG_MESSAGE => Some(Tag::Message),
            TAG_PUSH => Some(Tag::Push),
            TAG_REKEY => Some(Tag::Rekey),
            TAG_FINAL => Some(Tag::Final),
            _ => None,
        }
    }

    /// Whether processing this tag ratchets the stream key.
    ///
    /// `Final` carries the rekey bit as well.
    pub fn rekeys(self) -> bool {
        self.as_byte() & TAG_REKEY != 0
    }

    /// Whether this tag closes the stream.
    pub fn is_final(self) -> bool {
        self == Tag::Final
    }
}

impl From<Tag> for u8 {
    fn from(tag: Tag) -> Self {
        tag.as_byte()
    }
}

impl TryFrom<u8> for Tag {
    type Error = StreamError;

    fn try_from(byte: u8) -> Result<Self, Self::Error> {
        Tag::from_byte(byte).ok_or(StreamError::UnknownTag(byte))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_bytes() {
        assert_eq!(Tag::Message.as_byte(), 0x00);
        assert_eq!(Tag::Push.as_byte(), 0x01);
        assert_eq!(Tag::Rekey.as_byte(), 0x02);
        assert_eq!(Tag::Final.as_byte(), 0x03);
    }

    #[test]
    fn test_tag_parse() {
        for tag in [Tag::Message, Tag::Push, Tag::Rekey, Tag::Final] {
            assert_eq!(Tag::try_from(u8::from(tag)), Ok(tag));
        }
        assert_eq!(Tag::try_from(0x04), Err(StreamError::UnknownTag(0x04)));
        assert_eq!(Tag::from_byte(0xff), None);
    }

    #[test]
    fn test_rekey_bit() {
        assert!(!Tag::Message.rekeys());
        assert!(!Tag::Push.rekeys());
        assert!(Tag::Rekey.rekeys());
        assert!(Tag::Final.rekeys());
        assert!(Tag::Final.is_final());
        assert!(!Tag::Rekey.is_final());
    }
}
