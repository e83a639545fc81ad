use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Default total share length in bytes.
pub const SHARE_SIZE: usize = 512;
/// Default namespace ID length in bytes.
pub const NAMESPACE_SIZE: usize = 8;
/// Length of the info byte region.
pub const SHARE_INFO_BYTES: usize = 1;
/// Length of the big-endian sequence length field.
pub const SEQUENCE_LEN_BYTES: usize = 4;
/// Default length of the compact share reserved-bytes region.
pub const COMPACT_SHARE_RESERVED_BYTES: usize = 4;
/// First share format version.
pub const SHARE_VERSION_ZERO: u8 = 0;
/// Largest version representable in the upper seven bits of the info byte.
pub const MAX_SHARE_VERSION: u8 = 127;

/// Namespace holding transaction compact shares.
pub const TX_NAMESPACE_ID: [u8; NAMESPACE_SIZE] = [0, 0, 0, 0, 0, 0, 0, 1];
/// Namespace holding pay-for-blob compact shares.
pub const PAY_FOR_BLOB_NAMESPACE_ID: [u8; NAMESPACE_SIZE] = [0, 0, 0, 0, 0, 0, 0, 4];
/// Namespace used to pad the reserved namespace range.
pub const RESERVED_PADDING_NAMESPACE_ID: [u8; NAMESPACE_SIZE] = [0, 0, 0, 0, 0, 0, 0, 0xFF];
/// Namespace used to pad the tail of a square.
pub const TAIL_PADDING_NAMESPACE_ID: [u8; NAMESPACE_SIZE] =
    [0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFE];

/// Fixed-width namespace identifier stored at the head of every share.
///
/// The width is a configuration input, so the bytes are held in an owned
/// buffer and compared bytewise.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NamespaceId(Vec<u8>);

impl NamespaceId {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns true if `prefix` holds exactly this namespace's bytes.
    pub fn matches(&self, prefix: &[u8]) -> bool {
        self.0.as_slice() == prefix
    }
}

impl From<[u8; NAMESPACE_SIZE]> for NamespaceId {
    fn from(bytes: [u8; NAMESPACE_SIZE]) -> Self {
        Self(bytes.to_vec())
    }
}

impl From<&[u8]> for NamespaceId {
    fn from(bytes: &[u8]) -> Self {
        Self(bytes.to_vec())
    }
}

impl AsRef<[u8]> for NamespaceId {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for NamespaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(&self.0))
    }
}

impl fmt::Debug for NamespaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NamespaceId({})", hex::encode(&self.0))
    }
}

impl FromStr for NamespaceId {
    type Err = hex::FromHexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed.strip_prefix("0x").unwrap_or(trimmed);
        hex::decode(digits).map(Self)
    }
}

impl Serialize for NamespaceId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&hex::encode(&self.0))
    }
}

impl<'de> Deserialize<'de> for NamespaceId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
