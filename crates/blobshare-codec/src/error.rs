use std::fmt;

use thiserror::Error;

/// Share region named in length errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareField {
    NamespaceId,
    InfoByte,
    SequenceLen,
    ReservedBytes,
    RawData,
}

impl fmt::Display for ShareField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ShareField::NamespaceId => "a namespace ID",
            ShareField::InfoByte => "an info byte",
            ShareField::SequenceLen => "a sequence length",
            ShareField::ReservedBytes => "reserved bytes",
            ShareField::RawData => "raw data",
        };
        f.write_str(name)
    }
}

/// Errors returned by share construction and field accessors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShareError {
    /// Buffer is not exactly one share long.
    #[error("share data must be {expected} bytes, got {actual}")]
    Size { expected: usize, actual: usize },
    /// Buffer ends before the requested field.
    #[error("share is too short to contain {field}: need {needed} bytes, got {actual}")]
    TooShort {
        field: ShareField,
        needed: usize,
        actual: usize,
    },
    /// Info byte encodes a version above the accepted maximum.
    #[error("invalid info byte 0x{byte:02x}: version {version} exceeds max share version {max}")]
    InvalidInfoByte { byte: u8, version: u8, max: u8 },
    /// Share version is outside the caller's accepted set.
    #[error(
        "unsupported share version {version} is not present in the list of supported share versions {supported:?}"
    )]
    UnsupportedVersion { version: u8, supported: Vec<u8> },
    /// Reserved bytes are malformed or point outside the share.
    #[error("invalid reserved bytes: {0}")]
    InvalidReservedBytes(&'static str),
    /// Share builder misuse.
    #[error("share builder: {0}")]
    Builder(&'static str),
    /// Offset arithmetic produced an impossible layout.
    #[error("share layout invariant violated: {0}")]
    Invariant(&'static str),
}
