use blobshare_codec::ShareError;
use blobshare_core::ConfigError;
use thiserror::Error;

/// Errors returned by splitters and sequence parsers.
#[derive(Debug, Error)]
pub enum SplitError {
    #[error("share error: {0}")]
    Share(#[from] ShareError),
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    /// Sequence length does not fit the 32-bit length field.
    #[error("data of {len} bytes exceeds the maximum sequence length")]
    DataTooLarge { len: usize },
    /// Namespace not usable with this splitter or parser.
    #[error("invalid namespace: {0}")]
    InvalidNamespace(&'static str),
    /// Shares do not form well-ordered sequences.
    #[error("invalid sequence: {0}")]
    InvalidSequence(&'static str),
    /// Length-delimited unit is malformed.
    #[error("invalid unit: {0}")]
    InvalidUnit(&'static str),
}
