use thiserror::Error;

/// Errors returned while loading or validating a share layout configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Namespace ID string is not valid hex.
    #[error("invalid namespace hex: {0}")]
    InvalidNamespace(#[from] hex::FromHexError),
    /// Sentinel namespace does not match the configured namespace size.
    #[error("{name} must be {expected} bytes, got {actual}")]
    NamespaceSize {
        name: &'static str,
        expected: usize,
        actual: usize,
    },
    /// Inconsistent layout parameters.
    #[error("invalid share config: {0}")]
    Invalid(&'static str),
    /// TOML decode failure.
    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Config file could not be read.
    #[error("config io error: {0}")]
    Io(#[from] std::io::Error),
}
