//! Core blobshare primitives shared across crates.
//!
//! Includes the namespace ID type, sentinel namespaces, share layout
//! configuration, and base errors.

pub mod config;
pub mod error;
pub mod types;

pub use config::ShareConfig;
pub use error::ConfigError;
pub use types::{
    NamespaceId, COMPACT_SHARE_RESERVED_BYTES, MAX_SHARE_VERSION, NAMESPACE_SIZE,
    PAY_FOR_BLOB_NAMESPACE_ID, RESERVED_PADDING_NAMESPACE_ID, SEQUENCE_LEN_BYTES,
    SHARE_INFO_BYTES, SHARE_SIZE, SHARE_VERSION_ZERO, TAIL_PADDING_NAMESPACE_ID,
    TX_NAMESPACE_ID,
};
