use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::{
    NamespaceId, COMPACT_SHARE_RESERVED_BYTES, MAX_SHARE_VERSION, NAMESPACE_SIZE,
    PAY_FOR_BLOB_NAMESPACE_ID, RESERVED_PADDING_NAMESPACE_ID, SEQUENCE_LEN_BYTES,
    SHARE_INFO_BYTES, SHARE_SIZE, TAIL_PADDING_NAMESPACE_ID, TX_NAMESPACE_ID,
};

/// Share layout parameters and sentinel namespaces.
///
/// Built once (from defaults or a TOML file) and then shared read-only,
/// usually behind an `Arc`, by every share interpreted under it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ShareConfig {
    /// Total length of every share.
    pub share_size: usize,
    /// Length of the namespace ID prefix.
    pub namespace_size: usize,
    /// Length of the info byte region. Only `1` is valid.
    pub share_info_bytes: usize,
    /// Length of the sequence length field. Only `4` is valid.
    pub sequence_len_bytes: usize,
    /// Length of the reserved-bytes region carried by compact shares.
    pub compact_share_reserved_bytes: usize,
    /// Highest share version the info byte parser accepts.
    pub max_share_version: u8,
    pub tx_namespace: NamespaceId,
    pub pay_for_blob_namespace: NamespaceId,
    pub reserved_padding_namespace: NamespaceId,
    pub tail_padding_namespace: NamespaceId,
}

impl Default for ShareConfig {
    fn default() -> Self {
        Self {
            share_size: SHARE_SIZE,
            namespace_size: NAMESPACE_SIZE,
            share_info_bytes: SHARE_INFO_BYTES,
            sequence_len_bytes: SEQUENCE_LEN_BYTES,
            compact_share_reserved_bytes: COMPACT_SHARE_RESERVED_BYTES,
            max_share_version: MAX_SHARE_VERSION,
            tx_namespace: NamespaceId::from(TX_NAMESPACE_ID),
            pay_for_blob_namespace: NamespaceId::from(PAY_FOR_BLOB_NAMESPACE_ID),
            reserved_padding_namespace: NamespaceId::from(RESERVED_PADDING_NAMESPACE_ID),
            tail_padding_namespace: NamespaceId::from(TAIL_PADDING_NAMESPACE_ID),
        }
    }
}

impl ShareConfig {
    /// Parses a TOML document; absent keys keep their defaults.
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and validates a TOML config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }

    /// Checks the layout parameters for internal consistency.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.namespace_size == 0 {
            return Err(ConfigError::Invalid("namespace_size must be > 0"));
        }
        if self.share_info_bytes != SHARE_INFO_BYTES {
            return Err(ConfigError::Invalid("share_info_bytes must be 1"));
        }
        if self.sequence_len_bytes != SEQUENCE_LEN_BYTES {
            return Err(ConfigError::Invalid("sequence_len_bytes must be 4"));
        }
        if self.compact_share_reserved_bytes == 0 || self.compact_share_reserved_bytes > 4 {
            return Err(ConfigError::Invalid(
                "compact_share_reserved_bytes must be in 1..=4",
            ));
        }
        if self.max_share_version > MAX_SHARE_VERSION {
            return Err(ConfigError::Invalid("max_share_version must be <= 127"));
        }

        for (name, ns) in [
            ("tx_namespace", &self.tx_namespace),
            ("pay_for_blob_namespace", &self.pay_for_blob_namespace),
            ("reserved_padding_namespace", &self.reserved_padding_namespace),
            ("tail_padding_namespace", &self.tail_padding_namespace),
        ] {
            if ns.len() != self.namespace_size {
                return Err(ConfigError::NamespaceSize {
                    name,
                    expected: self.namespace_size,
                    actual: ns.len(),
                });
            }
        }

        let largest_header = self
            .namespace_size
            .checked_add(self.share_info_bytes + self.sequence_len_bytes)
            .and_then(|n| n.checked_add(self.compact_share_reserved_bytes))
            .ok_or(ConfigError::Invalid("header size overflows"))?;
        if self.share_size <= largest_header {
            return Err(ConfigError::Invalid(
                "share_size must exceed the largest share header",
            ));
        }

        // Reserved bytes hold an in-share index, so every index must fit.
        let index_capacity = 1_u64 << (8 * self.compact_share_reserved_bytes as u32);
        if self.share_size as u64 > index_capacity {
            return Err(ConfigError::Invalid(
                "compact_share_reserved_bytes too narrow for share_size",
            ));
        }
        Ok(())
    }

    /// Returns true if `namespace` selects the compact share format.
    pub fn is_compact_namespace(&self, namespace: &[u8]) -> bool {
        self.tx_namespace.matches(namespace) || self.pay_for_blob_namespace.matches(namespace)
    }

    /// Offset of the sequence length field in a sequence-start share.
    pub fn sequence_len_offset(&self) -> usize {
        self.namespace_size + self.share_info_bytes
    }

    /// Raw data capacity of a sparse sequence-start share.
    pub fn first_sparse_content_size(&self) -> usize {
        self.share_size
            .saturating_sub(self.namespace_size + self.share_info_bytes + self.sequence_len_bytes)
    }

    /// Raw data capacity of a sparse continuation share.
    pub fn continuation_sparse_content_size(&self) -> usize {
        self.share_size
            .saturating_sub(self.namespace_size + self.share_info_bytes)
    }

    /// Raw data capacity of a compact sequence-start share.
    pub fn first_compact_content_size(&self) -> usize {
        self.first_sparse_content_size()
            .saturating_sub(self.compact_share_reserved_bytes)
    }

    /// Raw data capacity of a compact continuation share.
    pub fn continuation_compact_content_size(&self) -> usize {
        self.continuation_sparse_content_size()
            .saturating_sub(self.compact_share_reserved_bytes)
    }
}
