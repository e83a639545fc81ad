use std::sync::Arc;

use blobshare_core::{NamespaceId, ShareConfig};

use crate::error::{ShareError, ShareField};
use crate::info_byte::InfoByte;
use crate::reserved::parse_reserved_bytes;

/// One fixed-size share: namespace ID, info byte, optional sequence length,
/// optional reserved bytes, then raw data.
///
/// Only the total length is checked on construction. Every field accessor
/// re-checks the bytes it reads and returns an error instead of panicking,
/// since shares arrive from untrusted peers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Share {
    data: Vec<u8>,
    config: Arc<ShareConfig>,
}

impl Share {
    /// Wraps `data` after checking it is exactly `share_size` bytes.
    pub fn new(config: Arc<ShareConfig>, data: Vec<u8>) -> Result<Self, ShareError> {
        validate_size(&config, &data)?;
        Ok(Self { data, config })
    }

    /// Wraps `data` without the size check.
    ///
    /// Intended for buffers that already passed through [`Share::new`] or came
    /// from a trusted store. Accessors stay panic-free on short buffers, but
    /// callers handling untrusted bytes must call [`Share::validate`].
    pub fn from_bytes_unchecked(config: Arc<ShareConfig>, data: Vec<u8>) -> Self {
        Self { data, config }
    }

    /// Re-applies the size check.
    pub fn validate(&self) -> Result<(), ShareError> {
        validate_size(&self.config, &self.data)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    pub fn config(&self) -> &Arc<ShareConfig> {
        &self.config
    }

    fn namespace_bytes(&self) -> Result<&[u8], ShareError> {
        let ns_len = self.config.namespace_size;
        self.data.get(..ns_len).ok_or(ShareError::TooShort {
            field: ShareField::NamespaceId,
            needed: ns_len,
            actual: self.data.len(),
        })
    }

    pub fn namespace_id(&self) -> Result<NamespaceId, ShareError> {
        self.namespace_bytes().map(NamespaceId::from)
    }

    pub fn info_byte(&self) -> Result<InfoByte, ShareError> {
        let offset = self.config.namespace_size;
        let raw = self.data.get(offset).copied().ok_or(ShareError::TooShort {
            field: ShareField::InfoByte,
            needed: offset + self.config.share_info_bytes,
            actual: self.data.len(),
        })?;
        InfoByte::parse(raw, self.config.max_share_version)
    }

    pub fn version(&self) -> Result<u8, ShareError> {
        Ok(self.info_byte()?.version())
    }

    /// Fails unless this share's version is one of `supported`.
    pub fn does_support_version(&self, supported: &[u8]) -> Result<(), ShareError> {
        let version = self.version()?;
        if !supported.contains(&version) {
            return Err(ShareError::UnsupportedVersion {
                version,
                supported: supported.to_vec(),
            });
        }
        Ok(())
    }

    /// Returns true if this is the first share in a sequence.
    pub fn is_sequence_start(&self) -> Result<bool, ShareError> {
        Ok(self.info_byte()?.is_sequence_start())
    }

    /// Returns true if the namespace selects the compact format.
    ///
    /// A buffer too short to hold a namespace is not compact.
    pub fn is_compact_share(&self) -> bool {
        self.namespace_bytes()
            .map(|ns| self.config.is_compact_namespace(ns))
            .unwrap_or(false)
    }

    /// Returns the declared sequence length, or `0` for continuation shares.
    pub fn sequence_len(&self) -> Result<u32, ShareError> {
        if !self.is_sequence_start()? {
            return Ok(0);
        }

        let start = self.config.sequence_len_offset();
        let end = start + self.config.sequence_len_bytes;
        let field = self
            .data
            .get(start..end)
            .and_then(|bytes| <[u8; 4]>::try_from(bytes).ok())
            .ok_or(ShareError::TooShort {
                field: ShareField::SequenceLen,
                needed: end,
                actual: self.data.len(),
            })?;
        Ok(u32::from_be_bytes(field))
    }

    /// Returns true for namespace padding, tail padding, or reserved padding.
    pub fn is_padding(&self) -> Result<bool, ShareError> {
        let is_namespace_padding = self.is_namespace_padding()?;
        Ok(is_namespace_padding || self.is_tail_padding() || self.is_reserved_padding())
    }

    fn is_namespace_padding(&self) -> Result<bool, ShareError> {
        let is_sequence_start = self.is_sequence_start()?;
        let sequence_len = self.sequence_len()?;
        Ok(is_sequence_start && sequence_len == 0)
    }

    fn is_tail_padding(&self) -> bool {
        self.namespace_bytes()
            .map(|ns| self.config.tail_padding_namespace.matches(ns))
            .unwrap_or(false)
    }

    fn is_reserved_padding(&self) -> bool {
        self.namespace_bytes()
            .map(|ns| self.config.reserved_padding_namespace.matches(ns))
            .unwrap_or(false)
    }

    /// Returns the compact reserved-bytes index, or `None` for sparse shares.
    pub fn reserved_bytes(&self) -> Result<Option<u32>, ShareError> {
        if !self.is_compact_share() {
            return Ok(None);
        }

        let mut start = self.config.namespace_size + self.config.share_info_bytes;
        if self.is_sequence_start()? {
            start += self.config.sequence_len_bytes;
        }
        let end = start + self.config.compact_share_reserved_bytes;
        let bytes = self.data.get(start..end).ok_or(ShareError::TooShort {
            field: ShareField::ReservedBytes,
            needed: end,
            actual: self.data.len(),
        })?;
        parse_reserved_bytes(&self.config, bytes).map(Some)
    }

    /// Returns the payload bytes after every header region present in this share.
    pub fn raw_data(&self) -> Result<&[u8], ShareError> {
        let start = self.raw_data_start_index()?;
        self.data.get(start..).ok_or(ShareError::TooShort {
            field: ShareField::RawData,
            needed: start,
            actual: self.data.len(),
        })
    }

    fn raw_data_start_index(&self) -> Result<usize, ShareError> {
        let cfg = &self.config;
        let is_start = self.is_sequence_start()?;
        let base = cfg.namespace_size.checked_add(cfg.share_info_bytes);
        let offset = match (is_start, self.is_compact_share()) {
            (true, true) => base
                .and_then(|n| n.checked_add(cfg.sequence_len_bytes))
                .and_then(|n| n.checked_add(cfg.compact_share_reserved_bytes)),
            (true, false) => base.and_then(|n| n.checked_add(cfg.sequence_len_bytes)),
            (false, true) => base.and_then(|n| n.checked_add(cfg.compact_share_reserved_bytes)),
            (false, false) => base,
        };
        offset.ok_or(ShareError::Invariant("raw data offset overflows usize"))
    }
}

impl AsRef<[u8]> for Share {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

fn validate_size(config: &ShareConfig, data: &[u8]) -> Result<(), ShareError> {
    if data.len() != config.share_size {
        return Err(ShareError::Size {
            expected: config.share_size,
            actual: data.len(),
        });
    }
    Ok(())
}

/// Copies each share into its own byte buffer, preserving order.
pub fn to_byte_buffers(shares: &[Share]) -> Vec<Vec<u8>> {
    shares.iter().map(|share| share.data.clone()).collect()
}

/// Wraps each buffer as a share, preserving order.
///
/// Sizes are NOT validated: this is the bulk path for buffers produced by
/// [`to_byte_buffers`] or read back from trusted storage. Use [`Share::new`]
/// or [`Share::validate`] for anything received from the network.
pub fn from_byte_buffers(config: &Arc<ShareConfig>, buffers: Vec<Vec<u8>>) -> Vec<Share> {
    buffers
        .into_iter()
        .map(|data| Share::from_bytes_unchecked(Arc::clone(config), data))
        .collect()
}
