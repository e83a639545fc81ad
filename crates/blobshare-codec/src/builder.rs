use std::sync::Arc;

use blobshare_core::{NamespaceId, ShareConfig};

use crate::error::ShareError;
use crate::info_byte::InfoByte;
use crate::reserved::encode_reserved_bytes;
use crate::share::Share;

/// Incrementally writes one share: header first, then raw data until full.
#[derive(Debug, Clone)]
pub struct ShareBuilder {
    config: Arc<ShareConfig>,
    is_sequence_start: bool,
    is_compact: bool,
    buf: Vec<u8>,
    raw_start: usize,
}

impl ShareBuilder {
    /// Writes the namespace and info byte, and zeroed placeholders for the
    /// sequence length (start shares) and reserved bytes (compact namespaces).
    pub fn new(
        config: Arc<ShareConfig>,
        namespace: &NamespaceId,
        version: u8,
        is_sequence_start: bool,
    ) -> Result<Self, ShareError> {
        if namespace.len() != config.namespace_size {
            return Err(ShareError::Builder("namespace size does not match config"));
        }
        let info = InfoByte::new(version, is_sequence_start, config.max_share_version)?;
        let is_compact = config.is_compact_namespace(namespace.as_bytes());

        let mut buf = Vec::with_capacity(config.share_size);
        buf.extend_from_slice(namespace.as_bytes());
        buf.push(info.as_u8());
        if is_sequence_start {
            buf.resize(buf.len() + config.sequence_len_bytes, 0);
        }
        if is_compact {
            buf.resize(buf.len() + config.compact_share_reserved_bytes, 0);
        }
        if buf.len() > config.share_size {
            return Err(ShareError::Invariant("share header exceeds share size"));
        }

        let raw_start = buf.len();
        Ok(Self {
            config,
            is_sequence_start,
            is_compact,
            buf,
            raw_start,
        })
    }

    /// Sets the sequence length field. Only valid on sequence-start shares.
    pub fn with_sequence_len(&mut self, sequence_len: u32) -> Result<(), ShareError> {
        if !self.is_sequence_start {
            return Err(ShareError::Builder(
                "sequence length is only written on sequence-start shares",
            ));
        }
        let encoded = sequence_len.to_be_bytes();
        if self.config.sequence_len_bytes != encoded.len() {
            return Err(ShareError::Invariant("sequence_len_bytes must be 4"));
        }
        let start = self.config.sequence_len_offset();
        let field = self
            .buf
            .get_mut(start..start + encoded.len())
            .ok_or(ShareError::Invariant("sequence length outside share header"))?;
        field.copy_from_slice(&encoded);
        Ok(())
    }

    /// Sets the reserved bytes to `index`. Only valid on compact shares.
    pub fn with_reserved_bytes(&mut self, index: u32) -> Result<(), ShareError> {
        if !self.is_compact {
            return Err(ShareError::Builder(
                "reserved bytes are only written on compact shares",
            ));
        }
        let encoded = encode_reserved_bytes(&self.config, index)?;
        let end = self.raw_start;
        let field = end
            .checked_sub(encoded.len())
            .and_then(|start| self.buf.get_mut(start..end))
            .ok_or(ShareError::Invariant("reserved bytes outside share header"))?;
        field.copy_from_slice(&encoded);
        Ok(())
    }

    pub fn is_sequence_start(&self) -> bool {
        self.is_sequence_start
    }

    pub fn is_compact(&self) -> bool {
        self.is_compact
    }

    /// Index within the share where the next raw byte will be written.
    pub fn current_index(&self) -> usize {
        self.buf.len()
    }

    /// Remaining raw data capacity.
    pub fn available_bytes(&self) -> usize {
        self.config.share_size.saturating_sub(self.buf.len())
    }

    pub fn is_empty_data(&self) -> bool {
        self.buf.len() == self.raw_start
    }

    /// Appends as much of `data` as fits and returns the remainder.
    pub fn add_data<'a>(&mut self, data: &'a [u8]) -> &'a [u8] {
        let take = self.available_bytes().min(data.len());
        let (head, rest) = data.split_at(take);
        self.buf.extend_from_slice(head);
        rest
    }

    /// Zero-pads the raw data region and returns the finished share.
    pub fn build(mut self) -> Result<Share, ShareError> {
        self.buf.resize(self.config.share_size, 0);
        Share::new(self.config, self.buf)
    }
}
