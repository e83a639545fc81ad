use std::sync::Arc;

use blobshare_codec::padding::namespace_padding_shares;
use blobshare_codec::{Share, ShareBuilder};
use blobshare_core::{NamespaceId, ShareConfig};
use tracing::debug;

use crate::error::SplitError;

/// Writes each byte sequence into its own run of sparse shares.
#[derive(Debug)]
pub struct SparseShareSplitter {
    config: Arc<ShareConfig>,
    shares: Vec<Share>,
}

impl SparseShareSplitter {
    pub fn new(config: Arc<ShareConfig>) -> Result<Self, SplitError> {
        config.validate()?;
        Ok(Self {
            config,
            shares: Vec::new(),
        })
    }

    /// Appends `data` as one sequence in `namespace`.
    ///
    /// The first share carries the total length; the last share is zero
    /// padded. Empty data produces a single namespace padding share.
    pub fn write(
        &mut self,
        namespace: &NamespaceId,
        version: u8,
        data: &[u8],
    ) -> Result<(), SplitError> {
        if self.config.is_compact_namespace(namespace.as_bytes()) {
            return Err(SplitError::InvalidNamespace(
                "compact namespaces cannot hold sparse shares",
            ));
        }
        let sequence_len =
            u32::try_from(data.len()).map_err(|_| SplitError::DataTooLarge { len: data.len() })?;

        let before = self.shares.len();
        let mut builder = ShareBuilder::new(Arc::clone(&self.config), namespace, version, true)?;
        builder.with_sequence_len(sequence_len)?;
        let mut rest = builder.add_data(data);
        self.shares.push(builder.build()?);

        while !rest.is_empty() {
            let mut builder =
                ShareBuilder::new(Arc::clone(&self.config), namespace, version, false)?;
            rest = builder.add_data(rest);
            self.shares.push(builder.build()?);
        }

        debug!(
            namespace = %namespace,
            sequence_len,
            shares = self.shares.len() - before,
            "wrote sparse sequence"
        );
        Ok(())
    }

    /// Appends `n` namespace padding shares.
    pub fn write_namespace_padding_shares(
        &mut self,
        namespace: &NamespaceId,
        version: u8,
        n: usize,
    ) -> Result<(), SplitError> {
        let padding = namespace_padding_shares(&self.config, namespace, version, n)?;
        self.shares.extend(padding);
        Ok(())
    }

    /// Number of shares written so far.
    pub fn count(&self) -> usize {
        self.shares.len()
    }

    pub fn export(self) -> Vec<Share> {
        self.shares
    }
}
