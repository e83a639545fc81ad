use std::sync::Arc;

use blobshare_core::{NamespaceId, ShareConfig, SHARE_VERSION_ZERO};

use crate::builder::ShareBuilder;
use crate::error::ShareError;
use crate::share::Share;

/// Builds a sequence-start share with sequence length zero in `namespace`.
pub fn namespace_padding_share(
    config: &Arc<ShareConfig>,
    namespace: &NamespaceId,
    version: u8,
) -> Result<Share, ShareError> {
    let mut builder = ShareBuilder::new(Arc::clone(config), namespace, version, true)?;
    builder.with_sequence_len(0)?;
    builder.build()
}

/// Builds `n` namespace padding shares.
pub fn namespace_padding_shares(
    config: &Arc<ShareConfig>,
    namespace: &NamespaceId,
    version: u8,
    n: usize,
) -> Result<Vec<Share>, ShareError> {
    (0..n)
        .map(|_| namespace_padding_share(config, namespace, version))
        .collect()
}

/// Builds `n` shares in the reserved padding namespace.
pub fn reserved_padding_shares(
    config: &Arc<ShareConfig>,
    n: usize,
) -> Result<Vec<Share>, ShareError> {
    namespace_padding_shares(
        config,
        &config.reserved_padding_namespace,
        SHARE_VERSION_ZERO,
        n,
    )
}

/// Builds `n` shares in the tail padding namespace.
pub fn tail_padding_shares(config: &Arc<ShareConfig>, n: usize) -> Result<Vec<Share>, ShareError> {
    namespace_padding_shares(config, &config.tail_padding_namespace, SHARE_VERSION_ZERO, n)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::{
        namespace_padding_share, namespace_padding_shares, reserved_padding_shares,
        tail_padding_shares,
    };
    use blobshare_core::{NamespaceId, ShareConfig, TX_NAMESPACE_ID};

    #[test]
    fn every_padding_kind_reports_padding() {
        let cfg = Arc::new(ShareConfig::default());
        let ns = NamespaceId::new(vec![0, 0, 0, 0, 0, 0, 2, 0]);

        let mut all = namespace_padding_shares(&cfg, &ns, 0, 2).expect("padding builds");
        all.extend(reserved_padding_shares(&cfg, 2).expect("padding builds"));
        all.extend(tail_padding_shares(&cfg, 3).expect("padding builds"));
        assert_eq!(all.len(), 7);

        for share in &all {
            assert!(share.validate().is_ok());
            assert!(share.is_padding().expect("padding"));
            assert_eq!(share.sequence_len().expect("seq len"), 0);
            assert!(share.raw_data().expect("raw").iter().all(|b| *b == 0));
        }
    }

    #[test]
    fn tail_padding_uses_sentinel_namespace() {
        let cfg = Arc::new(ShareConfig::default());
        let shares = tail_padding_shares(&cfg, 1).expect("padding builds");
        assert_eq!(
            shares[0].namespace_id().expect("ns"),
            cfg.tail_padding_namespace
        );
    }

    #[test]
    fn compact_namespace_padding_keeps_reserved_region() {
        let cfg = Arc::new(ShareConfig::default());
        let share = namespace_padding_share(&cfg, &NamespaceId::from(TX_NAMESPACE_ID), 0)
            .expect("padding builds");
        assert!(share.is_compact_share());
        assert_eq!(share.reserved_bytes().expect("reserved"), Some(0));
        assert!(share.is_padding().expect("padding"));
    }
}
