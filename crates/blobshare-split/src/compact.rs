use std::sync::Arc;

use blobshare_codec::{Share, ShareBuilder};
use blobshare_core::{NamespaceId, ShareConfig};
use tracing::debug;

use crate::error::SplitError;
use crate::sequence::collect_sequences;
use crate::varint::{decode_uvarint, encode_uvarint};

/// Packs length-delimited units back to back into one compact sequence.
///
/// Each share's reserved bytes hold the in-share index of the first unit that
/// starts in it, or `0` when a unit spans the whole share.
#[derive(Debug)]
pub struct CompactShareSplitter {
    config: Arc<ShareConfig>,
    namespace: NamespaceId,
    version: u8,
    builders: Vec<ShareBuilder>,
    current_has_unit_start: bool,
    sequence_len: u32,
}

impl CompactShareSplitter {
    pub fn new(
        config: Arc<ShareConfig>,
        namespace: NamespaceId,
        version: u8,
    ) -> Result<Self, SplitError> {
        config.validate()?;
        if !config.is_compact_namespace(namespace.as_bytes()) {
            return Err(SplitError::InvalidNamespace(
                "compact shares require the tx or pay-for-blob namespace",
            ));
        }
        let first = ShareBuilder::new(Arc::clone(&config), &namespace, version, true)?;
        Ok(Self {
            config,
            namespace,
            version,
            builders: vec![first],
            current_has_unit_start: false,
            sequence_len: 0,
        })
    }

    /// Appends one unit prefixed with its varint length.
    pub fn write_unit(&mut self, unit: &[u8]) -> Result<(), SplitError> {
        let mut delimited = encode_uvarint(unit.len() as u64);
        delimited.extend_from_slice(unit);
        let added = u32::try_from(delimited.len())
            .ok()
            .and_then(|n| self.sequence_len.checked_add(n))
            .ok_or(SplitError::DataTooLarge {
                len: delimited.len(),
            })?;

        if self.current()?.available_bytes() == 0 {
            self.open_continuation()?;
        }
        if !self.current_has_unit_start {
            let index = self.current()?.current_index();
            let index = u32::try_from(index)
                .map_err(|_| SplitError::InvalidSequence("unit index exceeds u32"))?;
            self.current_mut()?.with_reserved_bytes(index)?;
            self.current_has_unit_start = true;
        }

        let mut rest = self.current_mut()?.add_data(&delimited);
        while !rest.is_empty() {
            self.open_continuation()?;
            rest = self.current_mut()?.add_data(rest);
        }
        self.sequence_len = added;
        Ok(())
    }

    fn current(&self) -> Result<&ShareBuilder, SplitError> {
        self.builders
            .last()
            .ok_or(SplitError::InvalidSequence("compact splitter has no share"))
    }

    fn current_mut(&mut self) -> Result<&mut ShareBuilder, SplitError> {
        self.builders
            .last_mut()
            .ok_or(SplitError::InvalidSequence("compact splitter has no share"))
    }

    fn open_continuation(&mut self) -> Result<(), SplitError> {
        let builder =
            ShareBuilder::new(Arc::clone(&self.config), &self.namespace, self.version, false)?;
        self.builders.push(builder);
        self.current_has_unit_start = false;
        Ok(())
    }

    /// Number of shares the written units occupy.
    pub fn count(&self) -> usize {
        if self.sequence_len == 0 {
            0
        } else {
            self.builders.len()
        }
    }

    /// Writes the total length into the first share and builds every share.
    ///
    /// Returns no shares when no unit was written.
    pub fn export(mut self) -> Result<Vec<Share>, SplitError> {
        if self.sequence_len == 0 {
            return Ok(Vec::new());
        }
        let first = self
            .builders
            .first_mut()
            .ok_or(SplitError::InvalidSequence("compact splitter has no share"))?;
        first.with_sequence_len(self.sequence_len)?;

        debug!(
            namespace = %self.namespace,
            sequence_len = self.sequence_len,
            shares = self.builders.len(),
            "exported compact sequence"
        );
        let mut shares = Vec::with_capacity(self.builders.len());
        for builder in self.builders {
            shares.push(builder.build()?);
        }
        Ok(shares)
    }
}

/// Reconstructs the units of every compact sequence in `shares`, in order.
pub fn parse_compact_shares(
    shares: &[Share],
    supported_versions: &[u8],
) -> Result<Vec<Vec<u8>>, SplitError> {
    for share in shares {
        // Out-of-range reserved bytes mark a malformed share.
        share.reserved_bytes()?;
    }

    let mut units = Vec::new();
    for sequence in collect_sequences(shares, supported_versions, true)? {
        let data = sequence.raw_data()?;
        let mut pos = 0_usize;
        while pos < data.len() {
            let tail = data
                .get(pos..)
                .ok_or(SplitError::InvalidUnit("unit offset outside sequence"))?;
            let (len, consumed) = decode_uvarint(tail)?;
            let start = pos + consumed;
            let end = usize::try_from(len)
                .ok()
                .and_then(|len| start.checked_add(len))
                .ok_or(SplitError::InvalidUnit("unit length overflows"))?;
            let unit = data
                .get(start..end)
                .ok_or(SplitError::InvalidUnit("unit extends past sequence end"))?;
            units.push(unit.to_vec());
            pos = end;
        }
    }
    Ok(units)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::{parse_compact_shares, CompactShareSplitter};
    use crate::error::SplitError;
    use blobshare_core::{NamespaceId, ShareConfig, PAY_FOR_BLOB_NAMESPACE_ID, TX_NAMESPACE_ID};

    fn cfg() -> Arc<ShareConfig> {
        Arc::new(ShareConfig::default())
    }

    fn tx_splitter() -> CompactShareSplitter {
        CompactShareSplitter::new(cfg(), NamespaceId::from(TX_NAMESPACE_ID), 0)
            .expect("tx namespace is compact")
    }

    #[test]
    fn packs_small_units_into_one_share() {
        let mut s = tx_splitter();
        s.write_unit(b"first").expect("write");
        s.write_unit(b"second").expect("write");
        assert_eq!(s.count(), 1);
        let shares = s.export().expect("export");
        assert_eq!(shares.len(), 1);
        assert_eq!(shares[0].sequence_len().expect("seq len"), 1 + 5 + 1 + 6);
        assert_eq!(shares[0].reserved_bytes().expect("reserved"), Some(17));

        let units = parse_compact_shares(&shares, &[0]).expect("parse");
        assert_eq!(units, vec![b"first".to_vec(), b"second".to_vec()]);
    }

    #[test]
    fn reserved_bytes_point_at_first_unit_start_in_each_share() {
        let mut s = tx_splitter();
        // 2-byte varint + 600 bytes spans into the second share.
        s.write_unit(&[0xAA; 600]).expect("write");
        s.write_unit(&[0xBB; 10]).expect("write");
        let shares = s.export().expect("export");
        assert_eq!(shares.len(), 2);
        assert_eq!(shares[0].reserved_bytes().expect("reserved"), Some(17));

        // First share holds 495 raw bytes, so 602 - 495 = 107 spill over
        // after the 13-byte continuation header.
        assert_eq!(
            shares[1].reserved_bytes().expect("reserved"),
            Some(13 + 107)
        );

        let units = parse_compact_shares(&shares, &[0]).expect("parse");
        assert_eq!(units, vec![vec![0xAA; 600], vec![0xBB; 10]]);
    }

    #[test]
    fn share_spanned_by_one_unit_has_zero_reserved_bytes() {
        let mut s = tx_splitter();
        s.write_unit(&[0x11; 1200]).expect("write");
        let shares = s.export().expect("export");
        assert_eq!(shares.len(), 3);
        assert_eq!(shares[1].reserved_bytes().expect("reserved"), Some(0));
    }

    #[test]
    fn unit_starting_on_full_share_opens_new_share() {
        let mut s = tx_splitter();
        // 495 bytes fill the first share exactly: 2-byte varint + 493.
        s.write_unit(&[0x01; 493]).expect("write");
        assert_eq!(s.count(), 1);
        s.write_unit(b"x").expect("write");
        let shares = s.export().expect("export");
        assert_eq!(shares.len(), 2);
        assert_eq!(shares[1].reserved_bytes().expect("reserved"), Some(13));
        let units = parse_compact_shares(&shares, &[0]).expect("parse");
        assert_eq!(units.len(), 2);
        assert_eq!(units[1], b"x".to_vec());
    }

    #[test]
    fn empty_splitter_exports_nothing() {
        let s = tx_splitter();
        assert_eq!(s.count(), 0);
        assert!(s.export().expect("export").is_empty());
    }

    #[test]
    fn zero_length_units_round_trip() {
        let mut s =
            CompactShareSplitter::new(cfg(), NamespaceId::from(PAY_FOR_BLOB_NAMESPACE_ID), 0)
                .expect("pfb namespace is compact");
        s.write_unit(&[]).expect("write");
        s.write_unit(b"z").expect("write");
        let units = parse_compact_shares(&s.export().expect("export"), &[0]).expect("parse");
        assert_eq!(units, vec![Vec::new(), b"z".to_vec()]);
    }

    #[test]
    fn rejects_sparse_namespace() {
        let err = CompactShareSplitter::new(cfg(), NamespaceId::new(vec![0, 0, 0, 0, 0, 0, 9, 9]), 0)
            .expect_err("not compact");
        assert!(matches!(err, SplitError::InvalidNamespace(_)));
    }

    #[test]
    fn rejects_unit_length_past_sequence_end() {
        let mut s = tx_splitter();
        s.write_unit(b"abc").expect("write");
        let mut bytes = s.export().expect("export").remove(0).into_bytes();
        // Raise the varint length prefix from 3 to 100.
        bytes[17] = 100;
        let share = blobshare_codec::Share::new(cfg(), bytes).expect("size");
        let err = parse_compact_shares(&[share], &[0]).expect_err("bad length");
        assert!(err.to_string().contains("past sequence end"));
    }

    #[test]
    fn rejects_out_of_range_reserved_bytes() {
        let mut s = tx_splitter();
        s.write_unit(b"abc").expect("write");
        let mut bytes = s.export().expect("export").remove(0).into_bytes();
        bytes[13..17].copy_from_slice(&9999_u32.to_be_bytes());
        let share = blobshare_codec::Share::new(cfg(), bytes).expect("size");
        assert!(parse_compact_shares(&[share], &[0]).is_err());
    }
}
