use std::sync::Arc;

use blobshare_codec::padding::{reserved_padding_shares, tail_padding_shares};
use blobshare_core::{NamespaceId, ShareConfig, TX_NAMESPACE_ID};
use blobshare_split::{
    parse_compact_shares, parse_sparse_shares, CompactShareSplitter, SparseShareSplitter,
};

fn cfg() -> Arc<ShareConfig> {
    Arc::new(ShareConfig::default())
}

fn blob_ns() -> NamespaceId {
    NamespaceId::new(vec![0, 0, 0, 0, 0, 0, 0x10, 0x01])
}

fn payload(seed: u8, len: usize) -> Vec<u8> {
    (0..len)
        .map(|i| seed.wrapping_add((i * 7 % 256) as u8))
        .collect()
}

#[test]
fn sparse_round_trip_at_share_boundaries() {
    let first = 499_usize;
    let cont = 503_usize;
    for len in [
        1,
        first - 1,
        first,
        first + 1,
        first + cont,
        first + cont + 1,
        first + 5 * cont,
        10_000,
    ] {
        let data = payload(len as u8, len);
        let mut splitter = SparseShareSplitter::new(cfg()).expect("config");
        splitter.write(&blob_ns(), 0, &data).expect("write");
        let shares = splitter.export();

        let expected_shares = if len <= first {
            1
        } else {
            1 + (len - first).div_ceil(cont)
        };
        assert_eq!(shares.len(), expected_shares, "share count for len {len}");

        let start = &shares[0];
        assert_eq!(start.sequence_len().expect("seq len") as usize, len);
        assert_eq!(
            start.raw_data().expect("raw").len(),
            512 - 8 - 1 - 4,
            "start share raw length"
        );
        for cont_share in &shares[1..] {
            assert_eq!(cont_share.sequence_len().expect("seq len"), 0);
            assert_eq!(cont_share.raw_data().expect("raw").len(), 512 - 8 - 1);
        }

        let sequences = parse_sparse_shares(&shares, &[0]).expect("parse");
        assert_eq!(sequences.len(), 1);
        assert_eq!(sequences[0].raw_data().expect("raw"), data, "len {len}");
    }
}

#[test]
fn sparse_round_trip_ignores_surrounding_padding() {
    let a = payload(1, 3000);
    let b = payload(2, 17);
    let mut splitter = SparseShareSplitter::new(cfg()).expect("config");
    splitter.write(&blob_ns(), 0, &a).expect("write");
    splitter.write(&blob_ns(), 0, &b).expect("write");

    let mut shares = reserved_padding_shares(&cfg(), 2).expect("padding");
    shares.extend(splitter.export());
    shares.extend(tail_padding_shares(&cfg(), 4).expect("padding"));

    let decoded: Vec<Vec<u8>> = parse_sparse_shares(&shares, &[0])
        .expect("parse")
        .iter()
        .map(|seq| seq.raw_data().expect("raw"))
        .collect();
    assert_eq!(decoded, vec![a, b]);
}

#[test]
fn compact_round_trip_of_many_units() {
    let units: Vec<Vec<u8>> = (0..200_usize)
        .map(|i| payload(i as u8, (i * 37) % 700))
        .collect();

    let mut splitter =
        CompactShareSplitter::new(cfg(), NamespaceId::from(TX_NAMESPACE_ID), 0).expect("config");
    for unit in &units {
        splitter.write_unit(unit).expect("write");
    }
    let shares = splitter.export().expect("export");
    assert!(shares.len() > 1);
    for share in &shares {
        assert!(share.validate().is_ok());
        assert!(share.is_compact_share());
    }

    let decoded = parse_compact_shares(&shares, &[0]).expect("parse");
    assert_eq!(decoded, units);
}

#[test]
fn compact_reserved_bytes_always_land_on_a_unit_start() {
    let units: Vec<Vec<u8>> = (0..40_usize).map(|i| payload(3, 50 + i * 23)).collect();
    let mut splitter =
        CompactShareSplitter::new(cfg(), NamespaceId::from(TX_NAMESPACE_ID), 0).expect("config");
    for unit in &units {
        splitter.write_unit(unit).expect("write");
    }
    let shares = splitter.export().expect("export");

    // Byte position of each unit start across the concatenated sequence.
    let mut starts = Vec::new();
    let mut pos = 0_usize;
    for unit in &units {
        starts.push(pos);
        pos += blobshare_split::varint::encode_uvarint(unit.len() as u64).len() + unit.len();
    }

    let mut consumed = 0_usize;
    for (i, share) in shares.iter().enumerate() {
        let header = if i == 0 { 17 } else { 13 };
        let raw_len = share.raw_data().expect("raw").len();
        let reserved = share.reserved_bytes().expect("reserved").expect("compact") as usize;
        let first_start = starts
            .iter()
            .find(|s| **s >= consumed && **s < consumed + raw_len)
            .map(|s| header + (s - consumed));
        assert_eq!(reserved, first_start.unwrap_or(0), "share {i}");
        consumed += raw_len;
    }
}
