use std::panic;
use std::sync::Arc;

use blobshare_codec::{from_byte_buffers, Share, ShareBuilder};
use blobshare_core::{NamespaceId, ShareConfig, TX_NAMESPACE_ID};

fn xorshift64(state: &mut u64) -> u64 {
    *state ^= *state << 13;
    *state ^= *state >> 7;
    *state ^= *state << 17;
    *state
}

fn random_bytes(seed: u64, len: usize) -> Vec<u8> {
    let mut s = seed.max(1);
    let mut out = vec![0_u8; len];
    for b in &mut out {
        *b = (xorshift64(&mut s) & 0xFF) as u8;
    }
    out
}

fn touch_every_accessor(share: &Share) {
    let _ = share.validate();
    let _ = share.namespace_id();
    let _ = share.info_byte();
    let _ = share.version();
    let _ = share.is_sequence_start();
    let _ = share.is_compact_share();
    let _ = share.sequence_len();
    let _ = share.is_padding();
    let _ = share.reserved_bytes();
    let _ = share.raw_data();
    let _ = share.does_support_version(&[0]);
}

fn sample_compact_share(cfg: &Arc<ShareConfig>) -> Share {
    let mut b = ShareBuilder::new(Arc::clone(cfg), &NamespaceId::from(TX_NAMESPACE_ID), 0, true)
        .expect("builder");
    b.with_sequence_len(4).expect("length");
    b.with_reserved_bytes(17).expect("reserved");
    b.add_data(&[3, 1, 2, 3]);
    b.build().expect("share builds")
}

#[test]
fn fuzz_like_random_buffers_do_not_panic_accessors() {
    let strict = Arc::new(ShareConfig {
        max_share_version: 0,
        ..ShareConfig::default()
    });
    for cfg in [Arc::new(ShareConfig::default()), strict] {
        for i in 0..2000_u64 {
            let len = ((i as usize) * 73) % 1100;
            let data = random_bytes(0xBAD5EED ^ i, len);
            let shares = from_byte_buffers(&cfg, vec![data.clone()]);

            let result = panic::catch_unwind(|| touch_every_accessor(&shares[0]));
            assert!(result.is_ok(), "accessor panicked at case {i} (len {len})");

            let constructed = Share::new(Arc::clone(&cfg), data);
            assert_eq!(constructed.is_ok(), len == cfg.share_size);
        }
    }
}

#[test]
fn fuzz_like_mutations_of_valid_share_do_not_panic() {
    let cfg = Arc::new(ShareConfig::default());
    let mut bytes = sample_compact_share(&cfg).into_bytes();

    for i in 0..512_usize {
        let idx = i % 24;
        bytes[idx] ^= (i as u8).wrapping_mul(31).wrapping_add(1);
        let share = Share::new(Arc::clone(&cfg), bytes.clone()).expect("size unchanged");
        let result = panic::catch_unwind(|| touch_every_accessor(&share));
        assert!(result.is_ok(), "accessor panicked for mutated share at case {i}");
    }
}

#[test]
fn truncated_prefixes_of_valid_share_do_not_panic() {
    let cfg = Arc::new(ShareConfig::default());
    let full = sample_compact_share(&cfg).into_bytes();

    for cut in 0..=32_usize {
        let shares = from_byte_buffers(&cfg, vec![full[..cut].to_vec()]);
        let result = panic::catch_unwind(|| touch_every_accessor(&shares[0]));
        assert!(result.is_ok(), "accessor panicked at prefix length {cut}");
        assert!(shares[0].validate().is_err());
    }
}
