#![no_main]

use std::sync::Arc;

use blobshare_codec::from_byte_buffers;
use blobshare_core::ShareConfig;
use blobshare_split::{parse_compact_shares, parse_sparse_shares};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let config = Arc::new(ShareConfig::default());
    let buffers = data
        .chunks(config.share_size)
        .map(<[u8]>::to_vec)
        .collect::<Vec<_>>();
    let shares = from_byte_buffers(&config, buffers);

    for share in &shares {
        let _ = share.validate();
        let _ = share.namespace_id();
        let _ = share.sequence_len();
        let _ = share.is_padding();
        let _ = share.reserved_bytes();
        let _ = share.raw_data();
    }
    let _ = parse_sparse_shares(&shares, &[0]);
    let _ = parse_compact_shares(&shares, &[0]);
});
