use blobshare_core::ShareConfig;

use crate::error::ShareError;

/// Encodes the in-share index of the first unit start as big-endian reserved bytes.
///
/// An index of `0` means no unit starts in the share.
pub fn encode_reserved_bytes(config: &ShareConfig, index: u32) -> Result<Vec<u8>, ShareError> {
    let width = config.compact_share_reserved_bytes;
    if width == 0 || width > 4 {
        return Err(ShareError::InvalidReservedBytes(
            "reserved bytes width must be in 1..=4",
        ));
    }
    if index as usize >= config.share_size {
        return Err(ShareError::InvalidReservedBytes(
            "index must be less than share size",
        ));
    }

    let be = index.to_be_bytes();
    let (high, low) = be.split_at(4 - width);
    if high.iter().any(|b| *b != 0) {
        return Err(ShareError::InvalidReservedBytes(
            "index does not fit reserved bytes width",
        ));
    }
    Ok(low.to_vec())
}

/// Decodes reserved bytes back into an in-share index.
pub fn parse_reserved_bytes(config: &ShareConfig, bytes: &[u8]) -> Result<u32, ShareError> {
    if bytes.len() != config.compact_share_reserved_bytes {
        return Err(ShareError::InvalidReservedBytes(
            "reserved bytes length does not match config",
        ));
    }
    if bytes.len() > 4 {
        return Err(ShareError::InvalidReservedBytes(
            "reserved bytes width must be in 1..=4",
        ));
    }

    let mut be = [0_u8; 4];
    be[4 - bytes.len()..].copy_from_slice(bytes);
    let index = u32::from_be_bytes(be);
    if index as usize >= config.share_size {
        return Err(ShareError::InvalidReservedBytes(
            "index must be less than share size",
        ));
    }
    Ok(index)
}
