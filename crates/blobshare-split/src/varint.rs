use crate::error::SplitError;

/// Longest LEB128 encoding of a `u64`.
pub const MAX_VARINT_LEN: usize = 10;

/// Encodes `value` as an unsigned LEB128 varint.
pub fn encode_uvarint(mut value: u64) -> Vec<u8> {
    let mut out = Vec::with_capacity(MAX_VARINT_LEN);
    while value >= 0x80 {
        out.push((value as u8) | 0x80);
        value >>= 7;
    }
    out.push(value as u8);
    out
}

/// Decodes an unsigned LEB128 varint prefix, returning the value and bytes consumed.
pub fn decode_uvarint(bytes: &[u8]) -> Result<(u64, usize), SplitError> {
    let mut value = 0_u64;
    for (i, byte) in bytes.iter().enumerate() {
        if i == MAX_VARINT_LEN {
            return Err(SplitError::InvalidUnit("varint overflows u64"));
        }
        let low = u64::from(byte & 0x7F);
        if i == MAX_VARINT_LEN - 1 && low > 1 {
            return Err(SplitError::InvalidUnit("varint overflows u64"));
        }
        value |= low << (7 * i);
        if byte & 0x80 == 0 {
            return Ok((value, i + 1));
        }
    }
    Err(SplitError::InvalidUnit("truncated varint"))
}
