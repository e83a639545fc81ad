use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use blobshare_codec::{from_byte_buffers, to_byte_buffers, Share};
use blobshare_core::ShareConfig;
use tracing::debug;

use crate::error::InspectError;

/// Loads shares from a file of concatenated raw shares, or one hex share per line.
///
/// Hex lines are wrapped without a size check so that wrong-sized lines are
/// reported per share instead of aborting the whole file.
pub fn read_shares(
    path: &Path,
    config: &Arc<ShareConfig>,
    hex_lines: bool,
) -> Result<Vec<Share>, InspectError> {
    if hex_lines {
        let text = std::fs::read_to_string(path)?;
        let mut buffers = Vec::new();
        for (idx, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let bytes = hex::decode(line).map_err(|source| InspectError::Hex {
                line: idx + 1,
                source,
            })?;
            buffers.push(bytes);
        }
        debug!(path = %path.display(), shares = buffers.len(), "read hex shares");
        return Ok(from_byte_buffers(config, buffers));
    }

    let raw = std::fs::read(path)?;
    if raw.len() % config.share_size != 0 {
        return Err(InspectError::Length {
            len: raw.len(),
            share_size: config.share_size,
        });
    }
    let shares = raw
        .chunks(config.share_size)
        .map(|chunk| Share::new(Arc::clone(config), chunk.to_vec()))
        .collect::<Result<Vec<_>, _>>()?;
    debug!(path = %path.display(), shares = shares.len(), "read raw shares");
    Ok(shares)
}

/// Writes shares as concatenated raw bytes, or one hex share per line.
pub fn write_shares(
    out: &mut impl Write,
    shares: &[Share],
    hex_lines: bool,
) -> Result<(), InspectError> {
    for buffer in to_byte_buffers(shares) {
        if hex_lines {
            writeln!(out, "{}", hex::encode(buffer))?;
        } else {
            out.write_all(&buffer)?;
        }
    }
    out.flush()?;
    Ok(())
}
