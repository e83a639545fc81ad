use blobshare_codec::{Share, ShareError};

/// One-line summary of a share's decoded header fields.
pub fn describe_share(index: usize, share: &Share) -> String {
    match summarize(share) {
        Ok(summary) => format!("#{index} {summary}"),
        Err(err) => format!("#{index} malformed: {err}"),
    }
}

fn summarize(share: &Share) -> Result<String, ShareError> {
    share.validate()?;
    let namespace = share.namespace_id()?;
    let info = share.info_byte()?;
    let sequence_len = share.sequence_len()?;
    let padding = share.is_padding()?;
    let raw_len = share.raw_data()?.len();

    let mut out = format!(
        "ns={namespace} version={} start={} compact={} seq_len={sequence_len} padding={padding} raw_len={raw_len}",
        info.version(),
        info.is_sequence_start(),
        share.is_compact_share(),
    );
    if let Some(reserved) = share.reserved_bytes()? {
        out.push_str(&format!(" reserved={reserved}"));
    }
    Ok(out)
}
