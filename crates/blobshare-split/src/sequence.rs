use blobshare_codec::Share;
use blobshare_core::NamespaceId;
use tracing::{debug, trace};

use crate::error::SplitError;

/// One sequence-start share plus its continuation shares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sequence {
    pub namespace: NamespaceId,
    pub shares: Vec<Share>,
}

impl Sequence {
    fn start(share: &Share) -> Result<Self, SplitError> {
        Ok(Self {
            namespace: share.namespace_id()?,
            shares: vec![share.clone()],
        })
    }

    fn first(&self) -> Result<&Share, SplitError> {
        self.shares
            .first()
            .ok_or(SplitError::InvalidSequence("sequence has no shares"))
    }

    /// Declared length from the start share.
    pub fn sequence_len(&self) -> Result<u32, SplitError> {
        Ok(self.first()?.sequence_len()?)
    }

    pub fn version(&self) -> Result<u8, SplitError> {
        Ok(self.first()?.version()?)
    }

    fn raw_len(&self) -> Result<usize, SplitError> {
        let mut total = 0_usize;
        for share in &self.shares {
            total += share.raw_data()?.len();
        }
        Ok(total)
    }

    /// Returns true once the shares hold at least the declared length.
    pub fn is_complete(&self) -> Result<bool, SplitError> {
        Ok(self.raw_len()? >= self.sequence_len()? as usize)
    }

    /// Concatenates raw data and drops the trailing padding past the declared length.
    pub fn raw_data(&self) -> Result<Vec<u8>, SplitError> {
        let sequence_len = self.sequence_len()? as usize;
        let mut out = Vec::with_capacity(self.raw_len()?);
        for share in &self.shares {
            out.extend_from_slice(share.raw_data()?);
        }
        if out.len() < sequence_len {
            return Err(SplitError::InvalidSequence(
                "shares hold fewer bytes than the sequence length",
            ));
        }
        out.truncate(sequence_len);
        Ok(out)
    }
}

/// Groups shares into sequences, skipping padding shares.
///
/// Every share is size-checked and version-checked. `compact` selects which
/// share format is accepted; the other format is rejected.
pub(crate) fn collect_sequences(
    shares: &[Share],
    supported_versions: &[u8],
    compact: bool,
) -> Result<Vec<Sequence>, SplitError> {
    let mut sequences = Vec::new();
    let mut current: Option<Sequence> = None;

    for (index, share) in shares.iter().enumerate() {
        share.validate()?;
        share.does_support_version(supported_versions)?;

        if share.is_padding()? {
            trace!(index, "skipping padding share");
            finish(&mut sequences, current.take())?;
            continue;
        }
        if share.is_compact_share() != compact {
            return Err(SplitError::InvalidSequence(if compact {
                "sparse share in compact input"
            } else {
                "compact share in sparse input"
            }));
        }

        if share.is_sequence_start()? {
            finish(&mut sequences, current.take())?;
            debug!(index, sequence_len = share.sequence_len()?, "sequence start");
            current = Some(Sequence::start(share)?);
            continue;
        }

        let sequence = current.as_mut().ok_or(SplitError::InvalidSequence(
            "continuation share without a sequence start",
        ))?;
        if sequence.namespace != share.namespace_id()? {
            return Err(SplitError::InvalidSequence(
                "namespace changed within a sequence",
            ));
        }
        if sequence.version()? != share.version()? {
            return Err(SplitError::InvalidSequence(
                "version changed within a sequence",
            ));
        }
        if sequence.is_complete()? {
            return Err(SplitError::InvalidSequence(
                "continuation share after a complete sequence",
            ));
        }
        sequence.shares.push(share.clone());
    }

    finish(&mut sequences, current)?;
    Ok(sequences)
}

fn finish(sequences: &mut Vec<Sequence>, sequence: Option<Sequence>) -> Result<(), SplitError> {
    if let Some(sequence) = sequence {
        if !sequence.is_complete()? {
            return Err(SplitError::InvalidSequence("sequence is missing shares"));
        }
        sequences.push(sequence);
    }
    Ok(())
}

/// Reconstructs the sequences written by a sparse splitter.
pub fn parse_sparse_shares(
    shares: &[Share],
    supported_versions: &[u8],
) -> Result<Vec<Sequence>, SplitError> {
    collect_sequences(shares, supported_versions, false)
}
