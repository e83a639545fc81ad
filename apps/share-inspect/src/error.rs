use blobshare_codec::ShareError;
use blobshare_core::ConfigError;
use blobshare_split::SplitError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InspectError {
    #[error("config: {0}")]
    Config(#[from] ConfigError),
    #[error("share: {0}")]
    Share(#[from] ShareError),
    #[error("split: {0}")]
    Split(#[from] SplitError),
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("line {line}: invalid hex: {source}")]
    Hex {
        line: usize,
        source: hex::FromHexError,
    },
    #[error("file length {len} is not a multiple of share size {share_size}")]
    Length { len: usize, share_size: usize },
}
