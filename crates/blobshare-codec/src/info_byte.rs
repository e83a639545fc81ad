use crate::error::ShareError;

/// Share header byte: `(version << 1) | is_sequence_start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InfoByte(u8);

impl InfoByte {
    /// Encodes `version` and the sequence-start flag.
    ///
    /// Fails when `version` exceeds `max_version`.
    pub fn new(version: u8, is_sequence_start: bool, max_version: u8) -> Result<Self, ShareError> {
        if version > max_version {
            return Err(ShareError::InvalidInfoByte {
                byte: version.wrapping_shl(1) | u8::from(is_sequence_start),
                version,
                max: max_version,
            });
        }
        // Versions above 127 do not fit in seven bits.
        let prefix = u16::from(version) << 1;
        let encoded = prefix | u16::from(is_sequence_start);
        u8::try_from(encoded)
            .map(Self)
            .map_err(|_| ShareError::InvalidInfoByte {
                byte: encoded as u8,
                version,
                max: max_version,
            })
    }

    /// Parses a raw info byte, accepting versions up to `max_version`.
    pub fn parse(byte: u8, max_version: u8) -> Result<Self, ShareError> {
        let version = byte >> 1;
        let is_sequence_start = byte & 1 == 1;
        Self::new(version, is_sequence_start, max_version)
    }

    pub fn version(self) -> u8 {
        self.0 >> 1
    }

    pub fn is_sequence_start(self) -> bool {
        self.0 & 1 == 1
    }

    pub fn as_u8(self) -> u8 {
        self.0
    }
}
