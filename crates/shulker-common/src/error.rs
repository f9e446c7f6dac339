use std::error::Error;
use std::fmt;

use crate::types::ColumnCoordinate;

/// Structural failure while decoding a single record buffer.
///
/// Carries no coordinate: the decoders only see bytes. Callers that know which
/// column and sub-chunk they asked for wrap it into [`ShulkerError::Record`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// Fewer bytes remained than the format requires at `step`.
    TruncatedRecord {
        step: &'static str,
        needed: usize,
        available: usize,
    },
    /// Sub-chunk version byte this reader does not understand.
    UnsupportedVersion(u8),
    /// Bits-per-block-pair field outside {6, 8, 10, 12}.
    UnsupportedBitWidth(u8),
    /// Sub-chunk index outside 0..=15.
    InvalidIndex(u8),
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::TruncatedRecord {
                step,
                needed,
                available,
            } => write!(
                f,
                "truncated record while reading {}: needed {} bytes, {} available",
                step, needed, available
            ),
            DecodeError::UnsupportedVersion(version) => {
                write!(f, "unsupported sub-chunk version: {}", version)
            }
            DecodeError::UnsupportedBitWidth(bits) => {
                write!(f, "unsupported bits-per-block-pair: {}", bits)
            }
            DecodeError::InvalidIndex(index) => write!(f, "invalid sub-chunk index: {}", index),
        }
    }
}

impl Error for DecodeError {}

#[derive(Debug)]
pub enum ShulkerError {
    /// A present record failed to decode.
    Record {
        coord: ColumnCoordinate,
        index: Option<u8>,
        source: DecodeError,
    },
    /// Caller asked for a sub-chunk index outside 0..=15.
    InvalidIndex { coord: ColumnCoordinate, index: u8 },
    /// The key-value store collaborator reported a failure.
    Store(String),
    Config(String),
    IoError(std::io::Error),
}

impl ShulkerError {
    pub fn record(coord: ColumnCoordinate, index: Option<u8>, source: DecodeError) -> Self {
        ShulkerError::Record {
            coord,
            index,
            source,
        }
    }

    /// The underlying decode failure, if this error came from a record.
    pub fn decode_error(&self) -> Option<&DecodeError> {
        match self {
            ShulkerError::Record { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl fmt::Display for ShulkerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShulkerError::Record {
                coord,
                index: Some(index),
                source,
            } => write!(f, "sub-chunk {} of column {}: {}", index, coord, source),
            ShulkerError::Record {
                coord,
                index: None,
                source,
            } => write!(f, "surface record of column {}: {}", coord, source),
            ShulkerError::InvalidIndex { coord, index } => {
                write!(f, "invalid sub-chunk index {} for column {}", index, coord)
            }
            ShulkerError::Store(msg) => write!(f, "Store error: {}", msg),
            ShulkerError::Config(msg) => write!(f, "Config error: {}", msg),
            ShulkerError::IoError(err) => write!(f, "IO error: {}", err),
        }
    }
}

impl Error for ShulkerError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ShulkerError::Record { source, .. } => Some(source),
            ShulkerError::IoError(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ShulkerError {
    fn from(err: std::io::Error) -> Self {
        ShulkerError::IoError(err)
    }
}
