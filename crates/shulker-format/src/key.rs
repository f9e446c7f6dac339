//! Fixed-width binary keys of the per-column records.
//!
//! Every column key starts with the column's x and z as little-endian `i32`,
//! followed by a one byte record tag. Sub-chunk keys append the vertical index.

use byteorder::{ByteOrder, LittleEndian};
use shulker_common::{ColumnCoordinate, DecodeError, MAX_SUBCHUNKS};

pub const COLUMN_KEY_SIZE: usize = 9;
pub const SUBCHUNK_KEY_SIZE: usize = 10;

/// Record kinds stored per column, identified by the tag byte of the key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum RecordTag {
    Data2D = 45,
    Data2DLegacy = 46,
    SubChunkPrefix = 47,
    LegacyTerrain = 48,
    BlockEntity = 49,
    Entity = 50,
    PendingTicks = 51,
    BlockExtraData = 52,
    BiomeState = 53,
    FinalizedState = 54,
    Version = 118,
}

impl RecordTag {
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            45 => Some(RecordTag::Data2D),
            46 => Some(RecordTag::Data2DLegacy),
            47 => Some(RecordTag::SubChunkPrefix),
            48 => Some(RecordTag::LegacyTerrain),
            49 => Some(RecordTag::BlockEntity),
            50 => Some(RecordTag::Entity),
            51 => Some(RecordTag::PendingTicks),
            52 => Some(RecordTag::BlockExtraData),
            53 => Some(RecordTag::BiomeState),
            54 => Some(RecordTag::FinalizedState),
            118 => Some(RecordTag::Version),
            _ => None,
        }
    }

    pub fn as_byte(self) -> u8 {
        self as u8
    }
}

/// Tag of the surface (height map + biomes) record.
pub const SURFACE_TAG: RecordTag = RecordTag::Data2D;
/// Tag of the sub-chunk records.
pub const SUBCHUNK_TAG: RecordTag = RecordTag::SubChunkPrefix;

/// Any recognised per-column key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKey {
    Column {
        coord: ColumnCoordinate,
        tag: RecordTag,
    },
    SubChunk {
        coord: ColumnCoordinate,
        index: u8,
    },
}

impl RecordKey {
    pub fn coord(&self) -> ColumnCoordinate {
        match self {
            RecordKey::Column { coord, .. } | RecordKey::SubChunk { coord, .. } => *coord,
        }
    }
}

fn write_column_prefix(key: &mut [u8], col: ColumnCoordinate, tag: RecordTag) {
    LittleEndian::write_i32(&mut key[0..4], col.x);
    LittleEndian::write_i32(&mut key[4..8], col.z);
    key[8] = tag.as_byte();
}

fn read_coordinate(bytes: &[u8]) -> ColumnCoordinate {
    ColumnCoordinate::new(
        LittleEndian::read_i32(&bytes[0..4]),
        LittleEndian::read_i32(&bytes[4..8]),
    )
}

/// Key of any 9-byte per-column record.
pub fn encode_column_key(col: ColumnCoordinate, tag: RecordTag) -> [u8; COLUMN_KEY_SIZE] {
    let mut key = [0u8; COLUMN_KEY_SIZE];
    write_column_prefix(&mut key, col, tag);
    key
}

pub fn encode_surface_key(col: ColumnCoordinate) -> [u8; COLUMN_KEY_SIZE] {
    encode_column_key(col, SURFACE_TAG)
}

pub fn encode_subchunk_key(
    col: ColumnCoordinate,
    index: u8,
) -> Result<[u8; SUBCHUNK_KEY_SIZE], DecodeError> {
    if index >= MAX_SUBCHUNKS {
        return Err(DecodeError::InvalidIndex(index));
    }
    let mut key = [0u8; SUBCHUNK_KEY_SIZE];
    write_column_prefix(&mut key, col, SUBCHUNK_TAG);
    key[9] = index;
    Ok(key)
}

/// Recognises a surface key. Anything else, including well-formed keys of
/// other record kinds, is `None`.
pub fn decode_surface_key(bytes: &[u8]) -> Option<ColumnCoordinate> {
    if bytes.len() != COLUMN_KEY_SIZE || bytes[8] != SURFACE_TAG.as_byte() {
        return None;
    }
    Some(read_coordinate(bytes))
}

pub fn decode_subchunk_key(bytes: &[u8]) -> Option<(ColumnCoordinate, u8)> {
    if bytes.len() != SUBCHUNK_KEY_SIZE
        || bytes[8] != SUBCHUNK_TAG.as_byte()
        || bytes[9] >= MAX_SUBCHUNKS
    {
        return None;
    }
    Some((read_coordinate(bytes), bytes[9]))
}

pub fn decode_key(bytes: &[u8]) -> Option<RecordKey> {
    match bytes.len() {
        COLUMN_KEY_SIZE => {
            let tag = RecordTag::from_byte(bytes[8])?;
            if tag == SUBCHUNK_TAG {
                return None;
            }
            Some(RecordKey::Column {
                coord: read_coordinate(bytes),
                tag,
            })
        }
        SUBCHUNK_KEY_SIZE => {
            decode_subchunk_key(bytes).map(|(coord, index)| RecordKey::SubChunk { coord, index })
        }
        _ => None,
    }
}
