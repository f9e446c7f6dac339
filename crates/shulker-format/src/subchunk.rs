//! Sub-chunk record decoding.
//!
//! Layout of a version 8 record:
//!
//! ```text
//! version:u8 | storage_groups:u8 | bits_per_block_pair:u8 | packed block indices
//!   | palette_length:u8 | reserved:[u8; 3] | palette payload...
//! ```
//!
//! The version byte decides the meaning of everything after it, so unknown
//! versions stop decoding immediately.

use bytes::Bytes;
use shulker_common::{BlockStorage, DecodeError, PaletteBlob, SubChunkRecord};

use crate::buffer::RecordBuffer;
use crate::packing::{bits_per_block_from_pair, WordLayout};

pub const SUBCHUNK_VERSION_8: u8 = 8;

/// Size of the palette blob header (length byte plus reserved bytes).
pub const PALETTE_HEADER_SIZE: usize = 4;

pub fn decode_subchunk(bytes: Bytes) -> Result<SubChunkRecord, DecodeError> {
    let mut buffer = RecordBuffer::new(bytes);
    let version = buffer.read_u8("version")?;
    match version {
        SUBCHUNK_VERSION_8 => decode_v8(&mut buffer).map(SubChunkRecord::V8),
        other => Err(DecodeError::UnsupportedVersion(other)),
    }
}

fn decode_v8(buffer: &mut RecordBuffer) -> Result<BlockStorage, DecodeError> {
    let [storage_group_count, bits_pair] = buffer.read_array::<2>("storage header")?;
    let bits_per_block = bits_per_block_from_pair(bits_pair)?;
    let layout = WordLayout::new(bits_per_block)?;

    let raw_block_data = buffer.read_bytes(layout.byte_len(), "block indices")?;
    let blocks = layout.unpack(&raw_block_data)?;

    let palette = read_palette_blob(buffer)?;

    Ok(BlockStorage {
        storage_group_count,
        bits_per_block,
        blocks,
        raw_block_data,
        palette,
    })
}

fn read_palette_blob(buffer: &mut RecordBuffer) -> Result<PaletteBlob, DecodeError> {
    let [declared_length, r0, r1, r2] =
        buffer.read_array::<PALETTE_HEADER_SIZE>("palette header")?;
    Ok(PaletteBlob {
        declared_length,
        reserved: [r0, r1, r2],
        payload: buffer.read_rest(),
    })
}
