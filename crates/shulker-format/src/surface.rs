use byteorder::{ByteOrder, LittleEndian};
use shulker_common::{DecodeError, SurfaceRecord, SURFACE_ELEMENTS};

const HEIGHT_BYTES: usize = SURFACE_ELEMENTS * 2;

/// Fixed payload size of a surface record: 256 `i16` heights then 256 `i8` biomes.
pub const SURFACE_RECORD_SIZE: usize = HEIGHT_BYTES + SURFACE_ELEMENTS;

/// Decodes a surface record. Bytes past the first 768 are ignored.
pub fn decode_surface(bytes: &[u8]) -> Result<SurfaceRecord, DecodeError> {
    if bytes.len() < SURFACE_RECORD_SIZE {
        return Err(DecodeError::TruncatedRecord {
            step: "surface",
            needed: SURFACE_RECORD_SIZE,
            available: bytes.len(),
        });
    }

    let mut heights = vec![0i16; SURFACE_ELEMENTS];
    LittleEndian::read_i16_into(&bytes[..HEIGHT_BYTES], &mut heights);

    let biomes = bytes[HEIGHT_BYTES..SURFACE_RECORD_SIZE]
        .iter()
        .map(|&b| b as i8)
        .collect();

    Ok(SurfaceRecord { heights, biomes })
}
