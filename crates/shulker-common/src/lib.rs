pub mod chunk;
pub mod error;
pub mod types;

pub use chunk::{
    BlockStorage, Column, PaletteBlob, Section, SubChunkRecord, SurfaceRecord,
    BLOCKS_PER_SUBCHUNK, CHUNK_WIDTH, MAX_SUBCHUNKS, SURFACE_ELEMENTS,
};
pub use error::{DecodeError, ShulkerError};
pub use types::{ColumnCoordinate, Result};
