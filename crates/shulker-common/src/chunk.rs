use bytes::Bytes;
use serde::Serialize;

use crate::types::ColumnCoordinate;

/// Side length of a column and of a sub-chunk, in blocks.
pub const CHUNK_WIDTH: usize = 16;
/// Samples per surface field (one per (x, z) position).
pub const SURFACE_ELEMENTS: usize = CHUNK_WIDTH * CHUNK_WIDTH;
/// Blocks in one 16x16x16 sub-chunk.
pub const BLOCKS_PER_SUBCHUNK: usize = CHUNK_WIDTH * CHUNK_WIDTH * CHUNK_WIDTH;
/// Sub-chunks stacked in one column, bottom to top.
pub const MAX_SUBCHUNKS: u8 = 16;

/// Height map and biome ids of one column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SurfaceRecord {
    /// 256 height samples, row-major (`z * 16 + x`).
    pub heights: Vec<i16>,
    /// 256 biome ids, same ordering as `heights`.
    pub biomes: Vec<i8>,
}

impl SurfaceRecord {
    pub fn height_at(&self, x: usize, z: usize) -> Option<i16> {
        surface_index(x, z).and_then(|i| self.heights.get(i).copied())
    }

    pub fn biome_at(&self, x: usize, z: usize) -> Option<i8> {
        surface_index(x, z).and_then(|i| self.biomes.get(i).copied())
    }
}

fn surface_index(x: usize, z: usize) -> Option<usize> {
    if x < CHUNK_WIDTH && z < CHUNK_WIDTH {
        Some(z * CHUNK_WIDTH + x)
    } else {
        None
    }
}

/// Trailing block-palette metadata of a sub-chunk, handed off uninterpreted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaletteBlob {
    /// Declared length byte (number of palette entries that follow).
    pub declared_length: u8,
    pub reserved: [u8; 3],
    /// Every byte after the header, verbatim.
    pub payload: Bytes,
}

/// Block storage of a version 8 sub-chunk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlockStorage {
    pub storage_group_count: u8,
    /// Bits used by each block index, in 3..=6.
    pub bits_per_block: u8,
    /// 4096 palette-relative block indices in on-disk (XZY) order.
    pub blocks: Vec<u16>,
    /// The word-packed block id array exactly as stored.
    pub raw_block_data: Bytes,
    pub palette: PaletteBlob,
}

impl BlockStorage {
    /// Palette index of the block at local (x, y, z), each in 0..16.
    pub fn block_at(&self, x: usize, y: usize, z: usize) -> Option<u16> {
        if x >= CHUNK_WIDTH || y >= CHUNK_WIDTH || z >= CHUNK_WIDTH {
            return None;
        }
        let index = (x * CHUNK_WIDTH + z) * CHUNK_WIDTH + y;
        self.blocks.get(index).copied()
    }
}

/// A decoded sub-chunk record, one variant per understood format version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum SubChunkRecord {
    V8(BlockStorage),
}

impl SubChunkRecord {
    pub fn version(&self) -> u8 {
        match self {
            SubChunkRecord::V8(_) => 8,
        }
    }

    pub fn storage(&self) -> &BlockStorage {
        match self {
            SubChunkRecord::V8(storage) => storage,
        }
    }

    pub fn bits_per_block(&self) -> u8 {
        self.storage().bits_per_block
    }

    pub fn blocks(&self) -> &[u16] {
        &self.storage().blocks
    }

    pub fn palette(&self) -> &PaletteBlob {
        &self.storage().palette
    }
}

/// A sub-chunk record together with its vertical position in the column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    /// 0..=15, bottom to top.
    pub index: u8,
    pub record: SubChunkRecord,
}

/// Everything stored for one column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Column {
    pub coord: ColumnCoordinate,
    pub surface: Option<SurfaceRecord>,
    /// Present sub-chunks in ascending index order; missing indices are omitted.
    pub sections: Vec<Section>,
}

impl Column {
    pub fn section(&self, index: u8) -> Option<&Section> {
        self.sections.iter().find(|section| section.index == index)
    }
}
