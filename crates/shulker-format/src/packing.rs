//! Word-packed block index arrays.
//!
//! Block indices are stored in little-endian 32-bit words. Each word holds
//! `floor(32 / bits_per_block)` indices starting from its least significant
//! bit; leftover high bits are padding. Indices never straddle two words.

use byteorder::{ByteOrder, LittleEndian};
use shulker_common::{DecodeError, BLOCKS_PER_SUBCHUNK};

const WORD_BITS: usize = 32;
const WORD_BYTES: usize = 4;

/// Bit widths a sub-chunk may use for its block indices.
pub const SUPPORTED_BITS_PER_BLOCK: [u8; 4] = [3, 4, 5, 6];

/// Derives the per-block width from the header's bits-per-block-pair field.
pub fn bits_per_block_from_pair(pair: u8) -> Result<u8, DecodeError> {
    match pair {
        6 | 8 | 10 | 12 => Ok(pair / 2),
        _ => Err(DecodeError::UnsupportedBitWidth(pair)),
    }
}

/// Geometry of a packed array holding one sub-chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordLayout {
    pub bits_per_block: u8,
    pub blocks_per_word: usize,
    pub word_count: usize,
}

impl WordLayout {
    pub fn new(bits_per_block: u8) -> Result<Self, DecodeError> {
        if !SUPPORTED_BITS_PER_BLOCK.contains(&bits_per_block) {
            return Err(DecodeError::UnsupportedBitWidth(bits_per_block.saturating_mul(2)));
        }
        let blocks_per_word = WORD_BITS / bits_per_block as usize;
        Ok(Self {
            bits_per_block,
            blocks_per_word,
            word_count: BLOCKS_PER_SUBCHUNK.div_ceil(blocks_per_word),
        })
    }

    /// Bytes the packed array occupies on disk.
    pub fn byte_len(&self) -> usize {
        self.word_count * WORD_BYTES
    }

    fn mask(&self) -> u32 {
        (1u32 << self.bits_per_block) - 1
    }

    /// Unpacks exactly 4096 indices. `data` must hold at least
    /// [`byte_len`](Self::byte_len) bytes; anything past that is not read.
    pub fn unpack(&self, data: &[u8]) -> Result<Vec<u16>, DecodeError> {
        let needed = self.byte_len();
        if data.len() < needed {
            return Err(DecodeError::TruncatedRecord {
                step: "block indices",
                needed,
                available: data.len(),
            });
        }

        let mask = self.mask();
        let bits = self.bits_per_block as u32;
        let mut blocks = Vec::with_capacity(BLOCKS_PER_SUBCHUNK);

        for chunk in data[..needed].chunks_exact(WORD_BYTES) {
            let word = LittleEndian::read_u32(chunk);
            let take = self
                .blocks_per_word
                .min(BLOCKS_PER_SUBCHUNK - blocks.len());
            for slot in 0..take as u32 {
                blocks.push(((word >> (slot * bits)) & mask) as u16);
            }
        }

        Ok(blocks)
    }

    /// Packs indices into words, the inverse of [`unpack`](Self::unpack).
    /// Each index is truncated to `bits_per_block` bits.
    pub fn pack(&self, blocks: &[u16]) -> Vec<u8> {
        let mask = self.mask();
        let bits = self.bits_per_block as u32;
        let mut out = vec![0u8; self.byte_len()];

        for (word_index, group) in blocks.chunks(self.blocks_per_word).enumerate() {
            if word_index >= self.word_count {
                break;
            }
            let mut word = 0u32;
            for (slot, &block) in group.iter().enumerate() {
                word |= (block as u32 & mask) << (slot as u32 * bits);
            }
            let start = word_index * WORD_BYTES;
            LittleEndian::write_u32(&mut out[start..start + WORD_BYTES], word);
        }

        out
    }
}
