#![allow(dead_code)]

use shulker::{encode_subchunk_key, encode_surface_key, ColumnCoordinate, MemoryStore};
use shulker_format::WordLayout;
use shulker_nbt::Tag;
use std::collections::HashMap;

/// Surface bytes whose height at `(x, z)` is `x + 16 * z` and whose biome
/// is `z`.
pub fn surface_bytes() -> Vec<u8> {
    let mut bytes = Vec::with_capacity(768);
    for i in 0..256i16 {
        bytes.extend_from_slice(&i.to_le_bytes());
    }
    for i in 0..256usize {
        bytes.push((i / 16) as u8);
    }
    bytes
}

pub fn palette_entry(name: &str, states: Vec<(&str, Tag)>) -> Vec<u8> {
    let mut root = HashMap::new();
    root.insert("name".to_string(), Tag::String(name.to_string()));
    let states = states
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();
    root.insert("states".to_string(), Tag::Compound(states));
    root.insert("version".to_string(), Tag::Int(17_959_425));

    let mut buffer = Vec::new();
    Tag::Compound(root).write(&mut buffer, "").unwrap();
    buffer
}

/// Version 8 sub-chunk bytes packing `blocks` at `bits` bits per block,
/// followed by a palette blob holding `palette`.
pub fn subchunk_bytes(bits: u8, blocks: &[u16], palette: &[Vec<u8>]) -> Vec<u8> {
    let layout = WordLayout::new(bits).unwrap();
    let mut bytes = vec![8, 1, bits * 2];
    bytes.extend(layout.pack(blocks));
    bytes.extend_from_slice(&[palette.len() as u8, 0, 0, 0]);
    for entry in palette {
        bytes.extend_from_slice(entry);
    }
    bytes
}

/// Sub-chunk where every block index is `y % modulo`.
pub fn layered_subchunk(bits: u8, palette: &[Vec<u8>]) -> Vec<u8> {
    let modulo = palette.len().max(1) as u16;
    let blocks: Vec<u16> = (0..4096u16).map(|i| (i % 16) % modulo).collect();
    subchunk_bytes(bits, &blocks, palette)
}

pub fn put_surface(store: &mut MemoryStore, col: ColumnCoordinate, value: Vec<u8>) {
    store.insert(encode_surface_key(col).to_vec(), value);
}

pub fn put_subchunk(store: &mut MemoryStore, col: ColumnCoordinate, index: u8, value: Vec<u8>) {
    store.insert(encode_subchunk_key(col, index).unwrap().to_vec(), value);
}

pub fn stone_and_air() -> Vec<Vec<u8>> {
    vec![
        palette_entry("minecraft:air", vec![]),
        palette_entry(
            "minecraft:stone",
            vec![("stone_type", Tag::String("granite".to_string()))],
        ),
    ]
}
