//! Decoding of Bedrock-style world records held in a sorted key-value store.
//!
//! Column surfaces and sub-chunks are looked up by column coordinate and
//! decoded into owned records. See [`world`] for single lookups and [`scan`]
//! for walking every indexed column.

pub mod config;
pub mod observer;
pub mod scan;
pub mod world;

// Re-export commonly used items
pub use config::{ErrorPolicy, ScanOptions};
pub use observer::{DumpObserver, NoopObserver, RecordObserver};
pub use scan::{scan, ColumnReport, ColumnScan};
pub use world::{
    get_subchunk, get_subchunk_observed, get_subchunks, get_subchunks_observed, get_surface,
    get_surface_observed, load_column, load_column_observed,
};

pub use shulker_common::{
    BlockStorage, Column, ColumnCoordinate, DecodeError, PaletteBlob, Result, Section,
    ShulkerError, SubChunkRecord, SurfaceRecord,
};
pub use shulker_format::{
    decode_key, decode_subchunk, decode_subchunk_key, decode_surface, decode_surface_key,
    encode_subchunk_key, encode_surface_key, RecordKey, RecordTag,
};
pub use shulker_logger::{log, LogSeverity};
pub use shulker_nbt::{read_palette, PaletteEntry};
pub use shulker_store::{list_columns, KeyValueStore, MemoryStore};
