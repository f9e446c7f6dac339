pub mod buffer;
pub mod key;
pub mod packing;
pub mod subchunk;
pub mod surface;

pub use key::{
    decode_key, decode_subchunk_key, decode_surface_key, encode_column_key, encode_subchunk_key,
    encode_surface_key, RecordKey, RecordTag,
};
pub use packing::WordLayout;
pub use subchunk::decode_subchunk;
pub use surface::decode_surface;
