pub mod index;
pub mod store;

pub use index::{list_columns, Columns};
pub use store::{KeyValueStore, MemoryStore};
