use bytes::Bytes;
use shulker_common::ColumnCoordinate;
use shulker_format::decode_surface_key;

use crate::store::KeyValueStore;

/// Lazy walk over the store's keys, yielding each column that has a surface
/// record. Order is the store's key order, not coordinate order.
pub struct Columns<'a> {
    keys: Box<dyn Iterator<Item = (Bytes, Bytes)> + 'a>,
}

impl Iterator for Columns<'_> {
    type Item = ColumnCoordinate;

    fn next(&mut self) -> Option<Self::Item> {
        self.keys
            .by_ref()
            .find_map(|(key, _)| decode_surface_key(&key))
    }
}

/// Lists every column with a surface record. Keys of other record kinds or
/// lengths are skipped.
pub fn list_columns<S: KeyValueStore + ?Sized>(store: &S) -> Columns<'_> {
    Columns { keys: store.iter() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use shulker_format::{encode_column_key, encode_subchunk_key, encode_surface_key, RecordTag};

    #[test]
    fn test_list_columns_empty_store() {
        let store = MemoryStore::new();
        assert_eq!(list_columns(&store).count(), 0);
    }

    #[test]
    fn test_list_columns_skips_same_length_other_tag() {
        let coord = ColumnCoordinate::new(2, 3);
        let mut store = MemoryStore::new();
        store.insert(encode_surface_key(coord).to_vec(), vec![0u8; 768]);
        store.insert(
            encode_column_key(ColumnCoordinate::new(9, 9), RecordTag::Version).to_vec(),
            vec![22u8],
        );

        let columns: Vec<_> = list_columns(&store).collect();
        assert_eq!(columns, vec![coord]);
    }

    #[test]
    fn test_list_columns_ignores_unrelated_keys() {
        let mut store = MemoryStore::new();
        let a = ColumnCoordinate::new(0, 0);
        let b = ColumnCoordinate::new(-1, 5);
        store.insert(encode_surface_key(a).to_vec(), Vec::<u8>::new());
        store.insert(encode_surface_key(b).to_vec(), Vec::<u8>::new());
        store.insert(encode_subchunk_key(a, 0).unwrap().to_vec(), vec![8u8]);
        store.insert(b"~local_player".to_vec(), vec![0u8]);
        store.insert(b"BiomeData".to_vec(), vec![0u8]);
        store.insert(Vec::<u8>::new(), vec![0u8]);

        let columns: Vec<_> = list_columns(&store).collect();
        assert_eq!(columns.len(), 2);
        assert!(columns.contains(&a));
        assert!(columns.contains(&b));
    }

    #[test]
    fn test_list_columns_follows_key_order() {
        // x = -1 encodes as FF FF FF FF and sorts after x = 1
        let mut store = MemoryStore::new();
        let negative = ColumnCoordinate::new(-1, 0);
        let positive = ColumnCoordinate::new(1, 0);
        store.insert(encode_surface_key(negative).to_vec(), Vec::<u8>::new());
        store.insert(encode_surface_key(positive).to_vec(), Vec::<u8>::new());

        let columns: Vec<_> = list_columns(&store).collect();
        assert_eq!(columns, vec![positive, negative]);
    }

    #[test]
    fn test_list_columns_restarts_by_reiterating() {
        let mut store = MemoryStore::new();
        store.insert(
            encode_surface_key(ColumnCoordinate::new(4, 4)).to_vec(),
            Vec::<u8>::new(),
        );
        let mut first = list_columns(&store);
        assert!(first.next().is_some());
        assert!(first.next().is_none());
        assert_eq!(list_columns(&store).count(), 1);
    }
}
