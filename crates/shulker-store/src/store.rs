use bytes::Bytes;
use shulker_common::Result;
use std::collections::BTreeMap;

/// Read access to an ordered key-value store.
///
/// Implementations own lifecycle, caching and compression; this crate only
/// looks keys up and walks them.
pub trait KeyValueStore {
    /// Point lookup by exact key. A miss is `Ok(None)`, not an error.
    fn get(&self, key: &[u8]) -> Result<Option<Bytes>>;

    /// Every (key, value) pair in ascending raw key order.
    fn iter(&self) -> Box<dyn Iterator<Item = (Bytes, Bytes)> + '_>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn get(&self, key: &[u8]) -> Result<Option<Bytes>> {
        (**self).get(key)
    }

    fn iter(&self) -> Box<dyn Iterator<Item = (Bytes, Bytes)> + '_> {
        (**self).iter()
    }
}

/// In-memory store ordered by raw key bytes, like the on-disk stores it stands in for.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: BTreeMap<Bytes, Bytes>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<Bytes>, value: impl Into<Bytes>) -> Option<Bytes> {
        self.entries.insert(key.into(), value.into())
    }

    pub fn remove(&mut self, key: &[u8]) -> Option<Bytes> {
        self.entries.remove(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &[u8]) -> Result<Option<Bytes>> {
        Ok(self.entries.get(key).cloned())
    }

    fn iter(&self) -> Box<dyn Iterator<Item = (Bytes, Bytes)> + '_> {
        Box::new(
            self.entries
                .iter()
                .map(|(key, value)| (key.clone(), value.clone())),
        )
    }
}

impl<K: Into<Bytes>, V: Into<Bytes>> FromIterator<(K, V)> for MemoryStore {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut store = MemoryStore::new();
        for (key, value) in iter {
            store.insert(key, value);
        }
        store
    }
}
