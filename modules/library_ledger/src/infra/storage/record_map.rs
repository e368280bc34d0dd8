use std::collections::BTreeMap;

/// Ordered `id -> record` table.
///
/// No uniqueness enforcement beyond last-write-wins at a key; callers pass
/// freshly generated ids.
#[derive(Debug, Clone)]
pub struct RecordMap<V> {
    rows: BTreeMap<String, V>,
}

impl<V> Default for RecordMap<V> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
        }
    }
}

impl<V: Clone> RecordMap<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the record at `id`.
    pub fn insert(&mut self, id: impl Into<String>, record: V) {
        self.rows.insert(id.into(), record);
    }

    pub fn get(&self, id: &str) -> Option<V> {
        self.rows.get(id).cloned()
    }

    /// All records in key order.
    pub fn values(&self) -> Vec<V> {
        self.rows.values().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
