//! Row storage behind [`SerializedCache`](super::SerializedCache).

use std::collections::HashMap;

use parking_lot::Mutex;

use crate::error::Result;

// == Row ==
/// One stored record. Timestamps are Unix seconds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub created_at: i64,
    pub expiry_at: i64,
    pub key: String,
    /// Serialized value
    pub value: Vec<u8>,
}

// == Row Store ==
/// Append/lookup interface a database table (or anything else) provides.
///
/// Expiry is the reader's concern: a store returns the newest row for a key
/// whether or not it is still live.
pub trait RowStore {
    /// Records a new row.
    fn insert(&self, row: Row) -> Result<()>;

    /// Returns the most recently inserted row for `key`.
    fn latest(&self, key: &str) -> Result<Option<Row>>;
}

// == Memory Row Store ==
/// In-process [`RowStore`]. A newer row for a key replaces the older one.
#[derive(Debug, Default)]
pub struct MemoryRowStore {
    rows: Mutex<HashMap<String, Row>>,
}

impl MemoryRowStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.rows.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.lock().is_empty()
    }
}

impl RowStore for MemoryRowStore {
    fn insert(&self, row: Row) -> Result<()> {
        self.rows.lock().insert(row.key.clone(), row);
        Ok(())
    }

    fn latest(&self, key: &str) -> Result<Option<Row>> {
        Ok(self.rows.lock().get(key).cloned())
    }
}
