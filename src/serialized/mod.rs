//! Serialized Store
//!
//! A [`Cache`] that encodes values as JSON rows in a [`RowStore`] and applies
//! expiry at read time from the row's own deadline, the way a database table
//! with an `expiry_at` column would. Any `Serialize + DeserializeOwned` value
//! can be stored; reading a row back as an incompatible type is reported as
//! [`CacheError::TypeMismatch`].

use std::any::type_name;
use std::time::Duration;

use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::contract::Cache;
use crate::error::{CacheError, Result};

mod rows;

pub use rows::{MemoryRowStore, Row, RowStore};

// == Public Constants ==
/// Shortest accepted row lifetime
pub const MIN_ROW_TTL: Duration = Duration::from_secs(1);

/// Longest accepted row lifetime (31 days)
pub const MAX_ROW_TTL: Duration = Duration::from_secs(2_678_400);

// == Serialized Cache ==
#[derive(Debug)]
pub struct SerializedCache<S> {
    rows: S,
    ttl_secs: i64,
}

impl<S: RowStore> SerializedCache<S> {
    // == Constructor ==
    /// Creates a cache over `rows` whose entries live `ttl`, counted in whole
    /// seconds. `ttl` must lie within [`MIN_ROW_TTL`]..=[`MAX_ROW_TTL`].
    pub fn new(rows: S, ttl: Duration) -> Result<Self> {
        if !(MIN_ROW_TTL..=MAX_ROW_TTL).contains(&ttl) {
            return Err(CacheError::InvalidTtl {
                received: ttl,
                expected: "in range [1s, 2678400s]",
            });
        }

        Ok(Self {
            rows,
            ttl_secs: ttl.as_secs() as i64,
        })
    }

    /// The underlying row store.
    pub fn rows(&self) -> &S {
        &self.rows
    }
}

fn check_key(key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(CacheError::InvalidKey("empty key".to_string()));
    }
    Ok(())
}

/// A payload that is not valid JSON is broken; a valid document that does not
/// fit `V` is a type mismatch.
fn decode<V: DeserializeOwned>(bytes: &[u8]) -> Result<V> {
    let document: Value = serde_json::from_slice(bytes)?;

    serde_json::from_value(document).map_err(|err| CacheError::TypeMismatch {
        stored: format!("json ({})", err),
        requested: type_name::<V>().to_string(),
    })
}

impl<S, V> Cache<V> for SerializedCache<S>
where
    S: RowStore,
    V: Serialize + DeserializeOwned,
{
    fn put(&self, key: &str, value: &V) -> Result<()> {
        check_key(key)?;
        let body = serde_json::to_vec(value)?;

        let created_at = Utc::now().timestamp();
        self.rows.insert(Row {
            created_at,
            expiry_at: created_at + self.ttl_secs,
            key: key.to_string(),
            value: body,
        })
    }

    fn get(&self, key: &str) -> Result<V> {
        check_key(key)?;

        let Some(row) = self.rows.latest(key)? else {
            return Err(CacheError::miss(key));
        };

        if row.expiry_at < Utc::now().timestamp() {
            debug!("Row for key '{}' expired at {}", key, row.expiry_at);
            return Err(CacheError::miss(key));
        }

        decode(&row.value)
    }
}
