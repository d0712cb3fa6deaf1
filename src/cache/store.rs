//! Cache store contract and a no-op implementation.

use serde_json::{json, Value};

use crate::document::Document;
use crate::error::UpdateResult;

/// A normalized cache the update helpers read from and write to.
///
/// Implementations own identification, normalization and garbage
/// collection. The helpers only ever use these primitives.
pub trait CacheStore {
  /// Materialized result for `(query, variables)`, or `None` if not cached.
  fn read_query(&self, query: &Document, variables: Option<&Value>) -> UpdateResult<Option<Value>>;

  /// Replace the cached result for `(query, variables)`.
  fn write_query(
    &mut self,
    query: &Document,
    variables: Option<&Value>,
    data: Value,
  ) -> UpdateResult<()>;

  /// Normalized key of an entity (e.g. `Client:1`), if it can be identified.
  fn identify(&self, entity: &Value) -> Option<String>;

  /// Remove a normalized entity. Returns whether anything was removed.
  fn evict(&mut self, id: &str) -> bool;

  /// Serializable snapshot of every normalized record.
  fn extract(&self) -> Value;
}

/// Store that doesn't cache anything.
/// Every read misses and writes are discarded.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopStore;

impl CacheStore for NoopStore {
  fn read_query(
    &self,
    _query: &Document,
    _variables: Option<&Value>,
  ) -> UpdateResult<Option<Value>> {
    Ok(None) // Always miss
  }

  fn write_query(
    &mut self,
    _query: &Document,
    _variables: Option<&Value>,
    _data: Value,
  ) -> UpdateResult<()> {
    Ok(()) // Discard
  }

  fn identify(&self, _entity: &Value) -> Option<String> {
    None
  }

  fn evict(&mut self, _id: &str) -> bool {
    false
  }

  fn extract(&self) -> Value {
    json!({})
  }
}
