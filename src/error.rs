//! Error types for cache updates.
//!
//! Shape errors (a malformed query document, a selection that is not a list)
//! are caller mistakes and always surface. A missing cache entry or an id
//! that matches nothing are not errors at all; see `UpdateOutcome`.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for cache update operations
pub type UpdateResult<T> = Result<T, UpdateError>;

/// List operation that tripped a shape check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListOperation {
  Append,
  Prepend,
  Remove,
}

impl fmt::Display for ListOperation {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let verb = match self {
      Self::Append => "append to",
      Self::Prepend => "prepend to",
      Self::Remove => "remove from",
    };
    write!(f, "{}", verb)
  }
}

/// All errors that can occur while updating a cached query result
#[derive(Error, Debug)]
pub enum UpdateError {
  #[error("Malformed query document: {reason}")]
  MalformedQuery { reason: String },

  #[error("Cannot {operation} non array, check that selection {selection} is an array")]
  NotAnArray {
    operation: ListOperation,
    selection: String,
  },

  #[error("Cache store error: {0}")]
  CacheStore(String),

  #[error("JSON error: {0}")]
  Json(#[from] serde_json::Error),

  #[error("Failed to read options file {path}: {source}")]
  ConfigRead {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("Failed to parse options: {0}")]
  ConfigParse(#[from] serde_yaml::Error),
}

impl UpdateError {
  /// Create a malformed query error
  pub fn malformed_query(reason: impl Into<String>) -> Self {
    Self::MalformedQuery {
      reason: reason.into(),
    }
  }

  /// Create a shape error for a selection that is not a list
  pub fn not_an_array(operation: ListOperation, selection: impl Into<String>) -> Self {
    Self::NotAnArray {
      operation,
      selection: selection.into(),
    }
  }

  /// Create an error reported by a cache store implementation
  pub fn cache_store(reason: impl Into<String>) -> Self {
    Self::CacheStore(reason.into())
  }

  /// True when the error points at how the operation was invoked
  /// (query document or result shape) rather than at the store.
  pub fn is_caller_error(&self) -> bool {
    matches!(self, Self::MalformedQuery { .. } | Self::NotAnArray { .. })
  }
}
