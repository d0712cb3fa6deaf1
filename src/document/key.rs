//! Stable keys for `(operation, variables)` pairs.

use serde_json::Value;
use sha2::{Digest, Sha256};
use std::fmt;

use super::Document;

/// Fixed-length key identifying one instance of an operation.
///
/// Cache store implementations can use it to key stored results. Missing
/// variables and an empty variables object produce the same key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OperationKey(String);

impl OperationKey {
  pub fn new(document: &Document, variables: Option<&Value>) -> Self {
    let (name, fields) = match document.operation() {
      Some(operation) => (
        operation
          .name
          .as_ref()
          .map(|n| n.value.as_str())
          .unwrap_or_default(),
        operation
          .selection_set
          .fields()
          .map(|f| f.response_key())
          .collect::<Vec<_>>()
          .join(","),
      ),
      None => ("", String::new()),
    };

    // serde_json maps are ordered by key, so this is canonical
    let variables = match variables {
      None | Some(Value::Null) => "{}".to_string(),
      Some(v) => v.to_string(),
    };

    let input = format!("{}:{}:{}", name, fields, variables);

    // SHA256 hash for stable, fixed-length keys
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    Self(hex::encode(hasher.finalize()))
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl fmt::Display for OperationKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}
