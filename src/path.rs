//! Dotted-path access into result trees.

use serde_json::Value;
use std::fmt;

/// Dot-delimited location inside a query result, e.g. `clients.edges`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SelectionPath(String);

impl SelectionPath {
  pub fn new(path: impl Into<String>) -> Self {
    Self(path.into())
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }

  /// Field names along the path, outermost first.
  pub fn segments(&self) -> std::str::Split<'_, char> {
    self.0.split('.')
  }
}

impl fmt::Display for SelectionPath {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

impl From<&str> for SelectionPath {
  fn from(path: &str) -> Self {
    Self::new(path)
  }
}

impl From<String> for SelectionPath {
  fn from(path: String) -> Self {
    Self(path)
  }
}

impl AsRef<str> for SelectionPath {
  fn as_ref(&self) -> &str {
    &self.0
  }
}

/// Array position named by a canonical decimal segment: `0`, `12`, but not
/// `+1`, `01` or `1e2`.
fn array_index(segment: &str) -> Option<usize> {
  let canonical = !segment.is_empty()
    && segment.bytes().all(|b| b.is_ascii_digit())
    && (segment == "0" || !segment.starts_with('0'));
  if !canonical {
    return None;
  }
  segment.parse().ok()
}

/// Read the value at `path`, or `None` as soon as a segment is missing.
///
/// Objects are indexed by key. Arrays are indexed when the segment is a
/// canonical non-negative integer, so `clients.edges.0.node` works.
pub fn get_at<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
  path.split('.').try_fold(root, |current, segment| match current {
    Value::Object(map) => map.get(segment),
    Value::Array(items) => items.get(array_index(segment)?),
    _ => None,
  })
}

/// Mutable counterpart of [`get_at`].
pub fn get_at_mut<'a>(root: &'a mut Value, path: &str) -> Option<&'a mut Value> {
  path.split('.').try_fold(root, |current, segment| match current {
    Value::Object(map) => map.get_mut(segment),
    Value::Array(items) => items.get_mut(array_index(segment)?),
    _ => None,
  })
}
