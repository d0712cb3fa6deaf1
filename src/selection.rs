//! Resolve which field of a cached result an operation targets.

use crate::document::Document;
use crate::error::{UpdateError, UpdateResult};
use crate::path::SelectionPath;

/// Selection path for an operation.
///
/// A non-empty explicit path is trusted as given. Otherwise (no path, or an
/// empty one) this is the response key
/// of the first field in the first operation's top-level selection set.
/// Nested paths (paginated connections) have to be passed explicitly.
pub fn resolve_selection_name(
  query: &Document,
  explicit_path: Option<&str>,
) -> UpdateResult<SelectionPath> {
  if let Some(path) = explicit_path.filter(|path| !path.is_empty()) {
    return Ok(SelectionPath::from(path));
  }

  let operation = query
    .operation()
    .ok_or_else(|| UpdateError::malformed_query("document has no operation definition"))?;

  let field = operation.selection_set.fields().next().ok_or_else(|| {
    UpdateError::malformed_query(format!(
      "operation {} has no field selection",
      operation
        .name
        .as_ref()
        .map(|n| n.value.as_str())
        .unwrap_or("<anonymous>")
    ))
  })?;

  Ok(SelectionPath::from(field.response_key()))
}
