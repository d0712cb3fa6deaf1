//! List operations on cached results: append, prepend, remove.
//!
//! All three locate a list inside the draft through a selection path and
//! fail with [`UpdateError::NotAnArray`] when the path leads anywhere else.

use serde::Serialize;
use serde_json::{json, Value};

use super::engine::{update_document, variables_to_value, UpdateOutcome};
use super::options::{CacheOptions, InputOptions};
use super::store::CacheStore;
use crate::document::TypedDocument;
use crate::error::{ListOperation, UpdateError, UpdateResult};
use crate::path::{get_at, get_at_mut, SelectionPath};
use crate::selection::resolve_selection_name;

/// Settings for [`remove_from_cache`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoveOptions {
  /// Path to the list; defaults to the query's first top-level field
  pub selection_name: Option<String>,
  /// Path inside each list element to the entity carrying the `id`,
  /// e.g. `node` for connection edges
  pub object_to_remove_path: Option<String>,
  /// Also evict the removed entity from the normalized store
  pub remove_normalized: bool,
}

impl Default for RemoveOptions {
  fn default() -> Self {
    Self {
      selection_name: None,
      object_to_remove_path: None,
      remove_normalized: true,
    }
  }
}

impl RemoveOptions {
  pub fn with_selection_name(mut self, selection_name: impl Into<String>) -> Self {
    self.selection_name = Some(selection_name.into());
    self
  }

  pub fn with_object_to_remove_path(mut self, path: impl Into<String>) -> Self {
    self.object_to_remove_path = Some(path.into());
    self
  }

  pub fn with_remove_normalized(mut self, remove_normalized: bool) -> Self {
    self.remove_normalized = remove_normalized;
    self
  }
}

/// Push `data` onto the end of the list at `selection_name` (or the
/// query's first top-level field).
pub fn append_to_cache<S, T, V, I>(
  cache: &mut S,
  query: &TypedDocument<T, V>,
  variables: Option<&V>,
  data: &I,
  selection_name: Option<&str>,
  options: &InputOptions,
) -> UpdateResult<UpdateOutcome>
where
  S: CacheStore + ?Sized,
  V: Serialize,
  I: Serialize + ?Sized,
{
  let selection = resolve_selection_name(query, selection_name)?;
  let entry = serde_json::to_value(data)?;
  let variables = variables_to_value(variables)?;

  update_document(
    cache,
    query,
    variables.as_ref(),
    |draft: &mut Value| {
      list_at(draft, &selection, ListOperation::Append)?.push(entry);
      Ok(())
    },
    &options.resolve(),
  )
}

/// Insert `data` at the front of the list under the query's first
/// top-level field.
pub fn prepend_to_cache<S, T, V, I>(
  cache: &mut S,
  query: &TypedDocument<T, V>,
  variables: Option<&V>,
  data: &I,
  options: &InputOptions,
) -> UpdateResult<UpdateOutcome>
where
  S: CacheStore + ?Sized,
  V: Serialize,
  I: Serialize + ?Sized,
{
  let selection = resolve_selection_name(query, None)?;
  let entry = serde_json::to_value(data)?;
  let variables = variables_to_value(variables)?;

  update_document(
    cache,
    query,
    variables.as_ref(),
    |draft: &mut Value| {
      draft
        .get_mut(selection.as_str())
        .and_then(Value::as_array_mut)
        .ok_or_else(|| UpdateError::not_an_array(ListOperation::Prepend, selection.as_str()))?
        .insert(0, entry);
      Ok(())
    },
    &options.resolve(),
  )
}

/// Remove the first list element whose entity has the given `id`.
///
/// When nothing matches the list is written back unchanged. With
/// `remove_normalized` set (the default) the removed entity is also evicted
/// from the store once the list has been written.
pub fn remove_from_cache<S, T, V>(
  cache: &mut S,
  query: &TypedDocument<T, V>,
  variables: Option<&V>,
  id: &str,
  remove: &RemoveOptions,
  options: &InputOptions,
) -> UpdateResult<UpdateOutcome>
where
  S: CacheStore + ?Sized,
  V: Serialize,
{
  let options = options.resolve();
  let selection = resolve_selection_name(query, remove.selection_name.as_deref())?;
  let entity_path = remove.object_to_remove_path.as_deref();
  let variables = variables_to_value(variables)?;

  let mut removed = None;
  let outcome = update_document(
    cache,
    query,
    variables.as_ref(),
    |draft: &mut Value| {
      let list = list_at(draft, &selection, ListOperation::Remove)?;
      removed = remove_entry(list, id, entity_path);
      Ok(())
    },
    &options,
  )?;

  if outcome == UpdateOutcome::Written && remove.remove_normalized {
    if let Some(entity) = removed.as_ref().and_then(|entry| entity_of(entry, entity_path)) {
      evict_entity(cache, entity, &options);
    }
  }

  Ok(outcome)
}

fn list_at<'a>(
  draft: &'a mut Value,
  selection: &SelectionPath,
  operation: ListOperation,
) -> UpdateResult<&'a mut Vec<Value>> {
  get_at_mut(draft, selection.as_str())
    .and_then(Value::as_array_mut)
    .ok_or_else(|| UpdateError::not_an_array(operation, selection.as_str()))
}

/// The entity inside a list element: the element itself, or the value at
/// `entity_path` within it.
fn entity_of<'a>(entry: &'a Value, entity_path: Option<&str>) -> Option<&'a Value> {
  match entity_path {
    Some(path) => get_at(entry, path),
    None => Some(entry),
  }
}

fn remove_entry(list: &mut Vec<Value>, id: &str, entity_path: Option<&str>) -> Option<Value> {
  let index = list.iter().position(|entry| {
    entity_of(entry, entity_path)
      .and_then(|entity| entity.get("id"))
      .and_then(Value::as_str)
      == Some(id)
  })?;

  Some(list.remove(index))
}

fn evict_entity<S: CacheStore + ?Sized>(cache: &mut S, entity: &Value, options: &CacheOptions) {
  match cache.identify(entity) {
    Some(key) => {
      let evicted = cache.evict(&key);
      options.log_info(
        "Evicted normalized entity",
        &json!({ "id": key, "evicted": evicted }),
      );
    }
    None => {
      options.log_debug("Removed entity has no normalized identity", || {
        entity.clone()
      });
    }
  }
}
