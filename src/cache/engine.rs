//! Read, draft, mutate, write.

use serde::{de::DeserializeOwned, Serialize};
use serde_json::{json, Value};

use super::options::{CacheOptions, InputOptions};
use super::store::CacheStore;
use crate::document::{Document, TypedDocument};
use crate::error::UpdateResult;

/// How an update call ended when it did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
  /// The updated result was written back
  Written,
  /// Nothing was cached for the query; a warning was logged and nothing written
  NoCacheEntry,
}

/// Final value of an update, and how it relates to the cached result.
#[derive(Debug, Clone, PartialEq)]
pub enum Finalized<T> {
  /// The edited draft; cached fields the draft type does not model are kept
  Edited(T),
  /// A new value written as is
  Replaced(T),
}

/// What an update function hands back besides its edits to the draft.
///
/// `()` keeps the edited draft; [`Replace`] discards it in favour of a new
/// value.
pub trait DraftOutcome<T> {
  fn finish(self, draft: T) -> Finalized<T>;
}

impl<T> DraftOutcome<T> for () {
  fn finish(self, draft: T) -> Finalized<T> {
    Finalized::Edited(draft)
  }
}

/// Replace the whole cached result with the wrapped value.
#[derive(Debug, Clone, PartialEq)]
pub struct Replace<T>(pub T);

impl<T> DraftOutcome<T> for Replace<T> {
  fn finish(self, _draft: T) -> Finalized<T> {
    Finalized::Replaced(self.0)
  }
}

/// Update the cached result of `query` in place.
///
/// The draft is an owned `T` built from the cached result. Cached fields
/// `T` does not model (`__typename`, say) are carried over into the written
/// result, so `T` only needs the fields the update touches. A [`Replace`]
/// result is written exactly as given.
///
/// Returns [`UpdateOutcome::NoCacheEntry`] without writing when nothing is
/// cached for `(query, variables)`.
pub fn update_cache<S, T, V, F, R>(
  cache: &mut S,
  query: &TypedDocument<T, V>,
  variables: Option<&V>,
  update_fn: F,
  options: &InputOptions,
) -> UpdateResult<UpdateOutcome>
where
  S: CacheStore + ?Sized,
  T: Serialize + DeserializeOwned,
  V: Serialize,
  F: FnOnce(&mut T) -> R,
  R: DraftOutcome<T>,
{
  try_update_cache(cache, query, variables, |draft| Ok(update_fn(draft)), options)
}

/// Like [`update_cache`], but `update_fn` may fail. Its error is returned
/// as is and nothing is written.
pub fn try_update_cache<S, T, V, F, R>(
  cache: &mut S,
  query: &TypedDocument<T, V>,
  variables: Option<&V>,
  update_fn: F,
  options: &InputOptions,
) -> UpdateResult<UpdateOutcome>
where
  S: CacheStore + ?Sized,
  T: Serialize + DeserializeOwned,
  V: Serialize,
  F: FnOnce(&mut T) -> UpdateResult<R>,
  R: DraftOutcome<T>,
{
  let variables = variables_to_value(variables)?;
  update_document(
    cache,
    query.document(),
    variables.as_ref(),
    update_fn,
    &options.resolve(),
  )
}

pub(crate) fn variables_to_value<V: Serialize>(
  variables: Option<&V>,
) -> UpdateResult<Option<Value>> {
  Ok(variables.map(serde_json::to_value).transpose()?)
}

/// Untyped core shared by every operation.
pub(crate) fn update_document<S, D, F, R>(
  cache: &mut S,
  query: &Document,
  variables: Option<&Value>,
  update_fn: F,
  options: &CacheOptions,
) -> UpdateResult<UpdateOutcome>
where
  S: CacheStore + ?Sized,
  D: Serialize + DeserializeOwned,
  F: FnOnce(&mut D) -> UpdateResult<R>,
  R: DraftOutcome<D>,
{
  options.log_debug("Updating cache", || {
    json!({ "query": query, "variables": variables })
  });

  let cached = cache
    .read_query(query, variables)?
    .filter(|data| !data.is_null());

  options.log_debug("cachedData", || cached.clone().unwrap_or(Value::Null));

  let Some(cached) = cached else {
    options.log_warn(
      "No cached data found for query",
      &json!(query.operation_name()),
    );
    return Ok(UpdateOutcome::NoCacheEntry);
  };

  let mut draft: D = serde_json::from_value(cached.clone())?;
  // what the draft type keeps of the cached result before any edit
  let baseline = serde_json::to_value(&draft)?;
  let outcome = update_fn(&mut draft)?;
  let updated = match outcome.finish(draft) {
    Finalized::Edited(draft) => {
      let mut updated = serde_json::to_value(draft)?;
      restore_unmodeled(&mut updated, &cached, &baseline);
      updated
    }
    Finalized::Replaced(value) => serde_json::to_value(value)?,
  };

  options.log_debug("Writing to cache", || updated.clone());

  cache.write_query(query, variables, updated)?;
  Ok(UpdateOutcome::Written)
}

/// Copy back cached keys the draft type dropped on the way in.
///
/// A key absent from both `baseline` and `updated` was never modelled and is
/// restored; a key the baseline had but `updated` lacks was removed by the
/// update and stays removed. List elements are paired by `id`, or by position
/// when the list kept its length.
fn restore_unmodeled(updated: &mut Value, cached: &Value, baseline: &Value) {
  match (updated, cached, baseline) {
    (Value::Object(updated), Value::Object(cached), Value::Object(baseline)) => {
      for (key, cached_value) in cached {
        match baseline.get(key) {
          Some(baseline_value) => {
            if let Some(updated_value) = updated.get_mut(key) {
              restore_unmodeled(updated_value, cached_value, baseline_value);
            }
          }
          None if !updated.contains_key(key) => {
            updated.insert(key.clone(), cached_value.clone());
          }
          None => {}
        }
      }
    }
    (Value::Array(updated), Value::Array(cached), Value::Array(baseline)) => {
      let same_length = updated.len() == cached.len();
      for (index, item) in updated.iter_mut().enumerate() {
        let position = match item.get("id") {
          Some(id) => cached.iter().position(|c| c.get("id") == Some(id)),
          None if same_length => Some(index),
          None => None,
        };
        if let Some((cached_item, baseline_item)) =
          position.and_then(|p| Some((cached.get(p)?, baseline.get(p)?)))
        {
          restore_unmodeled(item, cached_item, baseline_item);
        }
      }
    }
    _ => {}
  }
}
