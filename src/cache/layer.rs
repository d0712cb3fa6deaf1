//! Cache layer that owns a store and applies updates with shared options.

use serde::{de::DeserializeOwned, Serialize};

use super::engine::{try_update_cache, update_cache, DraftOutcome, UpdateOutcome};
use super::inspect::cache_to_string;
use super::ops::{append_to_cache, prepend_to_cache, remove_from_cache, RemoveOptions};
use super::options::InputOptions;
use super::store::CacheStore;
use crate::document::TypedDocument;
use crate::error::UpdateResult;

/// A cache store together with the options every update through it uses.
///
/// This is the "client" side of the crate: build one around your store and
/// call the update helpers as methods instead of threading the store and
/// options through each call.
pub struct CacheLayer<S: CacheStore> {
  store: S,
  options: InputOptions,
}

impl<S: CacheStore> CacheLayer<S> {
  /// Create a new cache layer with default options.
  pub fn new(store: S) -> Self {
    Self {
      store,
      options: InputOptions::default(),
    }
  }

  /// Set the options used by every operation.
  pub fn with_options(mut self, options: InputOptions) -> Self {
    self.options = options;
    self
  }

  pub fn options(&self) -> &InputOptions {
    &self.options
  }

  pub fn store(&self) -> &S {
    &self.store
  }

  pub fn store_mut(&mut self) -> &mut S {
    &mut self.store
  }

  pub fn into_inner(self) -> S {
    self.store
  }

  /// See [`update_cache`].
  pub fn update<T, V, F, R>(
    &mut self,
    query: &TypedDocument<T, V>,
    variables: Option<&V>,
    update_fn: F,
  ) -> UpdateResult<UpdateOutcome>
  where
    T: Serialize + DeserializeOwned,
    V: Serialize,
    F: FnOnce(&mut T) -> R,
    R: DraftOutcome<T>,
  {
    update_cache(&mut self.store, query, variables, update_fn, &self.options)
  }

  /// See [`try_update_cache`].
  pub fn try_update<T, V, F, R>(
    &mut self,
    query: &TypedDocument<T, V>,
    variables: Option<&V>,
    update_fn: F,
  ) -> UpdateResult<UpdateOutcome>
  where
    T: Serialize + DeserializeOwned,
    V: Serialize,
    F: FnOnce(&mut T) -> UpdateResult<R>,
    R: DraftOutcome<T>,
  {
    try_update_cache(&mut self.store, query, variables, update_fn, &self.options)
  }

  /// See [`append_to_cache`].
  pub fn append<T, V, I>(
    &mut self,
    query: &TypedDocument<T, V>,
    variables: Option<&V>,
    data: &I,
    selection_name: Option<&str>,
  ) -> UpdateResult<UpdateOutcome>
  where
    V: Serialize,
    I: Serialize + ?Sized,
  {
    append_to_cache(
      &mut self.store,
      query,
      variables,
      data,
      selection_name,
      &self.options,
    )
  }

  /// See [`prepend_to_cache`].
  pub fn prepend<T, V, I>(
    &mut self,
    query: &TypedDocument<T, V>,
    variables: Option<&V>,
    data: &I,
  ) -> UpdateResult<UpdateOutcome>
  where
    V: Serialize,
    I: Serialize + ?Sized,
  {
    prepend_to_cache(&mut self.store, query, variables, data, &self.options)
  }

  /// See [`remove_from_cache`].
  pub fn remove<T, V>(
    &mut self,
    query: &TypedDocument<T, V>,
    variables: Option<&V>,
    id: &str,
    remove: &RemoveOptions,
  ) -> UpdateResult<UpdateOutcome>
  where
    V: Serialize,
  {
    remove_from_cache(&mut self.store, query, variables, id, remove, &self.options)
  }

  /// Pretty JSON of the store's normalized snapshot.
  pub fn to_json_string(&self) -> String {
    cache_to_string(&self.store)
  }
}

impl<S: CacheStore + Default> Default for CacheLayer<S> {
  fn default() -> Self {
    Self::new(S::default())
  }
}
