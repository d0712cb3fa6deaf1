//! graphql-cache-draft - draft-based updates for normalized GraphQL caches
//!
//! Read a query's cached result, edit an owned draft of it, and write it
//! back, without hand-writing the store's read/write protocol or digging
//! out the list behind a (possibly paginated) list field.

pub mod cache;
pub mod document;
pub mod error;
pub mod path;
pub mod selection;

pub use cache::{
  append_to_cache, cache_to_string, log_cache, prepend_to_cache, remove_from_cache,
  try_update_cache, update_cache, CacheLayer, CacheStore, DraftOutcome, Finalized, InputOptions,
  Logger, RemoveOptions, Replace, UpdateOutcome,
};
pub use document::{Document, Field, OperationKey, TypedDocument};
pub use error::{ListOperation, UpdateError, UpdateResult};
pub use path::{get_at, get_at_mut, SelectionPath};
pub use selection::resolve_selection_name;
