//! Draft-based updates over a normalized GraphQL cache.
//!
//! Every operation is one synchronous transaction against a [`CacheStore`]:
//! - Read the cached result for `(query, variables)`
//! - Hand an owned draft of it to a mutation function
//! - Write the result back, exactly once
//!
//! A query with nothing cached is not an error: a warning is logged and the
//! store is left untouched. The list helpers (`append`, `prepend`, `remove`)
//! build the mutation function for you from a selection path.

mod engine;
mod inspect;
mod layer;
mod ops;
mod options;
mod store;

pub use engine::{
  try_update_cache, update_cache, DraftOutcome, Finalized, Replace, UpdateOutcome,
};
pub use inspect::{cache_to_string, log_cache};
pub use layer::CacheLayer;
pub use ops::{append_to_cache, prepend_to_cache, remove_from_cache, RemoveOptions};
pub use options::{default_logger, CacheOptions, InputOptions, Logger, TracingLogger};
pub use store::{CacheStore, NoopStore};
