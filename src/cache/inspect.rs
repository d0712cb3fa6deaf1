//! Dumping the normalized cache for debugging.

use super::layer::CacheLayer;
use super::store::CacheStore;

/// The store's normalized snapshot as pretty-printed JSON.
pub fn cache_to_string<S: CacheStore + ?Sized>(cache: &S) -> String {
  format!("{:#}", cache.extract())
}

/// Print the client's cache to stdout.
pub fn log_cache<S: CacheStore>(client: &CacheLayer<S>) {
  println!("{}", client.to_json_string());
}
