//! Options and diagnostic sinks for cache updates.

use serde::Deserialize;
use serde_json::Value;
use std::fmt;
use std::path::Path;
use std::sync::{Arc, OnceLock};

use crate::error::{UpdateError, UpdateResult};

/// Sink for diagnostic events.
///
/// Each event is a short message plus a JSON payload (the query and
/// variables, the cached result, the result being written, ...).
pub trait Logger: Send + Sync {
  fn debug(&self, message: &str, payload: &Value);
  fn warn(&self, message: &str, payload: &Value);
  fn info(&self, message: &str, payload: &Value);
}

/// Forwards events to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLogger;

impl Logger for TracingLogger {
  fn debug(&self, message: &str, payload: &Value) {
    tracing::debug!(payload = %payload, "{}", message);
  }

  fn warn(&self, message: &str, payload: &Value) {
    tracing::warn!(payload = %payload, "{}", message);
  }

  fn info(&self, message: &str, payload: &Value) {
    tracing::info!(payload = %payload, "{}", message);
  }
}

static DEFAULT_LOGGER: OnceLock<Arc<dyn Logger>> = OnceLock::new();

/// Process-wide default sink, created on first use.
pub fn default_logger() -> Arc<dyn Logger> {
  DEFAULT_LOGGER
    .get_or_init(|| Arc::new(TracingLogger))
    .clone()
}

/// Caller-supplied options. Unset fields fall back to the defaults
/// (`debug = false`, [`default_logger`]).
///
/// Deserializable so hosts can embed it in their own config, e.g.
///
/// ```yaml
/// debug: true
/// ```
#[derive(Clone, Default, Deserialize)]
#[serde(default)]
pub struct InputOptions {
  /// Emit debug events for every read and write
  pub debug: Option<bool>,
  #[serde(skip)]
  pub logger: Option<Arc<dyn Logger>>,
}

impl InputOptions {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_debug(mut self, debug: bool) -> Self {
    self.debug = Some(debug);
    self
  }

  pub fn with_logger(mut self, logger: Arc<dyn Logger>) -> Self {
    self.logger = Some(logger);
    self
  }

  /// Parse options from YAML.
  pub fn from_yaml_str(contents: &str) -> UpdateResult<Self> {
    Ok(serde_yaml::from_str(contents)?)
  }

  /// Load options from a YAML file.
  pub fn load(path: &Path) -> UpdateResult<Self> {
    let contents = std::fs::read_to_string(path).map_err(|source| UpdateError::ConfigRead {
      path: path.to_path_buf(),
      source,
    })?;

    Self::from_yaml_str(&contents)
  }

  /// Merge over the defaults.
  pub fn resolve(&self) -> CacheOptions {
    CacheOptions {
      debug: self.debug.unwrap_or(false),
      logger: self.logger.clone().unwrap_or_else(default_logger),
    }
  }
}

impl fmt::Debug for InputOptions {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("InputOptions")
      .field("debug", &self.debug)
      .field("logger", &self.logger.as_ref().map(|_| "<logger>"))
      .finish()
  }
}

/// Fully resolved options for one operation.
#[derive(Clone)]
pub struct CacheOptions {
  pub debug: bool,
  pub logger: Arc<dyn Logger>,
}

impl Default for CacheOptions {
  fn default() -> Self {
    InputOptions::default().resolve()
  }
}

impl CacheOptions {
  /// Debug event; the payload is only built when debugging is on.
  pub(crate) fn log_debug(&self, message: &str, payload: impl FnOnce() -> Value) {
    if self.debug {
      self.logger.debug(message, &payload());
    }
  }

  pub(crate) fn log_warn(&self, message: &str, payload: &Value) {
    self.logger.warn(message, payload);
  }

  pub(crate) fn log_info(&self, message: &str, payload: &Value) {
    self.logger.info(message, payload);
  }
}

impl fmt::Debug for CacheOptions {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("CacheOptions")
      .field("debug", &self.debug)
      .finish_non_exhaustive()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;
  use std::sync::Mutex;

  #[derive(Default)]
  struct CountingLogger {
    debug: Mutex<usize>,
    warn: Mutex<usize>,
  }

  impl Logger for CountingLogger {
    fn debug(&self, _message: &str, _payload: &Value) {
      *self.debug.lock().unwrap() += 1;
    }

    fn warn(&self, _message: &str, _payload: &Value) {
      *self.warn.lock().unwrap() += 1;
    }

    fn info(&self, _message: &str, _payload: &Value) {}
  }

  #[test]
  fn test_defaults() {
    let options = InputOptions::new().resolve();
    assert!(!options.debug);
  }

  #[test]
  fn test_input_overrides_defaults() {
    let options = InputOptions::new().with_debug(true).resolve();
    assert!(options.debug);
  }

  #[test]
  fn test_default_logger_is_shared() {
    assert!(Arc::ptr_eq(&default_logger(), &default_logger()));
  }

  #[test]
  fn test_debug_events_gated() {
    let logger = Arc::new(CountingLogger::default());
    let quiet = InputOptions::new().with_logger(logger.clone()).resolve();
    let verbose = InputOptions::new()
      .with_logger(logger.clone())
      .with_debug(true)
      .resolve();

    quiet.log_debug("cachedData", || json!(null));
    quiet.log_warn("No cached data found for query", &json!("GetClientList"));
    assert_eq!(*logger.debug.lock().unwrap(), 0);
    assert_eq!(*logger.warn.lock().unwrap(), 1);

    verbose.log_debug("cachedData", || json!(null));
    assert_eq!(*logger.debug.lock().unwrap(), 1);
  }

  #[test]
  fn test_parse_yaml() {
    let options = InputOptions::from_yaml_str("debug: true\n").unwrap();
    assert_eq!(options.debug, Some(true));
    assert!(options.logger.is_none());

    let empty = InputOptions::from_yaml_str("{}").unwrap();
    assert_eq!(empty.debug, None);
  }

  #[test]
  fn test_parse_yaml_rejects_bad_types() {
    let err = InputOptions::from_yaml_str("debug: loud\n").unwrap_err();
    assert!(matches!(err, UpdateError::ConfigParse(_)));
  }

  #[test]
  fn test_load_missing_file() {
    let err = InputOptions::load(Path::new("/nonexistent/cache-options.yaml")).unwrap_err();
    assert!(matches!(err, UpdateError::ConfigRead { .. }));
  }
}
