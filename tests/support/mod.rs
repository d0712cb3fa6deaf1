//! Shared fixtures for store-backed tests.
#![allow(dead_code)]

use graphql_cache_draft::{CacheStore, Document, Logger, OperationKey, TypedDocument, UpdateResult};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

const OPERATIONS: &str = include_str!("../fixtures/generated_operations.json");

// ============================================================================
// Generated operation types
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
  #[serde(rename = "__typename", default, skip_serializing_if = "Option::is_none")]
  pub typename: Option<String>,
  pub id: String,
  pub name: String,
}

impl Client {
  pub fn new(id: &str, name: &str) -> Self {
    Self {
      typename: Some("Client".to_string()),
      id: id.to_string(),
      name: name.to_string(),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GetClientByIdQuery {
  pub client: Option<Client>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GetClientByIdVariables {
  pub id: String,
}

impl GetClientByIdVariables {
  pub fn new(id: &str) -> Self {
    Self { id: id.to_string() }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GetClientListQuery {
  pub clients: Vec<Client>,
}

/// Load a generated document from the fixtures by operation name.
pub fn operation<T, V>(name: &str) -> TypedDocument<T, V> {
  let all: Value = serde_json::from_str(OPERATIONS).unwrap();
  let document: Document = serde_json::from_value(all[name].clone()).unwrap();
  TypedDocument::new(document)
}

pub fn client_by_id() -> TypedDocument<GetClientByIdQuery, GetClientByIdVariables> {
  operation("GetClientById")
}

pub fn client_list() -> TypedDocument<GetClientListQuery> {
  operation("GetClientList")
}

pub fn client_list_paginate() -> TypedDocument<Value> {
  operation("GetClientListPaginate")
}

pub fn init_tracing() {
  let _ = tracing_subscriber::fmt()
    .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
    .with_test_writer()
    .try_init();
}

// ============================================================================
// Normalizing in-memory store
// ============================================================================

/// Minimal normalized cache.
///
/// Objects carrying `__typename` and `id` are stored once under
/// `Typename:id` and referenced as `{"__ref": key}` from query results.
/// Results are keyed by [`OperationKey`].
#[derive(Debug, Default)]
pub struct InMemoryCache {
  results: BTreeMap<OperationKey, Value>,
  entities: BTreeMap<String, Value>,
  pub writes: usize,
}

impl InMemoryCache {
  pub fn new() -> Self {
    Self::default()
  }

  /// Write without counting, for seeding.
  pub fn seed(&mut self, query: &Document, variables: Option<&Value>, data: Value) {
    let normalized = self.normalize(data);
    self
      .results
      .insert(OperationKey::new(query, variables), normalized);
  }

  pub fn entity(&self, key: &str) -> Option<&Value> {
    self.entities.get(key)
  }

  fn normalize(&mut self, value: Value) -> Value {
    match value {
      Value::Array(items) => Value::Array(items.into_iter().map(|v| self.normalize(v)).collect()),
      Value::Object(fields) => {
        let fields: Map<String, Value> = fields
          .into_iter()
          .map(|(k, v)| (k, self.normalize(v)))
          .collect();
        let object = Value::Object(fields);

        match self.identify(&object) {
          Some(key) => {
            let slot = self
              .entities
              .entry(key.clone())
              .or_insert_with(|| json!({}));
            if let (Some(existing), Value::Object(fields)) = (slot.as_object_mut(), object) {
              existing.extend(fields);
            }
            json!({ "__ref": key })
          }
          None => object,
        }
      }
      other => other,
    }
  }

  /// `None` for a reference to an evicted entity.
  fn denormalize(&self, value: &Value) -> Option<Value> {
    match value {
      Value::Object(fields) => {
        if let Some(key) = fields.get("__ref").and_then(Value::as_str) {
          return self.entities.get(key).and_then(|e| self.denormalize(e));
        }
        Some(Value::Object(
          fields
            .iter()
            .map(|(k, v)| (k.clone(), self.denormalize(v).unwrap_or(Value::Null)))
            .collect(),
        ))
      }
      Value::Array(items) => Some(Value::Array(
        items.iter().filter_map(|v| self.denormalize(v)).collect(),
      )),
      other => Some(other.clone()),
    }
  }
}

impl CacheStore for InMemoryCache {
  fn read_query(
    &self,
    query: &Document,
    variables: Option<&Value>,
  ) -> UpdateResult<Option<Value>> {
    Ok(
      self
        .results
        .get(&OperationKey::new(query, variables))
        .and_then(|result| self.denormalize(result)),
    )
  }

  fn write_query(
    &mut self,
    query: &Document,
    variables: Option<&Value>,
    data: Value,
  ) -> UpdateResult<()> {
    self.writes += 1;
    self.seed(query, variables, data);
    Ok(())
  }

  fn identify(&self, entity: &Value) -> Option<String> {
    let typename = entity.get("__typename")?.as_str()?;
    let id = entity.get("id")?.as_str()?;
    Some(format!("{}:{}", typename, id))
  }

  fn evict(&mut self, id: &str) -> bool {
    self.entities.remove(id).is_some()
  }

  fn extract(&self) -> Value {
    let mut snapshot = Map::new();
    if !self.results.is_empty() {
      let root: Map<String, Value> = self
        .results
        .iter()
        .map(|(key, result)| (key.to_string(), result.clone()))
        .collect();
      snapshot.insert("ROOT_QUERY".to_string(), Value::Object(root));
    }
    for (key, entity) in &self.entities {
      snapshot.insert(key.clone(), entity.clone());
    }
    Value::Object(snapshot)
  }
}

// ============================================================================
// Recording logger
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct LogEvent {
  pub level: &'static str,
  pub message: String,
  pub payload: Value,
}

#[derive(Debug, Default)]
pub struct RecordingLogger {
  events: Mutex<Vec<LogEvent>>,
}

impl RecordingLogger {
  pub fn new() -> Arc<Self> {
    Arc::new(Self::default())
  }

  pub fn events(&self, level: &str) -> Vec<LogEvent> {
    self
      .events
      .lock()
      .unwrap()
      .iter()
      .filter(|e| e.level == level)
      .cloned()
      .collect()
  }

  fn record(&self, level: &'static str, message: &str, payload: &Value) {
    self.events.lock().unwrap().push(LogEvent {
      level,
      message: message.to_string(),
      payload: payload.clone(),
    });
  }
}

impl Logger for RecordingLogger {
  fn debug(&self, message: &str, payload: &Value) {
    self.record("debug", message, payload);
  }

  fn warn(&self, message: &str, payload: &Value) {
    self.record("warn", message, payload);
  }

  fn info(&self, message: &str, payload: &Value) {
    self.record("info", message, payload);
  }
}
