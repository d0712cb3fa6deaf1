//! Query documents.
//!
//! A `Document` mirrors the JSON AST that GraphQL code generators emit for
//! each operation (`{"kind":"Document","definitions":[...]}`), so generated
//! documents deserialize directly. Only the parts needed to locate fields are
//! modelled; everything else in the AST is ignored on read.

mod key;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::marker::PhantomData;
use std::ops::Deref;

use crate::error::UpdateResult;

pub use key::OperationKey;

/// A parsed GraphQL document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
  pub definitions: Vec<Definition>,
}

/// Top-level definition of a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Definition {
  OperationDefinition(OperationDefinition),
  FragmentDefinition(FragmentDefinition),
  /// Schema definitions and extensions
  #[serde(other)]
  Unsupported,
}

/// Operation kind
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationType {
  #[default]
  Query,
  Mutation,
  Subscription,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationDefinition {
  #[serde(default)]
  pub operation: OperationType,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub name: Option<Name>,
  pub selection_set: SelectionSet,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FragmentDefinition {
  pub name: Name,
  pub selection_set: SelectionSet,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionSet {
  pub selections: Vec<Selection>,
}

/// One entry of a selection set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Selection {
  Field(Field),
  FragmentSpread(FragmentSpread),
  InlineFragment(InlineFragment),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub alias: Option<Name>,
  pub name: Name,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub selection_set: Option<SelectionSet>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FragmentSpread {
  pub name: Name,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineFragment {
  pub selection_set: SelectionSet,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Name {
  pub value: String,
}

impl Name {
  pub fn new(value: impl Into<String>) -> Self {
    Self {
      value: value.into(),
    }
  }
}

impl Document {
  /// Parse a document from its JSON AST.
  pub fn from_json(json: &str) -> UpdateResult<Self> {
    Ok(serde_json::from_str(json)?)
  }

  /// Build a single-operation query document.
  pub fn query(name: &str, selections: impl IntoIterator<Item = Field>) -> Self {
    Self {
      definitions: vec![Definition::OperationDefinition(OperationDefinition {
        operation: OperationType::Query,
        name: Some(Name::new(name)),
        selection_set: SelectionSet::of(selections),
      })],
    }
  }

  /// First operation definition of the document.
  pub fn operation(&self) -> Option<&OperationDefinition> {
    self.definitions.iter().find_map(|definition| match definition {
      Definition::OperationDefinition(operation) => Some(operation),
      _ => None,
    })
  }

  /// Name of the first operation, if it has one.
  pub fn operation_name(&self) -> Option<&str> {
    self
      .operation()
      .and_then(|operation| operation.name.as_ref())
      .map(|name| name.value.as_str())
  }
}

impl SelectionSet {
  pub fn of(fields: impl IntoIterator<Item = Field>) -> Self {
    Self {
      selections: fields.into_iter().map(Selection::Field).collect(),
    }
  }

  /// Field selections in document order, skipping fragments.
  pub fn fields(&self) -> impl Iterator<Item = &Field> {
    self.selections.iter().filter_map(|selection| match selection {
      Selection::Field(field) => Some(field),
      _ => None,
    })
  }
}

impl Field {
  /// Leaf field with no sub-selections.
  pub fn new(name: &str) -> Self {
    Self {
      alias: None,
      name: Name::new(name),
      selection_set: None,
    }
  }

  pub fn aliased(mut self, alias: &str) -> Self {
    self.alias = Some(Name::new(alias));
    self
  }

  /// Add a sub-selection.
  pub fn select(mut self, field: Field) -> Self {
    self
      .selection_set
      .get_or_insert_with(SelectionSet::default)
      .selections
      .push(Selection::Field(field));
    self
  }

  /// Key this field appears under in result data: the alias if present.
  pub fn response_key(&self) -> &str {
    self.alias.as_ref().unwrap_or(&self.name).value.as_str()
  }
}

/// A document tagged with its result type `T` and variables type `V`.
///
/// The tags only steer type inference for `update_cache` drafts and variables;
/// at runtime this is just the `Document`.
pub struct TypedDocument<T, V = serde_json::Value> {
  document: Document,
  _types: PhantomData<fn() -> (T, V)>,
}

impl<T, V> TypedDocument<T, V> {
  pub fn new(document: Document) -> Self {
    Self {
      document,
      _types: PhantomData,
    }
  }

  /// Parse a generated document from its JSON AST.
  pub fn from_json(json: &str) -> UpdateResult<Self> {
    Document::from_json(json).map(Self::new)
  }

  pub fn document(&self) -> &Document {
    &self.document
  }
}

impl<T, V> Deref for TypedDocument<T, V> {
  type Target = Document;

  fn deref(&self) -> &Document {
    &self.document
  }
}

impl<T, V> Clone for TypedDocument<T, V> {
  fn clone(&self) -> Self {
    Self::new(self.document.clone())
  }
}

impl<T, V> fmt::Debug for TypedDocument<T, V> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_tuple("TypedDocument").field(&self.document).finish()
  }
}

impl<T, V> From<Document> for TypedDocument<T, V> {
  fn from(document: Document) -> Self {
    Self::new(document)
  }
}
