//! Document-store client abstraction.
//!
//! The managed backend is an external collaborator; the app only consumes a
//! narrow capability set over JSON documents in named collections. Keeping it
//! behind a trait lets tests run against [`MemoryStore`] and the CLI against
//! a file-backed implementation.

mod memory;

pub use memory::MemoryStore;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::EventDeskResult;

/// A JSON document body. The document key lives outside the body.
pub type Document = serde_json::Map<String, serde_json::Value>;

/// The capability set consumed from the backing document store.
///
/// Contract notes:
/// - `insert` assigns and returns a fresh id.
/// - `update` merges the patch into an existing document and fails with
///   `NotFound` when the document is absent; `upsert` replaces or creates.
/// - `append_to_array` is an atomic array-union on one field of one
///   document: concurrent appends may interleave but none is lost, and a
///   value already present is not duplicated. Fails with `NotFound` when the
///   document is absent.
/// - Query results come back in store order; callers must not rely on it.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn insert(&self, collection: &str, document: Document) -> EventDeskResult<String>;

    async fn upsert(&self, collection: &str, id: &str, document: Document) -> EventDeskResult<()>;

    async fn get_by_id(&self, collection: &str, id: &str) -> EventDeskResult<Option<Document>>;

    async fn update(&self, collection: &str, id: &str, patch: Document) -> EventDeskResult<()>;

    async fn query_array_contains(
        &self,
        collection: &str,
        field: &str,
        value: &str,
    ) -> EventDeskResult<Vec<(String, Document)>>;

    async fn append_to_array(
        &self,
        collection: &str,
        id: &str,
        field: &str,
        value: &str,
    ) -> EventDeskResult<()>;
}

/// Array-union semantics shared by the store implementations: create the
/// array if the field is missing, skip values already present.
pub fn append_union(doc: &mut Document, field: &str, value: &str) {
    let entry = doc
        .entry(field.to_string())
        .or_insert_with(|| Value::Array(Vec::new()));
    if let Value::Array(items) = entry {
        if !items.iter().any(|item| item == value) {
            items.push(Value::String(value.to_string()));
        }
    } else {
        *entry = Value::Array(vec![Value::String(value.to_string())]);
    }
}

/// Membership test used by the array-contains query.
pub fn array_contains(doc: &Document, field: &str, value: &str) -> bool {
    matches!(doc.get(field), Some(Value::Array(items)) if items.iter().any(|item| item == value))
}
