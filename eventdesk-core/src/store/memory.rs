//! In-memory document store.
//!
//! Backs the test suite and works as an ephemeral backend. All operations
//! take the one store-wide lock, which is what makes `append_to_array`
//! atomic here.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use uuid::Uuid;

use super::{Document, DocumentStore, append_union, array_contains};
use crate::error::{EventDeskError, EventDeskResult};

type Collection = HashMap<String, Document>;

#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: Mutex<HashMap<String, Collection>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn insert(&self, collection: &str, document: Document) -> EventDeskResult<String> {
        let id = Uuid::new_v4().to_string();
        let mut collections = self.collections.lock().expect("store lock poisoned");
        collections
            .entry(collection.to_string())
            .or_default()
            .insert(id.clone(), document);
        Ok(id)
    }

    async fn upsert(&self, collection: &str, id: &str, document: Document) -> EventDeskResult<()> {
        let mut collections = self.collections.lock().expect("store lock poisoned");
        collections
            .entry(collection.to_string())
            .or_default()
            .insert(id.to_string(), document);
        Ok(())
    }

    async fn get_by_id(&self, collection: &str, id: &str) -> EventDeskResult<Option<Document>> {
        let collections = self.collections.lock().expect("store lock poisoned");
        Ok(collections
            .get(collection)
            .and_then(|docs| docs.get(id))
            .cloned())
    }

    async fn update(&self, collection: &str, id: &str, patch: Document) -> EventDeskResult<()> {
        let mut collections = self.collections.lock().expect("store lock poisoned");
        let doc = collections
            .get_mut(collection)
            .and_then(|docs| docs.get_mut(id))
            .ok_or_else(|| EventDeskError::NotFound(id.to_string()))?;
        for (key, value) in patch {
            doc.insert(key, value);
        }
        Ok(())
    }

    async fn query_array_contains(
        &self,
        collection: &str,
        field: &str,
        value: &str,
    ) -> EventDeskResult<Vec<(String, Document)>> {
        let collections = self.collections.lock().expect("store lock poisoned");
        let Some(docs) = collections.get(collection) else {
            return Ok(Vec::new());
        };
        Ok(docs
            .iter()
            .filter(|(_, doc)| array_contains(doc, field, value))
            .map(|(id, doc)| (id.clone(), doc.clone()))
            .collect())
    }

    async fn append_to_array(
        &self,
        collection: &str,
        id: &str,
        field: &str,
        value: &str,
    ) -> EventDeskResult<()> {
        let mut collections = self.collections.lock().expect("store lock poisoned");
        let doc = collections
            .get_mut(collection)
            .and_then(|docs| docs.get_mut(id))
            .ok_or_else(|| EventDeskError::NotFound(id.to_string()))?;
        append_union(doc, field, value);
        Ok(())
    }
}
