//! File-backed document store.
//!
//! One JSON file per document: `<root>/<collection>/<id>.json`. Good enough
//! for a single-user CLI; the managed backend this stands in for lives
//! behind the same trait. Mutations take a process-wide lock so concurrent
//! tasks cannot tear a read-modify-write, which is what keeps
//! `append_to_array` atomic here.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;
use eventdesk_core::error::{EventDeskError, EventDeskResult};
use eventdesk_core::store::{Document, DocumentStore, append_union, array_contains};
use uuid::Uuid;

pub struct FileStore {
    root: PathBuf,
    write_lock: Mutex<()>,
}

impl FileStore {
    /// Open (creating if needed) a store rooted at the given directory.
    pub fn open(root: impl Into<PathBuf>) -> EventDeskResult<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(FileStore {
            root,
            write_lock: Mutex::new(()),
        })
    }

    fn doc_path(&self, collection: &str, id: &str) -> PathBuf {
        self.root.join(collection).join(format!("{id}.json"))
    }

    fn read_doc(&self, path: &Path) -> EventDeskResult<Option<Document>> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(store_err(e)),
        };
        serde_json::from_str(&content)
            .map(Some)
            .map_err(|e| EventDeskError::Serialization(e.to_string()))
    }

    fn write_doc(&self, collection: &str, id: &str, doc: &Document) -> EventDeskResult<()> {
        let dir = self.root.join(collection);
        fs::create_dir_all(&dir).map_err(store_err)?;
        let content = serde_json::to_string_pretty(doc)
            .map_err(|e| EventDeskError::Serialization(e.to_string()))?;
        fs::write(self.doc_path(collection, id), content).map_err(store_err)
    }
}

fn store_err(e: std::io::Error) -> EventDeskError {
    EventDeskError::StoreUnavailable(e.to_string())
}

#[async_trait]
impl DocumentStore for FileStore {
    async fn insert(&self, collection: &str, document: Document) -> EventDeskResult<String> {
        let id = Uuid::new_v4().to_string();
        let _guard = self.write_lock.lock().expect("store lock poisoned");
        self.write_doc(collection, &id, &document)?;
        Ok(id)
    }

    async fn upsert(&self, collection: &str, id: &str, document: Document) -> EventDeskResult<()> {
        let _guard = self.write_lock.lock().expect("store lock poisoned");
        self.write_doc(collection, id, &document)
    }

    async fn get_by_id(&self, collection: &str, id: &str) -> EventDeskResult<Option<Document>> {
        self.read_doc(&self.doc_path(collection, id))
    }

    async fn update(&self, collection: &str, id: &str, patch: Document) -> EventDeskResult<()> {
        let _guard = self.write_lock.lock().expect("store lock poisoned");
        let mut doc = self
            .read_doc(&self.doc_path(collection, id))?
            .ok_or_else(|| EventDeskError::NotFound(id.to_string()))?;
        for (key, value) in patch {
            doc.insert(key, value);
        }
        self.write_doc(collection, id, &doc)
    }

    async fn query_array_contains(
        &self,
        collection: &str,
        field: &str,
        value: &str,
    ) -> EventDeskResult<Vec<(String, Document)>> {
        let dir = self.root.join(collection);
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let mut hits = Vec::new();
        for entry in fs::read_dir(&dir).map_err(store_err)? {
            let path = entry.map_err(store_err)?.path();
            if path.extension().map(|e| e == "json").unwrap_or(false)
                && let Some(id) = path.file_stem().and_then(|s| s.to_str())
                && let Some(doc) = self.read_doc(&path)?
                && array_contains(&doc, field, value)
            {
                hits.push((id.to_string(), doc));
            }
        }
        Ok(hits)
    }

    async fn append_to_array(
        &self,
        collection: &str,
        id: &str,
        field: &str,
        value: &str,
    ) -> EventDeskResult<()> {
        let _guard = self.write_lock.lock().expect("store lock poisoned");
        let mut doc = self
            .read_doc(&self.doc_path(collection, id))?
            .ok_or_else(|| EventDeskError::NotFound(id.to_string()))?;
        append_union(&mut doc, field, value);
        self.write_doc(collection, id, &doc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(pairs: &[(&str, serde_json::Value)]) -> Document {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[tokio::test]
    async fn insert_then_get_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();

        let id = store
            .insert("events", doc(&[("eventName", json!("Demo"))]))
            .await
            .unwrap();
        let fetched = store.get_by_id("events", &id).await.unwrap().unwrap();
        assert_eq!(fetched["eventName"], "Demo");
        assert!(store.get_by_id("events", "nope").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn update_merges_and_missing_fails() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();

        let id = store
            .insert("events", doc(&[("isApproved", json!(true))]))
            .await
            .unwrap();
        store
            .update("events", &id, doc(&[("isApproved", json!(false))]))
            .await
            .unwrap();
        let fetched = store.get_by_id("events", &id).await.unwrap().unwrap();
        assert_eq!(fetched["isApproved"], false);

        assert!(matches!(
            store.update("events", "ghost", Document::new()).await,
            Err(EventDeskError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn documents_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let id = {
            let store = FileStore::open(dir.path()).unwrap();
            store
                .upsert("users", "u1", doc(&[("uid", json!("u1"))]))
                .await
                .unwrap();
            store
                .insert("events", doc(&[("workers", json!(["u1"]))]))
                .await
                .unwrap()
        };

        let store = FileStore::open(dir.path()).unwrap();
        store.append_to_array("users", "u1", "eventIds", &id).await.unwrap();
        let user = store.get_by_id("users", "u1").await.unwrap().unwrap();
        assert_eq!(user["eventIds"], json!([id]));

        let hits = store.query_array_contains("events", "workers", "u1").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].0, id);
    }

    #[tokio::test]
    async fn query_on_missing_collection_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();
        assert!(store
            .query_array_contains("events", "workers", "u1")
            .await
            .unwrap()
            .is_empty());
    }
}
