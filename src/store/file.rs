//! JSON-file backend.
//!
//! Each collection is one file, `<root>/<collection>.json`:
//!
//! ```json
//! { "version": 1, "documents": [ { "_id": "01j...", "title": "..." } ] }
//! ```
//!
//! Every call reads the file afresh, so external edits are picked up without
//! a restart. Inserts rewrite the whole file through a temp file and rename,
//! serialized by a process-wide lock; readers never see a half-written file.

use super::{DocumentStore, StoreError};
use crate::document::{Document, DocumentId, Filter, StoredDocument};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::io;
use std::path::PathBuf;
use tokio::sync::Mutex;

/// Version of the collection file format. Files with another version are
/// reported as corrupt rather than silently reinterpreted.
const COLLECTION_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct CollectionFile {
    version: u32,
    documents: Vec<StoredDocument>,
}

impl CollectionFile {
    fn empty() -> Self {
        Self {
            version: COLLECTION_VERSION,
            documents: Vec::new(),
        }
    }
}

#[derive(Debug)]
pub struct FileStore {
    root: PathBuf,
    write_lock: Mutex<()>,
}

impl FileStore {
    /// Open (creating if needed) a store rooted at `root`.
    pub async fn open(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        tokio::fs::create_dir_all(&root).await?;
        Ok(Self {
            root,
            write_lock: Mutex::new(()),
        })
    }

    fn collection_path(&self, collection: &str) -> Result<PathBuf, StoreError> {
        let valid = !collection.is_empty()
            && collection
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(StoreError::InvalidCollection(collection.to_string()));
        }
        Ok(self.root.join(format!("{collection}.json")))
    }

    async fn load(&self, collection: &str) -> Result<CollectionFile, StoreError> {
        let path = self.collection_path(collection)?;
        let content = match tokio::fs::read_to_string(&path).await {
            Ok(c) => c,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(CollectionFile::empty()),
            Err(e) => return Err(e.into()),
        };
        let file: CollectionFile =
            serde_json::from_str(&content).map_err(|e| StoreError::Corrupt {
                collection: collection.to_string(),
                reason: e.to_string(),
            })?;
        if file.version != COLLECTION_VERSION {
            return Err(StoreError::Corrupt {
                collection: collection.to_string(),
                reason: format!(
                    "format version {} (expected {COLLECTION_VERSION})",
                    file.version
                ),
            });
        }
        Ok(file)
    }

    async fn save(&self, collection: &str, file: &CollectionFile) -> Result<(), StoreError> {
        let path = self.collection_path(collection)?;
        let tmp = path.with_extension("json.tmp");
        let json = serde_json::to_string_pretty(file)?;
        tokio::fs::write(&tmp, json).await?;
        tokio::fs::rename(&tmp, &path).await?;
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for FileStore {
    fn backend(&self) -> &'static str {
        "file"
    }

    async fn count(&self, collection: &str) -> Result<u64, StoreError> {
        Ok(self.load(collection).await?.documents.len() as u64)
    }

    async fn insert(
        &self,
        collection: &str,
        document: Document,
    ) -> Result<DocumentId, StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut file = self.load(collection).await?;
        let id = DocumentId::generate();
        file.documents.push(StoredDocument::new(id.clone(), document));
        self.save(collection, &file).await?;
        Ok(id)
    }

    async fn list(
        &self,
        collection: &str,
        filter: &Filter,
    ) -> Result<Vec<StoredDocument>, StoreError> {
        let file = self.load(collection).await?;
        Ok(file
            .documents
            .into_iter()
            .filter(|d| filter.matches(&d.fields))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    fn doc(value: serde_json::Value) -> Document {
        value.as_object().cloned().unwrap()
    }

    #[tokio::test]
    async fn missing_file_is_empty_collection() {
        let tmp = TempDir::new().unwrap();
        let store = FileStore::open(tmp.path()).await.unwrap();
        assert_eq!(store.count("serviceitem").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn insert_persists_across_instances() {
        let tmp = TempDir::new().unwrap();
        let id = {
            let store = FileStore::open(tmp.path()).await.unwrap();
            store
                .insert("videoitem", doc(json!({"title": "Showreel", "url": "u"})))
                .await
                .unwrap()
        };

        let reopened = FileStore::open(tmp.path()).await.unwrap();
        let docs = reopened.list("videoitem", &Filter::all()).await.unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].id, id);
        assert_eq!(docs[0].fields["title"], "Showreel");
        assert!(!tmp.path().join("videoitem.json.tmp").exists());
    }

    #[tokio::test]
    async fn list_preserves_insertion_order_and_filters() {
        let tmp = TempDir::new().unwrap();
        let store = FileStore::open(tmp.path()).await.unwrap();
        for (title, category) in [("A", "Events"), ("B", "Corporate"), ("C", "Events")] {
            store
                .insert("portfolioitem", doc(json!({"title": title, "category": category})))
                .await
                .unwrap();
        }

        let all = store.list("portfolioitem", &Filter::all()).await.unwrap();
        let titles: Vec<_> = all.iter().map(|d| d.fields["title"].clone()).collect();
        assert_eq!(titles, vec![json!("A"), json!("B"), json!("C")]);

        let events = store
            .list("portfolioitem", &Filter::all().eq("category", "Events"))
            .await
            .unwrap();
        assert_eq!(events.len(), 2);
    }

    #[tokio::test]
    async fn corrupt_file_is_an_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("photoitem.json"), "not json").unwrap();
        let store = FileStore::open(tmp.path()).await.unwrap();
        assert!(matches!(
            store.count("photoitem").await,
            Err(StoreError::Corrupt { .. })
        ));
    }

    #[tokio::test]
    async fn version_mismatch_is_an_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("photoitem.json"),
            r#"{"version": 99, "documents": []}"#,
        )
        .unwrap();
        let store = FileStore::open(tmp.path()).await.unwrap();
        let err = store.list("photoitem", &Filter::all()).await.unwrap_err();
        assert!(err.to_string().contains("format version 99"));
    }

    #[tokio::test]
    async fn rejects_path_like_collection_names() {
        let tmp = TempDir::new().unwrap();
        let store = FileStore::open(tmp.path()).await.unwrap();
        assert!(matches!(
            store.count("../escape").await,
            Err(StoreError::InvalidCollection(_))
        ));
    }
}
