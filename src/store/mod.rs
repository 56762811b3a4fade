//! Kind-agnostic document persistence.
//!
//! [`DocumentStore`] is the seam between the content layer and a concrete
//! backend. Backends are schema-blind: they store whatever documents they are
//! handed, assign identifiers, and return documents in insertion order.
//!
//! [`Store`] is the handle the rest of the crate holds. It may be *degraded*
//! (no backend configured, or the configured one could not be opened), in
//! which case every call fails fast with [`StoreError::Unavailable`] and the
//! caller decides whether that means "empty" or "failure".
//!
//! # Connection strings
//!
//! | URL | Backend |
//! |-----|---------|
//! | `memory`, `memory://` | [`MemoryStore`], process-local |
//! | `file:///srv/vdrone`, `./data` | [`FileStore`] under `<dir>/<database_name>/` |

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::document::{Document, DocumentId, Filter, StoredDocument};
use async_trait::async_trait;
use std::fmt::Debug;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("document store unavailable")]
    Unavailable,
    #[error("unsupported store URL scheme: {0}")]
    UnsupportedScheme(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid collection name: {0:?}")]
    InvalidCollection(String),
    #[error("corrupt collection {collection}: {reason}")]
    Corrupt { collection: String, reason: String },
}

/// Persistence primitive over named collections.
#[async_trait]
pub trait DocumentStore: Debug + Send + Sync {
    /// Short backend name for status output (`"memory"`, `"file"`).
    fn backend(&self) -> &'static str;

    /// Number of documents currently in `collection`.
    async fn count(&self, collection: &str) -> Result<u64, StoreError>;

    /// Persist `document` and return its freshly assigned identifier.
    async fn insert(
        &self,
        collection: &str,
        document: Document,
    ) -> Result<DocumentId, StoreError>;

    /// Documents matching `filter`, in insertion order.
    async fn list(
        &self,
        collection: &str,
        filter: &Filter,
    ) -> Result<Vec<StoredDocument>, StoreError>;
}

/// Parsed form of a store connection string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreUrl {
    Memory,
    File(PathBuf),
}

impl StoreUrl {
    pub fn parse(url: &str) -> Result<Self, StoreError> {
        let url = url.trim();
        if url == "memory" || url == "memory://" {
            return Ok(StoreUrl::Memory);
        }
        if let Some(path) = url.strip_prefix("file://") {
            return Ok(StoreUrl::File(PathBuf::from(path)));
        }
        match url.split_once("://") {
            Some((scheme, _)) => Err(StoreError::UnsupportedScheme(scheme.to_string())),
            None => Ok(StoreUrl::File(PathBuf::from(url))),
        }
    }
}

/// Shared handle to the configured backend, or to nothing.
#[derive(Debug, Clone, Default)]
pub struct Store {
    backend: Option<Arc<dyn DocumentStore>>,
}

impl Store {
    pub fn new(backend: Arc<dyn DocumentStore>) -> Self {
        Self {
            backend: Some(backend),
        }
    }

    /// A store in degraded mode.
    pub fn unavailable() -> Self {
        Self { backend: None }
    }

    /// Open the backend named by `url`.
    ///
    /// Never fails: a missing URL or any open error yields a degraded store,
    /// logged at `warn`.
    pub async fn connect(url: Option<&str>, database_name: &str) -> Self {
        let Some(url) = url else {
            tracing::warn!("no store URL configured, running without a database");
            return Self::unavailable();
        };
        match Self::open(url, database_name).await {
            Ok(store) => {
                tracing::info!(backend = store.backend_name(), "document store connected");
                store
            }
            Err(e) => {
                tracing::warn!(error = %e, "document store unavailable, running degraded");
                Self::unavailable()
            }
        }
    }

    async fn open(url: &str, database_name: &str) -> Result<Self, StoreError> {
        let backend: Arc<dyn DocumentStore> = match StoreUrl::parse(url)? {
            StoreUrl::Memory => Arc::new(MemoryStore::new()),
            StoreUrl::File(root) => Arc::new(FileStore::open(root.join(database_name)).await?),
        };
        Ok(Self::new(backend))
    }

    pub fn is_available(&self) -> bool {
        self.backend.is_some()
    }

    pub fn backend_name(&self) -> &'static str {
        self.backend.as_ref().map_or("none", |b| b.backend())
    }

    fn backend(&self) -> Result<&dyn DocumentStore, StoreError> {
        self.backend.as_deref().ok_or(StoreError::Unavailable)
    }

    pub async fn count(&self, collection: &str) -> Result<u64, StoreError> {
        self.backend()?.count(collection).await
    }

    pub async fn insert(
        &self,
        collection: &str,
        document: Document,
    ) -> Result<DocumentId, StoreError> {
        let id = self.backend()?.insert(collection, document).await?;
        tracing::debug!(collection, id = %id, "document inserted");
        Ok(id)
    }

    pub async fn list(
        &self,
        collection: &str,
        filter: &Filter,
    ) -> Result<Vec<StoredDocument>, StoreError> {
        self.backend()?.list(collection, filter).await
    }
}
