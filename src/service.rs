//! The read/write contract behind the HTTP layer.
//!
//! Failure policy differs by path:
//!
//! | Path | Store unavailable or failing |
//! |------|------------------------------|
//! | public reads | empty list / default content, logged |
//! | admin creates | [`ServiceError::Configuration`] / [`ServiceError::Storage`] |
//! | content update | dropped and reported as success when unavailable; [`ServiceError::Storage`] when failing |
//! | contact submission | write dropped, logged, reported as success |
//!
//! Validation always runs first, so a bad payload is rejected with
//! [`ServiceError::Validation`] whatever state the store is in.

use crate::document::{DocumentId, Filter};
use crate::repository::{Record, Repository};
use crate::schema::{
    self, ContactMessage, Entity, EntityKind, PhotoItem, PortfolioItem, ServiceItem, SiteContent,
    ValidationError, VideoItem,
};
use crate::store::{Store, StoreError};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// No store is configured for a write that must not be silent.
    #[error("Database not configured")]
    Configuration(#[source] StoreError),
    /// The store is configured but failed on an admin write.
    #[error("Storage error: {0}")]
    Storage(#[source] StoreError),
}

impl From<StoreError> for ServiceError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Unavailable => ServiceError::Configuration(e),
            e => ServiceError::Storage(e),
        }
    }
}

/// The current site content, with its identifier when it came from the store.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrentContent {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<DocumentId>,
    #[serde(flatten)]
    pub content: SiteContent,
}

/// Store availability and per-collection document counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreStatus {
    pub available: bool,
    pub backend: &'static str,
    /// `None` when the count failed or the store is unavailable.
    pub counts: Vec<(EntityKind, Option<u64>)>,
}

#[derive(Debug, Clone)]
pub struct ContentService {
    store: Store,
}

impl ContentService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn is_store_available(&self) -> bool {
        self.store.is_available()
    }

    fn repo<T: Entity>(&self) -> Repository<T> {
        Repository::new(self.store.clone())
    }

    // -------------------------------------------------------------------------
    // Reads
    // -------------------------------------------------------------------------

    /// Latest site content, or the structural default when there is none.
    pub async fn get_content(&self) -> CurrentContent {
        match self.repo::<SiteContent>().latest().await {
            Ok(Some(Record { id, item })) => CurrentContent {
                id: Some(id),
                content: item,
            },
            Ok(None) => CurrentContent {
                id: None,
                content: SiteContent::default(),
            },
            Err(e) => {
                log_degraded_read(EntityKind::SiteContent, &e);
                CurrentContent {
                    id: None,
                    content: SiteContent::default(),
                }
            }
        }
    }

    pub async fn list_services(&self) -> Vec<Record<ServiceItem>> {
        self.list_or_empty(&Filter::all()).await
    }

    /// Portfolio items, optionally restricted to an exact category.
    ///
    /// An empty category string is treated as no filter.
    pub async fn list_portfolio(&self, category: Option<&str>) -> Vec<Record<PortfolioItem>> {
        let filter = match category {
            Some(c) if !c.is_empty() => Filter::all().eq("category", c),
            _ => Filter::all(),
        };
        self.list_or_empty(&filter).await
    }

    pub async fn list_videos(&self) -> Vec<Record<VideoItem>> {
        self.list_or_empty(&Filter::all()).await
    }

    pub async fn list_photos(&self) -> Vec<Record<PhotoItem>> {
        self.list_or_empty(&Filter::all()).await
    }

    async fn list_or_empty<T: Entity>(&self, filter: &Filter) -> Vec<Record<T>> {
        self.repo::<T>().list(filter).await.unwrap_or_else(|e| {
            log_degraded_read(T::KIND, &e);
            Vec::new()
        })
    }

    // -------------------------------------------------------------------------
    // Admin writes
    // -------------------------------------------------------------------------

    pub async fn create_service(&self, payload: &Value) -> Result<DocumentId, ServiceError> {
        self.create::<ServiceItem>(payload).await
    }

    pub async fn create_portfolio_item(&self, payload: &Value) -> Result<DocumentId, ServiceError> {
        self.create::<PortfolioItem>(payload).await
    }

    pub async fn create_video(&self, payload: &Value) -> Result<DocumentId, ServiceError> {
        self.create::<VideoItem>(payload).await
    }

    pub async fn create_photo(&self, payload: &Value) -> Result<DocumentId, ServiceError> {
        self.create::<PhotoItem>(payload).await
    }

    async fn create<T: Entity>(&self, payload: &Value) -> Result<DocumentId, ServiceError> {
        let item = T::from_payload(payload)?;
        self.repo::<T>().insert(&item).await.map_err(|e| {
            tracing::error!(collection = T::KIND.collection(), error = %e, "admin write failed");
            ServiceError::from(e)
        })
    }

    /// Append a new site content document: the current content with the
    /// provided fields replaced.
    ///
    /// Fields absent from `payload` (or sent as `null`) keep their current
    /// value. Returns the new document's id, or `None` when the store is
    /// unavailable and the write was dropped. A configured store that fails
    /// to read the current content or to insert is an error.
    pub async fn update_content(&self, payload: &Value) -> Result<Option<DocumentId>, ServiceError> {
        let patch = schema::validate_patch(EntityKind::SiteContent, payload)?;

        let current = match self.repo::<SiteContent>().latest().await {
            Ok(latest) => latest.map(|record| record.item).unwrap_or_default(),
            Err(StoreError::Unavailable) => {
                tracing::warn!("content update dropped: store unavailable");
                return Ok(None);
            }
            Err(e) => {
                tracing::error!(error = %e, "content update failed: cannot read current content");
                return Err(ServiceError::Storage(e));
            }
        };

        let mut document =
            schema::to_document(&current).map_err(|e| ServiceError::Storage(e.into()))?;
        for (field, value) in patch {
            document.insert(field, value);
        }

        match self
            .store
            .insert(EntityKind::SiteContent.collection(), document)
            .await
        {
            Ok(id) => Ok(Some(id)),
            Err(StoreError::Unavailable) => {
                tracing::warn!("content update dropped: store unavailable");
                Ok(None)
            }
            Err(e) => {
                tracing::error!(error = %e, "content update failed: insert failed");
                Err(ServiceError::Storage(e))
            }
        }
    }

    /// Record a contact message. Infrastructure failures never reach the
    /// submitter: they are logged and the submission reported as accepted.
    pub async fn submit_contact(&self, payload: &Value) -> Result<Option<DocumentId>, ServiceError> {
        let message = ContactMessage::from_payload(payload)?;
        match self.repo::<ContactMessage>().insert(&message).await {
            Ok(id) => Ok(Some(id)),
            Err(StoreError::Unavailable) => {
                tracing::warn!("contact message dropped: store unavailable");
                Ok(None)
            }
            Err(e) => {
                tracing::warn!(error = %e, "contact message dropped: insert failed");
                Ok(None)
            }
        }
    }

    // -------------------------------------------------------------------------
    // Diagnostics
    // -------------------------------------------------------------------------

    pub async fn status(&self) -> StoreStatus {
        let mut counts = Vec::with_capacity(EntityKind::ALL.len());
        for kind in EntityKind::ALL {
            let count = self.store.count(kind.collection()).await.ok();
            counts.push((kind, count));
        }
        StoreStatus {
            available: self.store.is_available(),
            backend: self.store.backend_name(),
            counts,
        }
    }
}

fn log_degraded_read(kind: EntityKind, error: &StoreError) {
    match error {
        StoreError::Unavailable => {
            tracing::debug!(collection = kind.collection(), "store unavailable, serving defaults");
        }
        e => {
            tracing::warn!(collection = kind.collection(), error = %e, "read failed, serving defaults");
        }
    }
}
