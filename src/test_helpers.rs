//! Shared test utilities.
//!
//! Provides ready-made stores and services (memory-backed, file-backed, and
//! degraded) plus payload builders for the admin and contact operations.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let service = memory_service();
//! let id = service.create_service(&service_payload("Mapping")).await.unwrap();
//! assert_eq!(find_service(&service.list_services().await, "Mapping").id, id);
//! ```

use serde_json::{Value, json};
use std::sync::Arc;
use tempfile::TempDir;

use crate::repository::Record;
use crate::schema::ServiceItem;
use crate::service::ContentService;
use crate::store::{FileStore, MemoryStore, Store};

// =========================================================================
// Stores and services
// =========================================================================

pub fn memory_store() -> Store {
    Store::new(Arc::new(MemoryStore::new()))
}

/// A file-backed store rooted directly in a fresh temp directory.
///
/// Keep the `TempDir` alive for as long as the store is used.
pub async fn file_store() -> (TempDir, Store) {
    let tmp = TempDir::new().unwrap();
    let store = Store::new(Arc::new(FileStore::open(tmp.path()).await.unwrap()));
    (tmp, store)
}

pub fn memory_service() -> ContentService {
    ContentService::new(memory_store())
}

pub fn unavailable_service() -> ContentService {
    ContentService::new(Store::unavailable())
}

// =========================================================================
// Payload builders
// =========================================================================

pub fn service_payload(title: &str) -> Value {
    json!({
        "title": title,
        "description": format!("{title} description"),
        "icon": "Camera",
    })
}

pub fn portfolio_payload(title: &str, category: &str) -> Value {
    json!({
        "media_type": "image",
        "url": format!("https://example.com/{title}.jpg"),
        "category": category,
        "title": title,
    })
}

pub fn contact_payload() -> Value {
    json!({
        "name": "Ana Pop",
        "email": "ana@example.com",
        "message": "Need a roof inspection next week.",
    })
}

// =========================================================================
// Lookups: panic with a clear message on miss
// =========================================================================

/// Find a service record by title. Panics if not found.
pub fn find_service<'a>(records: &'a [Record<ServiceItem>], title: &str) -> &'a Record<ServiceItem> {
    records
        .iter()
        .find(|r| r.item.title == title)
        .unwrap_or_else(|| {
            let titles: Vec<&str> = records.iter().map(|r| r.item.title.as_str()).collect();
            panic!("service '{title}' not found. Available: {titles:?}")
        })
}
