//! Typed view of one entity kind's collection.
//!
//! A [`Repository<T>`] binds an [`Entity`] type to its collection on a
//! [`Store`]: it serializes values on the way in and decodes documents on the
//! way out. The store itself stays schema-blind, so a document that no longer
//! decodes as `T` (hand-edited file, older field layout) is skipped with a
//! warning instead of failing the whole listing.

use crate::document::{DocumentId, Filter, StoredDocument};
use crate::schema::{self, Entity};
use crate::store::{Store, StoreError};
use serde::{Deserialize, Serialize};
use std::marker::PhantomData;

/// A decoded document: identifier plus typed fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record<T> {
    #[serde(rename = "_id")]
    pub id: DocumentId,
    #[serde(flatten)]
    pub item: T,
}

#[derive(Debug, Clone)]
pub struct Repository<T> {
    store: Store,
    _entity: PhantomData<fn() -> T>,
}

impl<T: Entity> Repository<T> {
    pub fn new(store: Store) -> Self {
        Self {
            store,
            _entity: PhantomData,
        }
    }

    pub fn collection(&self) -> &'static str {
        T::KIND.collection()
    }

    pub async fn count(&self) -> Result<u64, StoreError> {
        self.store.count(self.collection()).await
    }

    pub async fn insert(&self, item: &T) -> Result<DocumentId, StoreError> {
        let document = schema::to_document(item)?;
        self.store.insert(self.collection(), document).await
    }

    pub async fn list(&self, filter: &Filter) -> Result<Vec<Record<T>>, StoreError> {
        let documents = self.store.list(self.collection(), filter).await?;
        Ok(documents
            .into_iter()
            .filter_map(|doc| self.decode(doc))
            .collect())
    }

    /// The most recently inserted document that decodes as `T`.
    pub async fn latest(&self) -> Result<Option<Record<T>>, StoreError> {
        let documents = self.store.list(self.collection(), &Filter::all()).await?;
        Ok(documents.into_iter().rev().find_map(|doc| self.decode(doc)))
    }

    fn decode(&self, doc: StoredDocument) -> Option<Record<T>> {
        let id = doc.id;
        match serde_json::from_value(serde_json::Value::Object(doc.fields)) {
            Ok(item) => Some(Record { id, item }),
            Err(e) => {
                tracing::warn!(
                    collection = self.collection(),
                    id = %id,
                    error = %e,
                    "skipping document that does not match its schema"
                );
                None
            }
        }
    }
}
