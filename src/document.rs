//! Kind-agnostic document primitives shared by the store and the schema layer.
//!
//! A [`Document`] is a flat JSON object. Once persisted it is wrapped in a
//! [`StoredDocument`] carrying the store-assigned [`DocumentId`], which is
//! serialized under the `_id` key so API consumers see it as just another
//! string field.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;

/// Field name under which the identifier appears in serialized documents.
pub const ID_FIELD: &str = "_id";

/// The fields of a single document, without its identifier.
pub type Document = Map<String, Value>;

/// Opaque, store-assigned document identifier.
///
/// Callers must not assume any internal structure. Fresh identifiers are
/// ULIDs, so they are unique across processes and never reused.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(String);

impl DocumentId {
    /// Mint a new identifier.
    pub fn generate() -> Self {
        Self(ulid::Ulid::new().to_string().to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for DocumentId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// A document as it exists in a collection: identifier plus fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredDocument {
    #[serde(rename = "_id")]
    pub id: DocumentId,
    #[serde(flatten)]
    pub fields: Document,
}

impl StoredDocument {
    pub fn new(id: DocumentId, mut fields: Document) -> Self {
        // An `_id` inside the payload would shadow the real one on output.
        fields.remove(ID_FIELD);
        Self { id, fields }
    }
}

/// Exact-match filter over top-level fields.
///
/// An empty filter matches every document. A document matches when, for
/// every `(field, value)` pair, it has that field and the value is equal.
/// String comparison is case-sensitive.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    terms: BTreeMap<String, Value>,
}

impl Filter {
    /// The filter that matches everything.
    pub fn all() -> Self {
        Self::default()
    }

    /// Add an exact-match term.
    pub fn eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.terms.insert(field.into(), value.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn matches(&self, document: &Document) -> bool {
        self.terms
            .iter()
            .all(|(field, expected)| document.get(field) == Some(expected))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: Value) -> Document {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn generated_ids_are_distinct() {
        let a = DocumentId::generate();
        let b = DocumentId::generate();
        assert_ne!(a, b);
        assert_eq!(a.as_str().len(), 26);
    }

    #[test]
    fn empty_filter_matches_everything() {
        assert!(Filter::all().matches(&doc(json!({"category": "Events"}))));
        assert!(Filter::all().matches(&Document::new()));
    }

    #[test]
    fn filter_is_exact_and_case_sensitive() {
        let filter = Filter::all().eq("category", "Events");
        assert!(filter.matches(&doc(json!({"category": "Events", "title": "x"}))));
        assert!(!filter.matches(&doc(json!({"category": "events"}))));
        assert!(!filter.matches(&doc(json!({"category": "Events "}))));
        assert!(!filter.matches(&doc(json!({"title": "no category"}))));
    }

    #[test]
    fn stored_document_serializes_id_inline() {
        let stored = StoredDocument::new(
            DocumentId::from("abc".to_string()),
            doc(json!({"title": "Cliffs"})),
        );
        let value = serde_json::to_value(&stored).unwrap();
        assert_eq!(value, json!({"_id": "abc", "title": "Cliffs"}));
    }

    #[test]
    fn stored_document_drops_payload_id() {
        let stored = StoredDocument::new(
            DocumentId::from("real".to_string()),
            doc(json!({"_id": "spoofed", "title": "x"})),
        );
        assert_eq!(stored.id.as_str(), "real");
        assert!(!stored.fields.contains_key(ID_FIELD));
    }
}
