//! Entity kinds, their typed shapes, and payload validation.
//!
//! Each [`EntityKind`] owns one collection (named after the kind, lowercase)
//! and a static field table. The table drives [`validate`], which turns an
//! arbitrary inbound JSON payload into a [`Document`] holding exactly the
//! declared fields:
//!
//! - required fields that are absent (or `null`) fail validation
//! - optional fields that are absent are stored as `null`
//! - defaulted fields (site content only) fall back to [`defaults`]
//! - unknown fields are dropped without complaint
//!
//! The typed structs ([`SiteContent`], [`ServiceItem`], ...) mirror the tables
//! and are what the rest of the crate works with once a payload is accepted.

use crate::document::Document;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use thiserror::Error;

/// The named content categories. One collection per kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    SiteContent,
    ServiceItem,
    PortfolioItem,
    VideoItem,
    PhotoItem,
    ContactMessage,
}

impl EntityKind {
    pub const ALL: [EntityKind; 6] = [
        EntityKind::SiteContent,
        EntityKind::ServiceItem,
        EntityKind::PortfolioItem,
        EntityKind::VideoItem,
        EntityKind::PhotoItem,
        EntityKind::ContactMessage,
    ];

    /// Collection name: the kind name, lowercased.
    pub fn collection(self) -> &'static str {
        match self {
            EntityKind::SiteContent => "sitecontent",
            EntityKind::ServiceItem => "serviceitem",
            EntityKind::PortfolioItem => "portfolioitem",
            EntityKind::VideoItem => "videoitem",
            EntityKind::PhotoItem => "photoitem",
            EntityKind::ContactMessage => "contactmessage",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            EntityKind::SiteContent => "SiteContent",
            EntityKind::ServiceItem => "ServiceItem",
            EntityKind::PortfolioItem => "PortfolioItem",
            EntityKind::VideoItem => "VideoItem",
            EntityKind::PhotoItem => "PhotoItem",
            EntityKind::ContactMessage => "ContactMessage",
        }
    }

    /// Contact messages are write-only; everything else is served publicly.
    pub fn is_public(self) -> bool {
        !matches!(self, EntityKind::ContactMessage)
    }

    pub fn fields(self) -> &'static [FieldSpec] {
        match self {
            EntityKind::SiteContent => SITE_CONTENT_FIELDS,
            EntityKind::ServiceItem => SERVICE_ITEM_FIELDS,
            EntityKind::PortfolioItem => PORTFOLIO_ITEM_FIELDS,
            EntityKind::VideoItem => VIDEO_ITEM_FIELDS,
            EntityKind::PhotoItem => PHOTO_ITEM_FIELDS,
            EntityKind::ContactMessage => CONTACT_MESSAGE_FIELDS,
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// Field tables
// =============================================================================

/// Accepted JSON shape of a field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    Text,
    /// Object whose values are all strings.
    TextMap,
    /// Array of strings, order preserved.
    TextList,
    /// One of a closed set of strings.
    OneOf(&'static [&'static str]),
}

impl FieldType {
    pub fn accepts(self, value: &Value) -> bool {
        match (self, value) {
            (FieldType::Text, Value::String(_)) => true,
            (FieldType::TextMap, Value::Object(map)) => map.values().all(Value::is_string),
            (FieldType::TextList, Value::Array(items)) => items.iter().all(Value::is_string),
            (FieldType::OneOf(allowed), Value::String(s)) => allowed.contains(&s.as_str()),
            _ => false,
        }
    }

    pub fn describe(self) -> String {
        match self {
            FieldType::Text => "string".to_string(),
            FieldType::TextMap => "mapping of string to string".to_string(),
            FieldType::TextList => "list of strings".to_string(),
            FieldType::OneOf(allowed) => format!("one of {}", allowed.join("|")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    Required,
    Optional,
    /// Absent values are filled from the kind's structural default.
    Defaulted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub ty: FieldType,
    pub presence: Presence,
}

const fn field(name: &'static str, ty: FieldType, presence: Presence) -> FieldSpec {
    FieldSpec { name, ty, presence }
}

pub const MEDIA_TYPES: &[&str] = &["image", "video"];

const SITE_CONTENT_FIELDS: &[FieldSpec] = &[
    field("brand", FieldType::Text, Presence::Defaulted),
    field("colors", FieldType::TextMap, Presence::Defaulted),
    field("hero_title", FieldType::Text, Presence::Defaulted),
    field("hero_cta", FieldType::Text, Presence::Defaulted),
    field("about_paragraphs", FieldType::TextList, Presence::Defaulted),
];

const SERVICE_ITEM_FIELDS: &[FieldSpec] = &[
    field("title", FieldType::Text, Presence::Required),
    field("description", FieldType::Text, Presence::Required),
    field("icon", FieldType::Text, Presence::Required),
];

const PORTFOLIO_ITEM_FIELDS: &[FieldSpec] = &[
    field("media_type", FieldType::OneOf(MEDIA_TYPES), Presence::Required),
    field("url", FieldType::Text, Presence::Required),
    field("thumbnail", FieldType::Text, Presence::Optional),
    field("category", FieldType::Text, Presence::Required),
    field("title", FieldType::Text, Presence::Optional),
    field("description", FieldType::Text, Presence::Optional),
];

const VIDEO_ITEM_FIELDS: &[FieldSpec] = &[
    field("title", FieldType::Text, Presence::Required),
    field("url", FieldType::Text, Presence::Required),
    field("thumbnail", FieldType::Text, Presence::Optional),
];

const PHOTO_ITEM_FIELDS: &[FieldSpec] = &[
    field("title", FieldType::Text, Presence::Optional),
    field("url", FieldType::Text, Presence::Required),
];

const CONTACT_MESSAGE_FIELDS: &[FieldSpec] = &[
    field("name", FieldType::Text, Presence::Required),
    field("email", FieldType::Text, Presence::Required),
    field("phone", FieldType::Text, Presence::Optional),
    field("message", FieldType::Text, Presence::Required),
];

// =============================================================================
// Validation
// =============================================================================

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Problem {
    #[error("field required ({0})")]
    Missing(String),
    #[error("expected {0}")]
    WrongType(String),
    #[error("payload must be a JSON object")]
    NotAnObject,
}

/// A payload that does not fit its kind's field table.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind}.{field}: {problem}")]
pub struct ValidationError {
    pub kind: EntityKind,
    pub field: String,
    pub problem: Problem,
}

impl ValidationError {
    fn new(kind: EntityKind, field: &str, problem: Problem) -> Self {
        Self {
            kind,
            field: field.to_string(),
            problem,
        }
    }
}

fn as_object(kind: EntityKind, payload: &Value) -> Result<&Document, ValidationError> {
    match payload {
        Value::Object(map) => Ok(map),
        _ => Err(ValidationError::new(kind, "body", Problem::NotAnObject)),
    }
}

/// Validate a full payload for `kind`, producing the document to persist.
pub fn validate(kind: EntityKind, payload: &Value) -> Result<Document, ValidationError> {
    let input = as_object(kind, payload)?;
    let defaults = defaults(kind).unwrap_or_default();
    let mut document = Document::new();

    for spec in kind.fields() {
        let value = match input.get(spec.name) {
            None | Some(Value::Null) => match spec.presence {
                Presence::Required => {
                    return Err(ValidationError::new(
                        kind,
                        spec.name,
                        Problem::Missing(spec.ty.describe()),
                    ));
                }
                Presence::Optional => Value::Null,
                Presence::Defaulted => defaults.get(spec.name).cloned().unwrap_or(Value::Null),
            },
            Some(v) if spec.ty.accepts(v) => v.clone(),
            Some(_) => {
                return Err(ValidationError::new(
                    kind,
                    spec.name,
                    Problem::WrongType(spec.ty.describe()),
                ));
            }
        };
        document.insert(spec.name.to_string(), value);
    }

    Ok(document)
}

/// Validate a partial payload: only fields that are present and non-null are
/// type-checked and returned. Nothing is required.
pub fn validate_patch(kind: EntityKind, payload: &Value) -> Result<Document, ValidationError> {
    let input = as_object(kind, payload)?;
    let mut patch = Document::new();

    for spec in kind.fields() {
        match input.get(spec.name) {
            None | Some(Value::Null) => {}
            Some(v) if spec.ty.accepts(v) => {
                patch.insert(spec.name.to_string(), v.clone());
            }
            Some(_) => {
                return Err(ValidationError::new(
                    kind,
                    spec.name,
                    Problem::WrongType(spec.ty.describe()),
                ));
            }
        }
    }

    Ok(patch)
}

/// The structural default document for `kind`.
///
/// Only [`EntityKind::SiteContent`] has one; every other kind is built
/// entirely from caller-supplied fields.
pub fn defaults(kind: EntityKind) -> Option<Document> {
    match kind {
        EntityKind::SiteContent => to_document(&SiteContent::default()).ok(),
        _ => None,
    }
}

/// Serialize a typed entity into a document.
pub fn to_document<T: Serialize>(item: &T) -> Result<Document, serde_json::Error> {
    match serde_json::to_value(item)? {
        Value::Object(map) => Ok(map),
        other => Err(serde::ser::Error::custom(format!(
            "entity serialized to non-object JSON: {other}"
        ))),
    }
}

// =============================================================================
// Typed entities
// =============================================================================

/// A typed entity stored in its kind's collection.
pub trait Entity: Serialize + DeserializeOwned + Send + Sync + 'static {
    const KIND: EntityKind;

    /// Validate an inbound payload and decode it into `Self`.
    fn from_payload(payload: &Value) -> Result<Self, ValidationError> {
        let document = validate(Self::KIND, payload)?;
        serde_json::from_value(Value::Object(document)).map_err(|e| {
            ValidationError::new(Self::KIND, "body", Problem::WrongType(e.to_string()))
        })
    }
}

/// Global site copy and palette. The latest inserted document is current.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteContent {
    pub brand: String,
    /// Named palette entries, kept in the order they were written.
    pub colors: Map<String, Value>,
    pub hero_title: String,
    pub hero_cta: String,
    /// Display order is insertion order.
    pub about_paragraphs: Vec<String>,
}

impl Default for SiteContent {
    fn default() -> Self {
        let colors = [
            ("primary", "#00C2FF"),
            ("bg", "#0A0F19"),
            ("text", "#FFFFFF"),
            ("black", "#000000"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), Value::from(v)))
        .collect();

        Self {
            brand: "VDRONE".to_string(),
            colors,
            hero_title: "VDRONE – Explore the world from above".to_string(),
            hero_cta: "Explorează Portofoliul".to_string(),
            about_paragraphs: vec![
                "Filmări aeriene spectaculoase la rezoluții 4K/8K.".to_string(),
                "Fotografie profesională pentru imobiliare, evenimente și branduri.".to_string(),
                "Inspecții industriale, cartografiere și producție corporate.".to_string(),
            ],
        }
    }
}

impl Entity for SiteContent {
    const KIND: EntityKind = EntityKind::SiteContent;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceItem {
    pub title: String,
    pub description: String,
    /// Icon name understood by the frontend (e.g. `"Camera"`).
    pub icon: String,
}

impl Entity for ServiceItem {
    const KIND: EntityKind = EntityKind::ServiceItem;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Image,
    Video,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioItem {
    pub media_type: MediaType,
    pub url: String,
    #[serde(default)]
    pub thumbnail: Option<String>,
    pub category: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl Entity for PortfolioItem {
    const KIND: EntityKind = EntityKind::PortfolioItem;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoItem {
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub thumbnail: Option<String>,
}

impl Entity for VideoItem {
    const KIND: EntityKind = EntityKind::VideoItem;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhotoItem {
    #[serde(default)]
    pub title: Option<String>,
    pub url: String,
}

impl Entity for PhotoItem {
    const KIND: EntityKind = EntityKind::PhotoItem;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub message: String,
}

impl Entity for ContactMessage {
    const KIND: EntityKind = EntityKind::ContactMessage;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn collections_are_lowercase_kind_names() {
        for kind in EntityKind::ALL {
            assert_eq!(kind.collection(), kind.name().to_lowercase());
        }
    }

    #[test]
    fn only_contact_messages_are_private() {
        let private: Vec<_> = EntityKind::ALL
            .into_iter()
            .filter(|k| !k.is_public())
            .collect();
        assert_eq!(private, vec![EntityKind::ContactMessage]);
    }

    #[test]
    fn site_content_colors_keep_palette_order() {
        let value = serde_json::to_value(SiteContent::default()).unwrap();
        let keys: Vec<&str> = value["colors"]
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(keys, vec!["primary", "bg", "text", "black"]);
    }

    #[test]
    fn site_content_default_matches_brand_copy() {
        let content = SiteContent::default();
        assert_eq!(content.brand, "VDRONE");
        assert_eq!(content.hero_title, "VDRONE – Explore the world from above");
        assert_eq!(content.colors.len(), 4);
        for key in ["primary", "bg", "text", "black"] {
            assert!(content.colors.contains_key(key), "missing color {key}");
        }
        assert_eq!(content.about_paragraphs.len(), 3);
        assert!(content.about_paragraphs[0].starts_with("Filmări aeriene"));
        assert!(content.about_paragraphs[2].starts_with("Inspecții industriale"));
    }

    #[test]
    fn defaults_exist_only_for_site_content() {
        assert!(defaults(EntityKind::SiteContent).is_some());
        for kind in EntityKind::ALL
            .into_iter()
            .filter(|k| *k != EntityKind::SiteContent)
        {
            assert!(defaults(kind).is_none(), "{kind} should have no defaults");
        }
    }

    #[test]
    fn validate_accepts_complete_service() {
        let doc = validate(
            EntityKind::ServiceItem,
            &json!({"title": "Mapping", "description": "3D models", "icon": "Map"}),
        )
        .unwrap();
        assert_eq!(doc["title"], "Mapping");
        assert_eq!(doc.len(), 3);
    }

    #[test]
    fn validate_reports_missing_required_field() {
        let err = validate(
            EntityKind::ServiceItem,
            &json!({"title": "Mapping", "description": "3D models"}),
        )
        .unwrap_err();
        assert_eq!(err.field, "icon");
        assert_eq!(err.problem, Problem::Missing("string".into()));
    }

    #[test]
    fn validate_treats_null_required_as_missing() {
        let err = validate(
            EntityKind::VideoItem,
            &json!({"title": null, "url": "https://example.com/v.mp4"}),
        )
        .unwrap_err();
        assert_eq!(err.field, "title");
        assert!(matches!(err.problem, Problem::Missing(_)));
    }

    #[test]
    fn validate_reports_wrong_type() {
        let err = validate(EntityKind::PhotoItem, &json!({"url": 42})).unwrap_err();
        assert_eq!(err.field, "url");
        assert_eq!(err.problem, Problem::WrongType("string".into()));
        assert_eq!(err.to_string(), "PhotoItem.url: expected string");
    }

    #[test]
    fn validate_fills_optional_fields_with_null() {
        let doc = validate(
            EntityKind::PhotoItem,
            &json!({"url": "https://example.com/a.jpg"}),
        )
        .unwrap();
        assert_eq!(doc["title"], Value::Null);
    }

    #[test]
    fn validate_drops_unknown_fields() {
        let doc = validate(
            EntityKind::PhotoItem,
            &json!({"url": "https://example.com/a.jpg", "rating": 5}),
        )
        .unwrap();
        assert!(!doc.contains_key("rating"));
    }

    #[test]
    fn validate_restricts_media_type() {
        let err = validate(
            EntityKind::PortfolioItem,
            &json!({"media_type": "audio", "url": "u", "category": "Events"}),
        )
        .unwrap_err();
        assert_eq!(err.field, "media_type");
        assert_eq!(err.problem, Problem::WrongType("one of image|video".into()));
    }

    #[test]
    fn validate_rejects_non_object_payload() {
        let err = validate(EntityKind::ContactMessage, &json!(["a"])).unwrap_err();
        assert_eq!(err.problem, Problem::NotAnObject);
    }

    #[test]
    fn validate_site_content_fills_defaults() {
        let doc = validate(EntityKind::SiteContent, &json!({"brand": "Other"})).unwrap();
        assert_eq!(doc["brand"], "Other");
        assert_eq!(doc["hero_cta"], "Explorează Portofoliul");
        assert_eq!(doc["about_paragraphs"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn validate_site_content_rejects_non_string_colors() {
        let err = validate(EntityKind::SiteContent, &json!({"colors": {"primary": 1}}))
            .unwrap_err();
        assert_eq!(err.field, "colors");
    }

    #[test]
    fn patch_keeps_only_provided_fields() {
        let patch = validate_patch(
            EntityKind::SiteContent,
            &json!({"hero_cta": "X", "brand": null, "unknown": true}),
        )
        .unwrap();
        assert_eq!(patch.len(), 1);
        assert_eq!(patch["hero_cta"], "X");
    }

    #[test]
    fn patch_still_checks_types() {
        let err = validate_patch(EntityKind::SiteContent, &json!({"about_paragraphs": "one"}))
            .unwrap_err();
        assert_eq!(err.field, "about_paragraphs");
    }

    #[test]
    fn from_payload_decodes_typed_entity() {
        let item = PortfolioItem::from_payload(&json!({
            "media_type": "video",
            "url": "https://example.com/v.mp4",
            "category": "Events",
        }))
        .unwrap();
        assert_eq!(item.media_type, MediaType::Video);
        assert_eq!(item.thumbnail, None);
    }

    #[test]
    fn typed_entity_round_trips_through_document() {
        let item = ContactMessage {
            name: "Ana".into(),
            email: "ana@example.com".into(),
            phone: None,
            message: "Hello".into(),
        };
        let doc = to_document(&item).unwrap();
        assert_eq!(doc["phone"], Value::Null);
        assert_eq!(validate(EntityKind::ContactMessage, &Value::Object(doc.clone())).unwrap(), doc);
    }
}
