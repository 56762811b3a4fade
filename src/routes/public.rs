//! Public endpoints: site reads and contact submission.
//!
//! Reads never fail. With the store down they serve defaults or empty lists.

use crate::document::DocumentId;
use crate::error::Result;
use crate::repository::Record;
use crate::schema::{PhotoItem, PortfolioItem, ServiceItem, VideoItem};
use crate::service::CurrentContent;
use crate::state::AppState;
use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

#[derive(Serialize)]
pub struct TestResponse {
    pub ok: bool,
    /// Whether a document store is connected.
    pub db: bool,
}

/// GET /test
pub async fn test(State(state): State<Arc<AppState>>) -> Json<TestResponse> {
    Json(TestResponse {
        ok: true,
        db: state.service.is_store_available(),
    })
}

/// GET /content
pub async fn content(State(state): State<Arc<AppState>>) -> Json<CurrentContent> {
    Json(state.service.get_content().await)
}

/// GET /services
pub async fn services(State(state): State<Arc<AppState>>) -> Json<Vec<Record<ServiceItem>>> {
    Json(state.service.list_services().await)
}

#[derive(Debug, Deserialize)]
pub struct PortfolioQuery {
    pub category: Option<String>,
}

/// GET /portfolio?category=
pub async fn portfolio(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PortfolioQuery>,
) -> Json<Vec<Record<PortfolioItem>>> {
    Json(state.service.list_portfolio(query.category.as_deref()).await)
}

/// GET /videos
pub async fn videos(State(state): State<Arc<AppState>>) -> Json<Vec<Record<VideoItem>>> {
    Json(state.service.list_videos().await)
}

/// GET /photos
pub async fn photos(State(state): State<Arc<AppState>>) -> Json<Vec<Record<PhotoItem>>> {
    Json(state.service.list_photos().await)
}

#[derive(Serialize)]
pub struct ContactResponse {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<DocumentId>,
}

/// POST /contact
///
/// Only a malformed or invalid payload is an error; storage trouble is not
/// the visitor's problem.
pub async fn contact(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<Value>, JsonRejection>,
) -> Result<Json<ContactResponse>> {
    let Json(payload) = payload?;
    let id = state.service.submit_contact(&payload).await?;
    Ok(Json(ContactResponse { ok: true, id }))
}
