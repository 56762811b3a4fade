//! Admin endpoints: content update and collection inserts.

use crate::document::DocumentId;
use crate::error::Result;
use crate::state::AppState;
use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

type Payload = std::result::Result<Json<Value>, JsonRejection>;

#[derive(Serialize)]
pub struct OkResponse {
    pub ok: bool,
}

#[derive(Serialize)]
pub struct CreatedResponse {
    pub ok: bool,
    pub id: DocumentId,
}

/// POST /admin/content
///
/// Appends a merged copy of the current content. Answers `{ok: true}` even
/// when no store is connected.
pub async fn update_content(
    State(state): State<Arc<AppState>>,
    payload: Payload,
) -> Result<Json<OkResponse>> {
    let Json(payload) = payload?;
    state.service.update_content(&payload).await?;
    Ok(Json(OkResponse { ok: true }))
}

/// POST /admin/services
pub async fn add_service(
    State(state): State<Arc<AppState>>,
    payload: Payload,
) -> Result<Json<CreatedResponse>> {
    let Json(payload) = payload?;
    let id = state.service.create_service(&payload).await?;
    Ok(created(id))
}

/// POST /admin/portfolio
pub async fn add_portfolio(
    State(state): State<Arc<AppState>>,
    payload: Payload,
) -> Result<Json<CreatedResponse>> {
    let Json(payload) = payload?;
    let id = state.service.create_portfolio_item(&payload).await?;
    Ok(created(id))
}

/// POST /admin/video
pub async fn add_video(
    State(state): State<Arc<AppState>>,
    payload: Payload,
) -> Result<Json<CreatedResponse>> {
    let Json(payload) = payload?;
    let id = state.service.create_video(&payload).await?;
    Ok(created(id))
}

/// POST /admin/photo
pub async fn add_photo(
    State(state): State<Arc<AppState>>,
    payload: Payload,
) -> Result<Json<CreatedResponse>> {
    let Json(payload) = payload?;
    let id = state.service.create_photo(&payload).await?;
    Ok(created(id))
}

fn created(id: DocumentId) -> Json<CreatedResponse> {
    tracing::info!(id = %id, "document created");
    Json(CreatedResponse { ok: true, id })
}
