//! HTTP error mapping.

use crate::schema::Problem;
use crate::service::ServiceError;
use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error(transparent)]
    Service(#[from] ServiceError),

    /// Body missing, not JSON, or wrong content type.
    #[error("Invalid JSON body: {0}")]
    BadJson(String),
}

impl ServerError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServerError::Service(ServiceError::Validation(_)) => StatusCode::UNPROCESSABLE_ENTITY,
            ServerError::Service(ServiceError::Configuration(_) | ServiceError::Storage(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ServerError::BadJson(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl From<JsonRejection> for ServerError {
    fn from(rejection: JsonRejection) -> Self {
        ServerError::BadJson(rejection.body_text())
    }
}

/// JSON error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub status: u16,
    /// Offending field, for validation failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let field = match &self {
            ServerError::Service(ServiceError::Validation(e)) if e.problem != Problem::NotAnObject => {
                Some(e.field.clone())
            }
            _ => None,
        };
        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %self, "request failed");
        } else {
            tracing::debug!(status = status.as_u16(), error = %self, "request rejected");
        }

        let body = ErrorResponse {
            error: self.to_string(),
            status: status.as_u16(),
            field,
        };
        (status, Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, ServerError>;
