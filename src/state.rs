//! Shared application state handed to every handler.

use crate::service::ContentService;

#[derive(Debug)]
pub struct AppState {
    pub service: ContentService,
    /// Whether to attach the permissive CORS layer.
    pub cors: bool,
}

impl AppState {
    pub fn new(service: ContentService, cors: bool) -> Self {
        Self { service, cors }
    }
}
