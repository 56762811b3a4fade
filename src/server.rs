//! Server assembly: store connection, startup seeding, and the HTTP listener.

use crate::config::CmsConfig;
use crate::routes;
use crate::seed::{self, SeedReport};
use crate::service::ContentService;
use crate::state::AppState;
use crate::store::Store;
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

/// VDRONE CMS HTTP server
pub struct CmsServer {
    state: Arc<AppState>,
    router: Router,
    listen_addr: SocketAddr,
}

impl CmsServer {
    /// Connect the store and, if configured, seed empty collections.
    ///
    /// Never fails on store trouble; the server starts degraded instead.
    pub async fn new(config: &CmsConfig) -> Self {
        let store =
            Store::connect(config.store.url.as_deref(), &config.store.database_name).await;
        if config.server.seed_on_start {
            log_seed_report(&seed::seed_all(&store).await);
        }
        Self::with_store(store, config)
    }

    /// Build a server around an existing store without seeding.
    pub fn with_store(store: Store, config: &CmsConfig) -> Self {
        let state = Arc::new(AppState::new(
            ContentService::new(store),
            config.server.cors,
        ));
        let router = routes::build_router(state.clone());
        Self {
            state,
            router,
            listen_addr: config.server.listen_addr,
        }
    }

    pub fn state(&self) -> &Arc<AppState> {
        &self.state
    }

    /// Get the router for testing
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Serve until ctrl-c.
    pub async fn run(self) -> std::io::Result<()> {
        let listener = TcpListener::bind(self.listen_addr).await?;
        info!(
            addr = %listener.local_addr()?,
            backend = self.state.service.store().backend_name(),
            cors = self.state.cors,
            "VDRONE CMS listening"
        );
        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}

fn log_seed_report(report: &SeedReport) {
    for (kind, outcome) in &report.entries {
        info!(collection = kind.collection(), outcome = %outcome, "seed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::EntityKind;

    fn memory_config() -> CmsConfig {
        let mut config = CmsConfig::defaults().unwrap();
        config.store.url = Some("memory".into());
        config
    }

    #[tokio::test]
    async fn new_seeds_when_enabled() {
        let server = CmsServer::new(&memory_config()).await;
        let store = server.state().service.store();
        assert!(store.is_available());
        assert_eq!(
            store.count(EntityKind::ServiceItem.collection()).await.unwrap(),
            6
        );
    }

    #[tokio::test]
    async fn new_skips_seeding_when_disabled() {
        let mut config = memory_config();
        config.server.seed_on_start = false;
        let server = CmsServer::new(&config).await;
        let store = server.state().service.store();
        assert_eq!(
            store.count(EntityKind::ServiceItem.collection()).await.unwrap(),
            0
        );
    }

    #[tokio::test]
    async fn new_without_url_is_degraded() {
        let config = CmsConfig::defaults().unwrap();
        let server = CmsServer::new(&config).await;
        assert!(!server.state().service.is_store_available());
    }

    #[test]
    fn with_store_carries_cors_flag() {
        let mut config = CmsConfig::defaults().unwrap();
        config.server.cors = false;
        let server = CmsServer::with_store(Store::unavailable(), &config);
        assert!(!server.state().cors);
    }
}
