//! Application state for Axum handlers.

use roster_config::AppMetadata;
use roster_core::HealthCheck;
use roster_service::UserListingService;
use roster_ssr::SsrEngine;
use shaku::{HasComponent, Module};
use std::sync::Arc;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub user_listing: Arc<dyn UserListingService>,
    pub ssr: Arc<SsrEngine>,
    pub app: Arc<AppMetadata>,
    pub health_checks: Arc<Vec<Arc<dyn HealthCheck>>>,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(
        user_listing: Arc<dyn UserListingService>,
        ssr: Arc<SsrEngine>,
        app: AppMetadata,
    ) -> Self {
        Self {
            user_listing,
            ssr,
            app: Arc::new(app),
            health_checks: Arc::new(Vec::new()),
        }
    }

    /// Creates the state by resolving services from a Shaku module.
    pub fn from_module<M>(module: &M, ssr: Arc<SsrEngine>, app: AppMetadata) -> Self
    where
        M: Module + HasComponent<dyn UserListingService>,
    {
        Self::new(module.resolve(), ssr, app)
    }

    /// Sets the components probed by the readiness endpoint.
    #[must_use]
    pub fn with_health_checks(mut self, checks: Vec<Arc<dyn HealthCheck>>) -> Self {
        self.health_checks = Arc::new(checks);
        self
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("app", &self.app.name)
            .field("ssr", &self.ssr)
            .field("health_checks", &self.health_checks.len())
            .finish_non_exhaustive()
    }
}
