//! Application wiring and serving.

use crate::di::{build_roster_module, create_redis_pool};
use crate::startup::{install_metrics_recorder, print_startup_info, shutdown_signal};
use roster_config::AppConfig;
use roster_core::{HealthCheck, RosterError, RosterResult};
use roster_repository::{create_pool, DatabasePoolInterface};
use roster_rest::{create_router, AppState, MetricsEndpoint};
use roster_service::RedisCacheService;
use roster_ssr::SsrEngine;
use std::sync::Arc;
use tracing::info;

/// Builds and runs the server for one configuration.
pub struct Application {
    config: AppConfig,
}

impl Application {
    /// Creates a new application.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// The configuration the application runs with.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Connects to storage, builds the router and serves until shutdown.
    pub async fn run(self) -> RosterResult<()> {
        let config = self.config;

        let db_pool = create_pool(&config.database).await?;
        if config.database.run_migrations {
            db_pool.run_migrations().await?;
        } else {
            info!("Skipping database migrations");
        }

        let redis_pool = create_redis_pool(&config.redis)?;
        let module = build_roster_module(&db_pool, redis_pool.clone(), &config.cache);

        let mut health_checks: Vec<Arc<dyn HealthCheck>> = vec![db_pool.clone()];
        if let Some(pool) = redis_pool {
            health_checks.push(Arc::new(RedisCacheService::new(pool)));
        }

        let ssr = SsrEngine::new(config.ssr.clone(), config.app.name.clone())?;
        let state = AppState::from_module(module.as_ref(), Arc::new(ssr), config.app.clone())
            .with_health_checks(health_checks);

        let metrics = if config.observability.metrics_enabled {
            Some(MetricsEndpoint {
                path: config.observability.metrics_path.clone(),
                handle: install_metrics_recorder()?,
            })
        } else {
            None
        };

        let router = create_router(state, &config.server, metrics);

        let addr = config.server.addr();
        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| RosterError::Internal(format!("Failed to bind {}: {}", addr, e)))?;

        info!("Starting HTTP server on http://{}", addr);
        print_startup_info(&config);

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| RosterError::Internal(format!("HTTP server error: {}", e)))?;

        db_pool.close().await;
        info!("Server shutdown complete");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_application_keeps_config() {
        let mut config = AppConfig::default();
        config.server.port = 9000;

        let app = Application::new(config);
        assert_eq!(app.config().server.port, 9000);
    }
}
