//! Dependency injection module using Shaku.
//!
//! `RosterModule` wires the listing pipeline:
//! database pool → DAO → repository → listing service, with the cache
//! injected into the service. Runtime resources (the MySQL pool and the
//! chosen cache backend) are supplied as component overrides.

use deadpool_redis::Pool;
use roster_config::{CacheConfig, RedisConfig};
use roster_core::{RosterError, RosterResult};
use roster_repository::{
    DatabasePool, DatabasePoolInterface, MySqlUserDaoImpl, UserRepository, UserRepositoryImpl,
};
use roster_service::{
    CacheInterface, InMemoryCacheService, RedisCacheService, UserListingService,
    UserListingServiceComponent,
};
use shaku::{module, HasComponent};
use std::sync::Arc;
use tracing::info;

module! {
    pub RosterModule {
        components = [
            DatabasePool,
            MySqlUserDaoImpl,
            UserRepositoryImpl,
            RedisCacheService,
            UserListingServiceComponent,
        ],
        providers = [],
    }
}

/// Creates the Redis pool, or `None` when Redis is disabled.
pub fn create_redis_pool(config: &RedisConfig) -> RosterResult<Option<Arc<Pool>>> {
    if !config.enabled {
        info!("Redis disabled, using the in-process cache");
        return Ok(None);
    }

    let mut redis_cfg = deadpool_redis::Config::from_url(&config.url);
    redis_cfg.pool = Some(deadpool_redis::PoolConfig::new(config.pool_size as usize));

    let pool = redis_cfg
        .create_pool(Some(deadpool_redis::Runtime::Tokio1))
        .map_err(|e| RosterError::Cache(format!("Failed to create Redis pool: {}", e)))?;

    Ok(Some(Arc::new(pool)))
}

/// Builds the module around an already connected database pool.
pub fn build_roster_module(
    db_pool: &DatabasePool,
    redis_pool: Option<Arc<Pool>>,
    cache_config: &CacheConfig,
) -> Arc<RosterModule> {
    let cache: Box<dyn CacheInterface> = match redis_pool {
        Some(pool) => Box::new(RedisCacheService::new(pool)),
        None => Box::new(InMemoryCacheService::new()),
    };

    let module = RosterModule::builder()
        .with_component_override::<dyn DatabasePoolInterface>(Box::new(DatabasePool::with_pool(
            db_pool.inner().clone(),
        )))
        .with_component_override::<dyn CacheInterface>(cache)
        .with_component_parameters::<UserListingServiceComponent>(
            UserListingServiceComponent::parameters(cache_config.user_list_ttl(), cache_config.single_flight),
        )
        .build();

    info!(
        ttl_secs = cache_config.user_list_ttl_secs,
        single_flight = cache_config.single_flight,
        "Dependency graph built"
    );

    Arc::new(module)
}

/// Resolves the services the HTTP layer needs.
pub trait ServiceResolver {
    /// Resolves the user listing service.
    fn user_listing(&self) -> Arc<dyn UserListingService>;

    /// Resolves the injected cache.
    fn cache(&self) -> Arc<dyn CacheInterface>;

    /// Resolves the user repository.
    fn user_repository(&self) -> Arc<dyn UserRepository>;
}

impl ServiceResolver for RosterModule {
    fn user_listing(&self) -> Arc<dyn UserListingService> {
        self.resolve()
    }

    fn cache(&self) -> Arc<dyn CacheInterface> {
        self.resolve()
    }

    fn user_repository(&self) -> Arc<dyn UserRepository> {
        self.resolve()
    }
}
