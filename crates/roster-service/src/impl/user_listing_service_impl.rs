//! User listing service implementation.

use crate::cache::{cache_keys, CacheExt, CacheInterface};
use crate::dto::UserView;
use crate::mappers::to_views;
use crate::metrics::ListingMetrics;
use crate::user_listing_service::UserListingService;
use async_trait::async_trait;
use roster_core::RosterResult;
use roster_repository::UserRepository;
use shaku::Component;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// Default lifetime of the cached listing (5 minutes).
pub const DEFAULT_TTL: Duration = Duration::from_secs(300);

/// User listing service component for Shaku DI.
///
/// With `single_flight` off, concurrent misses each read the store and the
/// last cache write wins. With it on, misses queue behind one async mutex
/// and re-check the cache once they hold it.
#[derive(Component)]
#[shaku(interface = UserListingService)]
pub struct UserListingServiceComponent {
    #[shaku(inject)]
    user_repository: Arc<dyn UserRepository>,
    #[shaku(inject)]
    cache: Arc<dyn CacheInterface>,
    #[shaku(default = DEFAULT_TTL)]
    ttl: Duration,
    single_flight: bool,
    refill_lock: Mutex<()>,
}

impl UserListingServiceComponent {
    /// Creates a service outside the DI container.
    #[must_use]
    pub fn new(
        user_repository: Arc<dyn UserRepository>,
        cache: Arc<dyn CacheInterface>,
        ttl: Duration,
    ) -> Self {
        Self {
            user_repository,
            cache,
            ttl,
            single_flight: false,
            refill_lock: Mutex::new(()),
        }
    }

    /// Serialises cache refills behind a single in-flight store read.
    #[must_use]
    pub fn with_single_flight(mut self, enabled: bool) -> Self {
        self.single_flight = enabled;
        self
    }

    /// Builds the DI parameters for this component.
    #[must_use]
    pub fn parameters(ttl: Duration, single_flight: bool) -> UserListingServiceComponentParameters {
        UserListingServiceComponentParameters {
            ttl,
            single_flight,
            refill_lock: Mutex::new(()),
        }
    }

    /// Reads the cached listing. Cache failures count as a miss.
    async fn cached(&self, key: &str) -> Option<Vec<UserView>> {
        match self.cache.get::<Vec<UserView>>(key).await {
            Ok(hit) => hit,
            Err(e) => {
                warn!("Ignoring unreadable user listing cache entry '{}': {}", key, e);
                ListingMetrics::cache_error("get");
                None
            }
        }
    }

    /// Reads the store, projects to views and populates the cache.
    async fn refill(&self, key: &str) -> RosterResult<Vec<UserView>> {
        let started = Instant::now();
        let result = self.user_repository.fetch_all().await;
        ListingMetrics::store_read(started.elapsed(), result.is_ok());

        let users = result?;
        let views = to_views(&users);

        if let Err(e) = self.cache.set(key, &views, self.ttl).await {
            warn!("Failed to cache user listing under '{}': {}", key, e);
            ListingMetrics::cache_error("set");
        } else {
            debug!("Cached {} users under '{}' for {:?}", views.len(), key, self.ttl);
        }

        Ok(views)
    }
}

#[async_trait]
impl UserListingService for UserListingServiceComponent {
    async fn list_users(&self) -> RosterResult<Vec<UserView>> {
        let key = cache_keys::users_list();

        if let Some(hit) = self.cached(&key).await {
            debug!("User listing cache hit ({} users)", hit.len());
            ListingMetrics::cache_hit();
            return Ok(hit);
        }

        ListingMetrics::cache_miss();

        if !self.single_flight {
            return self.refill(&key).await;
        }

        let _guard = self.refill_lock.lock().await;
        if let Some(hit) = self.cached(&key).await {
            debug!("User listing filled while waiting ({} users)", hit.len());
            return Ok(hit);
        }

        info!("Refilling user listing cache");
        self.refill(&key).await
    }
}

impl std::fmt::Debug for UserListingServiceComponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserListingServiceComponent")
            .field("ttl", &self.ttl)
            .field("single_flight", &self.single_flight)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::InMemoryCacheService;
    use crate::test_support::{FailingCache, FakeUserRepository, MutableClock};
    use chrono::{TimeZone, Utc};
    use roster_core::{RosterError, User};

    fn users_newest_first() -> Vec<User> {
        vec![
            User::from_primitives(3, "Third", "third@example.com", None).unwrap(),
            User::from_primitives(2, "Second", "second@example.com", Some("2024-01-15T10:30:00Z")).unwrap(),
            User::from_primitives(1, "First", "first@example.com", None).unwrap(),
        ]
    }

    struct Harness {
        repo: Arc<FakeUserRepository>,
        cache: Arc<InMemoryCacheService>,
        clock: Arc<MutableClock>,
        service: UserListingServiceComponent,
    }

    fn harness(repo: FakeUserRepository) -> Harness {
        let repo = Arc::new(repo);
        let clock = Arc::new(MutableClock::new(Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()));
        let cache = Arc::new(InMemoryCacheService::with_clock(clock.clone()));
        let service = UserListingServiceComponent::new(repo.clone(), cache.clone(), DEFAULT_TTL);
        Harness {
            repo,
            cache,
            clock,
            service,
        }
    }

    #[tokio::test]
    async fn test_second_call_within_ttl_is_served_from_cache() {
        let h = harness(FakeUserRepository::with_users(users_newest_first()));

        let first = h.service.list_users().await.unwrap();
        h.clock.advance_seconds(299);
        let second = h.service.list_users().await.unwrap();

        assert_eq!(first, second);
        assert_eq!(h.repo.calls(), 1);
    }

    #[tokio::test]
    async fn test_expired_listing_is_rebuilt_once() {
        let h = harness(FakeUserRepository::with_users(users_newest_first()));

        h.service.list_users().await.unwrap();
        h.clock.advance_seconds(301);
        h.service.list_users().await.unwrap();
        assert_eq!(h.repo.calls(), 2);

        h.service.list_users().await.unwrap();
        assert_eq!(h.repo.calls(), 2);
        assert!(h.cache.exists(&cache_keys::users_list()).await.unwrap());
    }

    #[tokio::test]
    async fn test_newest_first_order_is_preserved() {
        let h = harness(FakeUserRepository::with_users(users_newest_first()));

        let names: Vec<String> = h
            .service
            .list_users()
            .await
            .unwrap()
            .into_iter()
            .map(|v| v.name)
            .collect();
        assert_eq!(names, vec!["Third", "Second", "First"]);

        let cached: Vec<String> = h
            .service
            .list_users()
            .await
            .unwrap()
            .into_iter()
            .map(|v| v.name)
            .collect();
        assert_eq!(cached, names);
    }

    #[tokio::test]
    async fn test_views_carry_iso_timestamps() {
        let h = harness(FakeUserRepository::with_users(users_newest_first()));

        let views = h.service.list_users().await.unwrap();
        assert_eq!(views[1].email_verified_at.as_deref(), Some("2024-01-15T10:30:00.000Z"));
        assert!(views[0].email_verified_at.is_none());
    }

    #[tokio::test]
    async fn test_empty_store_is_an_empty_listing() {
        let h = harness(FakeUserRepository::with_users(Vec::new()));

        assert!(h.service.list_users().await.unwrap().is_empty());
        assert!(h.service.list_users().await.unwrap().is_empty());
        assert_eq!(h.repo.calls(), 1);
    }

    #[tokio::test]
    async fn test_store_failure_propagates_and_leaves_cache_empty() {
        let h = harness(FakeUserRepository::failing());

        let err = h.service.list_users().await.unwrap_err();
        assert!(matches!(err, RosterError::StorageUnavailable(_)));
        assert!(!h.cache.exists(&cache_keys::users_list()).await.unwrap());
        assert!(h.cache.is_empty());

        h.service.list_users().await.unwrap_err();
        assert_eq!(h.repo.calls(), 2);
    }

    #[tokio::test]
    async fn test_cached_listing_is_returned_verbatim() {
        let h = harness(FakeUserRepository::with_users(users_newest_first()));
        let seeded = vec![UserView {
            id: 42,
            name: "Cached".to_string(),
            email: "cached@example.com".to_string(),
            email_verified_at: None,
        }];
        h.cache
            .set(&cache_keys::users_list(), &seeded, DEFAULT_TTL)
            .await
            .unwrap();

        assert_eq!(h.service.list_users().await.unwrap(), seeded);
        assert_eq!(h.repo.calls(), 0);
    }

    #[tokio::test]
    async fn test_corrupt_cache_entry_is_treated_as_miss() {
        let h = harness(FakeUserRepository::with_users(users_newest_first()));
        h.cache
            .set_raw(&cache_keys::users_list(), "not json", DEFAULT_TTL)
            .await
            .unwrap();

        let views = h.service.list_users().await.unwrap();
        assert_eq!(views.len(), 3);
        assert_eq!(h.repo.calls(), 1);

        h.service.list_users().await.unwrap();
        assert_eq!(h.repo.calls(), 1);
    }

    #[tokio::test]
    async fn test_failing_cache_falls_back_to_store() {
        let repo = Arc::new(FakeUserRepository::with_users(users_newest_first()));
        let service = UserListingServiceComponent::new(repo.clone(), Arc::new(FailingCache), DEFAULT_TTL);

        assert_eq!(service.list_users().await.unwrap().len(), 3);
        assert_eq!(service.list_users().await.unwrap().len(), 3);
        assert_eq!(repo.calls(), 2);
    }

    #[tokio::test]
    async fn test_configured_ttl_is_honoured() {
        let repo = Arc::new(FakeUserRepository::with_users(users_newest_first()));
        let clock = Arc::new(MutableClock::new(Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()));
        let cache = Arc::new(InMemoryCacheService::with_clock(clock.clone()));
        let service = UserListingServiceComponent::new(repo.clone(), cache, Duration::from_secs(10));

        service.list_users().await.unwrap();
        clock.advance_seconds(9);
        service.list_users().await.unwrap();
        assert_eq!(repo.calls(), 1);

        clock.advance_seconds(1);
        service.list_users().await.unwrap();
        assert_eq!(repo.calls(), 2);
    }

    #[tokio::test]
    async fn test_single_flight_reads_store_once_for_concurrent_misses() {
        let repo = Arc::new(
            FakeUserRepository::with_users(users_newest_first()).with_delay(Duration::from_millis(50)),
        );
        let cache = Arc::new(InMemoryCacheService::new());
        let service = UserListingServiceComponent::new(repo.clone(), cache, DEFAULT_TTL).with_single_flight(true);

        let results = futures::future::join_all((0..8).map(|_| service.list_users())).await;

        assert!(results.iter().all(|r| r.as_ref().map(Vec::len).ok() == Some(3)));
        assert_eq!(repo.calls(), 1);
    }

    #[tokio::test]
    async fn test_without_single_flight_concurrent_misses_each_read_store() {
        let repo = Arc::new(
            FakeUserRepository::with_users(users_newest_first()).with_delay(Duration::from_millis(50)),
        );
        let cache = Arc::new(InMemoryCacheService::new());
        let service = UserListingServiceComponent::new(repo.clone(), cache, DEFAULT_TTL);

        let results = futures::future::join_all((0..4).map(|_| service.list_users())).await;

        assert!(results.iter().all(Result::is_ok));
        assert_eq!(repo.calls(), 4);
    }

    #[test]
    fn test_parameters() {
        let params = UserListingServiceComponent::parameters(Duration::from_secs(60), true);
        assert_eq!(params.ttl, Duration::from_secs(60));
        assert!(params.single_flight);
    }
}
