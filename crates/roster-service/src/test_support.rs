//! Shared test doubles for the listing service and caches.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Local, TimeDelta, Utc};
use mockable::Clock;
use roster_core::{RosterError, RosterResult, User};
use roster_repository::UserRepository;

use crate::cache::CacheInterface;

pub struct MutableClock(Mutex<DateTime<Utc>>);

impl MutableClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self(Mutex::new(now))
    }

    pub fn advance_seconds(&self, seconds: i64) {
        *self.lock_clock() += TimeDelta::seconds(seconds);
    }

    fn lock_clock(&self) -> std::sync::MutexGuard<'_, DateTime<Utc>> {
        match self.0.lock() {
            Ok(guard) => guard,
            Err(_) => panic!("clock mutex"),
        }
    }
}

impl Clock for MutableClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.lock_clock()
    }
}

/// Repository double that counts reads.
pub struct FakeUserRepository {
    users: Option<Vec<User>>,
    delay: Option<Duration>,
    calls: AtomicUsize,
}

impl FakeUserRepository {
    pub fn with_users(users: Vec<User>) -> Self {
        Self {
            users: Some(users),
            delay: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            users: None,
            delay: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl UserRepository for FakeUserRepository {
    async fn fetch_all(&self) -> RosterResult<Vec<User>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.users
            .clone()
            .ok_or_else(|| RosterError::storage("connection refused"))
    }
}

/// Cache double whose every operation fails.
pub struct FailingCache;

#[async_trait]
impl CacheInterface for FailingCache {
    fn is_enabled(&self) -> bool {
        true
    }

    async fn get_raw(&self, _key: &str) -> RosterResult<Option<String>> {
        Err(RosterError::cache("cache unreachable"))
    }

    async fn set_raw(&self, _key: &str, _value: &str, _ttl: Duration) -> RosterResult<()> {
        Err(RosterError::cache("cache unreachable"))
    }

    async fn delete(&self, _key: &str) -> RosterResult<bool> {
        Err(RosterError::cache("cache unreachable"))
    }

    async fn exists(&self, _key: &str) -> RosterResult<bool> {
        Err(RosterError::cache("cache unreachable"))
    }
}
