//! Integration tests for MySqlUserDaoImpl and UserRepositoryImpl.
//!
//! These tests run against a real MySQL database using testcontainers.
//! Requires Docker: `cargo test -p roster-repository -- --ignored`.

mod common;

use chrono::{TimeZone, Utc};
use roster_core::RosterError;
use roster_repository::{
    DatabasePool, DatabasePoolInterface, MySqlUserDaoImpl, UserDao, UserRepository, UserRepositoryImpl,
};
use common::TestDatabase;
use std::sync::Arc;

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_fetch_all_empty_table() {
    let db = TestDatabase::new().await;
    let dao = MySqlUserDaoImpl::new(db.pool());

    let users = dao.fetch_all().await.expect("Query failed");
    assert!(users.is_empty());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_fetch_all_newest_first() {
    let db = TestDatabase::new().await;
    db.insert_user("first", "first@example.com", None, "2024-01-01 09:00:00").await;
    db.insert_user("second", "second@example.com", Some("2024-01-15 10:30:00"), "2024-01-02 09:00:00")
        .await;
    db.insert_user("third", "third@example.com", None, "2024-01-03 09:00:00").await;

    let dao = MySqlUserDaoImpl::new(db.pool());
    let users = dao.fetch_all().await.expect("Query failed");

    let names: Vec<&str> = users.iter().map(|u| u.name()).collect();
    assert_eq!(names, vec!["third", "second", "first"]);

    let second = &users[1];
    assert_eq!(second.email(), "second@example.com");
    assert_eq!(
        second.email_verified_at(),
        Some(Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap())
    );
    assert!(users[0].email_verified_at().is_none());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_repository_over_dao() {
    let db = TestDatabase::new().await;
    db.insert_user("only", "only@example.com", None, "2024-02-01 00:00:00").await;

    let dao = Arc::new(MySqlUserDaoImpl::new(db.pool()));
    let repo = UserRepositoryImpl::new(dao);

    let users = repo.fetch_all().await.expect("Query failed");
    assert_eq!(users.len(), 1);
    assert!(users[0].id().value() > 0);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_closed_pool_is_storage_unavailable() {
    let db = TestDatabase::new().await;
    let pool = Arc::new(DatabasePool::with_pool(db.pool().inner().clone()));
    pool.close().await;

    let dao = MySqlUserDaoImpl::new(pool);
    let err = dao.fetch_all().await.unwrap_err();
    assert!(matches!(err, RosterError::StorageUnavailable(_)));
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_health_check() {
    let db = TestDatabase::new().await;
    db.pool().health_check().await.expect("Health check failed");
}
