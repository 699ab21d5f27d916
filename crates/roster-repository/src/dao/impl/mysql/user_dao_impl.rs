//! MySQL implementation of [`UserDao`].
//!
//! [`UserDao`]: crate::dao::UserDao

use crate::{dao::UserDao, DatabasePoolInterface};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use roster_core::{RosterError, RosterResult, User, UserId};
use shaku::Component;
use sqlx::FromRow;
use std::sync::Arc;
use tracing::debug;

/// MySQL-backed user DAO.
#[derive(Component)]
#[shaku(interface = UserDao)]
pub struct MySqlUserDaoImpl {
    #[shaku(inject)]
    pool: Arc<dyn DatabasePoolInterface>,
}

impl MySqlUserDaoImpl {
    /// Creates a new DAO over the given pool.
    #[must_use]
    pub fn new(pool: Arc<dyn DatabasePoolInterface>) -> Self {
        Self { pool }
    }
}

/// Database row representation of a user.
#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    /// `BIGINT UNSIGNED` primary key.
    pub id: u64,
    pub name: String,
    pub email: String,
    pub email_verified_at: Option<DateTime<Utc>>,
}

impl TryFrom<UserRow> for User {
    type Error = RosterError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let id = i64::try_from(row.id)
            .map_err(|_| RosterError::invalid_argument(format!("user id {} is out of range", row.id)))
            .and_then(UserId::new)?;

        Ok(User::new(id, row.name, row.email, row.email_verified_at))
    }
}

#[async_trait]
impl UserDao for MySqlUserDaoImpl {
    async fn fetch_all(&self) -> RosterResult<Vec<User>> {
        let rows = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, name, email, email_verified_at
            FROM users
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(self.pool.inner())
        .await?;

        debug!("DAO: fetched {} user rows", rows.len());

        rows.into_iter().map(User::try_from).collect()
    }
}

impl std::fmt::Debug for MySqlUserDaoImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MySqlUserDaoImpl").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn row(id: u64, verified: Option<DateTime<Utc>>) -> UserRow {
        UserRow {
            id,
            name: "Alice".to_string(),
            email: "alice@example.com".to_string(),
            email_verified_at: verified,
        }
    }

    #[test]
    fn test_row_to_user() {
        let verified = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();
        let user = User::try_from(row(7, Some(verified))).unwrap();

        assert_eq!(user.id().value(), 7);
        assert_eq!(user.name(), "Alice");
        assert_eq!(user.email(), "alice@example.com");
        assert_eq!(user.email_verified_at(), Some(verified));
    }

    #[test]
    fn test_row_without_verification() {
        let user = User::try_from(row(1, None)).unwrap();
        assert!(user.email_verified_at().is_none());
    }

    #[test]
    fn test_row_with_zero_id_fails() {
        let err = User::try_from(row(0, None)).unwrap_err();
        assert!(matches!(err, RosterError::InvalidArgument(_)));
    }

    #[test]
    fn test_row_with_oversized_id_fails() {
        let err = User::try_from(row(u64::MAX, None)).unwrap_err();
        assert!(matches!(err, RosterError::InvalidArgument(ref msg) if msg.contains("out of range")));
    }
}
