//! `UserRepositoryImpl`, the repository layer implementation.
//!
//! Implements the [`UserRepository`] domain interface on top of a
//! [`UserDao`]:
//!
//! ```text
//! Service
//!   ↓ Arc<dyn UserRepository>
//! UserRepositoryImpl
//!   ↓ Arc<dyn UserDao>
//! MySqlUserDaoImpl
//!   ↓
//! MySQL
//! ```
//!
//! [`UserRepository`]: crate::traits::UserRepository
//! [`UserDao`]: crate::dao::UserDao

use crate::{dao::UserDao, traits::UserRepository};
use async_trait::async_trait;
use roster_core::{RosterResult, User};
use shaku::Component;
use std::sync::Arc;
use tracing::{debug, warn};

/// Repository implementation that orchestrates [`UserDao`] access.
///
/// [`UserDao`]: crate::dao::UserDao
#[derive(Component)]
#[shaku(interface = UserRepository)]
pub struct UserRepositoryImpl {
    /// Primary data access object.
    #[shaku(inject)]
    user_dao: Arc<dyn UserDao>,
}

impl UserRepositoryImpl {
    /// Creates a new `UserRepositoryImpl` with the given DAO.
    #[must_use]
    pub fn new(user_dao: Arc<dyn UserDao>) -> Self {
        Self { user_dao }
    }
}

#[async_trait]
impl UserRepository for UserRepositoryImpl {
    async fn fetch_all(&self) -> RosterResult<Vec<User>> {
        debug!("Repository: fetch_all");
        match self.user_dao.fetch_all().await {
            Ok(users) => {
                debug!("Repository: fetch_all returned {} users", users.len());
                Ok(users)
            }
            Err(e) => {
                warn!("Repository: fetch_all failed: {}", e);
                Err(e)
            }
        }
    }
}

impl std::fmt::Debug for UserRepositoryImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserRepositoryImpl").finish_non_exhaustive()
    }
}
