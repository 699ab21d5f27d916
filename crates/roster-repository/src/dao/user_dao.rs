//! UserDao trait, the low-level user data access abstraction.
//!
//! Implementations talk to a single data source. [`UserRepository`] sits on
//! top and is what the service layer depends on.
//!
//! [`UserRepository`]: crate::traits::UserRepository

use async_trait::async_trait;
use roster_core::{Interface, RosterResult, User};

/// Low-level user data access object.
#[async_trait]
pub trait UserDao: Interface + Send + Sync {
    /// Reads every user, most recently created first.
    ///
    /// Rows sharing a creation time come back in whatever order the engine
    /// produces.
    async fn fetch_all(&self) -> RosterResult<Vec<User>>;
}
