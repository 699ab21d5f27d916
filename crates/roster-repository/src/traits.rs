//! Repository trait definitions.

use async_trait::async_trait;
use roster_core::{Interface, RosterResult, User};

/// User repository trait.
///
/// The read side of user storage as seen by the service layer.
#[async_trait]
pub trait UserRepository: Interface + Send + Sync {
    /// Returns every user, newest first by creation time.
    ///
    /// # Errors
    ///
    /// `StorageUnavailable` when the query cannot be run; `InvalidArgument`
    /// when a stored row does not form a valid user. Nothing is retried.
    async fn fetch_all(&self) -> RosterResult<Vec<User>>;
}
