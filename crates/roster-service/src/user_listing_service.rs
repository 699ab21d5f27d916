//! User listing service trait definition.

use crate::dto::UserView;
use async_trait::async_trait;
use roster_core::{Interface, RosterResult};

/// Read-through cached listing of all users.
#[async_trait]
pub trait UserListingService: Interface + Send + Sync {
    /// Lists every user, newest first.
    ///
    /// Served from the cache while the cached listing is live. On a miss the
    /// store is read, the result cached for the configured TTL and returned.
    /// Store failures propagate and leave the cache untouched.
    async fn list_users(&self) -> RosterResult<Vec<UserView>>;
}
