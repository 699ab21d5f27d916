//! User-related DTOs.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Transfer-safe view of a user.
///
/// This is also the shape stored in the listing cache, so a cache hit is
/// returned verbatim without touching the domain entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserView {
    /// Storage-assigned identifier.
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "Taro Yamada")]
    pub name: String,
    #[schema(example = "taro@example.com")]
    pub email: String,
    /// ISO-8601 UTC timestamp with millisecond precision, `null` when unverified.
    #[schema(example = "2024-01-15T10:30:00.000Z")]
    pub email_verified_at: Option<String>,
}

/// JSON envelope for the user listing.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserListResponse {
    pub data: Vec<UserView>,
}

impl From<Vec<UserView>> for UserListResponse {
    fn from(data: Vec<UserView>) -> Self {
        Self { data }
    }
}
