//! Cache key generators for consistent key naming.

/// Prefix for all cache keys to namespace them.
const CACHE_PREFIX: &str = "roster:cache";

/// Logical name of the cached user listing.
pub const USERS_LIST: &str = "users_list";

/// Key under which the full user listing is cached.
#[must_use]
pub fn users_list() -> String {
    format!("{}:{}", CACHE_PREFIX, USERS_LIST)
}
