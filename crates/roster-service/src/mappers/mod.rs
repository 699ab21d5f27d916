//! Entity-DTO mappers.

use crate::dto::UserView;
use chrono::SecondsFormat;
use roster_core::User;

impl From<&User> for UserView {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().value(),
            name: user.name().to_string(),
            email: user.email().to_string(),
            email_verified_at: user
                .email_verified_at()
                .map(|at| at.to_rfc3339_opts(SecondsFormat::Millis, true)),
        }
    }
}

impl From<User> for UserView {
    fn from(user: User) -> Self {
        Self::from(&user)
    }
}

/// Projects users into views, keeping their order.
#[must_use]
pub fn to_views(users: &[User]) -> Vec<UserView> {
    users.iter().map(UserView::from).collect()
}
