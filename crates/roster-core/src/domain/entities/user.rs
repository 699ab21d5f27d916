//! User entity.

use crate::{Entity, RosterError, RosterResult, UserId};
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Serialize;

/// Naive layouts accepted in addition to RFC 3339. Values are taken as UTC.
const NAIVE_TIMESTAMP_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

/// A registered user as read from storage.
///
/// Users are immutable once constructed; every field is exposed through an
/// accessor and the serialized form is the plain-data projection
/// `{id, name, email, email_verified_at}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    id: UserId,
    name: String,
    email: String,
    email_verified_at: Option<DateTime<Utc>>,
}

impl User {
    /// Creates a user from already validated parts.
    #[must_use]
    pub fn new(
        id: UserId,
        name: impl Into<String>,
        email: impl Into<String>,
        email_verified_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
            email_verified_at,
        }
    }

    /// Builds a user from raw primitive values.
    ///
    /// `email_verified_at` may be RFC 3339 or the SQL `YYYY-MM-DD HH:MM:SS`
    /// layout; an empty string is treated as absent.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` for a non-positive id and `InvalidTimestamp`
    /// when the timestamp cannot be parsed.
    pub fn from_primitives(
        id: i64,
        name: impl Into<String>,
        email: impl Into<String>,
        email_verified_at: Option<&str>,
    ) -> RosterResult<Self> {
        let id = UserId::new(id)?;
        let email_verified_at = match email_verified_at.map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(parse_timestamp(raw)?),
        };
        Ok(Self::new(id, name, email, email_verified_at))
    }

    /// Returns the user id.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the email address.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Returns when the email address was verified, if it was.
    #[must_use]
    pub const fn email_verified_at(&self) -> Option<DateTime<Utc>> {
        self.email_verified_at
    }

    /// Checks whether the email address has been verified.
    #[must_use]
    pub const fn is_verified(&self) -> bool {
        self.email_verified_at.is_some()
    }
}

impl Entity<UserId> for User {
    fn id(&self) -> &UserId {
        &self.id
    }
}

fn parse_timestamp(raw: &str) -> RosterResult<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Ok(parsed.with_timezone(&Utc));
    }

    let mut last_error = None;
    for format in NAIVE_TIMESTAMP_FORMATS {
        match NaiveDateTime::parse_from_str(raw, format) {
            Ok(naive) => return Ok(naive.and_utc()),
            Err(e) => last_error = Some(e),
        }
    }

    Err(RosterError::invalid_timestamp(
        raw,
        last_error.map_or_else(|| "unrecognised layout".to_string(), |e| e.to_string()),
    ))
}
