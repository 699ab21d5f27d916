//! # Roster SSR
//!
//! Server-side HTML rendering for Roster.
//!
//! Pages are compiled askama templates under `templates/`. The engine owns
//! the display timezone and turns [`UserView`]s into table rows.

mod pages;

use chrono::{DateTime, FixedOffset};
use pages::{ErrorPage, UserListPage, UserRow, WelcomePage};
use roster_config::SsrConfig;
use roster_core::{RosterError, RosterResult};
use roster_service::UserView;
use tracing::debug;

/// Display format for verification timestamps.
pub const DISPLAY_DATETIME_FORMAT: &str = "%Y/%m/%d %H:%M";

/// Placeholder shown for users without a verified email.
pub const UNVERIFIED_LABEL: &str = "未認証";

/// Renders the HTML pages.
pub struct SsrEngine {
    config: SsrConfig,
    app_name: String,
    offset: FixedOffset,
}

impl SsrEngine {
    /// Creates a new SSR engine.
    ///
    /// Fails with a configuration error when the display offset is not a
    /// valid UTC offset.
    pub fn new(config: SsrConfig, app_name: impl Into<String>) -> RosterResult<Self> {
        let offset = FixedOffset::east_opt(config.display_utc_offset_minutes * 60).ok_or_else(|| {
            RosterError::Configuration(format!(
                "Invalid display UTC offset: {} minutes",
                config.display_utc_offset_minutes
            ))
        })?;

        Ok(Self {
            config,
            app_name: app_name.into(),
            offset,
        })
    }

    /// Checks if SSR is enabled.
    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    /// Renders the user table page.
    pub fn render_user_list(&self, users: &[UserView]) -> RosterResult<String> {
        self.ensure_enabled()?;

        let rows = users
            .iter()
            .map(|user| {
                Ok(UserRow {
                    id: user.id,
                    name: &user.name,
                    email: &user.email,
                    verified_at: self.display_verified_at(user.email_verified_at.as_deref())?,
                })
            })
            .collect::<RosterResult<Vec<_>>>()?;

        debug!("Rendering user list page with {} rows", rows.len());
        render(&UserListPage {
            app_name: &self.app_name,
            rows,
        })
    }

    /// Renders the landing page.
    pub fn render_welcome(&self, version: &str) -> RosterResult<String> {
        self.ensure_enabled()?;
        render(&WelcomePage {
            app_name: &self.app_name,
            version,
        })
    }

    /// Renders an error page. Works even when SSR is disabled.
    pub fn render_error(&self, status: u16, message: &str) -> RosterResult<String> {
        render(&ErrorPage {
            app_name: &self.app_name,
            status,
            message,
        })
    }

    /// Formats an ISO-8601 timestamp for display, or the unverified label.
    pub fn display_verified_at(&self, value: Option<&str>) -> RosterResult<String> {
        let Some(value) = value else {
            return Ok(UNVERIFIED_LABEL.to_string());
        };

        let parsed = DateTime::parse_from_rfc3339(value).map_err(|e| {
            RosterError::Rendering(format!("Unparseable verification timestamp '{}': {}", value, e))
        })?;

        Ok(parsed
            .with_timezone(&self.offset)
            .format(DISPLAY_DATETIME_FORMAT)
            .to_string())
    }

    fn ensure_enabled(&self) -> RosterResult<()> {
        if self.config.enabled {
            Ok(())
        } else {
            Err(RosterError::Rendering("SSR is disabled".to_string()))
        }
    }
}

fn render<T: askama::Template>(page: &T) -> RosterResult<String> {
    page.render()
        .map_err(|e| RosterError::Rendering(format!("Template rendering failed: {}", e)))
}

impl std::fmt::Debug for SsrEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SsrEngine")
            .field("enabled", &self.config.enabled)
            .field("offset", &self.offset)
            .finish()
    }
}
