//! # Roster Config
//!
//! Configuration management for Roster.
//! Supports layered configuration from files, environment variables,
//! validation and runtime refresh.

mod app_config;
mod loader;
mod validation;

pub use app_config::*;
pub use loader::*;
pub use validation::*;
