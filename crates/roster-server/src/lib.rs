//! # Roster Server Library
//!
//! Dependency injection, startup utilities and the application runner
//! used by the `roster-server` binary.

pub mod app;
pub mod di;
pub mod startup;

pub use app::Application;
