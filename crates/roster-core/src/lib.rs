//! # Roster Core
//!
//! Core types, traits, and error definitions for Roster.
//! This crate provides the domain model (`UserId`, `User`) and the
//! foundational abstractions used across all layers.

pub mod domain;
pub mod error;
pub mod id;
pub mod result;
pub mod telemetry;
pub mod traits;

pub use domain::*;
pub use error::*;
pub use id::*;
pub use result::*;
pub use telemetry::*;
pub use traits::*;

// Re-export shaku for dependency injection
pub use shaku::Interface;
