//! # Roster REST
//!
//! HTTP layer using Axum for Roster.
//! Serves the JSON user listing, the HTML pages, health checks and the
//! OpenAPI document.

pub mod controllers;
pub mod middleware;
pub mod openapi;
pub mod responses;
pub mod router;
pub mod state;

pub use router::*;
pub use state::*;
