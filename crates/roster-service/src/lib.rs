//! # Roster Service
//!
//! Service layer for Roster: the read-through cached user listing, the
//! cache backends it runs on and the transfer objects it hands out.

pub mod cache;
pub mod dto;
pub mod r#impl;
pub mod mappers;
pub mod metrics;
pub mod user_listing_service;

#[cfg(test)]
pub(crate) mod test_support;

pub use cache::*;
pub use dto::*;
pub use r#impl::*;
pub use user_listing_service::*;
