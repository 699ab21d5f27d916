//! Service implementations.
//!
//! Trait definitions live in the parent module (e.g. `user_listing_service.rs`).

pub mod user_listing_service_impl;

pub use user_listing_service_impl::{
    UserListingServiceComponent, UserListingServiceComponentParameters, DEFAULT_TTL,
};
