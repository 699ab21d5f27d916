//! Data Transfer Objects (DTOs).

mod user_dto;

pub use user_dto::*;
