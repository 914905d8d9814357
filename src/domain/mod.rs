//! Domain entities and value objects shared by every layer.

pub mod auth;
pub mod product;
pub mod types;
