pub mod auth;
pub mod errors;
pub mod import_export;
pub mod products;

pub use errors::{ServiceError, ServiceResult};
