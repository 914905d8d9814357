use thiserror::Error;

use crate::forms::import_export::ImportParseError;

/// Generic error type used by service layer functions.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ServiceError {
    /// No administrator is signed in.
    #[error("unauthorized")]
    Unauthorized,
    /// Requested resource was not found.
    #[error("not found")]
    NotFound,
    /// Submitted form failed validation.
    #[error("form error: {0}")]
    Form(String),
    /// A value violated a domain constraint.
    #[error("invalid value: {0}")]
    TypeConstraint(String),
    /// The uploaded import file was rejected as a whole.
    #[error("import failed: {0}")]
    Import(ImportParseError),
    /// An unexpected internal error occurred.
    #[error("internal error")]
    Internal,
}

/// Convenient alias for results returned from service functions.
pub type ServiceResult<T> = Result<T, ServiceError>;
