//! Error conversion glue between the form, domain and service layers.
//!
//! Form and domain modules stay free of service error types; the conversions
//! live here so `?` works at the application root.

use crate::domain::types::TypeConstraintError;
use crate::forms::auth::LoginFormError;
use crate::forms::import_export::ImportParseError;
use crate::forms::products::{AddProductFormError, EditProductFormError};
use crate::services::ServiceError;

impl From<TypeConstraintError> for ServiceError {
    fn from(val: TypeConstraintError) -> Self {
        ServiceError::TypeConstraint(val.to_string())
    }
}

impl From<AddProductFormError> for ServiceError {
    fn from(val: AddProductFormError) -> Self {
        ServiceError::Form(val.to_string())
    }
}

impl From<EditProductFormError> for ServiceError {
    fn from(val: EditProductFormError) -> Self {
        ServiceError::Form(val.to_string())
    }
}

impl From<LoginFormError> for ServiceError {
    fn from(val: LoginFormError) -> Self {
        ServiceError::Form(val.to_string())
    }
}

impl From<ImportParseError> for ServiceError {
    fn from(val: ImportParseError) -> Self {
        ServiceError::Import(val)
    }
}
