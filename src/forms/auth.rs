use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginForm {
    #[validate(length(min = 1))]
    pub username: String,
    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginFormPayload {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Error)]
pub enum LoginFormError {
    #[error("Login form validation failed: {0}")]
    Validation(String),
}

impl From<ValidationErrors> for LoginFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl TryFrom<LoginForm> for LoginFormPayload {
    type Error = LoginFormError;

    fn try_from(value: LoginForm) -> Result<Self, Self::Error> {
        value.validate()?;
        Ok(Self {
            username: value.username.trim().to_string(),
            password: value.password,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_username_only() {
        let payload: LoginFormPayload = LoginForm {
            username: " admin ".into(),
            password: " secret ".into(),
        }
        .try_into()
        .unwrap();
        assert_eq!(payload.username, "admin");
        assert_eq!(payload.password, " secret ");
    }

    #[test]
    fn rejects_empty_password() {
        let result: Result<LoginFormPayload, _> = LoginForm {
            username: "admin".into(),
            password: String::new(),
        }
        .try_into();
        assert!(matches!(result, Err(LoginFormError::Validation(_))));
    }
}
