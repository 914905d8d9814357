use serde::{Deserialize, Serialize};

/// Identity of the signed-in administrator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
}

/// Authentication flag plus user identity, persisted under a single key.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AuthState {
    pub user: Option<User>,
    pub is_authenticated: bool,
}

impl AuthState {
    /// State after a successful login.
    pub fn signed_in(user: User) -> Self {
        Self {
            user: Some(user),
            is_authenticated: true,
        }
    }

    /// The signed-in user, if any.
    pub fn current_user(&self) -> Option<&User> {
        if self.is_authenticated {
            self.user.as_ref()
        } else {
            None
        }
    }
}
