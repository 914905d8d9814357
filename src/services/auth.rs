//! Session handling for the single demo administrator.

use crate::domain::auth::{AuthState, User};
use crate::forms::auth::LoginFormPayload;
use crate::repository::auth_state::AuthStateRepository;

use super::{ServiceError, ServiceResult};

pub const ADMIN_USERNAME: &str = "admin";
pub const ADMIN_PASSWORD: &str = "password123";

/// The only account the admin tool knows about.
pub fn admin_user() -> User {
    User {
        id: "1".to_string(),
        username: ADMIN_USERNAME.to_string(),
        email: "admin@example.com".to_string(),
    }
}

/// Return the signed-in user or fail with [`ServiceError::Unauthorized`].
pub fn check_session(session: &AuthState) -> ServiceResult<&User> {
    session.current_user().ok_or(ServiceError::Unauthorized)
}

/// Read the persisted session. Missing or unreadable state means logged out.
pub fn restore_session<A>(repo: &A) -> AuthState
where
    A: AuthStateRepository + ?Sized,
{
    match repo.load_auth_state() {
        Ok(Some(state)) => state,
        Ok(None) => AuthState::default(),
        Err(e) => {
            log::warn!("Discarding unreadable auth state: {e}");
            AuthState::default()
        }
    }
}

fn persist<A>(session: &AuthState, repo: &A)
where
    A: AuthStateRepository + ?Sized,
{
    if let Err(e) = repo.save_auth_state(session) {
        log::error!("Failed to persist auth state: {e}");
    }
}

/// Attempt to sign in. Returns `false` and leaves the session untouched when
/// the credentials do not match.
pub fn login<A>(payload: LoginFormPayload, session: &mut AuthState, repo: &A) -> bool
where
    A: AuthStateRepository + ?Sized,
{
    if payload.username != ADMIN_USERNAME || payload.password != ADMIN_PASSWORD {
        log::info!("Rejected login attempt for '{}'", payload.username);
        return false;
    }

    *session = AuthState::signed_in(admin_user());
    persist(session, repo);
    true
}

pub fn logout<A>(session: &mut AuthState, repo: &A)
where
    A: AuthStateRepository + ?Sized,
{
    *session = AuthState::default();
    persist(session, repo);
}
