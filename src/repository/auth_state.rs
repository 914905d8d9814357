use std::cell::RefCell;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use crate::domain::auth::AuthState;
use crate::repository::{RepositoryError, RepositoryResult};

impl From<serde_json::Error> for RepositoryError {
    fn from(value: serde_json::Error) -> Self {
        RepositoryError::Serialization(value.to_string())
    }
}

/// Storage for the single persisted authentication key.
pub trait AuthStateRepository {
    /// Load the stored state. `Ok(None)` when nothing has been stored yet.
    fn load_auth_state(&self) -> RepositoryResult<Option<AuthState>>;
    /// Overwrite the stored state.
    fn save_auth_state(&self, state: &AuthState) -> RepositoryResult<()>;
}

/// Keeps the auth key as a JSON document on disk.
#[derive(Debug, Clone)]
pub struct FileAuthStateRepository {
    path: PathBuf,
}

impl FileAuthStateRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl AuthStateRepository for FileAuthStateRepository {
    fn load_auth_state(&self) -> RepositoryResult<Option<AuthState>> {
        let serialized = match fs::read_to_string(&self.path) {
            Ok(serialized) => serialized,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        if serialized.trim().is_empty() {
            return Ok(None);
        }
        Ok(Some(serde_json::from_str(&serialized)?))
    }

    fn save_auth_state(&self, state: &AuthState) -> RepositoryResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string(state)?)?;
        Ok(())
    }
}

/// Volatile auth key, for tests and embedding without a filesystem.
#[derive(Debug, Default)]
pub struct InMemoryAuthStateRepository {
    serialized: RefCell<Option<String>>,
}

impl InMemoryAuthStateRepository {
    /// Start from a raw stored value, which need not be valid JSON.
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            serialized: RefCell::new(Some(raw.into())),
        }
    }
}

impl AuthStateRepository for InMemoryAuthStateRepository {
    fn load_auth_state(&self) -> RepositoryResult<Option<AuthState>> {
        match self.serialized.borrow().as_deref() {
            Some(serialized) => Ok(Some(serde_json::from_str(serialized)?)),
            None => Ok(None),
        }
    }

    fn save_auth_state(&self, state: &AuthState) -> RepositoryResult<()> {
        *self.serialized.borrow_mut() = Some(serde_json::to_string(state)?);
        Ok(())
    }
}
