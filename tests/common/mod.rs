//! Helpers for integration tests.

#![allow(dead_code)]

use pushkind_catalog::app::CatalogApp;
use pushkind_catalog::forms::auth::LoginForm;
use pushkind_catalog::models::config::CatalogConfig;
use pushkind_catalog::repository::auth_state::FileAuthStateRepository;
use tempfile::TempDir;

/// Route `log` output through the test harness.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Temporary directory holding the persisted auth key.
pub struct TestEnv {
    dir: TempDir,
}

impl TestEnv {
    pub fn new() -> Self {
        init_logging();
        TestEnv {
            dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    pub fn config(&self) -> CatalogConfig {
        CatalogConfig {
            auth_state_path: self.dir.path().join("state").join("auth-storage.json"),
            seed_demo_catalog: false,
            ..CatalogConfig::default()
        }
    }

    /// App with an empty store and the administrator signed in.
    pub fn signed_in_app(&self) -> CatalogApp<FileAuthStateRepository> {
        let mut app = CatalogApp::from_config(self.config());
        let logged_in = app
            .login(LoginForm {
                username: "admin".into(),
                password: "password123".into(),
            })
            .expect("login form should be valid");
        assert!(logged_in, "admin credentials should be accepted");
        app
    }
}
