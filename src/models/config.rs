use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::store::CidCollisionPolicy;

/// Prefix of environment overrides, e.g. `CATALOG__ITEMS_PER_PAGE=20`.
pub const ENV_PREFIX: &str = "CATALOG";

/// Runtime options of the catalog admin core.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct CatalogConfig {
    /// Where the authentication key is persisted.
    pub auth_state_path: PathBuf,
    /// What to do when a generated CID is already taken.
    pub cid_collision_policy: CidCollisionPolicy,
    /// Start with the demo products instead of an empty store.
    pub seed_demo_catalog: bool,
    /// Page size used when a listing request does not give one.
    pub items_per_page: usize,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            auth_state_path: PathBuf::from("data/auth-storage.json"),
            cid_collision_policy: CidCollisionPolicy::Tolerate,
            seed_demo_catalog: true,
            items_per_page: 10,
        }
    }
}

impl CatalogConfig {
    /// Build the configuration from defaults, an optional YAML file and
    /// `CATALOG__*` environment variables, in increasing precedence.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let mut builder = Config::builder()
            .set_default(
                "auth_state_path",
                defaults.auth_state_path.to_string_lossy().into_owned(),
            )?
            .set_default("cid_collision_policy", "tolerate")?
            .set_default("seed_demo_catalog", defaults.seed_demo_catalog)?
            .set_default("items_per_page", defaults.items_per_page as u64)?;

        if let Some(path) = path {
            builder = builder.add_source(File::from(path).required(false));
        }

        builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    /// Load `.env` first, then [`CatalogConfig::load`].
    pub fn from_env(path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Err(e) = dotenvy::dotenv() {
            log::debug!("No .env file loaded: {e}");
        }
        Self::load(path)
    }
}
