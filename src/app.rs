//! Application root owning the store, the session and the import channel.

use std::sync::mpsc::{Receiver, Sender};

use chrono::Utc;

use crate::domain::auth::AuthState;
use crate::domain::product::Product;
use crate::domain::types::ProductId;
use crate::dto::products::ProductPage;
use crate::events::{ProductCreated, product_created_channel};
use crate::forms::auth::{LoginForm, LoginFormPayload};
use crate::forms::products::{
    AddProductForm, AddProductFormPayload, EditProductForm, EditProductFormPayload,
};
use crate::models::config::CatalogConfig;
use crate::repository::ProductListQuery;
use crate::repository::auth_state::{AuthStateRepository, FileAuthStateRepository};
use crate::services::import_export::{self, ImportOutcome};
use crate::services::{ServiceError, ServiceResult, auth, products};
use crate::store::ProductStore;
use crate::store::seed::demo_catalog;

pub struct CatalogApp<A: AuthStateRepository> {
    config: CatalogConfig,
    store: ProductStore,
    session: AuthState,
    auth_repo: A,
    created_tx: Sender<ProductCreated>,
    created_rx: Receiver<ProductCreated>,
}

impl CatalogApp<FileAuthStateRepository> {
    /// Persist the session at `config.auth_state_path`.
    pub fn from_config(config: CatalogConfig) -> Self {
        let auth_repo = FileAuthStateRepository::new(config.auth_state_path.clone());
        Self::new(config, auth_repo)
    }
}

impl<A: AuthStateRepository> CatalogApp<A> {
    pub fn new(config: CatalogConfig, auth_repo: A) -> Self {
        let store = ProductStore::new().with_cid_policy(config.cid_collision_policy);
        Self::with_store(config, auth_repo, store)
    }

    /// Use a preconfigured store, e.g. with a fixed clock or seed.
    pub fn with_store(config: CatalogConfig, auth_repo: A, mut store: ProductStore) -> Self {
        if config.seed_demo_catalog {
            store = store.with_products(demo_catalog(Utc::now()));
        }
        let session = auth::restore_session(&auth_repo);
        let (created_tx, created_rx) = product_created_channel();
        Self {
            config,
            store,
            session,
            auth_repo,
            created_tx,
            created_rx,
        }
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    pub fn session(&self) -> &AuthState {
        &self.session
    }

    pub fn store(&self) -> &ProductStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut ProductStore {
        &mut self.store
    }

    /// Sender for producers that queue creations on this app.
    pub fn product_events(&self) -> Sender<ProductCreated> {
        self.created_tx.clone()
    }

    pub fn login(&mut self, form: LoginForm) -> ServiceResult<bool> {
        let payload = LoginFormPayload::try_from(form)?;
        Ok(auth::login(payload, &mut self.session, &self.auth_repo))
    }

    pub fn logout(&mut self) {
        auth::logout(&mut self.session, &self.auth_repo);
    }

    pub fn list_products(&self, query: ProductListQuery) -> ServiceResult<ProductPage> {
        products::show_products(query, self.config.items_per_page, &self.session, &self.store)
    }

    pub fn product(&self, product_id: &str) -> ServiceResult<Product> {
        products::show_product(product_id, &self.session, &self.store)
    }

    pub fn product_count(&self) -> ServiceResult<usize> {
        products::count_products(&self.session, &self.store)
    }

    pub fn create_product(&mut self, form: AddProductForm) -> ServiceResult<Product> {
        let payload = AddProductFormPayload::try_from(form)?;
        products::create_product(payload, &self.session, &mut self.store)
    }

    pub fn update_product(&mut self, form: EditProductForm) -> ServiceResult<bool> {
        let payload = EditProductFormPayload::try_from(form)?;
        products::update_product(payload, &self.session, &mut self.store)
    }

    pub fn delete_product(&mut self, product_id: &str) -> ServiceResult<bool> {
        let product_id = ProductId::parse(product_id).map_err(|_| ServiceError::NotFound)?;
        products::delete_product(product_id, &self.session, &mut self.store)
    }

    pub fn retry_image_sync(&mut self, product_id: &str) -> ServiceResult<bool> {
        let product_id = ProductId::parse(product_id).map_err(|_| ServiceError::NotFound)?;
        products::retry_image_sync(product_id, &self.session, &mut self.store)
    }

    /// Queue creation events for the accepted rows of `bytes`. The store is
    /// not touched until [`CatalogApp::process_pending_events`] runs.
    pub fn import_products(&self, bytes: &[u8]) -> ServiceResult<ImportOutcome> {
        import_export::import_products(bytes, &self.session, &self.created_tx)
    }

    /// Apply queued creation events in the order they were sent.
    pub fn process_pending_events(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(event) = self.created_rx.try_recv() {
            self.store.add(event.into_inner());
            applied += 1;
        }
        if applied > 0 {
            log::debug!("Applied {applied} queued product creations");
        }
        applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::auth_state::InMemoryAuthStateRepository;

    fn empty_config() -> CatalogConfig {
        CatalogConfig {
            seed_demo_catalog: false,
            ..CatalogConfig::default()
        }
    }

    fn admin_login() -> LoginForm {
        LoginForm {
            username: "admin".into(),
            password: "password123".into(),
        }
    }

    #[test]
    fn seeds_demo_catalog_when_enabled() {
        let app = CatalogApp::new(CatalogConfig::default(), InMemoryAuthStateRepository::default());
        assert_eq!(app.store().len(), 10);
    }

    #[test]
    fn operations_require_login() {
        let mut app = CatalogApp::new(empty_config(), InMemoryAuthStateRepository::default());
        assert_eq!(app.product_count(), Err(ServiceError::Unauthorized));

        assert_eq!(app.login(admin_login()), Ok(true));
        assert_eq!(app.product_count(), Ok(0));

        app.logout();
        assert_eq!(app.product_count(), Err(ServiceError::Unauthorized));
    }

    #[test]
    fn session_survives_restart() {
        let repo = InMemoryAuthStateRepository::default();
        let mut app = CatalogApp::new(empty_config(), repo);
        app.login(admin_login()).unwrap();

        let CatalogApp { auth_repo, .. } = app;
        let restarted = CatalogApp::new(empty_config(), auth_repo);
        assert!(restarted.session().is_authenticated);
    }

    #[test]
    fn import_applies_on_next_tick() {
        let mut app = CatalogApp::new(empty_config(), InMemoryAuthStateRepository::default());
        app.login(admin_login()).unwrap();

        let outcome = app
            .import_products(b"name,price,category\nA,1,CAKE\nB,2,CAKE")
            .unwrap();
        assert_eq!(outcome.imported(), 2);
        assert!(app.store().is_empty());

        assert_eq!(app.process_pending_events(), 2);
        let names = app
            .store()
            .list()
            .iter()
            .map(|p| p.name.as_str())
            .collect::<Vec<_>>();
        assert_eq!(names, vec!["A", "B"]);
    }
}
