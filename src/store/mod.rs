//! The record store: authoritative, in-memory collection of catalog products.
//!
//! All mutations go through [`ProductStore`], which resolves the
//! non-deterministic parts of a command (current time, random CID suffix),
//! hands a fully-formed [`ProductAction`] to the pure [`reduce`] function and
//! then notifies subscribers. The store is single-writer: every mutating
//! method takes `&mut self`.

use std::sync::mpsc::{Receiver, Sender, channel};

use chrono::{DateTime, Utc};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::domain::product::{NewProduct, Product};
use crate::domain::types::ProductId;

pub mod cid;
pub mod reducer;
pub mod seed;

pub use cid::CidCollisionPolicy;
pub use reducer::{CatalogState, ProductAction, reduce};

/// Source of "now" for timestamps.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time in UTC.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Notification sent to subscribers after a mutation was applied.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreEvent {
    Created(Product),
    Updated(Product),
    Deleted(ProductId),
}

pub struct ProductStore {
    state: CatalogState,
    clock: Box<dyn Clock>,
    rng: StdRng,
    cid_policy: CidCollisionPolicy,
    observers: Vec<Sender<StoreEvent>>,
}

impl Default for ProductStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ProductStore {
    /// Empty store using the system clock and an entropy-seeded RNG.
    pub fn new() -> Self {
        Self {
            state: CatalogState::default(),
            clock: Box::new(SystemClock),
            rng: StdRng::from_entropy(),
            cid_policy: CidCollisionPolicy::default(),
            observers: Vec::new(),
        }
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Make CID suffixes reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn with_cid_policy(mut self, policy: CidCollisionPolicy) -> Self {
        self.cid_policy = policy;
        self
    }

    /// Load existing records, keeping their ids and timestamps.
    ///
    /// Records whose id is already present are dropped.
    pub fn with_products(mut self, products: impl IntoIterator<Item = Product>) -> Self {
        for product in products {
            if self.state.contains(product.id) {
                log::warn!("Skipping duplicate product id {} while seeding", product.id);
                continue;
            }
            self.apply(ProductAction::Created(product));
        }
        self
    }

    /// Subscribe to mutations. Dropped receivers are pruned on the next event.
    pub fn subscribe(&mut self) -> Receiver<StoreEvent> {
        let (tx, rx) = channel();
        self.observers.push(tx);
        rx
    }

    /// Create a record from `input` and append it.
    ///
    /// Never rejects input: an empty category only means the generated CID
    /// falls back to the default prefix.
    pub fn add(&mut self, input: NewProduct) -> Product {
        let cid = match input.cid.clone() {
            Some(cid) => cid,
            None => cid::assign_cid(
                &input.category,
                self.cid_policy,
                &mut self.rng,
                self.state.products().iter().map(|p| &p.cid),
            ),
        };

        let mut id = ProductId::generate();
        while self.state.contains(id) {
            id = ProductId::generate();
        }

        let product = input.into_product(id, cid, self.clock.now());
        log::debug!("Adding product {} ({})", product.id, product.cid);

        self.apply(ProductAction::Created(product.clone()));
        self.notify(StoreEvent::Created(product.clone()));
        product
    }

    /// Replace the stored record with the same id.
    ///
    /// Silently ignored when the id is unknown. `created_at` is kept from the
    /// stored record and `updated_at` is set to "now", never moving backwards.
    pub fn update(&mut self, mut product: Product) {
        let Some(existing) = self.state.get(product.id) else {
            log::debug!("Ignoring update of unknown product {}", product.id);
            return;
        };

        product.created_at = existing.created_at;
        product.updated_at = self.clock.now().max(existing.updated_at);

        self.apply(ProductAction::Updated(product.clone()));
        self.notify(StoreEvent::Updated(product));
    }

    /// Remove the record with `id`; silently ignored when absent.
    pub fn delete(&mut self, id: ProductId) {
        if !self.state.contains(id) {
            log::debug!("Ignoring delete of unknown product {id}");
            return;
        }

        self.apply(ProductAction::Deleted(id));
        self.notify(StoreEvent::Deleted(id));
    }

    /// Clear the image-sync failure flag. No sync is attempted.
    pub fn retry_image_sync(&mut self, id: ProductId) {
        if let Some(product) = self.state.get(id) {
            let mut product = product.clone();
            product.image_sync_failed = false;
            self.update(product);
        }
    }

    /// Read-only view of the records in insertion order.
    pub fn list(&self) -> &[Product] {
        self.state.products()
    }

    /// Owned snapshot of the current state.
    pub fn snapshot(&self) -> CatalogState {
        self.state.clone()
    }

    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.state.get(id)
    }

    pub fn len(&self) -> usize {
        self.state.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.is_empty()
    }

    fn apply(&mut self, action: ProductAction) {
        let state = std::mem::take(&mut self.state);
        self.state = reduce(state, action);
    }

    fn notify(&mut self, event: StoreEvent) {
        self.observers.retain(|tx| tx.send(event.clone()).is_ok());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{ProductCid, ProductPrice};
    use std::cell::Cell;
    use std::collections::HashSet;
    use std::rc::Rc;

    /// Clock advancing by one second per reading; can be rewound.
    #[derive(Clone)]
    struct StepClock(Rc<Cell<i64>>);

    impl Clock for StepClock {
        fn now(&self) -> DateTime<Utc> {
            let secs = self.0.get();
            self.0.set(secs + 1);
            DateTime::from_timestamp(secs, 0).unwrap()
        }
    }

    fn new_product(name: &str, category: &str) -> NewProduct {
        NewProduct::new(name, "desc", ProductPrice::new(10.0).unwrap(), category)
    }

    #[test]
    fn add_assigns_distinct_ids() {
        let mut store = ProductStore::new();
        let ids: HashSet<_> = (0..100)
            .map(|i| store.add(new_product(&format!("p{i}"), "CAKE")).id)
            .collect();
        assert_eq!(ids.len(), 100);
        assert_eq!(store.len(), 100);
    }

    #[test]
    fn add_keeps_supplied_cid() {
        let mut store = ProductStore::new();
        let mut input = new_product("Cake", "CAKE");
        input.cid = Some(ProductCid::new("CUSTOM_1").unwrap());
        assert_eq!(store.add(input).cid, "CUSTOM_1");
    }

    #[test]
    fn add_falls_back_to_default_prefix() {
        let mut store = ProductStore::new().with_seed(3);
        let product = store.add(new_product("Thing", ""));
        assert_eq!(product.cid.prefix(), cid::DEFAULT_CID_PREFIX);
    }

    #[test]
    fn update_refreshes_timestamp_and_keeps_created_at() {
        let ticks = Rc::new(Cell::new(100));
        let mut store = ProductStore::new().with_clock(StepClock(ticks.clone()));
        let created = store.add(new_product("Cake", "CAKE"));

        let mut edited = created.clone();
        edited.name = "Cheesecake".into();
        edited.created_at = DateTime::from_timestamp(0, 0).unwrap();
        edited.updated_at = DateTime::from_timestamp(0, 0).unwrap();
        store.update(edited);

        let stored = store.get(created.id).unwrap();
        assert_eq!(stored.name, "Cheesecake");
        assert_eq!(stored.created_at, created.created_at);
        assert!(stored.updated_at > created.updated_at);
    }

    #[test]
    fn updated_at_never_moves_backwards() {
        let ticks = Rc::new(Cell::new(1_000));
        let mut store = ProductStore::new().with_clock(StepClock(ticks.clone()));
        let created = store.add(new_product("Cake", "CAKE"));

        ticks.set(10);
        store.update(created.clone());

        let stored = store.get(created.id).unwrap();
        assert!(stored.created_at <= stored.updated_at);
        assert_eq!(stored.updated_at, created.updated_at);
    }

    #[test]
    fn update_of_unknown_id_is_silent() {
        let mut store = ProductStore::new();
        store.add(new_product("Cake", "CAKE"));
        let before = store.snapshot();

        let mut other = ProductStore::new();
        let ghost = other.add(new_product("Ghost", "CAKE"));
        store.update(ghost);

        assert_eq!(store.snapshot(), before);
    }

    #[test]
    fn delete_is_idempotent() {
        let mut store = ProductStore::new();
        let product = store.add(new_product("Cake", "CAKE"));

        store.delete(product.id);
        store.delete(product.id);
        store.delete(ProductId::generate());

        assert!(store.is_empty());
    }

    #[test]
    fn retry_image_sync_clears_flag() {
        let mut store = ProductStore::new();
        let mut input = new_product("Cake", "CAKE");
        input.image_sync_failed = true;
        let product = store.add(input);

        store.retry_image_sync(product.id);
        assert!(!store.get(product.id).unwrap().image_sync_failed);
    }

    #[test]
    fn subscribers_see_every_mutation() {
        let mut store = ProductStore::new();
        let rx = store.subscribe();

        let product = store.add(new_product("Cake", "CAKE"));
        store.update(product.clone());
        store.delete(product.id);
        store.delete(product.id);

        let events: Vec<_> = rx.try_iter().collect();
        assert_eq!(events.len(), 3);
        assert!(matches!(events[0], StoreEvent::Created(_)));
        assert!(matches!(events[1], StoreEvent::Updated(_)));
        assert_eq!(events[2], StoreEvent::Deleted(product.id));
    }

    #[test]
    fn dropped_subscribers_are_pruned() {
        let mut store = ProductStore::new();
        drop(store.subscribe());
        let live = store.subscribe();

        store.add(new_product("Cake", "CAKE"));

        assert_eq!(store.observers.len(), 1);
        assert_eq!(live.try_iter().count(), 1);
    }

    #[test]
    fn seeding_skips_duplicate_ids() {
        let mut source = ProductStore::new();
        let product = source.add(new_product("Cake", "CAKE"));

        let store = ProductStore::new().with_products(vec![product.clone(), product]);
        assert_eq!(store.len(), 1);
    }
}
