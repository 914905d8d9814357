use crate::domain::product::Product;
use crate::domain::types::ProductId;

/// Immutable snapshot of the catalog, in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogState {
    products: Vec<Product>,
}

impl CatalogState {
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn contains(&self, id: ProductId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

/// Fully-resolved mutations. Ids, CIDs and timestamps are already assigned.
#[derive(Debug, Clone, PartialEq)]
pub enum ProductAction {
    Created(Product),
    Updated(Product),
    Deleted(ProductId),
}

/// Apply `action` to `state`, producing the next snapshot.
///
/// Unknown ids on update/delete leave the state unchanged, and a `Created`
/// record whose id is already present is dropped so ids stay unique.
pub fn reduce(state: CatalogState, action: ProductAction) -> CatalogState {
    let mut products = state.products;

    match action {
        ProductAction::Created(product) => {
            if !products.iter().any(|p| p.id == product.id) {
                products.push(product);
            }
        }
        ProductAction::Updated(product) => {
            if let Some(slot) = products.iter_mut().find(|p| p.id == product.id) {
                *slot = product;
            }
        }
        ProductAction::Deleted(id) => products.retain(|p| p.id != id),
    }

    CatalogState { products }
}
