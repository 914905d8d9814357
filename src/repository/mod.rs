use thiserror::Error;

use crate::domain::product::{NewProduct, Product};
use crate::domain::types::ProductId;
use crate::query::{Pagination, ProductFilters, ProductSort, SortDirection, SortKey};

#[cfg(feature = "app")]
pub mod auth_state;
pub mod product;

/// Errors raised by repository implementations.
///
/// The in-memory product store never fails; these cover the persisted
/// authentication key and any future backend.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to (de)serialize stored value: {0}")]
    Serialization(String),
}

/// Convenient alias for results returned from repository functions.
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Query parameters used when listing or searching products.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductListQuery {
    /// Free-text search over name, cid, category and description.
    pub search: Option<String>,
    /// Exact-match structured filters.
    pub filters: ProductFilters,
    /// Display-only ordering.
    pub sort: Option<ProductSort>,
    /// Pagination parameters.
    pub pagination: Option<Pagination>,
}

impl ProductListQuery {
    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }
    pub fn state(mut self, state: impl Into<String>) -> Self {
        self.filters.state = Some(state.into());
        self
    }
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.filters.category = Some(category.into());
        self
    }
    pub fn shipping_type(mut self, shipping_type: impl Into<String>) -> Self {
        self.filters.shipping_type = Some(shipping_type.into());
        self
    }
    pub fn sort_by(mut self, key: SortKey, direction: SortDirection) -> Self {
        self.sort = Some(ProductSort { key, direction });
        self
    }
    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

/// Read-only operations for product entities.
pub trait ProductReader {
    /// List products matching the supplied query parameters.
    ///
    /// Returns the number of matches before pagination and the page itself.
    fn list_products(&self, query: &ProductListQuery) -> RepositoryResult<(usize, Vec<Product>)>;
    /// Retrieve a product by its identifier.
    fn get_product_by_id(&self, id: ProductId) -> RepositoryResult<Option<Product>>;
    /// Total number of stored products.
    fn count_products(&self) -> RepositoryResult<usize>;
}

/// Write operations for product entities.
///
/// Updates and deletes of unknown ids are silent no-ops; callers that need to
/// tell "applied" from "ignored" must check membership first.
pub trait ProductWriter {
    /// Persist a new product, assigning id, cid and timestamps.
    fn create_product(&mut self, product: NewProduct) -> RepositoryResult<Product>;
    /// Replace the mutable fields of an existing product.
    fn update_product(&mut self, product: Product) -> RepositoryResult<()>;
    /// Delete a product by id.
    fn delete_product(&mut self, id: ProductId) -> RepositoryResult<()>;
}
