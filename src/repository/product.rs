use crate::domain::product::{NewProduct, Product};
use crate::domain::types::ProductId;
use crate::query::run_query;
use crate::repository::{ProductListQuery, ProductReader, ProductWriter, RepositoryResult};
use crate::store::ProductStore;

impl ProductReader for ProductStore {
    fn list_products(&self, query: &ProductListQuery) -> RepositoryResult<(usize, Vec<Product>)> {
        Ok(run_query(self.list(), query))
    }

    fn get_product_by_id(&self, id: ProductId) -> RepositoryResult<Option<Product>> {
        Ok(self.get(id).cloned())
    }

    fn count_products(&self) -> RepositoryResult<usize> {
        Ok(self.len())
    }
}

impl ProductWriter for ProductStore {
    fn create_product(&mut self, product: NewProduct) -> RepositoryResult<Product> {
        Ok(self.add(product))
    }

    fn update_product(&mut self, product: Product) -> RepositoryResult<()> {
        self.update(product);
        Ok(())
    }

    fn delete_product(&mut self, id: ProductId) -> RepositoryResult<()> {
        self.delete(id);
        Ok(())
    }
}
