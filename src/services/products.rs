use crate::domain::auth::AuthState;
use crate::domain::product::Product;
use crate::domain::types::ProductId;
use crate::dto::products::{ProductPage, ProductRow};
use crate::forms::products::{AddProductFormPayload, EditProductFormPayload};
use crate::repository::{ProductListQuery, ProductReader, ProductWriter};

use super::auth::check_session;
use super::{ServiceError, ServiceResult};

fn find_product<R>(product_id: ProductId, repo: &R) -> ServiceResult<Product>
where
    R: ProductReader,
{
    match repo.get_product_by_id(product_id) {
        Ok(Some(product)) => Ok(product),
        Ok(None) => Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get product: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// List one page of products matching `query`.
///
/// When the query carries no pagination, `per_page` items of the first page
/// are returned. Page and page size are at least 1.
pub fn show_products<R>(
    query: ProductListQuery,
    per_page: usize,
    session: &AuthState,
    repo: &R,
) -> ServiceResult<ProductPage>
where
    R: ProductReader,
{
    check_session(session)?;

    let (page, per_page) = match query.pagination {
        Some(p) => (p.page.max(1), p.per_page.max(1)),
        None => (1, per_page.max(1)),
    };
    let query = query.paginate(page, per_page);

    match repo.list_products(&query) {
        Ok((total, products)) => Ok(ProductPage::new(
            products.iter().map(ProductRow::from).collect(),
            total,
            page,
            per_page,
        )),
        Err(e) => {
            log::error!("Failed to list products: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Fetch a product for the edit dialog. Malformed ids are reported as missing.
pub fn show_product<R>(product_id: &str, session: &AuthState, repo: &R) -> ServiceResult<Product>
where
    R: ProductReader,
{
    check_session(session)?;

    let product_id = ProductId::parse(product_id).map_err(|_| ServiceError::NotFound)?;
    find_product(product_id, repo)
}

pub fn count_products<R>(session: &AuthState, repo: &R) -> ServiceResult<usize>
where
    R: ProductReader,
{
    check_session(session)?;

    repo.count_products().map_err(|e| {
        log::error!("Failed to count products: {e}");
        ServiceError::Internal
    })
}

pub fn create_product<R>(
    payload: AddProductFormPayload,
    session: &AuthState,
    repo: &mut R,
) -> ServiceResult<Product>
where
    R: ProductWriter,
{
    check_session(session)?;

    match repo.create_product(payload.into_new_product()) {
        Ok(product) => {
            log::info!("Created product {} ({})", product.cid, product.name);
            Ok(product)
        }
        Err(e) => {
            log::error!("Failed to create product: {e}");
            Err(ServiceError::Internal)
        }
    }
}

pub fn update_product<R>(
    payload: EditProductFormPayload,
    session: &AuthState,
    repo: &mut R,
) -> ServiceResult<bool>
where
    R: ProductReader + ProductWriter,
{
    check_session(session)?;

    let existing = find_product(payload.id, repo)?;
    match repo.update_product(payload.apply_to(existing)) {
        Ok(()) => Ok(true),
        Err(e) => {
            log::error!("Failed to update product: {e}");
            Ok(false)
        }
    }
}

pub fn delete_product<R>(
    product_id: ProductId,
    session: &AuthState,
    repo: &mut R,
) -> ServiceResult<bool>
where
    R: ProductReader + ProductWriter,
{
    check_session(session)?;

    find_product(product_id, repo)?;
    match repo.delete_product(product_id) {
        Ok(()) => Ok(true),
        Err(e) => {
            log::error!("Failed to delete product: {e}");
            Ok(false)
        }
    }
}

/// Clear the image-sync failure flag. Nothing is re-uploaded.
pub fn retry_image_sync<R>(
    product_id: ProductId,
    session: &AuthState,
    repo: &mut R,
) -> ServiceResult<bool>
where
    R: ProductReader + ProductWriter,
{
    check_session(session)?;

    let mut product = find_product(product_id, repo)?;
    if !product.image_sync_failed {
        return Ok(false);
    }
    product.image_sync_failed = false;
    match repo.update_product(product) {
        Ok(()) => Ok(true),
        Err(e) => {
            log::error!("Failed to reset image sync flag: {e}");
            Ok(false)
        }
    }
}
