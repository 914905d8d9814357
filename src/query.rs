//! Derived, read-only views over a snapshot of the record store.
//!
//! Everything here is a pure function of `(records, query)`. Rows keep their
//! insertion order unless a display sort is requested, and the source slice is
//! never mutated.

use std::cmp::Ordering;

use crate::domain::product::Product;
use crate::repository::ProductListQuery;

/// Exact-match constraints on individual fields.
///
/// Each present filter is compared case-insensitively against the record field,
/// absent record fields count as the empty string, and all present filters are
/// ANDed. Empty filter values are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilters {
    pub state: Option<String>,
    pub category: Option<String>,
    pub shipping_type: Option<String>,
}

impl ProductFilters {
    pub fn is_empty(&self) -> bool {
        active(&self.state).is_none()
            && active(&self.category).is_none()
            && active(&self.shipping_type).is_none()
    }

    /// Whether `product` satisfies every present filter.
    pub fn matches(&self, product: &Product) -> bool {
        let shipping_type = product.shipping_type.map(|s| s.as_str()).unwrap_or("");

        field_matches(&self.state, product.state.as_str())
            && field_matches(&self.category, &product.category)
            && field_matches(&self.shipping_type, shipping_type)
    }
}

fn active(filter: &Option<String>) -> Option<&str> {
    filter.as_deref().filter(|value| !value.trim().is_empty())
}

fn field_matches(filter: &Option<String>, value: &str) -> bool {
    match active(filter) {
        Some(expected) => expected.to_lowercase() == value.to_lowercase(),
        None => true,
    }
}

/// Case-insensitive substring search over name, cid, category and description.
///
/// An empty query matches every record.
pub fn matches_search(product: &Product, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    let query = query.to_lowercase();

    [
        product.name.as_str(),
        product.cid.as_str(),
        product.category.as_str(),
        product.description.as_str(),
    ]
    .iter()
    .any(|field| field.to_lowercase().contains(&query))
}

/// Column used for display-only ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    /// Final price when set, base price otherwise.
    Price,
    CreatedAt,
    Name,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProductSort {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl ProductSort {
    fn compare(&self, a: &Product, b: &Product) -> Ordering {
        let ordering = match self.key {
            SortKey::Price => a.display_price().total_cmp(&b.display_price()),
            SortKey::CreatedAt => a.created_at.cmp(&b.created_at),
            SortKey::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
        };
        match self.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

/// One-based page selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: usize,
    pub per_page: usize,
}

/// Search and filter `records`, keeping insertion order.
pub fn filter_products<'a>(
    records: &'a [Product],
    search: &str,
    filters: &ProductFilters,
) -> Vec<&'a Product> {
    records
        .iter()
        .filter(|product| matches_search(product, search))
        .filter(|product| filters.matches(product))
        .collect()
}

/// Run a full list query: search, filters, optional sort, optional page.
///
/// Returns the number of matching records before pagination together with the
/// selected rows.
pub fn run_query(records: &[Product], query: &ProductListQuery) -> (usize, Vec<Product>) {
    let mut rows = filter_products(records, query.search.as_deref().unwrap_or(""), &query.filters);

    // `sort_by` is stable, so ties keep insertion order in both directions.
    if let Some(sort) = &query.sort {
        rows.sort_by(|a, b| sort.compare(a, b));
    }

    let total = rows.len();

    let rows = match &query.pagination {
        Some(pagination) => {
            let per_page = pagination.per_page.max(1);
            let offset = (pagination.page.max(1) - 1).saturating_mul(per_page);
            rows.into_iter().skip(offset).take(per_page).collect::<Vec<_>>()
        }
        None => rows,
    };

    (total, rows.into_iter().cloned().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::product::NewProduct;
    use crate::domain::types::{
        ProductCid, ProductId, ProductPrice, ProductState, ShippingType,
    };
    use chrono::{DateTime, Duration};

    fn product(
        name: &str,
        cid: &str,
        category: &str,
        state: ProductState,
        shipping: Option<ShippingType>,
        price: f64,
        age_days: i64,
    ) -> Product {
        let created = DateTime::from_timestamp(1_700_000_000, 0).unwrap() - Duration::days(age_days);
        let mut new_product =
            NewProduct::new(name, "", ProductPrice::new(price).unwrap(), category);
        new_product.state = Some(state);
        new_product.shipping_type = shipping;
        new_product.into_product(ProductId::generate(), ProductCid::new(cid).unwrap(), created)
    }

    fn catalog() -> Vec<Product> {
        vec![
            product(
                "Strawberry Cake",
                "CAK_508",
                "CAKE",
                ProductState::Published,
                Some(ShippingType::Courier),
                150.0,
                2,
            ),
            product(
                "Vanilla Cupcakes",
                "CAK_509",
                "CAKE",
                ProductState::PublishFailed,
                Some(ShippingType::Express),
                120.0,
                1,
            ),
            product(
                "Red Rose",
                "APR_60",
                "APPARELS",
                ProductState::Published,
                None,
                200.0,
                3,
            ),
        ]
    }

    fn names(rows: &[Product]) -> Vec<&str> {
        rows.iter().map(|p| p.name.as_str()).collect()
    }

    #[test]
    fn search_is_case_insensitive() {
        let (total, rows) = run_query(&catalog(), &ProductListQuery::default().search("cak"));
        assert_eq!(total, 2);
        assert_eq!(names(&rows), vec!["Strawberry Cake", "Vanilla Cupcakes"]);
    }

    #[test]
    fn empty_search_returns_everything() {
        let (total, _) = run_query(&catalog(), &ProductListQuery::default().search(""));
        assert_eq!(total, 3);
    }

    #[test]
    fn search_covers_cid_and_description() {
        let mut records = catalog();
        records[2].description = "Beautiful rose arrangement".into();

        let (_, rows) = run_query(&records, &ProductListQuery::default().search("apr_6"));
        assert_eq!(names(&rows), vec!["Red Rose"]);

        let (_, rows) = run_query(&records, &ProductListQuery::default().search("ARRANGE"));
        assert_eq!(names(&rows), vec!["Red Rose"]);
    }

    #[test]
    fn state_filter_only() {
        let (_, rows) = run_query(
            &catalog(),
            &ProductListQuery::default().state("publish_failed"),
        );
        assert_eq!(names(&rows), vec!["Vanilla Cupcakes"]);
    }

    #[test]
    fn category_filter_only() {
        let (_, rows) = run_query(&catalog(), &ProductListQuery::default().category("cake"));
        assert_eq!(names(&rows), vec!["Strawberry Cake", "Vanilla Cupcakes"]);
    }

    #[test]
    fn combined_filters_are_anded() {
        let query = ProductListQuery::default()
            .category("CAKE")
            .state("PUBLISHED")
            .shipping_type("COURIER");
        let (_, rows) = run_query(&catalog(), &query);
        assert_eq!(names(&rows), vec!["Strawberry Cake"]);
    }

    #[test]
    fn absent_field_only_matches_when_filter_is_unset() {
        let (_, rows) = run_query(&catalog(), &ProductListQuery::default().shipping_type("EXPRESS"));
        assert_eq!(names(&rows), vec!["Vanilla Cupcakes"]);
    }

    #[test]
    fn unmatched_filter_yields_empty_rows() {
        let (total, rows) = run_query(&catalog(), &ProductListQuery::default().category("TOYS"));
        assert_eq!(total, 0);
        assert!(rows.is_empty());
    }

    #[test]
    fn empty_filter_value_is_ignored() {
        let filters = ProductFilters {
            state: Some(" ".into()),
            ..ProductFilters::default()
        };
        assert!(filters.is_empty());
        assert_eq!(filter_products(&catalog(), "", &filters).len(), 3);
    }

    #[test]
    fn sorts_by_price_and_date() {
        let records = catalog();

        let (_, rows) = run_query(
            &records,
            &ProductListQuery::default().sort_by(SortKey::Price, SortDirection::Descending),
        );
        assert_eq!(names(&rows), vec!["Red Rose", "Strawberry Cake", "Vanilla Cupcakes"]);

        let (_, rows) = run_query(
            &records,
            &ProductListQuery::default().sort_by(SortKey::CreatedAt, SortDirection::Ascending),
        );
        assert_eq!(names(&rows), vec!["Red Rose", "Strawberry Cake", "Vanilla Cupcakes"]);
    }

    #[test]
    fn sort_is_stable_for_ties() {
        let mut records = catalog();
        for record in &mut records {
            record.price = ProductPrice::new(100.0).unwrap();
        }

        for direction in [SortDirection::Ascending, SortDirection::Descending] {
            let (_, rows) = run_query(
                &records,
                &ProductListQuery::default().sort_by(SortKey::Price, direction),
            );
            assert_eq!(names(&rows), vec!["Strawberry Cake", "Vanilla Cupcakes", "Red Rose"]);
        }
    }

    #[test]
    fn paginates_after_counting() {
        let (total, rows) = run_query(&catalog(), &ProductListQuery::default().paginate(2, 2));
        assert_eq!(total, 3);
        assert_eq!(names(&rows), vec!["Red Rose"]);
    }

    #[test]
    fn filtering_does_not_touch_the_source() {
        let records = catalog();
        let before = records.clone();
        let _ = run_query(&records, &ProductListQuery::default().search("rose"));
        assert_eq!(records, before);
    }
}
