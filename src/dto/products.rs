use serde::Serialize;

use crate::domain::product::Product;

/// Product as shown in the listing table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductRow {
    pub id: String,
    pub cid: String,
    pub name: String,
    pub category: String,
    pub subcategory: String,
    pub price: String,
    pub shipping_type: String,
    pub state: &'static str,
    pub image_url: Option<String>,
    pub image_sync_failed: bool,
    pub created_at: String,
}

fn or_dash(value: Option<&str>) -> String {
    match value.map(str::trim) {
        Some(value) if !value.is_empty() => value.to_string(),
        _ => "-".to_string(),
    }
}

impl From<&Product> for ProductRow {
    fn from(value: &Product) -> Self {
        let price = value.display_price();
        Self {
            id: value.id.to_string(),
            cid: or_dash(Some(value.cid.as_str())),
            name: value.name.clone(),
            category: or_dash(Some(&value.category)),
            subcategory: or_dash(value.subcategory.as_deref()),
            price: if price > 0.0 {
                format!("₹{price:.2}")
            } else {
                "-".to_string()
            },
            shipping_type: or_dash(value.shipping_type.as_ref().map(|s| s.as_str())),
            state: value.state.as_str(),
            image_url: value.image_url.clone(),
            image_sync_failed: value.image_sync_failed,
            created_at: value
                .created_at
                .format("%d-%b-%Y at %-I:%M %p")
                .to_string(),
        }
    }
}

impl From<Product> for ProductRow {
    fn from(value: Product) -> Self {
        Self::from(&value)
    }
}

/// One page of the product table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductPage {
    pub items: Vec<ProductRow>,
    /// Matches before pagination.
    pub total: usize,
    pub page: usize,
    pub total_pages: usize,
}

impl ProductPage {
    pub fn new(items: Vec<ProductRow>, total: usize, page: usize, per_page: usize) -> Self {
        let total_pages = if per_page == 0 {
            1
        } else {
            total.div_ceil(per_page).max(1)
        };
        Self {
            items,
            total,
            page: page.max(1),
            total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::product::NewProduct;
    use crate::domain::types::{ProductCid, ProductId, ProductPrice, ShippingType};
    use chrono::{TimeZone, Utc};

    fn sample_product() -> Product {
        let created = Utc.with_ymd_and_hms(2026, 1, 2, 17, 5, 0).unwrap();
        let mut input = NewProduct::new("Cake", "", ProductPrice::new(150.0).unwrap(), "CAKE");
        input.final_price = Some(ProductPrice::new(159.0).unwrap());
        input.shipping_type = Some(ShippingType::Courier);
        input.into_product(ProductId::generate(), ProductCid::new("CAK_508").unwrap(), created)
    }

    #[test]
    fn formats_listing_columns() {
        let row = ProductRow::from(sample_product());
        assert_eq!(row.cid, "CAK_508");
        assert_eq!(row.price, "₹159.00");
        assert_eq!(row.shipping_type, "COURIER");
        assert_eq!(row.subcategory, "-");
        assert_eq!(row.state, "PUBLISHED");
        assert_eq!(row.created_at, "02-Jan-2026 at 5:05 PM");
    }

    #[test]
    fn zero_price_renders_as_dash() {
        let mut product = sample_product();
        product.price = ProductPrice::new(0.0).unwrap();
        product.final_price = None;
        assert_eq!(ProductRow::from(product).price, "-");
    }

    #[test]
    fn page_counts_round_up() {
        let page = ProductPage::new(Vec::new(), 21, 3, 10);
        assert_eq!(page.total_pages, 3);
        assert_eq!(ProductPage::new(Vec::new(), 0, 0, 10).total_pages, 1);
    }
}
