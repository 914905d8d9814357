use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::types::{
    ProductCid, ProductId, ProductPrice, ProductState, ShippingType,
};

/// Metadata of an image selected for a product. No binary content is kept.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ImageMetadata {
    pub name: String,
    pub size: u64,
    #[serde(rename = "type")]
    pub content_type: String,
}

/// Optional descriptive attributes carried opaquely by the store.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductAttributes {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtype: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uom: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub shape: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub color: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gst_group_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purchase_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hsn_sac_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub material: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purpose: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attachable_quantity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_po_value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tentative_wp_range: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_drr: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partners_planned: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub projected_sale_value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping_method: Option<ShippingType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tier: Option<String>,
}

/// A catalog product owned by the record store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub cid: ProductCid,
    pub name: String,
    pub description: String,
    pub price: ProductPrice,
    /// Overrides `price` for display and sorting when set.
    pub final_price: Option<ProductPrice>,
    pub category: String,
    pub subcategory: Option<String>,
    pub shipping_type: Option<ShippingType>,
    pub state: ProductState,
    pub image_url: Option<String>,
    pub image_metadata: Option<ImageMetadata>,
    /// Cosmetic flag; clearing it never triggers a real sync.
    #[serde(default)]
    pub image_sync_failed: bool,
    #[serde(flatten)]
    pub attributes: ProductAttributes,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Price shown to users: the final price when it is set and non-zero,
    /// otherwise the base price.
    pub fn display_price(&self) -> f64 {
        self.final_price
            .map(ProductPrice::get)
            .filter(|price| *price > 0.0)
            .unwrap_or_else(|| self.price.get())
    }
}

/// Information required to create a new [`Product`].
///
/// The store does not validate text fields; forms and the bulk importer do.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub cid: Option<ProductCid>,
    pub name: String,
    pub description: String,
    pub price: ProductPrice,
    pub final_price: Option<ProductPrice>,
    pub category: String,
    pub subcategory: Option<String>,
    pub shipping_type: Option<ShippingType>,
    pub state: Option<ProductState>,
    pub image_url: Option<String>,
    pub image_metadata: Option<ImageMetadata>,
    #[serde(default)]
    pub image_sync_failed: bool,
    #[serde(flatten)]
    pub attributes: ProductAttributes,
}

impl NewProduct {
    /// Minimal payload with every optional field left empty.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        price: ProductPrice,
        category: impl Into<String>,
    ) -> Self {
        Self {
            cid: None,
            name: name.into(),
            description: description.into(),
            price,
            final_price: None,
            category: category.into(),
            subcategory: None,
            shipping_type: None,
            state: None,
            image_url: None,
            image_metadata: None,
            image_sync_failed: false,
            attributes: ProductAttributes::default(),
        }
    }

    /// Materialize the record once the store has assigned identity fields.
    pub fn into_product(self, id: ProductId, cid: ProductCid, now: DateTime<Utc>) -> Product {
        Product {
            id,
            cid,
            name: self.name,
            description: self.description,
            price: self.price,
            final_price: self.final_price,
            category: self.category,
            subcategory: self.subcategory,
            shipping_type: self.shipping_type,
            state: self.state.unwrap_or_default(),
            image_url: self.image_url,
            image_metadata: self.image_metadata,
            image_sync_failed: self.image_sync_failed,
            attributes: self.attributes,
            created_at: now,
            updated_at: now,
        }
    }
}
