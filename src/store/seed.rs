//! Demo catalog loaded when `seed_demo_catalog` is enabled.

use chrono::{DateTime, Duration, Utc};

use crate::domain::product::{NewProduct, Product};
use crate::domain::types::{
    ProductCid, ProductId, ProductPrice, ProductState, ShippingType, TypeConstraintError,
};

struct DemoRow {
    cid: &'static str,
    name: &'static str,
    description: &'static str,
    price: f64,
    final_price: Option<f64>,
    category: &'static str,
    subcategory: &'static str,
    shipping: ShippingType,
    state: ProductState,
    image: &'static str,
    sync_failed: bool,
    /// Creation time as (days ago, hour, minute).
    created: (i64, u32, u32),
}

const DEMO_ROWS: [DemoRow; 10] = [
    DemoRow {
        cid: "CAK_508",
        name: "Strawberry Cake",
        description: "Delicious strawberry cake with fresh cream",
        price: 150.0,
        final_price: Some(159.0),
        category: "CAKE",
        subcategory: "FNP Luxe",
        shipping: ShippingType::Courier,
        state: ProductState::Published,
        image: "https://images.unsplash.com/photo-1578985545062-69928b1d9587?w=100&h=100&fit=crop",
        sync_failed: false,
        created: (2, 17, 13),
    },
    DemoRow {
        cid: "CAK_509",
        name: "Vanilla Cupcakes",
        description: "Soft vanilla cupcakes with buttercream frosting",
        price: 120.0,
        final_price: None,
        category: "CAKE",
        subcategory: "FNP Luxe",
        shipping: ShippingType::Express,
        state: ProductState::PublishFailed,
        image: "https://images.unsplash.com/photo-1587668178277-295251f900ce?w=100&h=100&fit=crop",
        sync_failed: true,
        created: (1, 14, 30),
    },
    DemoRow {
        cid: "APR_60",
        name: "Red Rose",
        description: "Beautiful red rose arrangement",
        price: 200.0,
        final_price: None,
        category: "APPARELS",
        subcategory: "Fashion & Lifestyle",
        shipping: ShippingType::Courier,
        state: ProductState::Published,
        image: "https://images.unsplash.com/photo-1518895949257-762f22a0f8a0?w=100&h=100&fit=crop",
        sync_failed: false,
        created: (3, 10, 45),
    },
    DemoRow {
        cid: "ACC_52",
        name: "Hamper",
        description: "Luxury gift hamper with premium items",
        price: 500.0,
        final_price: None,
        category: "ACCESSORIES",
        subcategory: "FNP Luxe",
        shipping: ShippingType::Express,
        state: ProductState::Published,
        image: "https://images.unsplash.com/photo-1607613009820-a29f7bb81c04?w=100&h=100&fit=crop",
        sync_failed: false,
        created: (4, 16, 20),
    },
    DemoRow {
        cid: "AUT_1762165319882",
        name: "AutoComp_1762165319882",
        description: "Auto-generated component",
        price: 100.0,
        final_price: None,
        category: "ACCESSORIES",
        subcategory: "Fashion & Lifestyle",
        shipping: ShippingType::Courier,
        state: ProductState::PublishFailed,
        image: "https://images.unsplash.com/photo-1441986300917-64674bd600d8?w=100&h=100&fit=crop",
        sync_failed: true,
        created: (5, 9, 15),
    },
    DemoRow {
        cid: "TST_001",
        name: "Test comp Amrit",
        description: "Test component created for testing purposes",
        price: 80.0,
        final_price: None,
        category: "APPARELS",
        subcategory: "Fashion & Lifestyle",
        shipping: ShippingType::Express,
        state: ProductState::Published,
        image: "https://images.unsplash.com/photo-1523380744952-b7e00e6e2ffa?w=100&h=100&fit=crop",
        sync_failed: false,
        created: (6, 11, 30),
    },
    DemoRow {
        cid: "CAK_510",
        name: "Chocolate Cake",
        description: "Rich chocolate cake with ganache",
        price: 180.0,
        final_price: None,
        category: "CAKE",
        subcategory: "FNP Luxe",
        shipping: ShippingType::Courier,
        state: ProductState::Published,
        image: "https://images.unsplash.com/photo-1578985545062-69928b1d9587?w=100&h=100&fit=crop",
        sync_failed: false,
        created: (7, 13, 45),
    },
    DemoRow {
        cid: "APR_61",
        name: "Denim Jeans",
        description: "Classic blue denim jeans",
        price: 250.0,
        final_price: None,
        category: "APPARELS",
        subcategory: "Fashion & Lifestyle",
        shipping: ShippingType::Express,
        state: ProductState::Published,
        image: "https://images.unsplash.com/photo-1542272604-787c3835535d?w=100&h=100&fit=crop",
        sync_failed: false,
        created: (8, 15, 0),
    },
    DemoRow {
        cid: "ACC_53",
        name: "Leather Bag",
        description: "Premium leather handbag",
        price: 350.0,
        final_price: None,
        category: "ACCESSORIES",
        subcategory: "FNP Luxe",
        shipping: ShippingType::Courier,
        state: ProductState::PublishFailed,
        image: "https://images.unsplash.com/photo-1553062407-98eeb64c6a62?w=100&h=100&fit=crop",
        sync_failed: true,
        created: (9, 12, 20),
    },
    DemoRow {
        cid: "CAK_511",
        name: "Red Velvet Cake",
        description: "Classic red velvet with cream cheese frosting",
        price: 200.0,
        final_price: None,
        category: "CAKE",
        subcategory: "FNP Luxe",
        shipping: ShippingType::Express,
        state: ProductState::Published,
        image: "https://images.unsplash.com/photo-1578985545062-69928b1d9587?w=100&h=100&fit=crop",
        sync_failed: false,
        created: (10, 8, 10),
    },
];

fn created_at(now: DateTime<Utc>, (days_ago, hour, minute): (i64, u32, u32)) -> DateTime<Utc> {
    let day = now - Duration::days(days_ago);
    day.date_naive()
        .and_hms_opt(hour, minute, 0)
        .map(|naive| naive.and_utc())
        .unwrap_or(day)
}

fn demo_product(row: &DemoRow, now: DateTime<Utc>) -> Result<Product, TypeConstraintError> {
    let mut input = NewProduct::new(
        row.name,
        row.description,
        ProductPrice::new(row.price)?,
        row.category,
    );
    input.final_price = row.final_price.map(ProductPrice::new).transpose()?;
    input.subcategory = Some(row.subcategory.to_string());
    input.shipping_type = Some(row.shipping);
    input.state = Some(row.state);
    input.image_url = Some(row.image.to_string());
    input.image_sync_failed = row.sync_failed;

    Ok(input.into_product(
        ProductId::generate(),
        ProductCid::new(row.cid)?,
        created_at(now, row.created),
    ))
}

/// The ten sample products the admin tool ships with, dated relative to `now`.
pub fn demo_catalog(now: DateTime<Utc>) -> Vec<Product> {
    DEMO_ROWS
        .iter()
        .filter_map(|row| match demo_product(row, now) {
            Ok(product) => Some(product),
            Err(e) => {
                log::error!("Invalid demo product '{}': {e}", row.name);
                None
            }
        })
        .collect()
}
