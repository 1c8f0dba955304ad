//! Product catalog service

use std::sync::Arc;

use rust_decimal::Decimal;

use crate::domain::aggregates::Product;
use crate::domain::value_objects::Money;
use crate::store::ProductStore;
use crate::Result;

/// Read-only view of the catalog plus the dev-only seeding path.
#[derive(Clone)]
pub struct CatalogService {
    products: Arc<dyn ProductStore>,
}

impl CatalogService {
    pub fn new(products: Arc<dyn ProductStore>) -> Self {
        Self { products }
    }

    pub async fn list(&self) -> Result<Vec<Product>> {
        self.products.list().await
    }

    /// Replaces the whole catalog with the fixture set.
    pub async fn seed(&self) -> Result<Vec<Product>> {
        self.products.replace_all(fixture_products()).await
    }
}

/// The five demo products the storefront is seeded with.
fn fixture_products() -> Vec<Product> {
    vec![
        Product::new(
            "Wireless Headphones",
            Money::new(Decimal::new(7999, 2)),
            "Premium noise-canceling headphones",
            "https://images.unsplash.com/photo-1505740420928-5e560c06d30e",
            "Electronics",
        ),
        Product::new(
            "Smart Watch",
            Money::new(Decimal::new(19999, 2)),
            "Fitness tracking smartwatch",
            "https://images.unsplash.com/photo-1523275335684-37898b6baf30",
            "Electronics",
        ),
        Product::new(
            "Laptop Backpack",
            Money::new(Decimal::new(4999, 2)),
            "Durable laptop backpack with USB port",
            "https://images.unsplash.com/photo-1553062407-98eeb64c6a62",
            "Accessories",
        ),
        Product::new(
            "Coffee Maker",
            Money::new(Decimal::new(8999, 2)),
            "Programmable coffee maker",
            "https://images.unsplash.com/photo-1517668808822-9ebb02f2a0e6",
            "Home",
        ),
        Product::new(
            "Running Shoes",
            Money::new(Decimal::new(11999, 2)),
            "Lightweight running shoes",
            "https://images.unsplash.com/photo-1542291026-7eec264c27ff",
            "Sports",
        ),
    ]
}
