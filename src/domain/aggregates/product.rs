//! Product Aggregate

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::value_objects::Money;

/// Catalog entry. Immutable after seeding; carts copy the fields they need
/// at add-time instead of referencing back here.
#[derive(Clone, Debug)]
pub struct Product {
    id: Uuid,
    name: String,
    price: Money,
    description: String,
    image: String,
    category: String,
    created_at: DateTime<Utc>,
}

impl Product {
    pub fn new(
        name: impl Into<String>,
        price: Money,
        description: impl Into<String>,
        image: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            price,
            description: description.into(),
            image: image.into(),
            category: category.into(),
            created_at: Utc::now(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn price(&self) -> Money {
        self.price
    }
    pub fn description(&self) -> &str {
        &self.description
    }
    pub fn image(&self) -> &str {
        &self.image
    }
    pub fn category(&self) -> &str {
        &self.category
    }
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_products_get_distinct_ids() {
        let a = Product::new("A", Money::new(Decimal::new(10, 0)), "", "", "Misc");
        let b = Product::new("B", Money::new(Decimal::new(10, 0)), "", "", "Misc");
        assert_ne!(a.id(), b.id());
        assert_eq!(a.name(), "A");
    }
}
