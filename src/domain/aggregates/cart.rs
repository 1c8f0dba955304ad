//! Cart Aggregate

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::aggregates::Product;
use crate::domain::value_objects::{Money, Quantity, ShopperId};

/// A shopper's cart: insertion-ordered lines plus a denormalized total.
/// The total is recomputed on every mutation and never edited directly.
#[derive(Clone, Debug)]
pub struct Cart {
    shopper_id: ShopperId,
    items: Vec<CartLine>,
    total_price: Money,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// One entry in a cart: a product reference plus the name/price/image
/// captured when it was added. Not re-synced if the product changes later.
#[derive(Clone, Debug)]
pub struct CartLine {
    pub id: Uuid,
    pub product_id: Uuid,
    pub name: String,
    pub price: Money,
    pub image: String,
    pub quantity: u32,
}

impl CartLine {
    pub fn line_total(&self) -> Money {
        self.price.multiply(self.quantity)
    }
}

impl Cart {
    pub fn empty(shopper_id: ShopperId) -> Self {
        let now = Utc::now();
        Self {
            shopper_id,
            items: vec![],
            total_price: Money::zero(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn shopper_id(&self) -> &ShopperId {
        &self.shopper_id
    }
    pub fn items(&self) -> &[CartLine] {
        &self.items
    }
    pub fn total_price(&self) -> Money {
        self.total_price
    }
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Adds `quantity` of `product`, merging into an existing line for the
    /// same product rather than creating a duplicate line.
    pub fn add_product(&mut self, product: &Product, quantity: Quantity) {
        if let Some(line) = self.items.iter_mut().find(|l| l.product_id == product.id()) {
            line.quantity = line.quantity.saturating_add(quantity.value());
        } else {
            self.items.push(CartLine {
                id: Uuid::new_v4(),
                product_id: product.id(),
                name: product.name().to_string(),
                price: product.price(),
                image: product.image().to_string(),
                quantity: quantity.value(),
            });
        }
        self.recalculate();
    }

    pub fn set_line_quantity(&mut self, line_id: Uuid, quantity: Quantity) -> Result<(), CartError> {
        let line = self
            .items
            .iter_mut()
            .find(|l| l.id == line_id)
            .ok_or(CartError::LineNotFound)?;
        line.quantity = quantity.value();
        self.recalculate();
        Ok(())
    }

    /// Removing a line that is not present is a no-op; the client only ever
    /// removes lines it has already seen.
    pub fn remove_line(&mut self, line_id: Uuid) {
        self.items.retain(|l| l.id != line_id);
        self.recalculate();
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.recalculate();
    }

    fn recalculate(&mut self) {
        self.total_price = self
            .items
            .iter()
            .fold(Money::zero(), |acc, l| acc.add(l.line_total()));
        self.updated_at = Utc::now();
    }
}

#[derive(Debug, Clone)]
pub enum CartError {
    LineNotFound,
}
impl std::error::Error for CartError {}
impl std::fmt::Display for CartError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Item not found in cart")
    }
}
