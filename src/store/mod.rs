//! Persistence seam. The demo runs on an in-memory document store; the
//! traits keep the services indifferent to what sits behind them.

pub mod memory;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::aggregates::{Cart, Order, Product};
use crate::domain::value_objects::ShopperId;
use crate::Result;

pub use memory::MemoryStore;

#[async_trait]
pub trait ProductStore: Send + Sync {
    async fn list(&self) -> Result<Vec<Product>>;
    async fn get(&self, id: Uuid) -> Result<Option<Product>>;
    /// Replaces the whole catalog. Dev-only seeding path.
    async fn replace_all(&self, products: Vec<Product>) -> Result<Vec<Product>>;
}

/// One cart per shopper identity; `save` upserts.
#[async_trait]
pub trait CartStore: Send + Sync {
    async fn find(&self, shopper: &ShopperId) -> Result<Option<Cart>>;
    async fn save(&self, cart: Cart) -> Result<Cart>;
}

#[async_trait]
pub trait OrderStore: Send + Sync {
    async fn insert(&self, order: Order) -> Result<Order>;
    async fn list(&self) -> Result<Vec<Order>>;
}
