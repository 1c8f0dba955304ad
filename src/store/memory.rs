//! In-memory document store. Good enough for a single-process demo and for
//! tests; a real deployment would put a document database behind the traits.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::aggregates::{Cart, Order, Product};
use crate::domain::value_objects::ShopperId;
use crate::store::{CartStore, OrderStore, ProductStore};
use crate::Result;

/// Each collection takes its own lock per call, so a service-level
/// load-mutate-save interleaves with concurrent writers: last write wins.
#[derive(Debug, Default)]
pub struct MemoryStore {
    products: RwLock<Vec<Product>>,
    carts: RwLock<HashMap<ShopperId, Cart>>,
    orders: RwLock<Vec<Order>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductStore for MemoryStore {
    async fn list(&self) -> Result<Vec<Product>> {
        Ok(self.products.read().await.clone())
    }

    async fn get(&self, id: Uuid) -> Result<Option<Product>> {
        Ok(self.products.read().await.iter().find(|p| p.id() == id).cloned())
    }

    async fn replace_all(&self, products: Vec<Product>) -> Result<Vec<Product>> {
        let mut guard = self.products.write().await;
        *guard = products;
        Ok(guard.clone())
    }
}

#[async_trait]
impl CartStore for MemoryStore {
    async fn find(&self, shopper: &ShopperId) -> Result<Option<Cart>> {
        Ok(self.carts.read().await.get(shopper).cloned())
    }

    async fn save(&self, cart: Cart) -> Result<Cart> {
        self.carts
            .write()
            .await
            .insert(cart.shopper_id().clone(), cart.clone());
        Ok(cart)
    }
}

#[async_trait]
impl OrderStore for MemoryStore {
    async fn insert(&self, order: Order) -> Result<Order> {
        self.orders.write().await.push(order.clone());
        Ok(order)
    }

    async fn list(&self) -> Result<Vec<Order>> {
        Ok(self.orders.read().await.clone())
    }
}
