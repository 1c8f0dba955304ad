//! Cart service

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::aggregates::Cart;
use crate::domain::value_objects::{Quantity, ShopperId};
use crate::store::{CartStore, ProductStore};
use crate::{Result, ShopError};

/// One active cart per shopper, created lazily, total recomputed on every
/// mutation. Mutations are plain load-mutate-save sequences with no locking
/// around them; concurrent writes to the same cart race and the last save
/// wins. The demo serves a single guest shopper, so this stays acceptable.
#[derive(Clone)]
pub struct CartService {
    carts: Arc<dyn CartStore>,
    products: Arc<dyn ProductStore>,
}

impl CartService {
    pub fn new(carts: Arc<dyn CartStore>, products: Arc<dyn ProductStore>) -> Self {
        Self { carts, products }
    }

    /// Returns the shopper's cart, persisting a new empty one if absent.
    pub async fn get_or_create(&self, shopper: &ShopperId) -> Result<Cart> {
        match self.carts.find(shopper).await? {
            Some(cart) => Ok(cart),
            None => self.carts.save(Cart::empty(shopper.clone())).await,
        }
    }

    /// Adds `quantity` of the product, merging with an existing line for the
    /// same product. Creates the cart if the shopper has none yet.
    pub async fn add_item(&self, shopper: &ShopperId, product_id: Uuid, quantity: i64) -> Result<Cart> {
        let quantity = Quantity::new(quantity)?;
        let product = self
            .products
            .get(product_id)
            .await?
            .ok_or_else(|| ShopError::NotFound("Product not found".to_string()))?;
        let mut cart = match self.carts.find(shopper).await? {
            Some(cart) => cart,
            None => Cart::empty(shopper.clone()),
        };
        cart.add_product(&product, quantity);
        self.carts.save(cart).await
    }

    /// Sets a line's quantity. Anything below 1 is rejected before any
    /// lookup; dropping a line is `remove_item`, never an update side effect.
    pub async fn update_quantity(&self, shopper: &ShopperId, line_id: Uuid, quantity: i64) -> Result<Cart> {
        let quantity = Quantity::new(quantity)?;
        let mut cart = self.require_cart(shopper).await?;
        cart.set_line_quantity(line_id, quantity)?;
        self.carts.save(cart).await
    }

    /// Removes a line if present; an unknown line leaves the cart unchanged.
    pub async fn remove_item(&self, shopper: &ShopperId, line_id: Uuid) -> Result<Cart> {
        let mut cart = self.require_cart(shopper).await?;
        cart.remove_line(line_id);
        self.carts.save(cart).await
    }

    /// Empties the cart. The emptied cart stays in the store, so clearing
    /// twice in a row succeeds both times.
    pub async fn clear(&self, shopper: &ShopperId) -> Result<Cart> {
        let mut cart = self.require_cart(shopper).await?;
        cart.clear();
        self.carts.save(cart).await
    }

    async fn require_cart(&self, shopper: &ShopperId) -> Result<Cart> {
        self.carts
            .find(shopper)
            .await?
            .ok_or_else(|| ShopError::NotFound("Cart not found".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::aggregates::Product;
    use crate::domain::value_objects::Money;
    use crate::store::{MemoryStore, ProductStore};
    use rust_decimal::Decimal;

    async fn service_with_product() -> (CartService, Uuid) {
        let store = Arc::new(MemoryStore::new());
        let product = Product::new(
            "Wireless Headphones",
            Money::new(Decimal::new(7999, 2)),
            "Premium noise-canceling headphones",
            "img",
            "Electronics",
        );
        let id = product.id();
        store.replace_all(vec![product]).await.unwrap();
        (CartService::new(store.clone(), store), id)
    }

    #[tokio::test]
    async fn test_get_or_create_persists_empty_cart() {
        let (service, _) = service_with_product().await;
        let shopper = ShopperId::guest();
        let cart = service.get_or_create(&shopper).await.unwrap();
        assert!(cart.is_empty());
        assert_eq!(cart.total_price(), Money::zero());
        // Second call finds the same persisted cart rather than a fresh one.
        let again = service.get_or_create(&shopper).await.unwrap();
        assert_eq!(again.created_at(), cart.created_at());
    }

    #[tokio::test]
    async fn test_add_same_product_twice_merges() {
        let (service, product_id) = service_with_product().await;
        let shopper = ShopperId::guest();
        service.add_item(&shopper, product_id, 1).await.unwrap();
        let cart = service.add_item(&shopper, product_id, 1).await.unwrap();
        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].quantity, 2);
        assert_eq!(cart.total_price().amount(), Decimal::new(15998, 2));
    }

    #[tokio::test]
    async fn test_add_rejects_non_positive_quantity() {
        let (service, product_id) = service_with_product().await;
        let shopper = ShopperId::guest();
        assert!(matches!(
            service.add_item(&shopper, product_id, 0).await,
            Err(ShopError::InvalidArgument(_))
        ));
        assert!(matches!(
            service.add_item(&shopper, product_id, -2).await,
            Err(ShopError::InvalidArgument(_))
        ));
    }

    #[tokio::test]
    async fn test_add_unknown_product() {
        let (service, _) = service_with_product().await;
        assert!(matches!(
            service.add_item(&ShopperId::guest(), Uuid::new_v4(), 1).await,
            Err(ShopError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_update_below_one_leaves_cart_unchanged() {
        let (service, product_id) = service_with_product().await;
        let shopper = ShopperId::guest();
        let cart = service.add_item(&shopper, product_id, 2).await.unwrap();
        let line_id = cart.items()[0].id;

        assert!(matches!(
            service.update_quantity(&shopper, line_id, 0).await,
            Err(ShopError::InvalidArgument(_))
        ));
        let cart = service.get_or_create(&shopper).await.unwrap();
        assert_eq!(cart.items()[0].quantity, 2);
    }

    #[tokio::test]
    async fn test_update_unknown_line() {
        let (service, product_id) = service_with_product().await;
        let shopper = ShopperId::guest();
        service.add_item(&shopper, product_id, 1).await.unwrap();
        assert!(matches!(
            service.update_quantity(&shopper, Uuid::new_v4(), 2).await,
            Err(ShopError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_remove_unknown_line_is_noop() {
        let (service, product_id) = service_with_product().await;
        let shopper = ShopperId::guest();
        service.add_item(&shopper, product_id, 1).await.unwrap();
        let cart = service.remove_item(&shopper, Uuid::new_v4()).await.unwrap();
        assert_eq!(cart.items().len(), 1);
    }

    #[tokio::test]
    async fn test_remove_without_cart() {
        let (service, _) = service_with_product().await;
        assert!(matches!(
            service.remove_item(&ShopperId::guest(), Uuid::new_v4()).await,
            Err(ShopError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_clear_twice_succeeds_once_cart_exists() {
        let (service, product_id) = service_with_product().await;
        let shopper = ShopperId::guest();

        // No cart yet: clear has nothing to operate on.
        assert!(matches!(
            service.clear(&shopper).await,
            Err(ShopError::NotFound(_))
        ));

        service.add_item(&shopper, product_id, 3).await.unwrap();
        let cleared = service.clear(&shopper).await.unwrap();
        assert!(cleared.is_empty());
        assert_eq!(cleared.total_price(), Money::zero());

        let cleared_again = service.clear(&shopper).await.unwrap();
        assert!(cleared_again.is_empty());
    }
}
