//! Checkout processor

use std::sync::Arc;

use crate::domain::aggregates::{Order, OrderLine};
use crate::domain::value_objects::{EmailAddress, ShopperId};
use crate::store::{CartStore, OrderStore};
use crate::{Result, ShopError};

/// Converts a submitted cart snapshot into a confirmed order.
///
/// The order insert and the cart reset are two independent writes with a
/// defined partial-failure outcome: the order is the authoritative record of
/// the sale, the cart reset is advisory cleanup. No transaction ties them.
#[derive(Clone)]
pub struct CheckoutService {
    orders: Arc<dyn OrderStore>,
    carts: Arc<dyn CartStore>,
}

impl CheckoutService {
    pub fn new(orders: Arc<dyn OrderStore>, carts: Arc<dyn CartStore>) -> Self {
        Self { orders, carts }
    }

    /// Validates the customer identity and the submitted line items, persists
    /// a confirmed order, then best-effort empties the shopper's cart. The
    /// total comes from the submitted snapshot, not from the live cart.
    pub async fn checkout(
        &self,
        shopper: &ShopperId,
        customer_name: &str,
        customer_email: &str,
        items: Vec<OrderLine>,
    ) -> Result<Order> {
        if customer_name.trim().is_empty() {
            return Err(ShopError::InvalidArgument(
                "Customer name is required".to_string(),
            ));
        }
        let email = EmailAddress::parse(customer_email)?;
        let order = Order::place(customer_name, email, items)?;
        let order = self.orders.insert(order).await?;

        if let Err(err) = self.reset_cart(shopper).await {
            tracing::warn!(order_id = %order.id(), error = %err, "cart reset after checkout failed; order stands");
        }
        Ok(order)
    }

    async fn reset_cart(&self, shopper: &ShopperId) -> Result<()> {
        if let Some(mut cart) = self.carts.find(shopper).await? {
            cart.clear();
            self.carts.save(cart).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::aggregates::{Cart, Product};
    use crate::domain::value_objects::{Money, Quantity};
    use crate::store::MemoryStore;
    use async_trait::async_trait;
    use rust_decimal::Decimal;
    use uuid::Uuid;

    /// Cart collection that fails every call, for exercising the
    /// reset-after-insert partial-failure path.
    struct BrokenCartStore;

    #[async_trait]
    impl CartStore for BrokenCartStore {
        async fn find(&self, _shopper: &ShopperId) -> Result<Option<Cart>> {
            Err(ShopError::Storage("cart collection unavailable".to_string()))
        }
        async fn save(&self, _cart: Cart) -> Result<Cart> {
            Err(ShopError::Storage("cart collection unavailable".to_string()))
        }
    }

    fn line(cents: i64, quantity: u32) -> OrderLine {
        OrderLine {
            product_id: Uuid::new_v4(),
            name: "Widget".to_string(),
            price: Money::new(Decimal::new(cents, 2)),
            quantity,
        }
    }

    fn service(store: Arc<MemoryStore>) -> CheckoutService {
        CheckoutService::new(store.clone(), store)
    }

    #[tokio::test]
    async fn test_checkout_snapshot_total_and_cart_reset() {
        let store = Arc::new(MemoryStore::new());
        let shopper = ShopperId::guest();

        // Put something in the live cart so the reset is observable.
        let mut cart = crate::domain::aggregates::Cart::empty(shopper.clone());
        let product = Product::new("A", Money::new(Decimal::new(10, 0)), "", "", "Misc");
        cart.add_product(&product, Quantity::new(1).unwrap());
        crate::store::CartStore::save(store.as_ref(), cart).await.unwrap();

        let order = service(store.clone())
            .checkout(&shopper, "Ada Lovelace", "ada@example.com", vec![line(1000, 2), line(500, 1)])
            .await
            .unwrap();
        assert_eq!(order.total_amount().amount(), Decimal::new(2500, 2));

        let cart = crate::store::CartStore::find(store.as_ref(), &shopper)
            .await
            .unwrap()
            .unwrap();
        assert!(cart.is_empty());
        assert_eq!(cart.total_price(), Money::zero());
        assert_eq!(crate::store::OrderStore::list(store.as_ref()).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_checkout_without_cart_still_succeeds() {
        let store = Arc::new(MemoryStore::new());
        let order = service(store)
            .checkout(&ShopperId::guest(), "Ada", "ada@example.com", vec![line(999, 1)])
            .await
            .unwrap();
        assert_eq!(order.customer_name(), "Ada");
    }

    #[tokio::test]
    async fn test_checkout_survives_cart_reset_failure() {
        let store = Arc::new(MemoryStore::new());
        let service = CheckoutService::new(store.clone(), Arc::new(BrokenCartStore));

        let order = service
            .checkout(&ShopperId::guest(), "Ada", "ada@example.com", vec![line(1000, 2)])
            .await
            .unwrap();

        // The insert is authoritative: the order exists and is returned even
        // though every cart-store call blew up.
        assert_eq!(order.total_amount().amount(), Decimal::new(2000, 2));
        assert_eq!(crate::store::OrderStore::list(store.as_ref()).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_checkout_rejects_empty_items_and_persists_nothing() {
        let store = Arc::new(MemoryStore::new());
        let result = service(store.clone())
            .checkout(&ShopperId::guest(), "Ada", "ada@example.com", vec![])
            .await;
        assert!(matches!(result, Err(ShopError::InvalidArgument(_))));
        assert!(crate::store::OrderStore::list(store.as_ref()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_checkout_rejects_bad_email() {
        let store = Arc::new(MemoryStore::new());
        let result = service(store)
            .checkout(&ShopperId::guest(), "Ada", "not-an-email", vec![line(1000, 1)])
            .await;
        assert!(matches!(result, Err(ShopError::InvalidArgument(_))));
    }

    #[tokio::test]
    async fn test_checkout_rejects_blank_name() {
        let store = Arc::new(MemoryStore::new());
        let result = service(store)
            .checkout(&ShopperId::guest(), "   ", "ada@example.com", vec![line(1000, 1)])
            .await;
        assert!(matches!(result, Err(ShopError::InvalidArgument(_))));
    }
}
