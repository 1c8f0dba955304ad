//! Order Aggregate

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::domain::value_objects::{EmailAddress, Money};

/// A completed sale. Items and total are frozen at creation; later cart or
/// product mutations never reach back into an order.
#[derive(Clone, Debug)]
pub struct Order {
    id: Uuid,
    customer_name: String,
    customer_email: EmailAddress,
    items: Vec<OrderLine>,
    total_amount: Money,
    status: OrderStatus,
    placed_at: DateTime<Utc>,
}

/// Snapshot of one cart line at checkout time.
#[derive(Clone, Debug)]
pub struct OrderLine {
    pub product_id: Uuid,
    pub name: String,
    pub price: Money,
    pub quantity: u32,
}

impl OrderLine {
    pub fn line_total(&self) -> Money {
        self.price.multiply(self.quantity)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    #[default]
    Confirmed,
    Shipped,
    Delivered,
}

impl Order {
    /// Creates a confirmed order from a snapshot of cart lines. The total is
    /// computed from the snapshot, not re-read from the live cart.
    pub fn place(
        customer_name: impl Into<String>,
        customer_email: EmailAddress,
        items: Vec<OrderLine>,
    ) -> Result<Self, OrderError> {
        let customer_name = customer_name.into().trim().to_string();
        if customer_name.is_empty() {
            return Err(OrderError::MissingName);
        }
        if items.is_empty() {
            return Err(OrderError::EmptyCart);
        }
        let total_amount = items
            .iter()
            .fold(Money::zero(), |acc, l| acc.add(l.line_total()));
        Ok(Self {
            id: Uuid::new_v4(),
            customer_name,
            customer_email,
            items,
            total_amount,
            status: OrderStatus::Confirmed,
            placed_at: Utc::now(),
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }
    pub fn customer_name(&self) -> &str {
        &self.customer_name
    }
    pub fn customer_email(&self) -> &EmailAddress {
        &self.customer_email
    }
    pub fn items(&self) -> &[OrderLine] {
        &self.items
    }
    pub fn total_amount(&self) -> Money {
        self.total_amount
    }
    pub fn status(&self) -> OrderStatus {
        self.status
    }
    pub fn placed_at(&self) -> DateTime<Utc> {
        self.placed_at
    }
}

#[derive(Debug, Clone)]
pub enum OrderError {
    MissingName,
    EmptyCart,
}
impl std::error::Error for OrderError {}
impl std::fmt::Display for OrderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingName => write!(f, "Customer name is required"),
            Self::EmptyCart => write!(f, "Cart is empty"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn email() -> EmailAddress {
        EmailAddress::parse("ada@example.com").unwrap()
    }

    fn line(cents: i64, quantity: u32) -> OrderLine {
        OrderLine {
            product_id: Uuid::new_v4(),
            name: "Widget".to_string(),
            price: Money::new(Decimal::new(cents, 2)),
            quantity,
        }
    }

    #[test]
    fn test_place_computes_total_from_snapshot() {
        let order = Order::place("Ada", email(), vec![line(1000, 2), line(500, 1)]).unwrap();
        assert_eq!(order.total_amount().amount(), Decimal::new(2500, 2));
        assert_eq!(order.status(), OrderStatus::Confirmed);
        assert_eq!(order.items().len(), 2);
    }

    #[test]
    fn test_place_rejects_blank_name() {
        assert!(matches!(
            Order::place("   ", email(), vec![line(1000, 1)]),
            Err(OrderError::MissingName)
        ));
    }

    #[test]
    fn test_place_rejects_empty_cart() {
        assert!(matches!(
            Order::place("Ada", email(), vec![]),
            Err(OrderError::EmptyCart)
        ));
    }
}
