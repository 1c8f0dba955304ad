//! Minishop
//!
//! Minimal e-commerce demo: a product catalog, a single guest cart, and a
//! checkout flow that turns the cart into a confirmed order.
//!
//! ## Layout
//! - [`domain`] - aggregates (product, cart, order) and their value objects
//! - [`store`] - repository traits plus the in-memory document store
//! - [`service`] - catalog, cart, and checkout services
//! - [`http`] - axum router, handlers, and the JSON response envelope

pub mod domain;
pub mod http;
pub mod service;
pub mod store;

use thiserror::Error;

use crate::domain::aggregates::{CartError, OrderError};
use crate::domain::value_objects::{EmailError, QuantityError};

// =============================================================================
// Error Types
// =============================================================================

/// Error taxonomy for every shop operation: bad input, missing record, or a
/// persistence fault. The HTTP layer maps these to 400 / 404 / 500.
#[derive(Error, Debug)]
pub enum ShopError {
    #[error("{0}")]
    InvalidArgument(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl From<QuantityError> for ShopError {
    fn from(err: QuantityError) -> Self {
        Self::InvalidArgument(err.to_string())
    }
}

impl From<EmailError> for ShopError {
    fn from(err: EmailError) -> Self {
        Self::InvalidArgument(err.to_string())
    }
}

impl From<CartError> for ShopError {
    fn from(err: CartError) -> Self {
        Self::NotFound(err.to_string())
    }
}

impl From<OrderError> for ShopError {
    fn from(err: OrderError) -> Self {
        Self::InvalidArgument(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ShopError>;
