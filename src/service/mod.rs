//! Application services: the read-only catalog, the cart store contract,
//! and the checkout processor.

pub mod carts;
pub mod catalog;
pub mod checkout;

pub use carts::CartService;
pub use catalog::CatalogService;
pub use checkout::CheckoutService;
