//! Value objects for the shop domain

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Monetary amount. The demo is single-currency, so this is a thin wrapper
/// over a decimal rather than an amount/currency pair.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    pub const ZERO: Money = Money(Decimal::ZERO);

    pub fn new(amount: Decimal) -> Self {
        Self(amount)
    }
    pub fn zero() -> Self {
        Self::ZERO
    }
    pub fn amount(&self) -> Decimal {
        self.0
    }
    pub fn add(&self, other: Money) -> Money {
        Money(self.0 + other.0)
    }
    pub fn multiply(&self, qty: u32) -> Money {
        Money(self.0 * Decimal::from(qty))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Cart line quantity, always at least 1. A request to drop a line to zero
/// is a removal, never a quantity update.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Quantity(u32);

impl Quantity {
    pub fn new(value: i64) -> Result<Self, QuantityError> {
        if value < 1 {
            return Err(QuantityError::NotPositive);
        }
        u32::try_from(value)
            .map(Self)
            .map_err(|_| QuantityError::OutOfRange)
    }
    pub fn value(&self) -> u32 {
        self.0
    }
}

#[derive(Debug, Clone)]
pub enum QuantityError {
    NotPositive,
    OutOfRange,
}
impl std::error::Error for QuantityError {}
impl fmt::Display for QuantityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotPositive => write!(f, "Valid quantity is required"),
            Self::OutOfRange => write!(f, "Quantity is out of range"),
        }
    }
}

/// Customer email, shape-checked against `local@domain.tld`: no whitespace,
/// an `@` with something before it, and a dotted remainder after it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmailAddress(String);

impl EmailAddress {
    pub fn parse(value: impl Into<String>) -> Result<Self, EmailError> {
        let value = value.into();
        if Self::is_valid(&value) {
            Ok(Self(value))
        } else {
            Err(EmailError::Invalid)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn is_valid(s: &str) -> bool {
        if s.is_empty() || s.chars().any(char::is_whitespace) {
            return false;
        }
        // '@' and '.' are ASCII, so slicing at their byte offsets is safe.
        s.char_indices().filter(|&(_, c)| c == '@').any(|(at, _)| {
            let (local, domain) = (&s[..at], &s[at + 1..]);
            !local.is_empty()
                && domain
                    .char_indices()
                    .any(|(dot, c)| c == '.' && dot > 0 && dot + 1 < domain.len())
        })
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone)]
pub enum EmailError {
    Invalid,
}
impl std::error::Error for EmailError {}
impl fmt::Display for EmailError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Please provide a valid email")
    }
}

/// Key identifying whose cart is being operated on. The demo only ever
/// exercises the fixed guest identity, but the store is keyed by this so a
/// real user model is an additive change.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShopperId(String);

impl ShopperId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }
    pub fn guest() -> Self {
        Self("guest-user".to_string())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ShopperId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
