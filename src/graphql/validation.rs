//! Input validation rules for mutations
//!
//! Every rule lives here so the single-record and bulk mutations share the
//! exact same checks and user-facing messages.

use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use thiserror::Error;

/// Accepted phone shapes: optional leading "+", 1-4 digits, then groups of
/// 3 and 3-4 digits, with space, hyphen, or dot as optional separators.
static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?\d{1,4}[-.\s]?\d{3}[-.\s]?\d{3,4}$").unwrap());

/// A validation failure surfaced to the API caller
///
/// The display strings are the user-facing messages; tests pin them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("email '{0}' is already in use")]
    DuplicateEmail(String),

    #[error("Invalid phone format. Use +1234567890 or 123-456-7890.")]
    InvalidPhone,

    #[error("Name cannot be empty")]
    EmptyName,

    #[error("Price must be greater than zero")]
    InvalidPrice,

    #[error("Stock cannot be negative")]
    InvalidStock,

    #[error("Customer with id {0} not found")]
    CustomerNotFound(i64),

    #[error("Product at position {position} with id {id} not found")]
    ProductNotFound { position: usize, id: i64 },

    #[error("An order must contain at least one product")]
    EmptyProductList,
}

impl ValidationError {
    /// Convert into a top-level GraphQL error
    pub fn into_graphql(self) -> async_graphql::Error {
        async_graphql::Error::new(self.to_string())
    }
}

/// Validate a customer name (required, non-blank)
pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::EmptyName);
    }
    Ok(())
}

/// Validate an optional phone number
///
/// Absent and empty phones are accepted; anything else must match
/// [`PHONE_RE`].
pub fn validate_phone(phone: Option<&str>) -> Result<(), ValidationError> {
    match phone {
        None => Ok(()),
        Some(p) if p.is_empty() => Ok(()),
        Some(p) if PHONE_RE.is_match(p) => Ok(()),
        Some(_) => Err(ValidationError::InvalidPhone),
    }
}

/// Validate a product price (strictly positive)
pub fn validate_price(price: Decimal) -> Result<(), ValidationError> {
    if price <= Decimal::ZERO {
        return Err(ValidationError::InvalidPrice);
    }
    Ok(())
}

/// Validate a product stock level and resolve the stored value
///
/// An omitted stock means zero; an explicit value must be non-negative.
pub fn validate_stock(stock: Option<i32>) -> Result<i32, ValidationError> {
    let stock = stock.unwrap_or(0);
    if stock < 0 {
        return Err(ValidationError::InvalidStock);
    }
    Ok(stock)
}
