//! Commerce error types.

use crate::ids::ProductId;
use thiserror::Error;

/// Errors raised by the cart domain types.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommerceError {
    /// Two cart entries share the same product id.
    #[error("Duplicate product in cart: {0}")]
    DuplicateProduct(ProductId),

    /// Item not in cart.
    #[error("Item not in cart: {0}")]
    ItemNotInCart(ProductId),

    /// Quantity is not positive.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),

    /// Arithmetic overflow on a quantity.
    #[error("Quantity overflow for product {0}")]
    Overflow(ProductId),
}
