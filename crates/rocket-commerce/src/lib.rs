//! Cart domain types for RocketCart.
//!
//! - **Catalog**: `Product` and `Stock` records as served by the storefront API
//! - **Cart**: the ordered, id-unique cart snapshot
//!
//! # Example
//!
//! ```rust
//! use rocket_commerce::prelude::*;
//!
//! let shoe = Product::new(ProductId::new(1), "Running shoe", 179.9).with_amount(1);
//! let cart = Cart::new().with_added(shoe).unwrap();
//! let cart = cart.with_incremented(ProductId::new(1)).unwrap();
//!
//! assert_eq!(cart.amount_of(ProductId::new(1)), 2);
//! ```

pub mod error;
pub mod ids;

pub mod cart;
pub mod catalog;

pub use cart::Cart;
pub use catalog::{Product, Stock};
pub use error::CommerceError;
pub use ids::ProductId;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::cart::Cart;
    pub use crate::catalog::{Product, Stock};
    pub use crate::error::CommerceError;
    pub use crate::ids::ProductId;
}
