//! Cart store error types.

use rocket_cache::CacheError;
use rocket_commerce::{CommerceError, ProductId};
use rocket_data::{CatalogError, FetchError};
use std::fmt;
use thiserror::Error;

/// Message shown when a quantity check fails.
pub const OUT_OF_STOCK_MESSAGE: &str = "Requested quantity is out of stock";

/// The store operation an error came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Add,
    Remove,
    Update,
    Clear,
}

impl Operation {
    /// Generic user-facing failure message for this operation.
    pub fn failure_message(&self) -> &'static str {
        match self {
            Self::Add => "Failed to add product",
            Self::Remove => "Failed to remove product",
            Self::Update => "Failed to update product quantity",
            Self::Clear => "Failed to clear cart",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Add => "add",
            Self::Remove => "remove",
            Self::Update => "update",
            Self::Clear => "clear",
        };
        f.write_str(name)
    }
}

/// Errors returned by cart store operations.
///
/// Every error leaves the cart unchanged.
#[derive(Error, Debug)]
pub enum CartError {
    /// Stock does not strictly exceed the requested quantity.
    #[error("Product {product_id}: requested {requested}, available {available}")]
    OutOfStock {
        product_id: ProductId,
        requested: i64,
        available: i64,
    },

    /// The catalog has no stock or product record.
    #[error("Product {0} not found")]
    NotFound(ProductId),

    /// The product is not in the cart.
    #[error("Product {0} is not in the cart")]
    NotInCart(ProductId),

    /// The catalog could not be reached or answered garbage.
    #[error("Catalog request failed")]
    Transport(#[source] FetchError),

    /// The persistence slot could not be read or written.
    #[error("Cart storage failed")]
    Storage(#[from] CacheError),

    /// The new snapshot violated a cart invariant.
    #[error(transparent)]
    Domain(#[from] CommerceError),
}

impl CartError {
    /// User-facing message for a failure of `op`.
    pub fn user_message(&self, op: Operation) -> &'static str {
        match self {
            Self::OutOfStock { .. } => OUT_OF_STOCK_MESSAGE,
            _ => op.failure_message(),
        }
    }

    /// Whether the failure came from the network.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

impl From<CatalogError> for CartError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::NotFound { id, .. } => Self::NotFound(id),
            CatalogError::Transport(e) => Self::Transport(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rocket_data::Resource;

    #[test]
    fn test_user_messages() {
        let out = CartError::OutOfStock {
            product_id: ProductId::new(1),
            requested: 4,
            available: 3,
        };
        assert_eq!(out.user_message(Operation::Add), OUT_OF_STOCK_MESSAGE);
        assert_eq!(out.user_message(Operation::Update), OUT_OF_STOCK_MESSAGE);

        let missing = CartError::NotFound(ProductId::new(1));
        assert_eq!(missing.user_message(Operation::Add), "Failed to add product");
        assert_eq!(
            CartError::NotInCart(ProductId::new(1)).user_message(Operation::Remove),
            "Failed to remove product"
        );
        assert_eq!(
            CartError::NotInCart(ProductId::new(1)).user_message(Operation::Update),
            "Failed to update product quantity"
        );
    }

    fn chain(err: &dyn std::error::Error) -> String {
        let mut out = err.to_string();
        let mut source = err.source();
        while let Some(cause) = source {
            out.push_str(": ");
            out.push_str(&cause.to_string());
            source = cause.source();
        }
        out
    }

    #[test]
    fn test_cause_printed_once() {
        use std::error::Error as _;

        let err = CartError::Storage(CacheError::Io(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "read-only volume",
        )));
        assert_eq!(err.to_string(), "Cart storage failed");
        assert!(err.source().is_some());

        assert_eq!(
            chain(&err),
            "Cart storage failed: I/O error: read-only volume"
        );

        let err = CartError::Transport(FetchError::HttpError {
            status: 503,
            url: "http://localhost:3333/stock/1".to_string(),
        });
        assert_eq!(err.to_string(), "Catalog request failed");
        assert_eq!(chain(&err).matches("503").count(), 1);
    }

    #[test]
    fn test_from_catalog_error() {
        let err: CartError = CatalogError::NotFound {
            resource: Resource::Product,
            id: ProductId::new(2),
        }
        .into();
        assert!(matches!(err, CartError::NotFound(id) if id == ProductId::new(2)));

        let err: CartError = CatalogError::Transport(FetchError::Timeout(
            std::time::Duration::from_secs(1),
        ))
        .into();
        assert!(err.is_transport());
    }
}
