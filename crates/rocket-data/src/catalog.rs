//! Stock and product lookups.

use crate::FetchError;
use async_trait::async_trait;
use rocket_commerce::{Product, ProductId, Stock};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Kind of record a lookup was for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Stock,
    Product,
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stock => write!(f, "stock"),
            Self::Product => write!(f, "product"),
        }
    }
}

/// Errors returned by a [`Catalog`].
#[derive(Error, Debug)]
pub enum CatalogError {
    /// The service has no record for the id.
    #[error("No {resource} record for product {id}")]
    NotFound { resource: Resource, id: ProductId },

    /// Network, status or decode failure.
    #[error(transparent)]
    Transport(#[from] FetchError),
}

/// How records are looked up on the storefront API.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LookupMode {
    /// `GET /stock/{id}` and `GET /products/{id}`.
    #[default]
    PerId,
    /// `GET /stock` and `GET /products`, then select by id.
    Bulk,
}

impl LookupMode {
    /// Name as used in configuration files.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PerId => "per_id",
            Self::Bulk => "bulk",
        }
    }
}

/// Read-only source of stock levels and product details.
#[async_trait]
pub trait Catalog: Send + Sync {
    /// Available stock for a product.
    async fn stock(&self, id: ProductId) -> Result<Stock, CatalogError>;

    /// Product details for a product. The returned `amount` is not meaningful.
    async fn product(&self, id: ProductId) -> Result<Product, CatalogError>;
}

#[async_trait]
impl<C: Catalog + ?Sized> Catalog for Arc<C> {
    async fn stock(&self, id: ProductId) -> Result<Stock, CatalogError> {
        (**self).stock(id).await
    }

    async fn product(&self, id: ProductId) -> Result<Product, CatalogError> {
        (**self).product(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_mode_serde() {
        assert_eq!(serde_json::to_string(&LookupMode::PerId).unwrap(), r#""per_id""#);
        let mode: LookupMode = serde_json::from_str(r#""bulk""#).unwrap();
        assert_eq!(mode, LookupMode::Bulk);
        assert_eq!(mode.as_str(), "bulk");
    }

    #[test]
    fn test_not_found_message() {
        let err = CatalogError::NotFound {
            resource: Resource::Stock,
            id: ProductId::new(3),
        };
        assert_eq!(err.to_string(), "No stock record for product 3");
    }
}
