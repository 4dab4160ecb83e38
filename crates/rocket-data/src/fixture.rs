//! Catalog answered from a local JSON database.
//!
//! The file has the shape served by the development API server:
//!
//! ```json
//! {
//!   "stock":    [{ "id": 1, "amount": 3 }],
//!   "products": [{ "id": 1, "title": "Shoe", "price": 179.9, "image": "..." }]
//! }
//! ```

use crate::catalog::{Catalog, CatalogError, Resource};
use async_trait::async_trait;
use rocket_commerce::{Product, ProductId, Stock};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::RwLock;
use std::time::Duration;
use thiserror::Error;

/// Errors loading a fixture database.
#[derive(Error, Debug)]
pub enum FixtureError {
    #[error("Failed to read fixture {path}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to parse fixture")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Default, Deserialize)]
struct Database {
    #[serde(default)]
    stock: Vec<Stock>,
    #[serde(default)]
    products: Vec<Product>,
}

#[derive(Debug, Default)]
struct Records {
    stock: HashMap<ProductId, Stock>,
    products: HashMap<ProductId, Product>,
}

/// In-process [`Catalog`] over fixed records.
///
/// Stock levels can be changed at runtime, and an artificial latency can be
/// injected to simulate a slow service.
#[derive(Debug, Default)]
pub struct FixtureCatalog {
    records: RwLock<Records>,
    latency: Option<Duration>,
    lookups: AtomicUsize,
}

impl FixtureCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a fixture database from JSON text.
    pub fn from_json(json: &str) -> Result<Self, FixtureError> {
        let db: Database = serde_json::from_str(json)?;
        let catalog = Self::new();
        for stock in db.stock {
            catalog.set_stock(stock.id, stock.amount);
        }
        for product in db.products {
            catalog.insert_product(product);
        }
        Ok(catalog)
    }

    /// Load a fixture database from a file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, FixtureError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| FixtureError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Add a product and its stock level.
    pub fn with_product(self, product: Product, stock: i64) -> Self {
        self.set_stock(product.id, stock);
        self.insert_product(product);
        self
    }

    /// Delay every lookup by `latency`.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Set the stock level for a product.
    pub fn set_stock(&self, id: ProductId, amount: i64) {
        if let Ok(mut records) = self.records.write() {
            records.stock.insert(id, Stock::new(id, amount));
        }
    }

    /// Add or replace a product record.
    pub fn insert_product(&self, product: Product) {
        if let Ok(mut records) = self.records.write() {
            records.products.insert(product.id, product);
        }
    }

    /// Number of lookups served so far.
    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }

    async fn begin_lookup(&self) {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        match self.latency {
            Some(latency) => tokio::time::sleep(latency).await,
            None => tokio::task::yield_now().await,
        }
    }

    fn poisoned() -> CatalogError {
        CatalogError::Transport(crate::FetchError::RequestError(
            "fixture catalog lock poisoned".to_string(),
        ))
    }
}

#[async_trait]
impl Catalog for FixtureCatalog {
    async fn stock(&self, id: ProductId) -> Result<Stock, CatalogError> {
        self.begin_lookup().await;
        let records = self.records.read().map_err(|_| Self::poisoned())?;
        records.stock.get(&id).copied().ok_or(CatalogError::NotFound {
            resource: Resource::Stock,
            id,
        })
    }

    async fn product(&self, id: ProductId) -> Result<Product, CatalogError> {
        self.begin_lookup().await;
        let records = self.records.read().map_err(|_| Self::poisoned())?;
        records.products.get(&id).cloned().ok_or(CatalogError::NotFound {
            resource: Resource::Product,
            id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DB: &str = r#"{
        "stock": [{ "id": 1, "amount": 3 }, { "id": 2, "amount": 0 }],
        "products": [{ "id": 1, "title": "Tênis", "price": 179.9, "image": "a.jpg" }]
    }"#;

    #[tokio::test]
    async fn test_from_json() {
        let catalog = FixtureCatalog::from_json(DB).unwrap();

        let stock = catalog.stock(ProductId::new(1)).await.unwrap();
        assert_eq!(stock.amount, 3);

        let product = catalog.product(ProductId::new(1)).await.unwrap();
        assert_eq!(product.title, "Tênis");
        assert_eq!(catalog.lookups(), 2);
    }

    #[tokio::test]
    async fn test_missing_records() {
        let catalog = FixtureCatalog::from_json(DB).unwrap();

        assert!(matches!(
            catalog.product(ProductId::new(2)).await,
            Err(CatalogError::NotFound {
                resource: Resource::Product,
                ..
            })
        ));
        assert!(matches!(
            catalog.stock(ProductId::new(9)).await,
            Err(CatalogError::NotFound {
                resource: Resource::Stock,
                ..
            })
        ));
    }

    #[tokio::test]
    async fn test_set_stock() {
        let catalog = FixtureCatalog::new()
            .with_product(Product::new(ProductId::new(1), "Shoe", 10.0), 5);
        catalog.set_stock(ProductId::new(1), 1);
        assert_eq!(catalog.stock(ProductId::new(1)).await.unwrap().amount, 1);
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            FixtureCatalog::from_json("{"),
            Err(FixtureError::Parse(_))
        ));
    }
}
