//! Stock and product service clients for RocketCart.
//!
//! This crate provides:
//! - `FetchClient` - JSON-over-HTTP client with timeout and retry
//! - `FetchPolicy` / `RetryPolicy` / `TimeoutConfig` - request policies
//! - `Catalog` - the stock and product lookups the cart depends on
//! - `HttpCatalog` - `Catalog` over the storefront API (per-id or bulk endpoints)
//! - `FixtureCatalog` - `Catalog` over a local JSON database
//!
//! # Example
//!
//! ```rust,ignore
//! use rocket_data::{Catalog, FetchClient, HttpCatalog, LookupMode};
//!
//! let client = FetchClient::new("http://localhost:3333")?;
//! let catalog = HttpCatalog::new(client).with_mode(LookupMode::PerId);
//! let stock = catalog.stock(ProductId::new(1)).await?;
//! ```

mod catalog;
mod client;
mod error;
mod fixture;
mod http;
mod policy;

pub use catalog::{Catalog, CatalogError, LookupMode, Resource};
pub use client::FetchClient;
pub use error::FetchError;
pub use fixture::{FixtureCatalog, FixtureError};
pub use http::HttpCatalog;
pub use policy::{BackoffStrategy, FetchPolicy, RetryCondition, RetryPolicy, TimeoutConfig};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Catalog, CatalogError, FetchClient, FetchError, HttpCatalog, LookupMode};
}
