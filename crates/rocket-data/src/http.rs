//! Catalog backed by the storefront HTTP API.

use crate::catalog::{Catalog, CatalogError, LookupMode, Resource};
use crate::{FetchClient, FetchError};
use async_trait::async_trait;
use rocket_commerce::{Product, ProductId, Stock};
use serde::de::DeserializeOwned;
use tracing::instrument;

/// [`Catalog`] served by `/stock` and `/products` endpoints.
#[derive(Debug, Clone)]
pub struct HttpCatalog {
    client: FetchClient,
    mode: LookupMode,
}

impl HttpCatalog {
    /// Create a catalog using per-id endpoints.
    pub fn new(client: FetchClient) -> Self {
        Self {
            client,
            mode: LookupMode::PerId,
        }
    }

    /// Set the lookup mode.
    pub fn with_mode(mut self, mode: LookupMode) -> Self {
        self.mode = mode;
        self
    }

    /// The active lookup mode.
    pub fn mode(&self) -> LookupMode {
        self.mode
    }

    /// Path for a record under the active mode.
    pub fn path(&self, collection: &str, id: ProductId) -> String {
        match self.mode {
            LookupMode::PerId => format!("/{collection}/{id}"),
            LookupMode::Bulk => format!("/{collection}"),
        }
    }

    async fn lookup<T, F>(
        &self,
        collection: &str,
        resource: Resource,
        id: ProductId,
        id_of: F,
    ) -> Result<T, CatalogError>
    where
        T: DeserializeOwned,
        F: Fn(&T) -> ProductId,
    {
        let path = self.path(collection, id);
        match self.mode {
            LookupMode::PerId => match self.client.get_json::<Option<T>>(&path).await {
                Ok(Some(record)) => Ok(record),
                Ok(None) | Err(FetchError::NotFound { .. }) => {
                    Err(CatalogError::NotFound { resource, id })
                }
                Err(e) => Err(e.into()),
            },
            LookupMode::Bulk => {
                let records: Vec<T> = self.client.get_json(&path).await?;
                select_by_id(records, id, id_of).ok_or(CatalogError::NotFound { resource, id })
            }
        }
    }
}

fn select_by_id<T>(records: Vec<T>, id: ProductId, id_of: impl Fn(&T) -> ProductId) -> Option<T> {
    records.into_iter().find(|r| id_of(r) == id)
}

#[async_trait]
impl Catalog for HttpCatalog {
    #[instrument(skip(self))]
    async fn stock(&self, id: ProductId) -> Result<Stock, CatalogError> {
        self.lookup("stock", Resource::Stock, id, |s: &Stock| s.id).await
    }

    #[instrument(skip(self))]
    async fn product(&self, id: ProductId) -> Result<Product, CatalogError> {
        self.lookup("products", Resource::Product, id, |p: &Product| p.id)
            .await
    }
}
