//! Stock-validated, persisted shopping cart store.
//!
//! [`CartStore`] owns the current cart snapshot and exposes three mutations
//! (`add_product`, `remove_product`, `update_product_amount`). Each one
//! validates against a [`rocket_data::Catalog`], persists the new snapshot to
//! a [`rocket_cache::Slot`], then publishes it to subscribers. Failures are
//! turned into [`Toast`]s for the user and leave the cart unchanged.
//!
//! # Example
//!
//! ```rust,ignore
//! use rocket_store::{CartStore, StoreConfig};
//!
//! let store = CartStore::open(catalog, cache, StoreConfig::default())?;
//! let mut updates = store.subscribe();
//!
//! store.add_product(ProductId::new(1)).await.ok();
//! let cart = updates.borrow_and_update().clone();
//! ```

mod config;
mod error;
mod notify;
mod store;

pub use config::{RemovePolicy, StoreConfig};
pub use error::{CartError, Operation, OUT_OF_STOCK_MESSAGE};
pub use notify::{MemoryNotifier, Notifier, Toast, ToastLevel, TracingNotifier};
pub use store::{reset_slot, CartStore, UpdateOutcome};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{CartError, CartStore, Notifier, StoreConfig, Toast, UpdateOutcome};
    pub use rocket_commerce::prelude::*;
}
