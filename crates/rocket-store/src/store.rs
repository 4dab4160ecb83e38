//! The cart store.

use crate::config::{RemovePolicy, StoreConfig};
use crate::error::{CartError, Operation};
use crate::notify::{Notifier, Toast, TracingNotifier};
use rocket_cache::{Cache, Slot};
use rocket_commerce::{Cart, ProductId};
use rocket_data::Catalog;
use std::error::Error as _;
use std::sync::Arc;
use tokio::sync::{watch, Mutex};
use tracing::{debug, info, instrument, warn};

/// Result of [`CartStore::update_product_amount`].
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateOutcome {
    /// The amount was applied; carries the new snapshot.
    Updated(Arc<Cart>),
    /// The requested amount was not positive; nothing happened.
    Ignored,
}

impl UpdateOutcome {
    /// The new snapshot, if one was produced.
    pub fn cart(&self) -> Option<&Arc<Cart>> {
        match self {
            Self::Updated(cart) => Some(cart),
            Self::Ignored => None,
        }
    }
}

/// Stock-validated cart persisted to a single slot.
///
/// Mutations run one at a time: each holds the mutation lock from reading
/// the current snapshot until the new one is persisted and published, so
/// overlapping calls never overwrite each other's effect. Failed operations
/// leave the cart untouched and hand a toast to the notifier.
pub struct CartStore<C> {
    catalog: C,
    slot: Slot<Cart>,
    notifier: Arc<dyn Notifier>,
    config: StoreConfig,
    mutation: Mutex<()>,
    state: watch::Sender<Arc<Cart>>,
}

impl<C: Catalog> CartStore<C> {
    /// Open the store, restoring the cart from the configured slot.
    ///
    /// An empty slot yields an empty cart. A slot that does not decode as a
    /// cart is an error.
    pub fn open(catalog: C, cache: Cache, config: StoreConfig) -> Result<Self, CartError> {
        let slot: Slot<Cart> = Slot::new(cache, config.slot.clone());
        let cart = slot.load_or_default()?;
        info!(slot = slot.key(), items = cart.len(), "cart restored");

        let (state, _) = watch::channel(Arc::new(cart));
        Ok(Self {
            catalog,
            slot,
            notifier: Arc::new(TracingNotifier),
            config,
            mutation: Mutex::new(()),
            state,
        })
    }

    /// Replace the notifier.
    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    /// The current snapshot.
    pub fn cart(&self) -> Arc<Cart> {
        self.state.borrow().clone()
    }

    /// Receive every published snapshot.
    ///
    /// The receiver starts out holding the current snapshot.
    pub fn subscribe(&self) -> watch::Receiver<Arc<Cart>> {
        self.state.subscribe()
    }

    /// The store configuration.
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// The catalog the store validates against.
    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    /// Add one unit of a product.
    ///
    /// Fails with `OutOfStock` unless stock strictly exceeds the amount
    /// already in the cart. A product not yet in the cart is fetched from
    /// the catalog and appended with amount 1.
    #[instrument(skip(self))]
    pub async fn add_product(&self, product_id: ProductId) -> Result<Arc<Cart>, CartError> {
        let result = self.try_add(product_id).await;
        self.report(Operation::Add, product_id, result)
    }

    /// Remove a product entirely.
    #[instrument(skip(self))]
    pub async fn remove_product(&self, product_id: ProductId) -> Result<Arc<Cart>, CartError> {
        let result = self.try_remove(product_id).await;
        self.report(Operation::Remove, product_id, result)
    }

    /// Set the amount of a product already in the cart.
    ///
    /// Non-positive amounts are ignored silently. Fails with `OutOfStock`
    /// unless stock strictly exceeds `amount`.
    #[instrument(skip(self))]
    pub async fn update_product_amount(
        &self,
        product_id: ProductId,
        amount: i64,
    ) -> Result<UpdateOutcome, CartError> {
        if amount <= 0 {
            debug!(amount, "ignoring non-positive amount");
            return Ok(UpdateOutcome::Ignored);
        }
        let result = self.try_update(product_id, amount).await;
        self.report(Operation::Update, product_id, result)
            .map(UpdateOutcome::Updated)
    }

    /// Empty the cart and the persistence slot.
    #[instrument(skip(self))]
    pub async fn clear(&self) -> Result<Arc<Cart>, CartError> {
        let _guard = self.mutation.lock().await;
        match self.slot.clear() {
            Ok(()) => Ok(self.publish(Cart::new())),
            Err(err) => {
                let err = CartError::from(err);
                warn!(
                    error = %err,
                    cause = err.source().map(tracing::field::display),
                    "clear failed"
                );
                self.notifier
                    .notify(Toast::error(err.user_message(Operation::Clear)));
                Err(err)
            }
        }
    }

    /// Re-read the slot and publish what it holds.
    ///
    /// Picks up changes written by another process; an emptied slot yields
    /// an empty cart.
    #[instrument(skip(self))]
    pub async fn reload(&self) -> Result<Arc<Cart>, CartError> {
        let _guard = self.mutation.lock().await;
        let cart = self.slot.load_or_default()?;
        Ok(self.publish(cart))
    }

    async fn try_add(&self, product_id: ProductId) -> Result<Arc<Cart>, CartError> {
        let _guard = self.mutation.lock().await;
        let cart = self.cart();
        let current = cart.amount_of(product_id);

        let stock = self.catalog.stock(product_id).await?;
        if !stock.exceeds(current) {
            return Err(CartError::OutOfStock {
                product_id,
                requested: current.saturating_add(1),
                available: stock.amount,
            });
        }

        let next = if cart.contains(product_id) {
            cart.with_incremented(product_id)?
        } else {
            let product = self.catalog.product(product_id).await?;
            if product.id != product_id {
                warn!(returned = %product.id, "catalog answered with another product");
                return Err(CartError::NotFound(product_id));
            }
            cart.with_added(product.with_amount(1))?
        };
        self.commit(next)
    }

    async fn try_remove(&self, product_id: ProductId) -> Result<Arc<Cart>, CartError> {
        let _guard = self.mutation.lock().await;
        let cart = self.cart();

        if !cart.contains(product_id) {
            return match self.config.missing_remove {
                RemovePolicy::Reject => Err(CartError::NotInCart(product_id)),
                RemovePolicy::Ignore => Ok(cart),
            };
        }
        self.commit(cart.without(product_id)?)
    }

    async fn try_update(&self, product_id: ProductId, amount: i64) -> Result<Arc<Cart>, CartError> {
        let _guard = self.mutation.lock().await;
        let cart = self.cart();
        if !cart.contains(product_id) {
            return Err(CartError::NotInCart(product_id));
        }

        let stock = self.catalog.stock(product_id).await?;
        if !stock.exceeds(amount) {
            return Err(CartError::OutOfStock {
                product_id,
                requested: amount,
                available: stock.amount,
            });
        }
        self.commit(cart.with_amount(product_id, amount)?)
    }

    /// Persist, then publish. Caller holds the mutation lock.
    fn commit(&self, cart: Cart) -> Result<Arc<Cart>, CartError> {
        self.slot.save(&cart)?;
        Ok(self.publish(cart))
    }

    fn publish(&self, cart: Cart) -> Arc<Cart> {
        let snapshot = Arc::new(cart);
        self.state.send_replace(Arc::clone(&snapshot));
        debug!(items = snapshot.len(), "cart published");
        snapshot
    }

    fn report<T>(
        &self,
        op: Operation,
        product_id: ProductId,
        result: Result<T, CartError>,
    ) -> Result<T, CartError> {
        if let Err(err) = &result {
            warn!(
                %op,
                %product_id,
                error = %err,
                cause = err.source().map(tracing::field::display),
                "cart operation failed"
            );
            self.notifier.notify(Toast::error(err.user_message(op)));
        }
        result
    }
}

/// Delete the cart slot without decoding it.
///
/// Recovers a slot that [`CartStore::open`] rejects as corrupt.
pub fn reset_slot(cache: Cache, config: &StoreConfig) -> Result<(), CartError> {
    Slot::<Cart>::new(cache, config.slot.clone()).clear()?;
    info!(slot = %config.slot, "cart slot reset");
    Ok(())
}

impl<C> std::fmt::Debug for CartStore<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("slot", &self.slot)
            .field("config", &self.config)
            .field("items", &self.state.borrow().len())
            .finish_non_exhaustive()
    }
}
