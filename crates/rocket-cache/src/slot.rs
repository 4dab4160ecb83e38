//! A single named, typed entry in a cache.

use crate::{Cache, CacheError};
use serde::{de::DeserializeOwned, Serialize};
use std::marker::PhantomData;

/// Default slot key for the persisted cart.
pub const DEFAULT_CART_SLOT: &str = "@RocketShoes:cart";

/// Handle on one key of a [`Cache`] holding a value of type `T`.
///
/// The whole value is read at once and overwritten wholesale on save.
pub struct Slot<T> {
    cache: Cache,
    key: String,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Slot<T>
where
    T: Serialize + DeserializeOwned,
{
    /// Bind `key` in `cache`.
    pub fn new(cache: Cache, key: impl Into<String>) -> Self {
        Self {
            cache,
            key: key.into(),
            _marker: PhantomData,
        }
    }

    /// The key this slot occupies.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Read the stored value; `None` when the slot is empty.
    pub fn load(&self) -> Result<Option<T>, CacheError> {
        self.cache.get(&self.key)
    }

    /// Read the stored value, or `T::default()` when the slot is empty.
    pub fn load_or_default(&self) -> Result<T, CacheError>
    where
        T: Default,
    {
        Ok(self.load()?.unwrap_or_default())
    }

    /// Overwrite the slot with `value`.
    pub fn save(&self, value: &T) -> Result<(), CacheError> {
        self.cache.set(&self.key, value)?;
        tracing::trace!(key = %self.key, "slot saved");
        Ok(())
    }

    /// Empty the slot.
    pub fn clear(&self) -> Result<(), CacheError> {
        self.cache.delete(&self.key)
    }

    /// Check whether anything is stored.
    pub fn is_set(&self) -> Result<bool, CacheError> {
        self.cache.exists(&self.key)
    }
}

impl<T> Clone for Slot<T> {
    fn clone(&self) -> Self {
        Self {
            cache: self.cache.clone(),
            key: self.key.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T> std::fmt::Debug for Slot<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Slot").field("key", &self.key).finish()
    }
}
