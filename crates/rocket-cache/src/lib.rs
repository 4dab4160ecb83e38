//! Durable key-value slots for RocketCart.
//!
//! Provides a small key-value abstraction with an in-memory and a
//! file-backed implementation, a typed JSON [`Cache`] on top of it, and
//! [`Slot`], a handle on one named key.
//!
//! # Example
//!
//! ```rust
//! use rocket_cache::{Cache, Slot, DEFAULT_CART_SLOT};
//!
//! let slot: Slot<Vec<u32>> = Slot::new(Cache::in_memory(), DEFAULT_CART_SLOT);
//! slot.save(&vec![1, 2, 3]).unwrap();
//! assert_eq!(slot.load().unwrap(), Some(vec![1, 2, 3]));
//! ```

mod error;
mod file;
mod kv;
mod slot;
mod store;

pub use error::CacheError;
pub use file::FileStore;
pub use kv::Cache;
pub use slot::{Slot, DEFAULT_CART_SLOT};
pub use store::{KvStore, MemoryStore};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Cache, CacheError, FileStore, KvStore, MemoryStore, Slot};
}
