//! Store configuration.

use rocket_cache::DEFAULT_CART_SLOT;
use serde::{Deserialize, Serialize};

/// What removing a product that is not in the cart does.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemovePolicy {
    /// Fail with `NotInCart` and notify the user.
    #[default]
    Reject,
    /// Succeed without changing anything.
    Ignore,
}

/// Cart store settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Key of the persistence slot.
    #[serde(default = "default_slot")]
    pub slot: String,

    /// Behaviour when removing an absent product.
    #[serde(default)]
    pub missing_remove: RemovePolicy,
}

fn default_slot() -> String {
    DEFAULT_CART_SLOT.to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            slot: default_slot(),
            missing_remove: RemovePolicy::default(),
        }
    }
}

impl StoreConfig {
    /// Use a different slot key.
    pub fn with_slot(mut self, slot: impl Into<String>) -> Self {
        self.slot = slot.into();
        self
    }

    /// Set the remove policy.
    pub fn with_missing_remove(mut self, policy: RemovePolicy) -> Self {
        self.missing_remove = policy;
        self
    }
}
