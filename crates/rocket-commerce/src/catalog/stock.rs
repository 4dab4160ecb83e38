//! Stock availability records.

use crate::ids::ProductId;
use serde::{Deserialize, Serialize};

/// Available inventory for a product, as reported by the stock service.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Stock {
    /// Product this record belongs to.
    pub id: ProductId,
    /// Units available for purchase.
    pub amount: i64,
}

impl Stock {
    /// Create a stock record.
    pub fn new(id: ProductId, amount: i64) -> Self {
        Self { id, amount }
    }

    /// Whether strictly more units are available than `quantity`.
    ///
    /// Both the add and the set-quantity paths validate with this strict
    /// comparison.
    pub fn exceeds(&self, quantity: i64) -> bool {
        self.amount > quantity
    }
}
