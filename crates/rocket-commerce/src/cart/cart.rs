//! Cart snapshot type.

use crate::catalog::Product;
use crate::error::CommerceError;
use crate::ids::ProductId;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// An ordered, id-unique list of products with quantities.
///
/// A `Cart` is a value: every mutation returns a new cart and leaves the
/// receiver untouched. It serializes as a bare JSON array of products, the
/// format kept in the persistence slot. Deserializing an array that repeats
/// a product id or holds a non-positive amount fails.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(try_from = "Vec<Product>", into = "Vec<Product>")]
pub struct Cart {
    items: Vec<Product>,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a cart from a product list.
    ///
    /// Rejects repeated ids and entries whose amount is not positive.
    pub fn from_products(items: Vec<Product>) -> Result<Self, CommerceError> {
        let mut seen = HashSet::with_capacity(items.len());
        for item in &items {
            if item.amount <= 0 {
                return Err(CommerceError::InvalidQuantity(item.amount));
            }
            if !seen.insert(item.id) {
                return Err(CommerceError::DuplicateProduct(item.id));
            }
        }
        Ok(Self { items })
    }

    /// Products in insertion order.
    pub fn items(&self) -> &[Product] {
        &self.items
    }

    /// Iterate over products in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Product> {
        self.items.iter()
    }

    /// Number of distinct products.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get an entry by product id.
    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.items.iter().find(|p| p.id == id)
    }

    /// Check whether a product is in the cart.
    pub fn contains(&self, id: ProductId) -> bool {
        self.get(id).is_some()
    }

    /// Quantity of a product in the cart, zero when absent.
    pub fn amount_of(&self, id: ProductId) -> i64 {
        self.get(id).map(|p| p.amount).unwrap_or(0)
    }

    /// Total item count (sum of amounts).
    pub fn item_count(&self) -> i64 {
        self.items.iter().map(|p| p.amount).sum()
    }

    /// Sum of `price * amount` over all entries.
    pub fn subtotal(&self) -> f64 {
        self.items.iter().map(Product::line_total).sum()
    }

    /// Return a cart with `product` appended.
    ///
    /// Fails if the product is already present or its amount is not positive.
    pub fn with_added(&self, product: Product) -> Result<Self, CommerceError> {
        if product.amount <= 0 {
            return Err(CommerceError::InvalidQuantity(product.amount));
        }
        if self.contains(product.id) {
            return Err(CommerceError::DuplicateProduct(product.id));
        }

        let mut items = self.items.clone();
        items.push(product);
        Ok(Self { items })
    }

    /// Return a cart with the entry for `id` incremented by one.
    pub fn with_incremented(&self, id: ProductId) -> Result<Self, CommerceError> {
        let current = self
            .get(id)
            .ok_or(CommerceError::ItemNotInCart(id))?
            .amount;
        let next = current.checked_add(1).ok_or(CommerceError::Overflow(id))?;
        self.with_amount(id, next)
    }

    /// Return a cart with the entry for `id` set to `amount`.
    pub fn with_amount(&self, id: ProductId, amount: i64) -> Result<Self, CommerceError> {
        if amount <= 0 {
            return Err(CommerceError::InvalidQuantity(amount));
        }
        if !self.contains(id) {
            return Err(CommerceError::ItemNotInCart(id));
        }

        let items = self
            .items
            .iter()
            .map(|p| {
                if p.id == id {
                    p.clone().with_amount(amount)
                } else {
                    p.clone()
                }
            })
            .collect();
        Ok(Self { items })
    }

    /// Return a cart without the entry for `id`, preserving order.
    pub fn without(&self, id: ProductId) -> Result<Self, CommerceError> {
        if !self.contains(id) {
            return Err(CommerceError::ItemNotInCart(id));
        }

        let items = self.items.iter().filter(|p| p.id != id).cloned().collect();
        Ok(Self { items })
    }
}

impl TryFrom<Vec<Product>> for Cart {
    type Error = CommerceError;

    fn try_from(items: Vec<Product>) -> Result<Self, Self::Error> {
        Self::from_products(items)
    }
}

impl From<Cart> for Vec<Product> {
    fn from(cart: Cart) -> Self {
        cart.items
    }
}

impl<'a> IntoIterator for &'a Cart {
    type Item = &'a Product;
    type IntoIter = std::slice::Iter<'a, Product>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
