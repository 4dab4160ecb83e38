//! Product records.

use crate::ids::ProductId;
use serde::{Deserialize, Serialize};

/// A product as served by the product service and stored in the cart.
///
/// The product service omits `amount`; it defaults to zero until the product
/// is placed in a cart. Display fields the cart does not interpret are kept
/// in `extra` so they survive persistence unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Catalog identifier.
    pub id: ProductId,
    /// Display title.
    #[serde(default)]
    pub title: String,
    /// Unit price.
    #[serde(default)]
    pub price: f64,
    /// Image URL.
    #[serde(default)]
    pub image: String,
    /// Quantity of this product in the cart.
    #[serde(default)]
    pub amount: i64,
    /// Any other display fields.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Product {
    /// Create a product with no display fields beyond its title and price.
    pub fn new(id: ProductId, title: impl Into<String>, price: f64) -> Self {
        Self {
            id,
            title: title.into(),
            price,
            image: String::new(),
            amount: 0,
            extra: serde_json::Map::new(),
        }
    }

    /// Set the image URL.
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    /// Set the cart quantity.
    pub fn with_amount(mut self, amount: i64) -> Self {
        self.amount = amount;
        self
    }

    /// Line total (`price * amount`).
    pub fn line_total(&self) -> f64 {
        self.price * self.amount as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_payload_without_amount() {
        let json = r#"{
            "id": 1,
            "title": "Tênis de Caminhada Leve Confortável",
            "price": 179.9,
            "image": "https://example.com/tenis1.jpg"
        }"#;
        let product: Product = serde_json::from_str(json).unwrap();

        assert_eq!(product.id, ProductId::new(1));
        assert_eq!(product.amount, 0);
        assert!(product.extra.is_empty());
    }

    #[test]
    fn test_extra_fields_preserved() {
        let json = r#"{"id":2,"title":"Shoe","price":10.0,"image":"","amount":3,"brand":"Rocket"}"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.extra.get("brand"), Some(&serde_json::json!("Rocket")));

        let back: Product = serde_json::from_str(&serde_json::to_string(&product).unwrap()).unwrap();
        assert_eq!(back, product);
    }

    #[test]
    fn test_line_total() {
        let product = Product::new(ProductId::new(1), "Shoe", 12.5).with_amount(4);
        assert_eq!(product.line_total(), 50.0);
    }
}
