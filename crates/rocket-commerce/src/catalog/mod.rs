//! Product catalog module.
//!
//! Contains the records served by the product and stock services.

mod product;
mod stock;

pub use product::Product;
pub use stock::Stock;
