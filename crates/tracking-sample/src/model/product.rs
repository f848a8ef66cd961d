//! Represents a product in the catalog.
//!
//! Products are read-only payloads as far as tracking goes: trackers receive a
//! reference and report whatever fields their backend expects.

use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for Products.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProductId(pub u32);

impl Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "product_{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub category: String,
    pub price: f64,
}

impl Product {
    /// Creates a new Product instance.
    ///
    /// # Arguments
    /// * `id` - Unique identifier
    /// * `name` - Product name
    /// * `category` - Category the product is listed under
    /// * `price` - Unit price
    pub fn new(
        id: ProductId,
        name: impl Into<String>,
        category: impl Into<String>,
        price: f64,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            category: category.into(),
            price,
        }
    }
}
