//! Shopping cart payloads.

use crate::model::{Product, ProductId};
use serde::{Deserialize, Serialize};

/// One line of a cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub product_id: ProductId,
    pub quantity: f64,
    pub unit_price: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    pub id: String,
    pub items: Vec<CartItem>,
}

impl Cart {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            items: Vec::new(),
        }
    }

    /// Adds `quantity` of `product`, merging with an existing line.
    pub fn add(&mut self, product: &Product, quantity: f64) {
        match self.items.iter_mut().find(|i| i.product_id == product.id) {
            Some(item) => item.quantity += quantity,
            None => self.items.push(CartItem {
                product_id: product.id.clone(),
                quantity,
                unit_price: product.price,
            }),
        }
    }

    /// Removes up to `quantity` of `product`; drops the line when it reaches zero.
    pub fn remove(&mut self, product: &Product, quantity: f64) {
        if let Some(item) = self.items.iter_mut().find(|i| i.product_id == product.id) {
            item.quantity -= quantity;
        }
        self.items.retain(|i| i.quantity > 0.0);
    }

    pub fn total(&self) -> f64 {
        self.items.iter().map(|i| i.quantity * i.unit_price).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_merges_lines_and_remove_drops_empty_ones() {
        let shoe = Product::new(ProductId(1), "Runner", "shoes", 80.0);
        let sock = Product::new(ProductId(2), "Sock", "socks", 5.0);
        let mut cart = Cart::new("cart_1");

        cart.add(&shoe, 1.0);
        cart.add(&shoe, 1.0);
        cart.add(&sock, 3.0);
        assert_eq!(cart.items.len(), 2);
        assert_eq!(cart.total(), 175.0);

        cart.remove(&sock, 3.0);
        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.items[0].quantity, 2.0);
    }
}
