//! Represents a placed order.
//!
//! The `tracked` flag records whether checkout-complete was already sent to the
//! trackers. It is persisted with the rest of the order by the
//! [`InMemoryOrderStore`](crate::order_store::InMemoryOrderStore).

use crate::model::CartItem;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for Orders.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderId(pub u32);

impl Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "order_{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub items: Vec<CartItem>,
    pub total: f64,
    #[serde(default)]
    pub tracked: bool,
}

impl Order {
    /// Creates a new, untracked Order.
    pub fn new(id: OrderId, items: Vec<CartItem>, total: f64) -> Self {
        Self {
            id,
            items,
            total,
            tracked: false,
        }
    }
}
