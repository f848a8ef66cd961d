//! Checkout steps and page information.

use serde::{Deserialize, Serialize};

/// One step of the checkout flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckoutStep {
    pub name: String,
    pub position: u32,
}

impl CheckoutStep {
    pub fn new(name: impl Into<String>, position: u32) -> Self {
        Self {
            name: name.into(),
            position,
        }
    }
}

/// Page information attached to category page views.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageInfo {
    pub path: String,
    pub page: u32,
}
