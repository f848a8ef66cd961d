//! # Analytics Tracker
//!
//! Collects events as JSON hits for a web analytics property, the way an
//! enhanced-ecommerce backend would before shipping them to its collector. Each
//! instance can be scoped to assortment and checkout tenants, so one shop can feed
//! separate properties per region or customer group.
//!
//! Hits are kept in memory; [`AnalyticsTracker::hits`] returns them in arrival order.

use crate::model::{Cart, CheckoutStep, Product, Shop};
use crate::order_store::StoredOrder;
use async_trait::async_trait;
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::{Mutex, PoisonError};
use tracing::debug;
use tracking_framework::capability as cap;
use tracking_framework::{tracker_capabilities, Tracker, TrackerError};

/// One recorded analytics hit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyticsHit {
    pub property: String,
    pub action: String,
    pub payload: Value,
}

#[derive(Debug)]
pub struct AnalyticsTracker {
    name: String,
    property: String,
    assortment_tenants: Vec<String>,
    checkout_tenants: Vec<String>,
    hits: Mutex<Vec<AnalyticsHit>>,
}

impl AnalyticsTracker {
    /// Creates an unscoped tracker reporting to `property`.
    pub fn new(property: impl Into<String>) -> Self {
        let property = property.into();
        Self {
            name: format!("analytics[{property}]"),
            property,
            assortment_tenants: Vec::new(),
            checkout_tenants: Vec::new(),
            hits: Mutex::new(Vec::new()),
        }
    }

    pub fn assortment_tenants<I, S>(mut self, tenants: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.assortment_tenants = tenants.into_iter().map(Into::into).collect();
        self
    }

    pub fn checkout_tenants<I, S>(mut self, tenants: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.checkout_tenants = tenants.into_iter().map(Into::into).collect();
        self
    }

    pub fn hits(&self) -> Vec<AnalyticsHit> {
        self.hits
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn record(&self, action: &str, payload: Value) -> Result<(), TrackerError> {
        debug!(property = %self.property, action, "Analytics hit recorded");
        self.hits
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(AnalyticsHit {
                property: self.property.clone(),
                action: action.to_string(),
                payload,
            });
        Ok(())
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<Value, TrackerError> {
    serde_json::to_value(value).map_err(TrackerError::backend)
}

impl Tracker<Shop> for AnalyticsTracker {
    fn name(&self) -> &str {
        &self.name
    }

    fn assortment_tenants(&self) -> &[String] {
        &self.assortment_tenants
    }

    fn checkout_tenants(&self) -> &[String] {
        &self.checkout_tenants
    }

    tracker_capabilities!(Shop =>
        product_impression,
        product_view,
        cart_product_add,
        cart_product_remove,
        checkout_step,
        checkout_complete,
    );
}

#[async_trait]
impl cap::ProductImpression<Shop> for AnalyticsTracker {
    async fn track_product_impression(&self, product: &Product) -> Result<(), TrackerError> {
        self.record("impression", to_json(product)?)
    }
}

#[async_trait]
impl cap::ProductView<Shop> for AnalyticsTracker {
    async fn track_product_view(&self, product: &Product) -> Result<(), TrackerError> {
        self.record("detail", to_json(product)?)
    }
}

#[async_trait]
impl cap::CartProductAdd<Shop> for AnalyticsTracker {
    async fn track_cart_product_add(
        &self,
        cart: &Cart,
        product: &Product,
        quantity: f64,
    ) -> Result<(), TrackerError> {
        if quantity <= 0.0 {
            return Err(TrackerError::Rejected(format!(
                "quantity must be positive, got {quantity}"
            )));
        }
        self.record(
            "add",
            json!({ "cart": cart.id, "product": to_json(product)?, "quantity": quantity }),
        )
    }
}

#[async_trait]
impl cap::CartProductRemove<Shop> for AnalyticsTracker {
    async fn track_cart_product_remove(
        &self,
        cart: &Cart,
        product: &Product,
        quantity: f64,
    ) -> Result<(), TrackerError> {
        self.record(
            "remove",
            json!({ "cart": cart.id, "product": to_json(product)?, "quantity": quantity }),
        )
    }
}

#[async_trait]
impl cap::CheckoutStep<Shop> for AnalyticsTracker {
    async fn track_checkout_step(
        &self,
        step: &CheckoutStep,
        cart: &Cart,
        step_number: Option<u32>,
        checkout_option: Option<&str>,
    ) -> Result<(), TrackerError> {
        self.record(
            "checkout",
            json!({
                "step": step_number.unwrap_or(step.position),
                "name": step.name,
                "option": checkout_option,
                "items": to_json(&cart.items)?,
            }),
        )
    }
}

#[async_trait]
impl cap::CheckoutComplete<Shop> for AnalyticsTracker {
    async fn track_checkout_complete(&self, order: &StoredOrder) -> Result<(), TrackerError> {
        let order: &crate::model::Order = order;
        self.record("purchase", to_json(order)?)
    }
}
