//! A tracker that writes every event to the log.
//!
//! Useful as a development backend: it is active for every tenant and implements
//! every capability, so `RUST_LOG=info` shows exactly what the shop reports.

use crate::model::{Cart, CheckoutStep, PageInfo, Product, Shop};
use crate::order_store::StoredOrder;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::info;
use tracking_framework::capability as cap;
use tracking_framework::{tracker_capabilities, Tracker, TrackerError};

#[derive(Debug, Default)]
pub struct LogTracker {
    events: AtomicUsize,
}

impl LogTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of events received so far.
    pub fn events(&self) -> usize {
        self.events.load(Ordering::SeqCst)
    }

    fn received(&self) -> Result<(), TrackerError> {
        self.events.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

impl Tracker<Shop> for LogTracker {
    fn name(&self) -> &str {
        "log"
    }

    tracker_capabilities!(Shop =>
        category_page_view,
        product_impression,
        product_view,
        cart_update,
        cart_product_add,
        cart_product_remove,
        product_add,
        product_remove,
        checkout_start,
        checkout_step,
        checkout_complete,
    );
}

#[async_trait]
impl cap::CategoryPageView<Shop> for LogTracker {
    async fn track_category_page_view(
        &self,
        categories: &[String],
        page: Option<&PageInfo>,
    ) -> Result<(), TrackerError> {
        info!(?categories, page = ?page.map(|p| p.page), "category page view");
        self.received()
    }
}

#[async_trait]
impl cap::ProductImpression<Shop> for LogTracker {
    async fn track_product_impression(&self, product: &Product) -> Result<(), TrackerError> {
        info!(product_id = %product.id, "product impression");
        self.received()
    }
}

#[async_trait]
impl cap::ProductView<Shop> for LogTracker {
    async fn track_product_view(&self, product: &Product) -> Result<(), TrackerError> {
        info!(product_id = %product.id, name = %product.name, "product view");
        self.received()
    }
}

#[async_trait]
impl cap::CartUpdate<Shop> for LogTracker {
    async fn track_cart_update(&self, cart: &Cart) -> Result<(), TrackerError> {
        info!(cart_id = %cart.id, lines = cart.items.len(), total = cart.total(), "cart update");
        self.received()
    }
}

#[async_trait]
impl cap::CartProductAdd<Shop> for LogTracker {
    async fn track_cart_product_add(
        &self,
        cart: &Cart,
        product: &Product,
        quantity: f64,
    ) -> Result<(), TrackerError> {
        info!(cart_id = %cart.id, product_id = %product.id, quantity, "cart product add");
        self.received()
    }
}

#[async_trait]
impl cap::CartProductRemove<Shop> for LogTracker {
    async fn track_cart_product_remove(
        &self,
        cart: &Cart,
        product: &Product,
        quantity: f64,
    ) -> Result<(), TrackerError> {
        info!(cart_id = %cart.id, product_id = %product.id, quantity, "cart product remove");
        self.received()
    }
}

#[async_trait]
impl cap::ProductAdd<Shop> for LogTracker {
    async fn track_product_add(&self, product: &Product, quantity: f64) -> Result<(), TrackerError> {
        info!(product_id = %product.id, quantity, "product add (deprecated)");
        self.received()
    }
}

#[async_trait]
impl cap::ProductRemove<Shop> for LogTracker {
    async fn track_product_remove(
        &self,
        product: &Product,
        quantity: f64,
    ) -> Result<(), TrackerError> {
        info!(product_id = %product.id, quantity, "product remove (deprecated)");
        self.received()
    }
}

#[async_trait]
impl cap::CheckoutStart<Shop> for LogTracker {
    async fn track_checkout(&self, cart: &Cart) -> Result<(), TrackerError> {
        info!(cart_id = %cart.id, total = cart.total(), "checkout start");
        self.received()
    }
}

#[async_trait]
impl cap::CheckoutStep<Shop> for LogTracker {
    async fn track_checkout_step(
        &self,
        step: &CheckoutStep,
        cart: &Cart,
        step_number: Option<u32>,
        checkout_option: Option<&str>,
    ) -> Result<(), TrackerError> {
        info!(
            step = %step.name,
            cart_id = %cart.id,
            ?step_number,
            ?checkout_option,
            "checkout step"
        );
        self.received()
    }
}

#[async_trait]
impl cap::CheckoutComplete<Shop> for LogTracker {
    async fn track_checkout_complete(&self, order: &StoredOrder) -> Result<(), TrackerError> {
        info!(order_id = %order.id, total = order.total, "checkout complete");
        self.received()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracking_framework::Capability;

    #[test]
    fn implements_every_capability() {
        let tracker = LogTracker::new();
        assert_eq!(
            Tracker::<Shop>::capabilities(&tracker),
            Capability::ALL.to_vec()
        );
        assert!(Tracker::<Shop>::assortment_tenants(&tracker).is_empty());
        assert!(Tracker::<Shop>::checkout_tenants(&tracker).is_empty());
    }
}
