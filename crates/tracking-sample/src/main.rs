//! # Tracking Sample Shop
//!
//! Walks one customer through the shop and reports every step to the trackers.
//!
//! 1. Builds the [`TrackingSystem`] from `TRACKING_FAN_OUT`.
//! 2. Browses and fills a cart under the `eu/b2b` tenants.
//! 3. Checks out, then reports the completed order twice to show it is tracked once.
//! 4. Switches to `us/retail` and views a product again.
//!
//! Run with `RUST_LOG=info` to see the log tracker, `RUST_LOG=debug` for fan-out summaries.

use tracing::{info, Instrument};
use tracking_framework::tracing::setup_tracing;
use tracking_framework::{TrackingConfig, DEFAULT_QUANTITY};
use tracking_sample::lifecycle::TrackingSystem;
use tracking_sample::model::{Cart, CheckoutStep, PageInfo, Product, ProductId};

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    let config = TrackingConfig::from_env().map_err(|e| e.to_string())?;
    let system = TrackingSystem::new(config);
    let manager = &system.manager;

    let runner = Product::new(ProductId(1), "Runner", "shoes", 80.0);
    let sock = Product::new(ProductId(2), "Sock", "socks", 5.0);

    system.environment.set_assortment_tenant("eu");
    system.environment.set_checkout_tenant("b2b");

    let span = tracing::info_span!("browsing", tenants = "eu/b2b");
    let cart = async {
        manager
            .track_category_page_view(&["shoes".to_string()], Some(&PageInfo::default()))
            .await?;
        manager.track_product_impression(&runner).await?;
        manager.track_product_view(&runner).await?;

        let mut cart = Cart::new("cart_1");
        cart.add(&runner, DEFAULT_QUANTITY);
        manager
            .track_cart_product_add(&cart, &runner, DEFAULT_QUANTITY)
            .await?;
        cart.add(&sock, 3.0);
        manager.track_cart_product_add(&cart, &sock, 3.0).await?;
        cart.remove(&sock, 1.0);
        manager.track_cart_product_remove(&cart, &sock, 1.0).await?;
        manager.track_cart_update(&cart).await?;
        Ok::<_, tracking_framework::TrackingError>(cart)
    }
    .instrument(span)
    .await
    .map_err(|e| e.to_string())?;

    let span = tracing::info_span!("checkout", cart_id = %cart.id);
    async {
        manager.track_checkout(&cart).await?;
        manager
            .track_checkout_step(&CheckoutStep::new("shipping", 1), &cart, None, Some("express"))
            .await?;
        manager
            .track_checkout_step(&CheckoutStep::new("payment", 2), &cart, None, None)
            .await?;

        let order_id = system.orders.place(&cart);
        let mut order = system
            .orders
            .open(&order_id)
            .map_err(tracking_framework::OrderStoreError::from)?;
        manager.track_checkout_complete(&mut order).await?;

        // A reload of the confirmation page reports the order again.
        manager.track_checkout_complete(&mut order).await?;
        Ok::<_, tracking_framework::TrackingError>(())
    }
    .instrument(span)
    .await
    .map_err(|e| e.to_string())?;

    system.environment.set_assortment_tenant("us");
    system.environment.set_checkout_tenant("retail");
    manager
        .track_product_view(&runner)
        .await
        .map_err(|e| e.to_string())?;

    info!(
        log_events = system.log.events(),
        eu_hits = system.eu_analytics.hits().len(),
        us_hits = system.us_analytics.hits().len(),
        saves = system.orders.save_count(),
        "Application completed successfully"
    );
    Ok(())
}
