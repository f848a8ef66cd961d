use std::sync::Arc;
use tracking_framework::mock::{CallLog, RecordingTracker};
use tracking_framework::{Capability, TrackingConfig, DEFAULT_QUANTITY};
use tracking_sample::lifecycle::TrackingSystem;
use tracking_sample::model::{Cart, CheckoutStep, PageInfo, Product, ProductId};

fn runner() -> Product {
    Product::new(ProductId(1), "Runner", "shoes", 80.0)
}

fn actions(hits: &[tracking_sample::trackers::AnalyticsHit]) -> Vec<&str> {
    hits.iter().map(|h| h.action.as_str()).collect()
}

/// Full shopping session under one tenant pair, with every collaborator real.
#[tokio::test]
async fn test_full_session_reaches_scoped_trackers() {
    let system = TrackingSystem::new(TrackingConfig::default());
    system.environment.set_assortment_tenant("eu");
    system.environment.set_checkout_tenant("b2b");
    let manager = &system.manager;
    let product = runner();

    manager
        .track_category_page_view(&["shoes".to_string()], Some(&PageInfo::default()))
        .await
        .expect("category page view");
    manager.track_product_impression(&product).await.unwrap();
    manager.track_product_view(&product).await.unwrap();

    let mut cart = Cart::new("cart_1");
    cart.add(&product, DEFAULT_QUANTITY);
    manager
        .track_cart_product_add(&cart, &product, DEFAULT_QUANTITY)
        .await
        .unwrap();
    manager.track_cart_update(&cart).await.unwrap();
    manager.track_checkout(&cart).await.unwrap();
    manager
        .track_checkout_step(&CheckoutStep::new("shipping", 1), &cart, None, Some("express"))
        .await
        .unwrap();

    let order_id = system.orders.place(&cart);
    let mut order = system.orders.open(&order_id).unwrap();
    manager.track_checkout_complete(&mut order).await.unwrap();

    // Log tracker is unscoped and implements everything
    assert_eq!(system.log.events(), 8);

    // EU analytics only gets the events it implements
    assert_eq!(
        actions(&system.eu_analytics.hits()),
        vec!["impression", "detail", "add", "checkout", "purchase"]
    );

    // US analytics is scoped to us/retail, neither axis matches eu/b2b
    assert!(system.us_analytics.hits().is_empty());

    let hits = system.eu_analytics.hits();
    let purchase = &hits[4];
    assert_eq!(purchase.payload["total"], 80.0);
    assert_eq!(purchase.payload["tracked"], true);

    let mut fields: Vec<_> = purchase
        .payload
        .as_object()
        .expect("purchase payload is an object")
        .keys()
        .map(String::as_str)
        .collect();
    fields.sort_unstable();
    assert_eq!(fields, vec!["id", "items", "total", "tracked"]);
}

#[tokio::test]
async fn test_checkout_complete_is_reported_once() {
    let system = TrackingSystem::default();
    system.environment.set_assortment_tenant("eu");

    let mut cart = Cart::new("cart_1");
    cart.add(&runner(), 2.0);
    let order_id = system.orders.place(&cart);

    let mut order = system.orders.open(&order_id).unwrap();
    system.manager.track_checkout_complete(&mut order).await.unwrap();
    system.manager.track_checkout_complete(&mut order).await.unwrap();

    // A fresh handle loads the persisted flag
    let mut reloaded = system.orders.open(&order_id).unwrap();
    system
        .manager
        .track_checkout_complete(&mut reloaded)
        .await
        .unwrap();

    assert_eq!(system.log.events(), 1);
    assert_eq!(actions(&system.eu_analytics.hits()), vec!["purchase"]);
    assert_eq!(system.orders.save_count(), 1);
    assert!(system.orders.get(&order_id).unwrap().tracked);
}

#[tokio::test]
async fn test_either_tenant_axis_activates_a_tracker() {
    let system = TrackingSystem::default();

    // US assortment matches UA-US, b2b checkout matches UA-EU
    system.environment.set_assortment_tenant("us");
    system.environment.set_checkout_tenant("b2b");
    system.manager.track_product_view(&runner()).await.unwrap();

    assert_eq!(system.eu_analytics.hits().len(), 1);
    assert_eq!(system.us_analytics.hits().len(), 1);

    let active: Vec<String> = system
        .manager
        .active_trackers()
        .iter()
        .map(|t| t.name().to_string())
        .collect();
    assert_eq!(active, vec!["log", "analytics[UA-EU]", "analytics[UA-US]"]);
}

#[tokio::test]
async fn test_default_tenants_only_reach_unscoped_trackers() {
    let system = TrackingSystem::default();

    system.manager.track_product_view(&runner()).await.unwrap();

    assert_eq!(system.log.events(), 1);
    assert!(system.eu_analytics.hits().is_empty());
    assert!(system.us_analytics.hits().is_empty());
}

#[tokio::test]
async fn test_tracker_registered_at_runtime_receives_events() {
    let system = TrackingSystem::default();
    let log = CallLog::new();
    system.manager.register_tracker(Arc::new(
        RecordingTracker::new("late", &log).with(Capability::ProductView),
    ));

    system.manager.track_product_view(&runner()).await.unwrap();
    system.manager.track_cart_update(&Cart::new("c")).await.unwrap();

    assert_eq!(log.trackers_for(Capability::ProductView), vec!["late"]);
    assert_eq!(log.count(Capability::CartUpdate), 0);
    assert_eq!(system.log.events(), 2);
}

#[test]
fn test_config_deserializes_from_json() {
    let config: TrackingConfig = serde_json::from_str(r#"{ "fan-out": "isolate" }"#).unwrap();
    assert_eq!(config.fan_out, tracking_framework::FanOutPolicy::Isolate);

    let empty: TrackingConfig = serde_json::from_str("{}").unwrap();
    assert_eq!(empty, TrackingConfig::default());
}
