use crate::environment::SessionEnvironment;
use crate::model::Shop;
use crate::order_store::InMemoryOrderStore;
use crate::trackers::{AnalyticsTracker, LogTracker};
use std::sync::Arc;
use tracing::info;
use tracking_framework::{Tracker, TrackingConfig, TrackingManager};

pub const EU_PROPERTY: &str = "UA-EU";
pub const US_PROPERTY: &str = "UA-US";

/// The wired-up sample shop.
pub struct TrackingSystem {
    pub manager: Arc<TrackingManager<Shop>>,
    pub environment: Arc<SessionEnvironment>,
    pub orders: InMemoryOrderStore,
    pub log: Arc<LogTracker>,
    pub eu_analytics: Arc<AnalyticsTracker>,
    pub us_analytics: Arc<AnalyticsTracker>,
}

impl TrackingSystem {
    pub fn new(config: TrackingConfig) -> Self {
        let environment = Arc::new(SessionEnvironment::new());

        let log = Arc::new(LogTracker::new());
        let eu_analytics = Arc::new(
            AnalyticsTracker::new(EU_PROPERTY)
                .assortment_tenants(["eu"])
                .checkout_tenants(["b2b"]),
        );
        let us_analytics = Arc::new(
            AnalyticsTracker::new(US_PROPERTY)
                .assortment_tenants(["us"])
                .checkout_tenants(["retail"]),
        );

        let trackers: [Arc<dyn Tracker<Shop>>; 3] = [
            log.clone(),
            eu_analytics.clone(),
            us_analytics.clone(),
        ];
        let manager = Arc::new(TrackingManager::with_trackers(
            trackers,
            environment.clone(),
            config,
        ));

        info!(
            trackers = manager.trackers().len(),
            fan_out = ?manager.config().fan_out,
            "Tracking system ready"
        );

        Self {
            manager,
            environment,
            orders: InMemoryOrderStore::new(),
            log,
            eu_analytics,
            us_analytics,
        }
    }
}

impl Default for TrackingSystem {
    fn default() -> Self {
        Self::new(TrackingConfig::default())
    }
}
