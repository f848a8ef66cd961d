//! Tracker backends shipped with the sample shop.
//!
//! | Tracker              | Tenants          | Capabilities                               |
//! |----------------------|------------------|--------------------------------------------|
//! | [`LogTracker`]       | any              | all, including the deprecated product ones |
//! | [`AnalyticsTracker`] | configurable     | views, impressions, cart lines, checkout   |

pub mod analytics_tracker;
pub mod log_tracker;

pub use analytics_tracker::{AnalyticsHit, AnalyticsTracker};
pub use log_tracker::LogTracker;
