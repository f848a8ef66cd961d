//! # Tracking Framework
//!
//! A tenant-scoped, capability-based event dispatcher for e-commerce tracking.
//!
//! A shop registers any number of tracking backends ("trackers") with a
//! [`TrackingManager`]. When the shop reports a lifecycle event (a product view, a
//! cart change, a completed checkout, ...) the manager forwards it to every
//! tracker that is active for the current tenants and implements that event.
//!
//! ## Architecture Overview
//!
//! 1. **Capabilities** ([`capability`]) - one narrow async trait per event kind.
//! 2. **Trackers** ([`Tracker`]) - tenant scoping plus one capability query per trait.
//! 3. **Registry** ([`TrackerRegistry`]) - ordered list of trackers; order is dispatch order.
//! 4. **Active-tenant cache** ([`ActiveTrackerCache`]) - the filtered set for the last tenant pair.
//! 5. **Dispatcher** ([`TrackingManager`]) - capability check + in-order fan-out.
//!
//! The shop plugs in through three collaborator contracts: [`Commerce`] (payload
//! types), [`Environment`] (current tenants) and [`TrackedOrder`] (the
//! checkout-complete flag and its persistence).
//!
//! ## Tenant Scoping
//!
//! A tracker is active when EITHER its assortment tenant list OR its checkout
//! tenant list is empty or contains the current tenant. See [`cache::is_active`].
//!
//! ## Delivery
//!
//! Fan-out is in-process, sequential and best effort: no retries, no batching, no
//! queue. The one guarantee is that checkout-complete reaches trackers at most once
//! per order.
//!
//! ## Testing
//!
//! The [`mock`] module provides recording trackers, a settable environment and an
//! order double with save expectations.

pub mod cache;
pub mod capability;
pub mod commerce;
pub mod config;
pub mod environment;
pub mod error;
pub mod manager;
pub mod mock;
pub mod order;
pub mod registry;
pub mod tracing;
pub mod tracker;

// Re-export core types for convenience
pub use cache::{ActiveTrackerCache, ActiveTrackers};
pub use capability::Capability;
pub use commerce::{Commerce, DEFAULT_QUANTITY};
pub use config::{ConfigError, FanOutPolicy, TrackingConfig};
pub use environment::{Environment, TenantContext, DEFAULT_TENANT};
pub use error::{OrderStoreError, TrackerError, TrackerFailure, TrackingError};
pub use manager::TrackingManager;
pub use order::TrackedOrder;
pub use registry::TrackerRegistry;
pub use tracker::Tracker;

#[doc(hidden)]
pub use paste::paste as __paste;
