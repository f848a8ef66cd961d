//! # Tracking Sample Shop
//!
//! A small shop wired to the tracking framework, exposed as a library for
//! integration testing.
//!
//! - **[model]**: payload types ([`Product`](model::Product), [`Cart`](model::Cart),
//!   [`Order`](model::Order)) and the [`Shop`](model::Shop) commerce family.
//! - **[order_store]**: in-memory persistence for orders and their tracking flag.
//! - **[environment]**: the per-request tenant holder.
//! - **[trackers]**: a log backend and a tenant-scoped analytics backend.
//! - **[lifecycle]**: the [`TrackingSystem`](lifecycle::TrackingSystem) composition root.

pub mod environment;
pub mod lifecycle;
pub mod model;
pub mod order_store;
pub mod trackers;
