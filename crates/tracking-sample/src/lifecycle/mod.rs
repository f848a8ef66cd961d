//! # System Lifecycle & Wiring
//!
//! Individual trackers are simple; wiring them to the shop is where the
//! decisions live. This module is the composition root of the sample shop.
//!
//! ## The TrackingSystem Pattern
//!
//! [`TrackingSystem`] builds every collaborator once and hands out shared handles:
//!
//! ```rust,ignore
//! let system = TrackingSystem::new(TrackingConfig::from_env()?);
//!
//! system.environment.set_assortment_tenant("eu");
//! system.manager.track_product_view(&product).await?;
//!
//! let order_id = system.orders.place(&cart);
//! let mut order = system.orders.open(&order_id)?;
//! system.manager.track_checkout_complete(&mut order).await?;
//! ```
//!
//! 1. **Environment** - one [`SessionEnvironment`](crate::environment::SessionEnvironment)
//!    the request handlers write the current tenants to.
//! 2. **Order store** - the [`InMemoryOrderStore`](crate::order_store::InMemoryOrderStore)
//!    that persists the checkout tracking flag.
//! 3. **Trackers** - registered in a fixed order, which is also the order every
//!    event reaches them in.
//!
//! | Order | Tracker              | Assortment tenants | Checkout tenants |
//! |-------|----------------------|--------------------|------------------|
//! | 1     | `log`                | any                | any              |
//! | 2     | `analytics[UA-EU]`   | `eu`               | `b2b`            |
//! | 3     | `analytics[UA-US]`   | `us`               | `retail`         |
//!
//! Because a tracker is active when either axis matches, `analytics[UA-EU]` also
//! receives events from US assortment visitors checking out as `b2b`.
//!
//! ## Shutdown
//!
//! Nothing runs in the background: dispatch happens inline in the caller's task.
//! Dropping the system drops every tracker.

pub mod tracking_system;

pub use tracking_system::*;
