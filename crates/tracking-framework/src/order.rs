//! # Order Collaborator
//!
//! Checkout-complete must reach trackers at most once per order. The order itself
//! remembers whether it was tracked, and persists that flag through its own store
//! before any tracker is called.

use crate::error::OrderStoreError;
use async_trait::async_trait;

/// Contract the dispatcher needs from an order entity.
///
/// The tracking flag is a dedicated boolean that moves from `false` to `true`
/// once (`UNTRACKED -> TRACKING -> TRACKED`, where `TRACKING` is the window
/// between the persisted flag and the end of the fan-out). The dispatcher reads
/// it, sets it, and calls [`save`](TrackedOrder::save) before fanning out. If
/// `save` fails the dispatcher resets the flag to `false`.
#[async_trait]
pub trait TrackedOrder: Send + Sync {
    /// Whether checkout-complete was already dispatched for this order.
    fn is_tracked(&self) -> bool;

    /// Sets the in-memory tracking flag.
    fn set_tracked(&mut self, tracked: bool);

    /// Persists the current state of the order, including the flag.
    async fn save(&mut self) -> Result<(), OrderStoreError>;
}
