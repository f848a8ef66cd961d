//! # Tracking Manager
//!
//! The `TrackingManager` fans e-commerce events out to registered trackers. Every
//! dispatch operation follows one pattern:
//!
//! 1. Read the current tenant pair from the [`Environment`] and fetch the active
//!    tracker snapshot from the [`ActiveTrackerCache`].
//! 2. Walk the snapshot in registration order and ask each tracker for the
//!    capability the event needs.
//! 3. Await the handler of every tracker that has it; skip the rest silently.
//!
//! Checkout-complete adds one guard: it fires at most once per order. The order's
//! tracking flag is checked, set and persisted before any tracker is called.
//!
//! ## Concurrency
//!
//! Registry and cache live behind one `Mutex`. The lock is held only to read or
//! swap the snapshot, never across an `.await`, so a slow tracker does not block
//! other requests from resolving their own active set.
//!
//! ## Failures
//!
//! With [`FanOutPolicy::FailFast`] the first failing tracker aborts the fan-out
//! and its error is returned. With [`FanOutPolicy::Isolate`] every capable
//! tracker is called and the failures are returned together.

use crate::cache::{ActiveTrackerCache, ActiveTrackers};
use crate::capability::Capability;
use crate::commerce::Commerce;
use crate::config::{FanOutPolicy, TrackingConfig};
use crate::environment::{Environment, TenantContext};
use crate::error::{TrackerError, TrackerFailure, TrackingError};
use crate::order::TrackedOrder;
use crate::registry::TrackerRegistry;
use crate::tracker::Tracker;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, error, info, instrument, trace, warn};

type TrackFuture<'a> = Pin<Box<dyn Future<Output = Result<(), TrackerError>> + Send + 'a>>;

struct TrackerState<C: Commerce> {
    registry: TrackerRegistry<C>,
    cache: ActiveTrackerCache<C>,
}

/// Tenant-aware event dispatcher.
///
/// # Example
///
/// ```rust,ignore
/// let manager = TrackingManager::new(environment, TrackingConfig::default());
/// manager.register_tracker(Arc::new(LogTracker::new()));
///
/// manager.track_product_view(&product).await?;
/// manager.track_checkout_complete(&mut order).await?;
/// ```
pub struct TrackingManager<C: Commerce> {
    environment: Arc<dyn Environment>,
    config: TrackingConfig,
    state: Mutex<TrackerState<C>>,
}

impl<C: Commerce> TrackingManager<C> {
    /// Creates a manager with no trackers.
    pub fn new(environment: Arc<dyn Environment>, config: TrackingConfig) -> Self {
        Self {
            environment,
            config,
            state: Mutex::new(TrackerState {
                registry: TrackerRegistry::new(),
                cache: ActiveTrackerCache::new(),
            }),
        }
    }

    /// Creates a manager and registers `trackers` in iteration order.
    pub fn with_trackers<I>(trackers: I, environment: Arc<dyn Environment>, config: TrackingConfig) -> Self
    where
        I: IntoIterator<Item = Arc<dyn Tracker<C>>>,
    {
        let manager = Self::new(environment, config);
        for tracker in trackers {
            manager.register_tracker(tracker);
        }
        manager
    }

    /// Appends a tracker to the dispatch order.
    ///
    /// Safe to call while other requests dispatch. The cached active set is
    /// dropped so the new tracker is seen on the next event.
    pub fn register_tracker(&self, tracker: Arc<dyn Tracker<C>>) {
        info!(
            tracker = tracker.name(),
            capabilities = ?tracker.capabilities(),
            assortment_tenants = ?tracker.assortment_tenants(),
            checkout_tenants = ?tracker.checkout_tenants(),
            "Registered tracker"
        );
        let mut state = self.state();
        state.registry.register(tracker);
        state.cache.invalidate();
    }

    /// All registered trackers, active or not, in registration order.
    pub fn trackers(&self) -> Vec<Arc<dyn Tracker<C>>> {
        self.state().registry.list().to_vec()
    }

    /// Trackers active under the environment's current tenant pair.
    pub fn active_trackers(&self) -> ActiveTrackers<C> {
        self.active_trackers_with_context().1
    }

    /// The tenant pair read from the environment together with the set computed for it.
    ///
    /// Both come from the same lookup, so the set always belongs to the returned pair
    /// even while other tasks switch tenants.
    pub fn active_trackers_with_context(&self) -> (TenantContext, ActiveTrackers<C>) {
        let context = TenantContext::current(self.environment.as_ref());
        let mut state = self.state();
        let TrackerState { registry, cache } = &mut *state;
        let trackers = cache.get_or_compute(context.clone(), registry);
        (context, trackers)
    }

    pub fn config(&self) -> &TrackingConfig {
        &self.config
    }

    fn state(&self) -> MutexGuard<'_, TrackerState<C>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // --- Dispatch operations ---

    #[instrument(skip(self, page))]
    pub async fn track_category_page_view(
        &self,
        categories: &[String],
        page: Option<&C::Page>,
    ) -> Result<(), TrackingError> {
        let active = self.active_trackers();
        self.fan_out(Capability::CategoryPageView, &active, |tracker| {
            tracker
                .as_category_page_view()
                .map(|t| t.track_category_page_view(categories, page))
        })
        .await
    }

    #[instrument(skip_all)]
    pub async fn track_product_impression(&self, product: &C::Product) -> Result<(), TrackingError> {
        let active = self.active_trackers();
        self.fan_out(Capability::ProductImpression, &active, |tracker| {
            tracker
                .as_product_impression()
                .map(|t| t.track_product_impression(product))
        })
        .await
    }

    #[instrument(skip_all)]
    pub async fn track_product_view(&self, product: &C::Product) -> Result<(), TrackingError> {
        let active = self.active_trackers();
        self.fan_out(Capability::ProductView, &active, |tracker| {
            tracker
                .as_product_view()
                .map(|t| t.track_product_view(product))
        })
        .await
    }

    #[instrument(skip_all)]
    pub async fn track_cart_update(&self, cart: &C::Cart) -> Result<(), TrackingError> {
        let active = self.active_trackers();
        self.fan_out(Capability::CartUpdate, &active, |tracker| {
            tracker.as_cart_update().map(|t| t.track_cart_update(cart))
        })
        .await
    }

    #[instrument(skip(self, cart, product))]
    pub async fn track_cart_product_add(
        &self,
        cart: &C::Cart,
        product: &C::Product,
        quantity: f64,
    ) -> Result<(), TrackingError> {
        let active = self.active_trackers();
        self.fan_out(Capability::CartProductAdd, &active, |tracker| {
            tracker
                .as_cart_product_add()
                .map(|t| t.track_cart_product_add(cart, product, quantity))
        })
        .await
    }

    #[instrument(skip(self, cart, product))]
    pub async fn track_cart_product_remove(
        &self,
        cart: &C::Cart,
        product: &C::Product,
        quantity: f64,
    ) -> Result<(), TrackingError> {
        let active = self.active_trackers();
        self.fan_out(Capability::CartProductRemove, &active, |tracker| {
            tracker
                .as_cart_product_remove()
                .map(|t| t.track_cart_product_remove(cart, product, quantity))
        })
        .await
    }

    /// Reaches only trackers implementing [`ProductAdd`](crate::capability::ProductAdd).
    #[deprecated(note = "use `track_cart_product_add` instead")]
    #[instrument(skip(self, product))]
    pub async fn track_product_add(
        &self,
        product: &C::Product,
        quantity: f64,
    ) -> Result<(), TrackingError> {
        let active = self.active_trackers();
        self.fan_out(Capability::ProductAdd, &active, |tracker| {
            tracker
                .as_product_add()
                .map(|t| t.track_product_add(product, quantity))
        })
        .await
    }

    /// Reaches only trackers implementing [`ProductRemove`](crate::capability::ProductRemove).
    #[deprecated(note = "use `track_cart_product_remove` instead")]
    #[instrument(skip(self, product))]
    pub async fn track_product_remove(
        &self,
        product: &C::Product,
        quantity: f64,
    ) -> Result<(), TrackingError> {
        let active = self.active_trackers();
        self.fan_out(Capability::ProductRemove, &active, |tracker| {
            tracker
                .as_product_remove()
                .map(|t| t.track_product_remove(product, quantity))
        })
        .await
    }

    /// Tracks the start of checkout.
    #[instrument(skip_all)]
    pub async fn track_checkout(&self, cart: &C::Cart) -> Result<(), TrackingError> {
        let active = self.active_trackers();
        self.fan_out(Capability::CheckoutStart, &active, |tracker| {
            tracker.as_checkout_start().map(|t| t.track_checkout(cart))
        })
        .await
    }

    #[instrument(skip(self, step, cart))]
    pub async fn track_checkout_step(
        &self,
        step: &C::CheckoutStep,
        cart: &C::Cart,
        step_number: Option<u32>,
        checkout_option: Option<&str>,
    ) -> Result<(), TrackingError> {
        let active = self.active_trackers();
        self.fan_out(Capability::CheckoutStep, &active, |tracker| {
            tracker
                .as_checkout_step()
                .map(|t| t.track_checkout_step(step, cart, step_number, checkout_option))
        })
        .await
    }

    /// Tracks a completed checkout, at most once per order.
    ///
    /// An order whose flag is already set returns `Ok(())` without touching any
    /// tracker. Otherwise the flag is set and saved first; if the save fails the
    /// flag is reset and [`TrackingError::Persistence`] is returned without a
    /// fan-out.
    #[instrument(skip_all)]
    pub async fn track_checkout_complete(&self, order: &mut C::Order) -> Result<(), TrackingError> {
        if order.is_tracked() {
            debug!(?order, "Checkout already tracked, skipping");
            return Ok(());
        }

        order.set_tracked(true);
        if let Err(e) = order.save().await {
            order.set_tracked(false);
            error!(error = %e, "Could not persist tracking flag, checkout not dispatched");
            return Err(e.into());
        }
        debug!("Tracking flag persisted");

        let order: &C::Order = order;
        let active = self.active_trackers();
        self.fan_out(Capability::CheckoutComplete, &active, |tracker| {
            tracker
                .as_checkout_complete()
                .map(|t| t.track_checkout_complete(order))
        })
        .await
    }

    /// Invokes `invoke` on every tracker of `trackers`, in order, awaiting each handler.
    ///
    /// `invoke` returns `None` for trackers lacking the capability.
    async fn fan_out<'a, F>(
        &self,
        capability: Capability,
        trackers: &'a [Arc<dyn Tracker<C>>],
        invoke: F,
    ) -> Result<(), TrackingError>
    where
        F: Fn(&'a dyn Tracker<C>) -> Option<TrackFuture<'a>> + Send,
    {
        let mut invoked = 0usize;
        let mut failures = Vec::new();

        for tracker in trackers {
            let Some(handler) = invoke(tracker.as_ref()) else {
                trace!(tracker = tracker.name(), %capability, "Capability not implemented, skipped");
                continue;
            };
            invoked += 1;

            if let Err(e) = handler.await {
                warn!(tracker = tracker.name(), %capability, error = %e, "Tracker failed");
                match self.config.fan_out {
                    FanOutPolicy::FailFast => {
                        return Err(TrackingError::Tracker {
                            tracker: tracker.name().to_string(),
                            capability,
                            source: e,
                        });
                    }
                    FanOutPolicy::Isolate => failures.push(TrackerFailure {
                        tracker: tracker.name().to_string(),
                        error: e,
                    }),
                }
            }
        }

        debug!(%capability, active = trackers.len(), invoked, failed = failures.len(), "Fan-out done");

        if failures.is_empty() {
            Ok(())
        } else {
            Err(TrackingError::PartialFanOut {
                capability,
                failures,
            })
        }
    }
}
