//! # Test Doubles
//!
//! In-memory stand-ins for every collaborator of the [`TrackingManager`](crate::TrackingManager),
//! so dispatch logic can be tested without a real shop, session or database.
//!
//! | Double               | Stands in for        | What it records                                 |
//! |----------------------|----------------------|-------------------------------------------------|
//! | [`RecordingTracker`] | a tracker backend    | every invocation, in order, in a [`CallLog`]    |
//! | [`MockEnvironment`]  | the tenant resolver  | how often the tenants were read                 |
//! | [`MockOrder`]        | an order entity      | every `save`, answered from queued expectations |
//!
//! [`TestShop`] is a ready-made [`Commerce`] family built from plain strings.
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use tracking_framework::mock::{CallLog, MockEnvironment, MockOrder, RecordingTracker, TestShop};
//! use tracking_framework::{Capability, TrackingConfig, TrackingManager};
//!
//! #[tokio::main]
//! async fn main() {
//!     let log = CallLog::new();
//!     let environment = Arc::new(MockEnvironment::new());
//!     let manager = TrackingManager::<TestShop>::new(environment, TrackingConfig::default());
//!     manager.register_tracker(Arc::new(
//!         RecordingTracker::new("shop", &log).with(Capability::CheckoutComplete),
//!     ));
//!
//!     let mut order = MockOrder::new("order_1");
//!     order.expect_save().return_ok();
//!
//!     manager.track_checkout_complete(&mut order).await.unwrap();
//!     manager.track_checkout_complete(&mut order).await.unwrap();
//!
//!     // One save, one fan-out.
//!     order.verify();
//!     assert_eq!(log.count(Capability::CheckoutComplete), 1);
//! }
//! ```

use crate::capability::{
    Capability, CartProductAdd, CartProductRemove, CartUpdate, CategoryPageView, CheckoutComplete,
    CheckoutStart, CheckoutStep, ProductAdd, ProductImpression, ProductRemove, ProductView,
};
use crate::commerce::Commerce;
use crate::environment::Environment;
use crate::error::{OrderStoreError, TrackerError};
use crate::order::TrackedOrder;
use crate::tracker::Tracker;
use async_trait::async_trait;
use std::collections::{HashSet, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, RwLock};

// =============================================================================
// COMMERCE FAMILY
// =============================================================================

/// Commerce family with string payloads and [`MockOrder`] orders.
#[derive(Debug)]
pub struct TestShop;

impl Commerce for TestShop {
    type Product = String;
    type Cart = Vec<String>;
    type Order = MockOrder;
    type CheckoutStep = String;
    type Page = String;
}

// =============================================================================
// CALL LOG
// =============================================================================

/// Shared, ordered record of tracker invocations.
#[derive(Debug, Clone, Default)]
pub struct CallLog {
    calls: Arc<Mutex<Vec<(String, Capability)>>>,
}

impl CallLog {
    pub fn new() -> Self {
        Self::default()
    }

    fn record(&self, tracker: &str, capability: Capability) {
        self.calls
            .lock()
            .unwrap()
            .push((tracker.to_string(), capability));
    }

    /// Every `(tracker, capability)` invocation so far.
    pub fn calls(&self) -> Vec<(String, Capability)> {
        self.calls.lock().unwrap().clone()
    }

    /// Trackers invoked for `capability`, in invocation order.
    pub fn trackers_for(&self, capability: Capability) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|(_, c)| *c == capability)
            .map(|(tracker, _)| tracker)
            .collect()
    }

    pub fn count(&self, capability: Capability) -> usize {
        self.trackers_for(capability).len()
    }

    pub fn is_empty(&self) -> bool {
        self.calls.lock().unwrap().is_empty()
    }
}

// =============================================================================
// RECORDING TRACKER
// =============================================================================

/// A tracker with a configurable capability set that records every call.
///
/// Works for any [`Commerce`] family since it never looks at payloads.
///
/// ```rust
/// use tracking_framework::mock::{CallLog, RecordingTracker};
/// use tracking_framework::Capability;
///
/// let log = CallLog::new();
/// let tracker = RecordingTracker::new("ga", &log)
///     .assortment(["eu"])
///     .with(Capability::ProductView)
///     .failing_on(Capability::ProductView);
/// ```
#[derive(Debug, Clone)]
pub struct RecordingTracker {
    name: String,
    assortment_tenants: Vec<String>,
    checkout_tenants: Vec<String>,
    capabilities: HashSet<Capability>,
    failing: HashSet<Capability>,
    log: CallLog,
}

impl RecordingTracker {
    /// A tracker with no tenant restriction and no capabilities.
    pub fn new(name: impl Into<String>, log: &CallLog) -> Self {
        Self {
            name: name.into(),
            assortment_tenants: Vec::new(),
            checkout_tenants: Vec::new(),
            capabilities: HashSet::new(),
            failing: HashSet::new(),
            log: log.clone(),
        }
    }

    pub fn assortment<I, S>(mut self, tenants: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.assortment_tenants = tenants.into_iter().map(Into::into).collect();
        self
    }

    pub fn checkout<I, S>(mut self, tenants: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.checkout_tenants = tenants.into_iter().map(Into::into).collect();
        self
    }

    pub fn with(mut self, capability: Capability) -> Self {
        self.capabilities.insert(capability);
        self
    }

    pub fn with_all(mut self) -> Self {
        self.capabilities.extend(Capability::ALL);
        self
    }

    /// Implements `capability`, but every call to it fails after being recorded.
    pub fn failing_on(mut self, capability: Capability) -> Self {
        self.capabilities.insert(capability);
        self.failing.insert(capability);
        self
    }

    fn has(&self, capability: Capability) -> bool {
        self.capabilities.contains(&capability)
    }

    fn hit(&self, capability: Capability) -> Result<(), TrackerError> {
        self.log.record(&self.name, capability);
        if self.failing.contains(&capability) {
            Err(TrackerError::Rejected(format!(
                "{} refuses {capability}",
                self.name
            )))
        } else {
            Ok(())
        }
    }
}

impl<C: Commerce> Tracker<C> for RecordingTracker {
    fn name(&self) -> &str {
        &self.name
    }

    fn assortment_tenants(&self) -> &[String] {
        &self.assortment_tenants
    }

    fn checkout_tenants(&self) -> &[String] {
        &self.checkout_tenants
    }

    fn as_category_page_view(&self) -> Option<&dyn CategoryPageView<C>> {
        if self.has(Capability::CategoryPageView) {
            Some(self)
        } else {
            None
        }
    }

    fn as_product_impression(&self) -> Option<&dyn ProductImpression<C>> {
        if self.has(Capability::ProductImpression) {
            Some(self)
        } else {
            None
        }
    }

    fn as_product_view(&self) -> Option<&dyn ProductView<C>> {
        if self.has(Capability::ProductView) {
            Some(self)
        } else {
            None
        }
    }

    fn as_cart_update(&self) -> Option<&dyn CartUpdate<C>> {
        if self.has(Capability::CartUpdate) {
            Some(self)
        } else {
            None
        }
    }

    fn as_cart_product_add(&self) -> Option<&dyn CartProductAdd<C>> {
        if self.has(Capability::CartProductAdd) {
            Some(self)
        } else {
            None
        }
    }

    fn as_cart_product_remove(&self) -> Option<&dyn CartProductRemove<C>> {
        if self.has(Capability::CartProductRemove) {
            Some(self)
        } else {
            None
        }
    }

    fn as_product_add(&self) -> Option<&dyn ProductAdd<C>> {
        if self.has(Capability::ProductAdd) {
            Some(self)
        } else {
            None
        }
    }

    fn as_product_remove(&self) -> Option<&dyn ProductRemove<C>> {
        if self.has(Capability::ProductRemove) {
            Some(self)
        } else {
            None
        }
    }

    fn as_checkout_start(&self) -> Option<&dyn CheckoutStart<C>> {
        if self.has(Capability::CheckoutStart) {
            Some(self)
        } else {
            None
        }
    }

    fn as_checkout_step(&self) -> Option<&dyn CheckoutStep<C>> {
        if self.has(Capability::CheckoutStep) {
            Some(self)
        } else {
            None
        }
    }

    fn as_checkout_complete(&self) -> Option<&dyn CheckoutComplete<C>> {
        if self.has(Capability::CheckoutComplete) {
            Some(self)
        } else {
            None
        }
    }
}

#[async_trait]
impl<C: Commerce> CategoryPageView<C> for RecordingTracker {
    async fn track_category_page_view(
        &self,
        _categories: &[String],
        _page: Option<&C::Page>,
    ) -> Result<(), TrackerError> {
        self.hit(Capability::CategoryPageView)
    }
}

#[async_trait]
impl<C: Commerce> ProductImpression<C> for RecordingTracker {
    async fn track_product_impression(&self, _product: &C::Product) -> Result<(), TrackerError> {
        self.hit(Capability::ProductImpression)
    }
}

#[async_trait]
impl<C: Commerce> ProductView<C> for RecordingTracker {
    async fn track_product_view(&self, _product: &C::Product) -> Result<(), TrackerError> {
        self.hit(Capability::ProductView)
    }
}

#[async_trait]
impl<C: Commerce> CartUpdate<C> for RecordingTracker {
    async fn track_cart_update(&self, _cart: &C::Cart) -> Result<(), TrackerError> {
        self.hit(Capability::CartUpdate)
    }
}

#[async_trait]
impl<C: Commerce> CartProductAdd<C> for RecordingTracker {
    async fn track_cart_product_add(
        &self,
        _cart: &C::Cart,
        _product: &C::Product,
        _quantity: f64,
    ) -> Result<(), TrackerError> {
        self.hit(Capability::CartProductAdd)
    }
}

#[async_trait]
impl<C: Commerce> CartProductRemove<C> for RecordingTracker {
    async fn track_cart_product_remove(
        &self,
        _cart: &C::Cart,
        _product: &C::Product,
        _quantity: f64,
    ) -> Result<(), TrackerError> {
        self.hit(Capability::CartProductRemove)
    }
}

#[async_trait]
impl<C: Commerce> ProductAdd<C> for RecordingTracker {
    async fn track_product_add(
        &self,
        _product: &C::Product,
        _quantity: f64,
    ) -> Result<(), TrackerError> {
        self.hit(Capability::ProductAdd)
    }
}

#[async_trait]
impl<C: Commerce> ProductRemove<C> for RecordingTracker {
    async fn track_product_remove(
        &self,
        _product: &C::Product,
        _quantity: f64,
    ) -> Result<(), TrackerError> {
        self.hit(Capability::ProductRemove)
    }
}

#[async_trait]
impl<C: Commerce> CheckoutStart<C> for RecordingTracker {
    async fn track_checkout(&self, _cart: &C::Cart) -> Result<(), TrackerError> {
        self.hit(Capability::CheckoutStart)
    }
}

#[async_trait]
impl<C: Commerce> CheckoutStep<C> for RecordingTracker {
    async fn track_checkout_step(
        &self,
        _step: &C::CheckoutStep,
        _cart: &C::Cart,
        _step_number: Option<u32>,
        _checkout_option: Option<&str>,
    ) -> Result<(), TrackerError> {
        self.hit(Capability::CheckoutStep)
    }
}

#[async_trait]
impl<C: Commerce> CheckoutComplete<C> for RecordingTracker {
    async fn track_checkout_complete(&self, _order: &C::Order) -> Result<(), TrackerError> {
        self.hit(Capability::CheckoutComplete)
    }
}

// =============================================================================
// ENVIRONMENT
// =============================================================================

/// Environment whose tenants tests set directly.
#[derive(Debug, Default)]
pub struct MockEnvironment {
    tenants: RwLock<(Option<String>, Option<String>)>,
    reads: AtomicUsize,
}

impl MockEnvironment {
    /// An environment reporting no tenants (both resolve to `"default"`).
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tenants(assortment: &str, checkout: &str) -> Self {
        let environment = Self::new();
        environment.set(Some(assortment), Some(checkout));
        environment
    }

    pub fn set(&self, assortment: Option<&str>, checkout: Option<&str>) {
        *self.tenants.write().unwrap() = (
            assortment.map(str::to_string),
            checkout.map(str::to_string),
        );
    }

    /// Number of tenant pairs read so far.
    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }
}

impl Environment for MockEnvironment {
    fn current_assortment_tenant(&self) -> Option<String> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.tenants.read().unwrap().0.clone()
    }

    fn current_checkout_tenant(&self) -> Option<String> {
        self.tenants.read().unwrap().1.clone()
    }
}

// =============================================================================
// ORDER
// =============================================================================

/// An order whose `save` answers are queued in advance.
///
/// Every `save` pops the next expectation and panics if none is left.
///
/// ```rust
/// use tracking_framework::mock::MockOrder;
/// use tracking_framework::OrderStoreError;
///
/// let mut order = MockOrder::new("order_1");
/// order.expect_save().return_err(OrderStoreError::Storage("disk full".into()));
/// order.expect_save().return_ok();
/// ```
#[derive(Debug)]
pub struct MockOrder {
    pub id: String,
    tracked: bool,
    expectations: Arc<Mutex<VecDeque<Result<(), OrderStoreError>>>>,
    saved_flags: Vec<bool>,
}

impl MockOrder {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            tracked: false,
            expectations: Arc::new(Mutex::new(VecDeque::new())),
            saved_flags: Vec::new(),
        }
    }

    /// An order that was already tracked in an earlier request.
    pub fn already_tracked(id: impl Into<String>) -> Self {
        let mut order = Self::new(id);
        order.tracked = true;
        order
    }

    /// Expects one more `save` call.
    pub fn expect_save(&mut self) -> SaveExpectationBuilder {
        SaveExpectationBuilder {
            expectations: self.expectations.clone(),
        }
    }

    /// Tracking flag value at each successful save.
    pub fn saved_flags(&self) -> &[bool] {
        &self.saved_flags
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let exps = self.expectations.lock().unwrap();
        if !exps.is_empty() {
            panic!("Not all save expectations were met. {} remaining", exps.len());
        }
    }
}

#[async_trait]
impl TrackedOrder for MockOrder {
    fn is_tracked(&self) -> bool {
        self.tracked
    }

    fn set_tracked(&mut self, tracked: bool) {
        self.tracked = tracked;
    }

    async fn save(&mut self) -> Result<(), OrderStoreError> {
        let expectation = self.expectations.lock().unwrap().pop_front();
        match expectation {
            Some(Ok(())) => {
                self.saved_flags.push(self.tracked);
                Ok(())
            }
            Some(Err(e)) => Err(e),
            None => panic!("Unexpected save of {}", self.id),
        }
    }
}

/// Builder for `save` expectations.
pub struct SaveExpectationBuilder {
    expectations: Arc<Mutex<VecDeque<Result<(), OrderStoreError>>>>,
}

impl SaveExpectationBuilder {
    /// The save succeeds.
    pub fn return_ok(self) {
        self.expectations.lock().unwrap().push_back(Ok(()));
    }

    /// The save fails with `error`.
    pub fn return_err(self, error: OrderStoreError) {
        self.expectations.lock().unwrap().push_back(Err(error));
    }
}
