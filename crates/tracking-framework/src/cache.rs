//! # Active-Tenant Cache
//!
//! Most requests dispatch many events under one tenant pair, so the filtered
//! tracker set is computed once per pair and reused until the pair changes.
//!
//! The cache holds a single entry: the last [`TenantContext`] and the trackers
//! active under it. The entry is an immutable snapshot replaced as a whole, so a
//! reader gets either the old pair with the old set or the new pair with the new
//! set, never a mix.

use crate::commerce::Commerce;
use crate::environment::TenantContext;
use crate::registry::TrackerRegistry;
use crate::tracker::Tracker;
use std::sync::Arc;
use tracing::{debug, trace};

/// Immutable, ordered snapshot of active trackers.
pub type ActiveTrackers<C> = Arc<[Arc<dyn Tracker<C>>]>;

struct CachedSet<C: Commerce> {
    context: TenantContext,
    trackers: ActiveTrackers<C>,
}

/// Memoized active-tracker subset for the most recent tenant pair.
pub struct ActiveTrackerCache<C: Commerce> {
    entry: Option<CachedSet<C>>,
}

impl<C: Commerce> ActiveTrackerCache<C> {
    /// Creates an empty cache. The first lookup always recomputes.
    pub fn new() -> Self {
        Self { entry: None }
    }

    /// Returns the active set for `context`, recomputing from `registry` on a miss.
    pub fn get_or_compute(
        &mut self,
        context: TenantContext,
        registry: &TrackerRegistry<C>,
    ) -> ActiveTrackers<C> {
        if let Some(cached) = &self.entry {
            if cached.context == context {
                trace!(tenants = %context, "Active trackers cache hit");
                return cached.trackers.clone();
            }
        }

        let trackers: ActiveTrackers<C> = registry
            .list()
            .iter()
            .filter(|tracker| is_active(tracker.as_ref(), &context))
            .cloned()
            .collect();

        debug!(
            assortment_tenant = %context.assortment_tenant,
            checkout_tenant = %context.checkout_tenant,
            registered = registry.len(),
            active = trackers.len(),
            "Recomputed active trackers"
        );

        self.entry = Some(CachedSet {
            context,
            trackers: trackers.clone(),
        });
        trackers
    }

    /// Drops the cached entry so the next lookup recomputes.
    pub fn invalidate(&mut self) {
        self.entry = None;
    }

    /// The tenant pair of the cached entry, if any.
    pub fn cached_context(&self) -> Option<&TenantContext> {
        self.entry.as_ref().map(|cached| &cached.context)
    }
}

impl<C: Commerce> Default for ActiveTrackerCache<C> {
    fn default() -> Self {
        Self::new()
    }
}

/// A tracker is active if EITHER axis matches.
///
/// An axis matches when its tenant list is empty or contains the current tenant.
/// A tracker scoped to checkout tenant `vip` with no assortment list is therefore
/// active for every assortment tenant, and a tracker scoped to assortment `eu`
/// with no checkout list is active for every checkout tenant.
pub fn is_active<C: Commerce>(tracker: &dyn Tracker<C>, context: &TenantContext) -> bool {
    axis_matches(tracker.assortment_tenants(), &context.assortment_tenant)
        || axis_matches(tracker.checkout_tenants(), &context.checkout_tenant)
}

fn axis_matches(tenants: &[String], current: &str) -> bool {
    tenants.is_empty() || tenants.iter().any(|tenant| tenant == current)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{CallLog, RecordingTracker, TestShop};

    fn registry_of(trackers: Vec<RecordingTracker>) -> TrackerRegistry<TestShop> {
        let mut registry = TrackerRegistry::new();
        for tracker in trackers {
            registry.register(Arc::new(tracker));
        }
        registry
    }

    fn names(trackers: &ActiveTrackers<TestShop>) -> Vec<String> {
        trackers.iter().map(|t| t.name().to_string()).collect()
    }

    #[test]
    fn same_context_returns_the_same_snapshot() {
        let log = CallLog::new();
        let registry = registry_of(vec![RecordingTracker::new("a", &log)]);
        let mut cache = ActiveTrackerCache::new();

        let first = cache.get_or_compute(TenantContext::new("eu", "default"), &registry);
        let second = cache.get_or_compute(TenantContext::new("eu", "default"), &registry);

        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn context_change_recomputes() {
        let log = CallLog::new();
        let registry = registry_of(vec![
            RecordingTracker::new("a", &log).assortment(["eu"]).checkout(["eu"]),
            RecordingTracker::new("b", &log),
        ]);
        let mut cache = ActiveTrackerCache::new();

        let eu = cache.get_or_compute(TenantContext::new("eu", "default"), &registry);
        let us = cache.get_or_compute(TenantContext::new("us", "default"), &registry);

        assert!(!Arc::ptr_eq(&eu, &us));
        assert_eq!(names(&eu), vec!["a", "b"]);
        assert_eq!(names(&us), vec!["b"]);
        assert_eq!(
            cache.cached_context(),
            Some(&TenantContext::new("us", "default"))
        );
    }

    #[test]
    fn unscoped_tracker_is_active_everywhere() {
        let log = CallLog::new();
        let tracker = RecordingTracker::new("any", &log);
        for (assortment, checkout) in [("default", "default"), ("eu", "b2b"), ("x", "y")] {
            assert!(is_active::<TestShop>(
                &tracker,
                &TenantContext::new(assortment, checkout)
            ));
        }
    }

    #[test]
    fn checkout_scope_matches_regardless_of_assortment() {
        let log = CallLog::new();
        let vip = RecordingTracker::new("vip", &log).checkout(["vip"]);

        // No assortment restriction, so the assortment axis alone already matches.
        assert!(is_active::<TestShop>(&vip, &TenantContext::new("us", "vip")));
        assert!(is_active::<TestShop>(&vip, &TenantContext::new("us", "other")));

        let strict = RecordingTracker::new("strict", &log)
            .assortment(["eu"])
            .checkout(["vip"]);
        assert!(is_active::<TestShop>(&strict, &TenantContext::new("us", "vip")));
        assert!(is_active::<TestShop>(&strict, &TenantContext::new("eu", "other")));
        assert!(!is_active::<TestShop>(&strict, &TenantContext::new("us", "other")));
    }

    #[test]
    fn invalidate_forces_recompute() {
        let log = CallLog::new();
        let registry = registry_of(vec![RecordingTracker::new("a", &log)]);
        let mut cache = ActiveTrackerCache::new();

        let first = cache.get_or_compute(TenantContext::default(), &registry);
        cache.invalidate();
        assert!(cache.cached_context().is_none());
        let second = cache.get_or_compute(TenantContext::default(), &registry);

        assert!(!Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn empty_registry_yields_empty_set() {
        let registry = TrackerRegistry::<TestShop>::new();
        let mut cache = ActiveTrackerCache::new();
        assert!(cache
            .get_or_compute(TenantContext::default(), &registry)
            .is_empty());
    }
}
