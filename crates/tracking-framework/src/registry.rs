//! # Tracker Registry
//!
//! An append-only, ordered list of trackers. Registration order is dispatch order.

use crate::commerce::Commerce;
use crate::tracker::Tracker;
use std::sync::Arc;

/// Ordered collection of registered trackers.
///
/// Duplicates are allowed; registering the same tracker twice makes it receive
/// every event twice. There is no removal.
pub struct TrackerRegistry<C: Commerce> {
    trackers: Vec<Arc<dyn Tracker<C>>>,
}

impl<C: Commerce> TrackerRegistry<C> {
    pub fn new() -> Self {
        Self {
            trackers: Vec::new(),
        }
    }

    /// Appends a tracker after every tracker registered so far.
    pub fn register(&mut self, tracker: Arc<dyn Tracker<C>>) {
        self.trackers.push(tracker);
    }

    /// All registered trackers in registration order, active or not.
    pub fn list(&self) -> &[Arc<dyn Tracker<C>>] {
        &self.trackers
    }

    pub fn len(&self) -> usize {
        self.trackers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trackers.is_empty()
    }
}

impl<C: Commerce> Default for TrackerRegistry<C> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{CallLog, RecordingTracker, TestShop};

    #[test]
    fn list_preserves_registration_order_and_duplicates() {
        let log = CallLog::new();
        let a: Arc<dyn Tracker<TestShop>> = Arc::new(RecordingTracker::new("a", &log));
        let b: Arc<dyn Tracker<TestShop>> = Arc::new(RecordingTracker::new("b", &log));

        let mut registry = TrackerRegistry::new();
        registry.register(a.clone());
        registry.register(b);
        registry.register(a);

        let names: Vec<_> = registry.list().iter().map(|t| t.name().to_string()).collect();
        assert_eq!(names, vec!["a", "b", "a"]);
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn new_registry_is_empty() {
        let registry = TrackerRegistry::<TestShop>::new();
        assert!(registry.is_empty());
        assert!(registry.list().is_empty());
    }
}
