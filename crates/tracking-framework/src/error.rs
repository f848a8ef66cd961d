//! # Tracking Errors
//!
//! This module defines the error types used throughout the tracking framework.
//! Trackers, order stores and the dispatcher each get their own type so a caller
//! can tell a misbehaving backend apart from a storage failure.

use crate::capability::Capability;

/// Errors a capability handler may return while receiving an event.
#[derive(Debug, thiserror::Error)]
pub enum TrackerError {
    /// The backend refused the event (bad payload, disabled property, ...).
    #[error("Event rejected: {0}")]
    Rejected(String),
    /// The backend failed for a reason of its own (transport, serialisation, ...).
    #[error("Backend error: {0}")]
    Backend(Box<dyn std::error::Error + Send + Sync>),
}

impl TrackerError {
    /// Wraps any backend error.
    pub fn backend<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        TrackerError::Backend(Box::new(error))
    }
}

/// Errors reported by the order collaborator when persisting the tracking flag.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum OrderStoreError {
    #[error("Order not found: {0}")]
    NotFound(String),
    #[error("Order storage error: {0}")]
    Storage(String),
}

/// One tracker that failed while an event was fanned out in isolate mode.
#[derive(Debug)]
pub struct TrackerFailure {
    pub tracker: String,
    pub error: TrackerError,
}

/// Errors returned by the dispatch operations of [`TrackingManager`](crate::TrackingManager).
#[derive(Debug, thiserror::Error)]
pub enum TrackingError {
    /// A tracker failed and the remaining fan-out was aborted.
    #[error("Tracker {tracker} failed on {capability}: {source}")]
    Tracker {
        tracker: String,
        capability: Capability,
        #[source]
        source: TrackerError,
    },
    /// Every active tracker was invoked, but some of them failed.
    #[error("{} tracker(s) failed on {capability}", .failures.len())]
    PartialFanOut {
        capability: Capability,
        failures: Vec<TrackerFailure>,
    },
    /// The checkout-complete flag could not be persisted; nothing was dispatched.
    #[error("Could not persist tracking flag: {0}")]
    Persistence(#[from] OrderStoreError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_fan_out_reports_failure_count() {
        let err = TrackingError::PartialFanOut {
            capability: Capability::ProductView,
            failures: vec![
                TrackerFailure {
                    tracker: "a".into(),
                    error: TrackerError::Rejected("nope".into()),
                },
                TrackerFailure {
                    tracker: "b".into(),
                    error: TrackerError::Rejected("nope".into()),
                },
            ],
        };
        assert_eq!(err.to_string(), "2 tracker(s) failed on product-view");
    }

    #[test]
    fn store_error_converts_into_persistence() {
        let err: TrackingError = OrderStoreError::Storage("disk full".into()).into();
        assert!(matches!(err, TrackingError::Persistence(_)));
        assert_eq!(
            err.to_string(),
            "Could not persist tracking flag: Order storage error: disk full"
        );
    }
}
