//! # Observability & Tracing
//!
//! The dispatcher logs through the `tracing` crate with structured fields, and
//! every dispatch operation opens a span named after it.
//!
//! ## What Gets Traced
//!
//! - **Registration**: tracker name, capabilities and tenant lists (`info`)
//! - **Active set**: recomputation with tenant pair and active count (`debug`),
//!   cache hits (`trace`)
//! - **Fan-out**: per event, how many trackers were active, invoked and failed (`debug`);
//!   skipped trackers (`trace`)
//! - **Failures**: failing tracker and capability (`warn`), unpersisted
//!   checkout flags (`error`)
//!
//! ## Usage
//!
//! ```bash
//! # Registration and failures only
//! RUST_LOG=info cargo run
//!
//! # Fan-out summaries and tenant switches
//! RUST_LOG=tracking_framework=debug cargo run
//!
//! # Every skipped tracker and cache hit
//! RUST_LOG=trace cargo run
//! ```
//!
//! With `RUST_LOG=debug` a product view under tenant `eu/default` prints:
//!
//! ```text
//! DEBUG track_product_view: Recomputed active trackers assortment_tenant=eu checkout_tenant=default registered=2 active=2
//! DEBUG track_product_view: Fan-out done capability=product-view active=2 invoked=2 failed=0
//! ```

/// Installs a compact `fmt` subscriber filtered by `RUST_LOG`.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
