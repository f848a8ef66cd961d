//! # Commerce Type Family
//!
//! The dispatcher never looks inside products, carts or orders. It only hands
//! references to them to trackers. The host application names its own types once,
//! through the [`Commerce`] trait, and every capability trait is generic over it.

use crate::order::TrackedOrder;
use std::fmt::Debug;

/// Default quantity for cart add/remove events when the caller has none.
pub const DEFAULT_QUANTITY: f64 = 1.0;

/// The set of payload types a shop exposes to its trackers.
///
/// # Example
///
/// ```rust,ignore
/// struct Shop;
///
/// impl Commerce for Shop {
///     type Product = Product;
///     type Cart = Cart;
///     type Order = StoredOrder;
///     type CheckoutStep = CheckoutStep;
///     type Page = PageInfo;
/// }
/// ```
pub trait Commerce: Send + Sync + 'static {
    /// A sellable product.
    type Product: Send + Sync + Debug;

    /// A shopping cart.
    type Cart: Send + Sync + Debug;

    /// A placed order. Carries the write-once tracking flag.
    type Order: TrackedOrder + Debug;

    /// One step of the checkout flow (delivery address, payment, ...).
    type CheckoutStep: Send + Sync + Debug;

    /// Free-form page information attached to category page views.
    type Page: Send + Sync + Debug;
}
