//! # Capabilities
//!
//! Every trackable event kind is a separate, narrow trait. A tracker implements
//! any subset of them; none implies another. The dispatcher asks each tracker
//! for a capability through the accessors on [`Tracker`](crate::Tracker) and
//! skips the trackers that answer `None`.
//!
//! | Capability                  | Trait                 | Dispatch operation                  |
//! |-----------------------------|-----------------------|-------------------------------------|
//! | `category-page-view`        | [`CategoryPageView`]  | `track_category_page_view`          |
//! | `product-impression`        | [`ProductImpression`] | `track_product_impression`          |
//! | `product-view`              | [`ProductView`]       | `track_product_view`                |
//! | `cart-update`               | [`CartUpdate`]        | `track_cart_update`                 |
//! | `cart-product-add`          | [`CartProductAdd`]    | `track_cart_product_add`            |
//! | `cart-product-remove`       | [`CartProductRemove`] | `track_cart_product_remove`         |
//! | `deprecated-product-add`    | [`ProductAdd`]        | `track_product_add` (deprecated)    |
//! | `deprecated-product-remove` | [`ProductRemove`]     | `track_product_remove` (deprecated) |
//! | `checkout-start`            | [`CheckoutStart`]     | `track_checkout`                    |
//! | `checkout-step`             | [`CheckoutStep`]      | `track_checkout_step`               |
//! | `checkout-complete`         | [`CheckoutComplete`]  | `track_checkout_complete`           |

use crate::commerce::Commerce;
use crate::error::TrackerError;
use async_trait::async_trait;
use std::fmt::{self, Display};

/// One trackable event kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    CategoryPageView,
    ProductImpression,
    ProductView,
    CartUpdate,
    CartProductAdd,
    CartProductRemove,
    ProductAdd,
    ProductRemove,
    CheckoutStart,
    CheckoutStep,
    CheckoutComplete,
}

impl Capability {
    /// All capabilities, in declaration order.
    pub const ALL: [Capability; 11] = [
        Capability::CategoryPageView,
        Capability::ProductImpression,
        Capability::ProductView,
        Capability::CartUpdate,
        Capability::CartProductAdd,
        Capability::CartProductRemove,
        Capability::ProductAdd,
        Capability::ProductRemove,
        Capability::CheckoutStart,
        Capability::CheckoutStep,
        Capability::CheckoutComplete,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Capability::CategoryPageView => "category-page-view",
            Capability::ProductImpression => "product-impression",
            Capability::ProductView => "product-view",
            Capability::CartUpdate => "cart-update",
            Capability::CartProductAdd => "cart-product-add",
            Capability::CartProductRemove => "cart-product-remove",
            Capability::ProductAdd => "deprecated-product-add",
            Capability::ProductRemove => "deprecated-product-remove",
            Capability::CheckoutStart => "checkout-start",
            Capability::CheckoutStep => "checkout-step",
            Capability::CheckoutComplete => "checkout-complete",
        }
    }

    /// Whether the capability only exists for older trackers.
    pub fn is_deprecated(&self) -> bool {
        matches!(self, Capability::ProductAdd | Capability::ProductRemove)
    }
}

impl Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[async_trait]
pub trait CategoryPageView<C: Commerce>: Send + Sync {
    /// `categories` holds one or more categories matching the page.
    async fn track_category_page_view(
        &self,
        categories: &[String],
        page: Option<&C::Page>,
    ) -> Result<(), TrackerError>;
}

#[async_trait]
pub trait ProductImpression<C: Commerce>: Send + Sync {
    async fn track_product_impression(&self, product: &C::Product) -> Result<(), TrackerError>;
}

#[async_trait]
pub trait ProductView<C: Commerce>: Send + Sync {
    async fn track_product_view(&self, product: &C::Product) -> Result<(), TrackerError>;
}

#[async_trait]
pub trait CartUpdate<C: Commerce>: Send + Sync {
    async fn track_cart_update(&self, cart: &C::Cart) -> Result<(), TrackerError>;
}

#[async_trait]
pub trait CartProductAdd<C: Commerce>: Send + Sync {
    async fn track_cart_product_add(
        &self,
        cart: &C::Cart,
        product: &C::Product,
        quantity: f64,
    ) -> Result<(), TrackerError>;
}

#[async_trait]
pub trait CartProductRemove<C: Commerce>: Send + Sync {
    async fn track_cart_product_remove(
        &self,
        cart: &C::Cart,
        product: &C::Product,
        quantity: f64,
    ) -> Result<(), TrackerError>;
}

/// Cart-less add-to-cart. Kept for trackers written before [`CartProductAdd`].
#[async_trait]
pub trait ProductAdd<C: Commerce>: Send + Sync {
    async fn track_product_add(
        &self,
        product: &C::Product,
        quantity: f64,
    ) -> Result<(), TrackerError>;
}

/// Cart-less remove-from-cart. Kept for trackers written before [`CartProductRemove`].
#[async_trait]
pub trait ProductRemove<C: Commerce>: Send + Sync {
    async fn track_product_remove(
        &self,
        product: &C::Product,
        quantity: f64,
    ) -> Result<(), TrackerError>;
}

/// Start of checkout, with the first step.
#[async_trait]
pub trait CheckoutStart<C: Commerce>: Send + Sync {
    async fn track_checkout(&self, cart: &C::Cart) -> Result<(), TrackerError>;
}

#[async_trait]
pub trait CheckoutStep<C: Commerce>: Send + Sync {
    async fn track_checkout_step(
        &self,
        step: &C::CheckoutStep,
        cart: &C::Cart,
        step_number: Option<u32>,
        checkout_option: Option<&str>,
    ) -> Result<(), TrackerError>;
}

#[async_trait]
pub trait CheckoutComplete<C: Commerce>: Send + Sync {
    async fn track_checkout_complete(&self, order: &C::Order) -> Result<(), TrackerError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn capability_names_are_distinct() {
        let names: HashSet<_> = Capability::ALL.iter().map(|c| c.as_str()).collect();
        assert_eq!(names.len(), Capability::ALL.len());
    }

    #[test]
    fn deprecated_capabilities_are_named_as_such() {
        assert_eq!(Capability::ProductAdd.to_string(), "deprecated-product-add");
        assert_eq!(Capability::ProductRemove.as_str(), "deprecated-product-remove");
        assert_eq!(Capability::CartProductAdd.as_str(), "cart-product-add");
    }

    #[test]
    fn only_cartless_add_and_remove_are_deprecated() {
        let deprecated: Vec<_> = Capability::ALL
            .iter()
            .filter(|c| c.is_deprecated())
            .collect();
        assert_eq!(
            deprecated,
            vec![&Capability::ProductAdd, &Capability::ProductRemove]
        );
    }
}
