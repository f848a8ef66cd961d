//! # Tracker Trait
//!
//! A [`Tracker`] is one registered backend. It tells the dispatcher two things:
//!
//! 1. **Where it is active** - through its assortment and checkout tenant lists.
//!    An empty list matches any tenant on that axis.
//! 2. **What it can receive** - through one `as_<capability>` accessor per
//!    capability trait. The default answers `None`; a tracker overrides the
//!    accessors for the capabilities it implements.
//!
//! Writing the accessors by hand is noise, so the [`tracker_capabilities!`](crate::tracker_capabilities)
//! macro generates them:
//!
//! ```rust
//! use async_trait::async_trait;
//! use tracking_framework::capability::ProductView;
//! use tracking_framework::{tracker_capabilities, Commerce, OrderStoreError, TrackedOrder, Tracker, TrackerError};
//!
//! # #[derive(Debug)] struct Order;
//! # #[async_trait]
//! # impl TrackedOrder for Order {
//! #     fn is_tracked(&self) -> bool { false }
//! #     fn set_tracked(&mut self, _: bool) {}
//! #     async fn save(&mut self) -> Result<(), OrderStoreError> { Ok(()) }
//! # }
//! struct Shop;
//! impl Commerce for Shop {
//!     type Product = String;
//!     type Cart = Vec<String>;
//!     type Order = Order;
//!     type CheckoutStep = String;
//!     type Page = String;
//! }
//!
//! struct ViewCounter;
//!
//! #[async_trait]
//! impl ProductView<Shop> for ViewCounter {
//!     async fn track_product_view(&self, _product: &String) -> Result<(), TrackerError> {
//!         Ok(())
//!     }
//! }
//!
//! impl Tracker<Shop> for ViewCounter {
//!     tracker_capabilities!(Shop => product_view);
//! }
//!
//! assert!(ViewCounter.as_product_view().is_some());
//! assert!(ViewCounter.as_checkout_complete().is_none());
//! ```

use crate::capability::{
    Capability, CartProductAdd, CartProductRemove, CartUpdate, CategoryPageView, CheckoutComplete,
    CheckoutStart, CheckoutStep, ProductAdd, ProductImpression, ProductRemove, ProductView,
};
use crate::commerce::Commerce;

/// A registered tracking backend.
pub trait Tracker<C: Commerce>: Send + Sync {
    /// Short name used in logs and failure reports.
    fn name(&self) -> &str {
        short_type_name(std::any::type_name::<Self>())
    }

    /// Assortment tenants this tracker is restricted to. Empty matches any.
    fn assortment_tenants(&self) -> &[String] {
        &[]
    }

    /// Checkout tenants this tracker is restricted to. Empty matches any.
    fn checkout_tenants(&self) -> &[String] {
        &[]
    }

    // --- Capability queries ---

    fn as_category_page_view(&self) -> Option<&dyn CategoryPageView<C>> {
        None
    }

    fn as_product_impression(&self) -> Option<&dyn ProductImpression<C>> {
        None
    }

    fn as_product_view(&self) -> Option<&dyn ProductView<C>> {
        None
    }

    fn as_cart_update(&self) -> Option<&dyn CartUpdate<C>> {
        None
    }

    fn as_cart_product_add(&self) -> Option<&dyn CartProductAdd<C>> {
        None
    }

    fn as_cart_product_remove(&self) -> Option<&dyn CartProductRemove<C>> {
        None
    }

    fn as_product_add(&self) -> Option<&dyn ProductAdd<C>> {
        None
    }

    fn as_product_remove(&self) -> Option<&dyn ProductRemove<C>> {
        None
    }

    fn as_checkout_start(&self) -> Option<&dyn CheckoutStart<C>> {
        None
    }

    fn as_checkout_step(&self) -> Option<&dyn CheckoutStep<C>> {
        None
    }

    fn as_checkout_complete(&self) -> Option<&dyn CheckoutComplete<C>> {
        None
    }

    /// Whether the tracker implements `capability`.
    fn supports(&self, capability: Capability) -> bool {
        match capability {
            Capability::CategoryPageView => self.as_category_page_view().is_some(),
            Capability::ProductImpression => self.as_product_impression().is_some(),
            Capability::ProductView => self.as_product_view().is_some(),
            Capability::CartUpdate => self.as_cart_update().is_some(),
            Capability::CartProductAdd => self.as_cart_product_add().is_some(),
            Capability::CartProductRemove => self.as_cart_product_remove().is_some(),
            Capability::ProductAdd => self.as_product_add().is_some(),
            Capability::ProductRemove => self.as_product_remove().is_some(),
            Capability::CheckoutStart => self.as_checkout_start().is_some(),
            Capability::CheckoutStep => self.as_checkout_step().is_some(),
            Capability::CheckoutComplete => self.as_checkout_complete().is_some(),
        }
    }

    /// Every capability the tracker implements, in declaration order.
    fn capabilities(&self) -> Vec<Capability> {
        Capability::ALL
            .into_iter()
            .filter(|capability| self.supports(*capability))
            .collect()
    }
}

/// Generates the `as_<capability>` accessors of [`Tracker`] inside an `impl Tracker<C> for T` block.
///
/// Each listed capability is the snake_case name of its trait in
/// [`capability`](crate::capability), e.g. `product_view` for `ProductView`.
/// The implementing type must implement every listed trait for `C`.
#[macro_export]
macro_rules! tracker_capabilities {
    ($commerce:ty => $($capability:ident),+ $(,)?) => {
        $crate::__paste! {
            $(
                fn [<as_ $capability>](
                    &self,
                ) -> ::core::option::Option<&dyn $crate::capability::[<$capability:camel>]<$commerce>> {
                    ::core::option::Option::Some(self)
                }
            )+
        }
    };
}

/// Strips module path and generic arguments: `a::b::Foo<x::Y>` becomes `Foo`.
fn short_type_name(full: &'static str) -> &'static str {
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_type_name_drops_path_and_generics() {
        assert_eq!(short_type_name("a::b::Foo"), "Foo");
        assert_eq!(short_type_name("a::b::Foo<x::Y>"), "Foo");
        assert_eq!(short_type_name("Bar"), "Bar");
    }
}
