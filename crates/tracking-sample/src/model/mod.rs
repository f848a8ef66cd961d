//! Shop data structures and the [`Shop`] commerce family that ties them together.

pub mod cart;
pub mod checkout;
pub mod order;
pub mod product;

pub use cart::*;
pub use checkout::*;
pub use order::*;
pub use product::*;

use crate::order_store::StoredOrder;
use tracking_framework::Commerce;

/// The sample shop's payload types.
#[derive(Debug)]
pub struct Shop;

impl Commerce for Shop {
    type Product = Product;
    type Cart = Cart;
    type Order = StoredOrder;
    type CheckoutStep = CheckoutStep;
    type Page = PageInfo;
}
