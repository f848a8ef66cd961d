//! # Order Store
//!
//! An in-memory stand-in for the shop's order persistence. Orders are placed from
//! carts, opened as [`StoredOrder`] handles, and written back on `save`, which is
//! how the checkout-complete tracking flag becomes durable.

use crate::model::{Cart, Order, OrderId};
use async_trait::async_trait;
use std::collections::HashMap;
use std::ops::Deref;
use std::sync::atomic::{AtomicBool, AtomicU32, AtomicUsize, Ordering};
use std::sync::{Arc, PoisonError, RwLock};
use thiserror::Error;
use tracing::{debug, info, warn};
use tracking_framework::{OrderStoreError, TrackedOrder};

/// Errors that can occur during order storage operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum StoreError {
    /// The requested order was not found.
    #[error("Order not found: {0}")]
    NotFound(OrderId),

    /// The store refused writes.
    #[error("Order store unavailable: {0}")]
    Unavailable(String),
}

impl From<StoreError> for OrderStoreError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound(id) => OrderStoreError::NotFound(id.to_string()),
            StoreError::Unavailable(reason) => OrderStoreError::Storage(reason),
        }
    }
}

/// Shared, cloneable order store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryOrderStore {
    orders: Arc<RwLock<HashMap<OrderId, Order>>>,
    next_id: Arc<AtomicU32>,
    saves: Arc<AtomicUsize>,
    unavailable: Arc<AtomicBool>,
}

impl InMemoryOrderStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Turns a cart into a persisted, untracked order.
    pub fn place(&self, cart: &Cart) -> OrderId {
        let id = OrderId(self.next_id.fetch_add(1, Ordering::SeqCst) + 1);
        let order = Order::new(id.clone(), cart.items.clone(), cart.total());
        self.orders
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id.clone(), order);
        info!(order_id = %id, cart_id = %cart.id, "Order placed");
        id
    }

    /// The persisted state of an order.
    pub fn get(&self, id: &OrderId) -> Option<Order> {
        self.orders
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id)
            .cloned()
    }

    /// Loads an order into a handle that can be modified and saved back.
    pub fn open(&self, id: &OrderId) -> Result<StoredOrder, StoreError> {
        let order = self.get(id).ok_or_else(|| StoreError::NotFound(id.clone()))?;
        Ok(StoredOrder {
            order,
            store: self.clone(),
        })
    }

    /// Number of successful saves so far.
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    /// Makes every following save fail until switched back.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn save(&self, order: &Order) -> Result<(), StoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            warn!(order_id = %order.id, "Save refused, store unavailable");
            return Err(StoreError::Unavailable("writes disabled".to_string()));
        }

        let mut orders = self.orders.write().unwrap_or_else(PoisonError::into_inner);
        let slot = orders
            .get_mut(&order.id)
            .ok_or_else(|| StoreError::NotFound(order.id.clone()))?;
        *slot = order.clone();
        self.saves.fetch_add(1, Ordering::SeqCst);
        debug!(order_id = %order.id, tracked = order.tracked, "Order saved");
        Ok(())
    }
}

/// An order loaded from an [`InMemoryOrderStore`].
///
/// Reads go through `Deref` to the [`Order`]; [`TrackedOrder::save`] writes the
/// whole order back.
#[derive(Debug)]
pub struct StoredOrder {
    order: Order,
    store: InMemoryOrderStore,
}

impl Deref for StoredOrder {
    type Target = Order;

    fn deref(&self) -> &Order {
        &self.order
    }
}

#[async_trait]
impl TrackedOrder for StoredOrder {
    fn is_tracked(&self) -> bool {
        self.order.tracked
    }

    fn set_tracked(&mut self, tracked: bool) {
        self.order.tracked = tracked;
    }

    async fn save(&mut self) -> Result<(), OrderStoreError> {
        self.store.save(&self.order).map_err(Into::into)
    }
}
