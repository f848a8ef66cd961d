//! Session-backed tenant environment.
//!
//! The shop frontend switches tenants per request (by host name, by the customer's
//! group, ...). `SessionEnvironment` is the place it writes them to, and the
//! [`TrackingManager`](tracking_framework::TrackingManager) reads them back on
//! every event.

use std::sync::{PoisonError, RwLock};
use tracing::debug;
use tracking_framework::Environment;

#[derive(Debug, Default)]
struct Tenants {
    assortment: Option<String>,
    checkout: Option<String>,
}

/// Mutable current-tenant holder. Unset tenants resolve to `"default"`.
#[derive(Debug, Default)]
pub struct SessionEnvironment {
    tenants: RwLock<Tenants>,
}

impl SessionEnvironment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_assortment_tenant(&self, tenant: impl Into<String>) {
        let tenant = tenant.into();
        debug!(%tenant, "Assortment tenant switched");
        self.write().assortment = Some(tenant);
    }

    pub fn set_checkout_tenant(&self, tenant: impl Into<String>) {
        let tenant = tenant.into();
        debug!(%tenant, "Checkout tenant switched");
        self.write().checkout = Some(tenant);
    }

    /// Forgets both tenants.
    pub fn clear(&self) {
        *self.write() = Tenants::default();
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Tenants> {
        self.tenants.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Tenants> {
        self.tenants.read().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Environment for SessionEnvironment {
    fn current_assortment_tenant(&self) -> Option<String> {
        self.read().assortment.clone()
    }

    fn current_checkout_tenant(&self) -> Option<String> {
        self.read().checkout.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracking_framework::TenantContext;

    #[test]
    fn unset_tenants_resolve_to_default() {
        let env = SessionEnvironment::new();
        assert_eq!(TenantContext::current(&env), TenantContext::default());

        env.set_assortment_tenant("eu");
        assert_eq!(
            TenantContext::current(&env),
            TenantContext::new("eu", "default")
        );

        env.set_checkout_tenant("b2b");
        env.clear();
        assert_eq!(TenantContext::current(&env), TenantContext::default());
    }
}
