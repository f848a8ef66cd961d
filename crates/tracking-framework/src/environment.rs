//! # Environment Collaborator
//!
//! The environment knows which assortment and checkout tenant the current request
//! runs under. How it finds out (session, host name, configuration) is none of the
//! dispatcher's business: it only reads the two values on every active-set query.

use std::fmt::{self, Display};

/// Tenant name used when the environment reports none.
pub const DEFAULT_TENANT: &str = "default";

/// Source of the current tenant pair.
pub trait Environment: Send + Sync {
    fn current_assortment_tenant(&self) -> Option<String>;

    fn current_checkout_tenant(&self) -> Option<String>;
}

/// The `(assortment, checkout)` tenant pair a request runs under.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TenantContext {
    pub assortment_tenant: String,
    pub checkout_tenant: String,
}

impl TenantContext {
    pub fn new(assortment_tenant: impl Into<String>, checkout_tenant: impl Into<String>) -> Self {
        Self {
            assortment_tenant: assortment_tenant.into(),
            checkout_tenant: checkout_tenant.into(),
        }
    }

    /// Reads the current pair, substituting [`DEFAULT_TENANT`] for absent or empty values.
    pub fn current(environment: &dyn Environment) -> Self {
        Self {
            assortment_tenant: or_default(environment.current_assortment_tenant()),
            checkout_tenant: or_default(environment.current_checkout_tenant()),
        }
    }
}

impl Default for TenantContext {
    fn default() -> Self {
        Self::new(DEFAULT_TENANT, DEFAULT_TENANT)
    }
}

impl Display for TenantContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.assortment_tenant, self.checkout_tenant)
    }
}

fn or_default(tenant: Option<String>) -> String {
    match tenant {
        Some(tenant) if !tenant.is_empty() => tenant,
        _ => DEFAULT_TENANT.to_string(),
    }
}
