//! Access policies
//!
//! Pure per-request decisions over (principal, HTTP method).

use http::Method;

use super::Principal;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessPolicy {
    /// Reads for everyone, writes for staff and admins
    ReadOpenWriteAdmin,
    /// Staff and admins only, every method
    AdminOnly,
    /// Any authenticated principal, every method
    Authenticated,
}

/// GET, HEAD and OPTIONS
pub fn is_safe_method(method: &Method) -> bool {
    matches!(*method, Method::GET | Method::HEAD | Method::OPTIONS)
}

impl AccessPolicy {
    pub fn allows(&self, principal: Principal, method: &Method) -> bool {
        match self {
            AccessPolicy::ReadOpenWriteAdmin => {
                is_safe_method(method) || principal.is_privileged()
            }
            AccessPolicy::AdminOnly => principal.is_privileged(),
            AccessPolicy::Authenticated => principal.is_authenticated(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            AccessPolicy::ReadOpenWriteAdmin => "read_open_write_admin",
            AccessPolicy::AdminOnly => "admin_only",
            AccessPolicy::Authenticated => "authenticated",
        }
    }
}

/// Policies for the collection (list, create) and item
/// (retrieve, update, delete) routes of one resource
#[derive(Debug, Clone, Copy)]
pub struct ResourcePolicy {
    pub collection: AccessPolicy,
    pub item: AccessPolicy,
}

impl ResourcePolicy {
    pub const fn uniform(policy: AccessPolicy) -> Self {
        Self {
            collection: policy,
            item: policy,
        }
    }

    pub const fn split(collection: AccessPolicy, item: AccessPolicy) -> Self {
        Self { collection, item }
    }
}
