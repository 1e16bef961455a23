//! Authentication and authorization
//!
//! - [`JwtService`] - bearer token issue/validation
//! - [`CurrentUser`] / [`Principal`] - caller identity and its resolved class
//! - [`AccessPolicy`] - per-route access decisions
//! - [`authenticate`] / [`require_policy`] - middleware

pub mod extractor;
pub mod jwt;
pub mod middleware;
pub mod password;
pub mod policy;
pub mod principal;

pub use extractor::Caller;
pub use jwt::{Claims, JwtConfig, JwtError, JwtService};
pub use middleware::{authenticate, require_policy};
pub use password::{hash_password, verify_dummy, verify_password};
pub use policy::{AccessPolicy, ResourcePolicy};
pub use principal::{CurrentUser, Principal};
