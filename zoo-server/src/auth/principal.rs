//! Caller identity
//!
//! [`CurrentUser`] is built from the account row on every authenticated
//! request, so role changes and deactivation apply immediately.
//! [`Principal`] is the coarse class the access policies reason about.

use shared::models::{Account, Role};

/// Authenticated caller, injected into request extensions
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: Role,
}

impl From<&Account> for CurrentUser {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id,
            name: account.name.clone(),
            email: account.email.clone(),
            role: account.role,
        }
    }
}

impl CurrentUser {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    pub fn principal(&self) -> Principal {
        Principal::from(self.role)
    }
}

/// Resolved caller class
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Principal {
    Anonymous,
    Visitor,
    Staff,
    Admin,
}

impl From<Role> for Principal {
    fn from(role: Role) -> Self {
        match role {
            Role::Visitor => Principal::Visitor,
            Role::Staff => Principal::Staff,
            Role::Admin => Principal::Admin,
        }
    }
}

impl Principal {
    /// Role Resolver: no user means anonymous
    pub fn resolve(user: Option<&CurrentUser>) -> Self {
        user.map(CurrentUser::principal)
            .unwrap_or(Principal::Anonymous)
    }

    pub fn is_authenticated(&self) -> bool {
        !matches!(self, Principal::Anonymous)
    }

    /// Staff or admin
    pub fn is_privileged(&self) -> bool {
        matches!(self, Principal::Staff | Principal::Admin)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Principal::Anonymous => "anonymous",
            Principal::Visitor => "visitor",
            Principal::Staff => "staff",
            Principal::Admin => "admin",
        }
    }
}
