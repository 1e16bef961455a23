//! Account Model

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::role::Role;
use super::staff::Personnel;
use super::validators::{validate_not_blank, validate_phone};

/// Account entity (identity record)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Account {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone_number: String,
    /// Argon2 PHC string, never serialized
    #[serde(skip)]
    pub password_hash: String,
    pub role: Role,
    pub is_active: bool,
    /// Creation time (Unix millis)
    pub date_joined: i64,
}

/// Create account payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AccountCreate {
    #[validate(length(min = 1, max = 255), custom(function = "validate_not_blank"))]
    pub name: String,
    #[validate(email, length(max = 255))]
    pub email: String,
    #[validate(custom(function = "validate_phone"))]
    pub phone_number: String,
    #[validate(length(min = 5, max = 128))]
    pub password: String,
    #[serde(default)]
    pub role: Option<Role>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

/// Update account payload
///
/// `password` is hashed by the repository, every other field is merged
/// onto the stored record by [`AccountUpdate::apply`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct AccountUpdate {
    #[validate(length(min = 1, max = 255), custom(function = "validate_not_blank"))]
    pub name: Option<String>,
    #[validate(email, length(max = 255))]
    pub email: Option<String>,
    #[validate(custom(function = "validate_phone"))]
    pub phone_number: Option<String>,
    #[validate(length(min = 5, max = 128))]
    pub password: Option<String>,
    pub role: Option<Role>,
    pub is_active: Option<bool>,
}

impl AccountUpdate {
    pub fn apply(self, account: &mut Account) {
        if let Some(name) = self.name {
            account.name = name;
        }
        if let Some(email) = self.email {
            account.email = crate::util::normalize_email(&email);
        }
        if let Some(phone) = self.phone_number {
            account.phone_number = phone;
        }
        if let Some(role) = self.role {
            account.role = role;
        }
        if let Some(is_active) = self.is_active {
            account.is_active = is_active;
        }
    }

    /// Does this update change the stored role?
    pub fn changes_role(&self, account: &Account) -> bool {
        self.role.is_some_and(|r| r != account.role)
    }
}

/// Self-service profile update (`PUT /api/auth/me`)
///
/// Role and active flag are not part of this payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct ProfileUpdate {
    #[validate(length(min = 1, max = 255), custom(function = "validate_not_blank"))]
    pub name: Option<String>,
    #[validate(email, length(max = 255))]
    pub email: Option<String>,
    #[validate(custom(function = "validate_phone"))]
    pub phone_number: Option<String>,
    #[validate(length(min = 5, max = 128))]
    pub password: Option<String>,
}

impl From<ProfileUpdate> for AccountUpdate {
    fn from(p: ProfileUpdate) -> Self {
        Self {
            name: p.name,
            email: p.email,
            phone_number: p.phone_number,
            password: p.password,
            role: None,
            is_active: None,
        }
    }
}

/// Caller's own record, shaped by role
///
/// Visitors get the plain account shape, staff and admins the extended
/// shape carrying staff profile fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProfileView {
    Extended(Personnel),
    Plain(Account),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account() -> Account {
        Account {
            id: 1,
            name: "Amani".into(),
            email: "a@z.io".into(),
            phone_number: "+243900000001".into(),
            password_hash: "$argon2id$secret".into(),
            role: Role::Visitor,
            is_active: true,
            date_joined: 0,
        }
    }

    #[test]
    fn test_password_hash_not_serialized() {
        let json = serde_json::to_value(account()).unwrap();
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["role"], "visitor");
    }

    #[test]
    fn test_apply_merges_only_given_fields() {
        let mut a = account();
        AccountUpdate {
            name: Some("Amani K.".into()),
            ..Default::default()
        }
        .apply(&mut a);
        assert_eq!(a.name, "Amani K.");
        assert_eq!(a.email, "a@z.io");
        assert_eq!(a.role, Role::Visitor);
    }

    #[test]
    fn test_changes_role() {
        let a = account();
        let same = AccountUpdate {
            role: Some(Role::Visitor),
            ..Default::default()
        };
        let promote = AccountUpdate {
            role: Some(Role::Staff),
            ..Default::default()
        };
        assert!(!same.changes_role(&a));
        assert!(promote.changes_role(&a));
        assert!(!AccountUpdate::default().changes_role(&a));
    }

    #[test]
    fn test_create_validation() {
        let bad = AccountCreate {
            name: "A".into(),
            email: "not-an-email".into(),
            phone_number: "12".into(),
            password: "abc".into(),
            role: None,
            is_active: None,
        };
        let errors = bad.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("phone_number"));
        assert!(fields.contains_key("password"));
        assert!(!fields.contains_key("name"));
    }
}
