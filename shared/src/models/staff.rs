//! Staff Profile Model
//!
//! One-to-one extension of an [`Account`](super::Account) whose role is staff.
//! The personnel API exposes account and profile fields as one flat record.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::role::Role;
use super::validators::{validate_not_blank, validate_phone};

/// Employment status of a staff member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "kebab-case"))]
#[serde(rename_all = "kebab-case")]
pub enum StaffStatus {
    #[default]
    Active,
    Inactive,
    Suspended,
    OnLeave,
    Mission,
    Retired,
}

/// Staff profile row
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct StaffProfile {
    pub account_id: i64,
    pub title: Option<String>,
    pub department: Option<String>,
    /// Internal role code (e.g. "keeper", "vet")
    pub role_personnel: Option<String>,
    pub hire_date: Option<NaiveDate>,
    pub status: StaffStatus,
}

/// Personnel record: account fields joined with the staff profile
///
/// Profile columns are optional so the same shape can describe an admin
/// account that has no profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Personnel {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub role: Role,
    pub is_active: bool,
    pub date_joined: i64,
    pub title: Option<String>,
    pub department: Option<String>,
    pub role_personnel: Option<String>,
    pub hire_date: Option<NaiveDate>,
    pub status: Option<StaffStatus>,
}

/// Create personnel payload (creates a staff account plus its profile)
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PersonnelCreate {
    #[validate(length(min = 1, max = 255), custom(function = "validate_not_blank"))]
    pub name: String,
    #[validate(email, length(max = 255))]
    pub email: String,
    #[validate(custom(function = "validate_phone"))]
    pub phone_number: String,
    /// Without a password the account cannot log in
    #[validate(length(min = 5, max = 128))]
    pub password: Option<String>,
    pub is_active: Option<bool>,
    #[validate(length(max = 255))]
    pub title: Option<String>,
    #[validate(length(max = 255))]
    pub department: Option<String>,
    #[validate(length(max = 100))]
    pub role_personnel: Option<String>,
    pub hire_date: Option<NaiveDate>,
    pub status: Option<StaffStatus>,
}

impl PersonnelCreate {
    pub fn profile(&self, account_id: i64) -> StaffProfile {
        StaffProfile {
            account_id,
            title: self.title.clone(),
            department: self.department.clone(),
            role_personnel: self.role_personnel.clone(),
            hire_date: self.hire_date,
            status: self.status.unwrap_or_default(),
        }
    }
}

/// Update personnel payload
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct PersonnelUpdate {
    #[validate(length(min = 1, max = 255), custom(function = "validate_not_blank"))]
    pub name: Option<String>,
    #[validate(email, length(max = 255))]
    pub email: Option<String>,
    #[validate(custom(function = "validate_phone"))]
    pub phone_number: Option<String>,
    #[validate(length(min = 5, max = 128))]
    pub password: Option<String>,
    pub is_active: Option<bool>,
    #[validate(length(max = 255))]
    pub title: Option<String>,
    #[validate(length(max = 255))]
    pub department: Option<String>,
    #[validate(length(max = 100))]
    pub role_personnel: Option<String>,
    pub hire_date: Option<NaiveDate>,
    pub status: Option<StaffStatus>,
}

impl PersonnelUpdate {
    /// Merge profile fields onto the stored profile
    pub fn apply_profile(&self, profile: &mut StaffProfile) {
        if let Some(title) = &self.title {
            profile.title = Some(title.clone());
        }
        if let Some(department) = &self.department {
            profile.department = Some(department.clone());
        }
        if let Some(code) = &self.role_personnel {
            profile.role_personnel = Some(code.clone());
        }
        if let Some(hire_date) = self.hire_date {
            profile.hire_date = Some(hire_date);
        }
        if let Some(status) = self.status {
            profile.status = status;
        }
    }

    /// Account half of the update (role is not writable here)
    pub fn account_update(&self) -> super::AccountUpdate {
        super::AccountUpdate {
            name: self.name.clone(),
            email: self.email.clone(),
            phone_number: self.phone_number.clone(),
            password: self.password.clone(),
            role: None,
            is_active: self.is_active,
        }
    }
}
