//! Client-related types shared between server and client
//!
//! Request/response DTOs of the authentication API.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::{Account, AccountCreate, validators::validate_phone};

/// Login request
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1))]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// Login response data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: Account,
}

/// Public visitor sign-up
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(email, length(max = 255))]
    pub email: String,
    #[validate(custom(function = "validate_phone"))]
    pub phone_number: String,
    #[validate(length(min = 5, max = 128))]
    pub password: String,
}

impl From<RegisterRequest> for AccountCreate {
    fn from(req: RegisterRequest) -> Self {
        Self {
            name: req.name,
            email: req.email,
            phone_number: req.phone_number,
            password: req.password,
            role: None,
            is_active: Some(true),
        }
    }
}
