//! Caller extractors
//!
//! Both read what [`authenticate`](super::authenticate) put in the request
//! extensions; neither touches the token again.

use std::convert::Infallible;

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::AppError;
use crate::auth::{CurrentUser, Principal};
use crate::security_log;

/// Required caller: 401 when the request is anonymous
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match parts.extensions.get::<CurrentUser>() {
            Some(user) => Ok(user.clone()),
            None => {
                security_log!("WARN", "auth_missing", uri = format!("{:?}", parts.uri));
                Err(AppError::unauthorized())
            }
        }
    }
}

/// Optional caller, for handlers open to anonymous requests
#[derive(Debug, Clone, Default)]
pub struct Caller(pub Option<CurrentUser>);

impl Caller {
    pub fn user(&self) -> Option<&CurrentUser> {
        self.0.as_ref()
    }

    pub fn principal(&self) -> Principal {
        Principal::resolve(self.user())
    }
}

impl<S> FromRequestParts<S> for Caller
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Caller(parts.extensions.get::<CurrentUser>().cloned()))
    }
}
