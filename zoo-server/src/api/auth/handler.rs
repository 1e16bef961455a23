//! Authentication Handlers
//!
//! Registration, login and the caller's own profile.

use std::time::Duration;

use axum::{Json, extract::State, http::StatusCode};
use shared::client::{LoginRequest, LoginResponse, RegisterRequest};
use shared::models::{Account, ProfileUpdate, ProfileView, Role};

use crate::auth::{CurrentUser, verify_dummy, verify_password};
use crate::core::ServerState;
use crate::db::repository::{account, personnel};
use crate::security_log;
use crate::utils::{AppError, AppResult, ValidatedJson};

/// POST /api/auth/register - public visitor sign-up
pub async fn register(
    State(state): State<ServerState>,
    ValidatedJson(req): ValidatedJson<RegisterRequest>,
) -> AppResult<(StatusCode, Json<Account>)> {
    let account = account::insert(&state.pool, req.into()).await?;

    tracing::info!(account_id = account.id, email = %account.email, "Visitor registered");
    Ok((StatusCode::CREATED, Json(account)))
}

/// POST /api/auth/login
///
/// Unknown email, wrong password and inactive account all get the same
/// answer after the same fixed delay.
pub async fn login(
    State(state): State<ServerState>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let found = account::find_by_email(&state.pool, &req.email).await?;

    // Every path pays for exactly one Argon2 verification
    let password_ok = match &found {
        Some(a) => verify_password(&req.password, &a.password_hash),
        None => {
            verify_dummy(&req.password);
            false
        }
    };

    tokio::time::sleep(Duration::from_millis(state.config.auth_delay_ms)).await;

    let account = match found {
        Some(a) if a.is_active && password_ok => a,
        Some(a) => {
            let reason = if a.is_active {
                "invalid_password"
            } else {
                "account_inactive"
            };
            security_log!("WARN", "login_failed", email = req.email.clone(), reason = reason);
            return Err(AppError::invalid_credentials());
        }
        None => {
            security_log!(
                "WARN",
                "login_failed",
                email = req.email.clone(),
                reason = "unknown_email"
            );
            return Err(AppError::invalid_credentials());
        }
    };

    let token = state.jwt_service.generate_token(&account)?;

    tracing::info!(
        account_id = account.id,
        email = %account.email,
        role = %account.role.as_str(),
        "User logged in successfully"
    );

    Ok(Json(LoginResponse {
        token,
        user: account,
    }))
}

/// GET /api/auth/me
pub async fn me(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<ProfileView>> {
    Ok(Json(profile_view(&state, user.id, user.role).await?))
}

/// PUT /api/auth/me - name, email, phone and password only
pub async fn update_me(
    State(state): State<ServerState>,
    user: CurrentUser,
    ValidatedJson(payload): ValidatedJson<ProfileUpdate>,
) -> AppResult<Json<ProfileView>> {
    let updated = account::update(&state.pool, user.id, payload.into()).await?;

    tracing::info!(account_id = updated.id, "Profile updated");
    Ok(Json(profile_view(&state, updated.id, updated.role).await?))
}

/// Visitors see the plain account, staff and admins the extended shape
async fn profile_view(state: &ServerState, id: i64, role: Role) -> AppResult<ProfileView> {
    let not_found = || AppError::not_found(format!("Account {id}"));
    let view = match role {
        Role::Visitor => ProfileView::Plain(
            account::find_by_id(&state.pool, id)
                .await?
                .ok_or_else(not_found)?,
        ),
        Role::Staff | Role::Admin => ProfileView::Extended(
            personnel::find_extended(&state.pool, id)
                .await?
                .ok_or_else(not_found)?,
        ),
    };
    Ok(view)
}
