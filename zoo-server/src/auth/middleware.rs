//! Authentication and authorization middleware

use std::future::Future;
use std::pin::Pin;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::AppError;
use crate::auth::{AccessPolicy, CurrentUser, JwtError, JwtService, Principal};
use crate::core::ServerState;
use crate::db::repository::account;
use crate::security_log;

/// Resolve the caller from `Authorization: Bearer <token>`.
///
/// Requests without the header continue as anonymous. A present but
/// malformed, expired or revoked token (unknown or inactive account) is
/// rejected with 401 regardless of the route's policy. On success the
/// account row is loaded and [`CurrentUser`] is inserted into the request
/// extensions.
pub async fn authenticate(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let Some(header) = req.headers().get(http::header::AUTHORIZATION) else {
        return Ok(next.run(req).await);
    };

    let token = header
        .to_str()
        .ok()
        .and_then(JwtService::extract_from_header)
        .ok_or_else(|| AppError::invalid_token("Invalid authorization header"))?;

    let claims = match state.jwt_service.validate_token(token) {
        Ok(claims) => claims,
        Err(e) => {
            security_log!(
                "WARN",
                "auth_failed",
                error = format!("{}", e),
                uri = format!("{:?}", req.uri())
            );
            return Err(match e {
                JwtError::ExpiredToken => AppError::token_expired(),
                _ => AppError::invalid_token("Invalid token"),
            });
        }
    };

    let account_id = claims
        .account_id()
        .map_err(|_| AppError::invalid_token("Invalid token"))?;

    let account = account::find_by_id(&state.pool, account_id).await?;
    let account = match account {
        Some(a) if a.is_active => a,
        _ => {
            security_log!(
                "WARN",
                "auth_revoked",
                account_id = account_id,
                uri = format!("{:?}", req.uri())
            );
            return Err(AppError::invalid_token("Invalid token"));
        }
    };

    req.extensions_mut().insert(CurrentUser::from(&account));
    Ok(next.run(req).await)
}

/// Access policy middleware
///
/// ```ignore
/// Router::new()
///     .route("/api/sales", get(list))
///     .route_layer(middleware::from_fn(require_policy(AccessPolicy::AdminOnly)));
/// ```
///
/// Denial is a uniform 403, also for anonymous callers.
pub fn require_policy(
    policy: AccessPolicy,
) -> impl Fn(Request, Next) -> Pin<Box<dyn Future<Output = Result<Response, AppError>> + Send>>
+ Clone {
    move |req: Request, next: Next| {
        Box::pin(async move {
            let user = req.extensions().get::<CurrentUser>();
            let principal = Principal::resolve(user);

            if !policy.allows(principal, req.method()) {
                security_log!(
                    "WARN",
                    "permission_denied",
                    user_id = user.map(|u| u.id),
                    principal = principal.as_str(),
                    policy = policy.name(),
                    method = req.method().as_str(),
                    uri = format!("{:?}", req.uri())
                );
                return Err(AppError::forbidden("Permission denied"));
            }

            Ok(next.run(req).await)
        })
    }
}
