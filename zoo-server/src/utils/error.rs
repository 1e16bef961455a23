//! Error conversions into the HTTP-facing [`AppError`]
//!
//! `AppError` and `ApiResponse` live in `shared::error`; this module adds the
//! mappings from the server's own error types.
//!
//! | Source | Code | Status |
//! |--------|------|--------|
//! | `RepoError::NotFound` | `NotFound` | 404 |
//! | `RepoError::Duplicate` | `*AlreadyExists` + `details.field` | 409 |
//! | `RepoError::InvalidReference` | `InvalidReference` | 400 |
//! | `RepoError::Validation` | `ValidationFailed` + per-field details | 400 |
//! | `RepoError::PriceRequired` | `PriceRequired` + per-field details | 400 |
//! | `RepoError::Forbidden` | `PermissionDenied` | 403 |
//! | `RepoError::Database` | `DatabaseError` | 500 |

pub use shared::error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};

use crate::auth::JwtError;
use crate::db::repository::RepoError;

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::with_message(ErrorCode::NotFound, msg),
            RepoError::Duplicate(field) => AppError::conflict(field),
            RepoError::InvalidReference(msg) => {
                AppError::with_message(ErrorCode::InvalidReference, msg)
            }
            RepoError::Validation { field, message } => AppError::field(&field, message),
            RepoError::PriceRequired(field) => {
                let mut err = AppError::field(field, "This field is required");
                err.code = ErrorCode::PriceRequired;
                err
            }
            RepoError::Forbidden(msg) => AppError::forbidden(msg),
            RepoError::Database(msg) => AppError::database(msg),
        }
    }
}

impl From<JwtError> for AppError {
    fn from(err: JwtError) -> Self {
        match err {
            JwtError::ExpiredToken => AppError::token_expired(),
            JwtError::InvalidToken(msg) => AppError::invalid_token(msg),
            JwtError::InvalidSignature => AppError::invalid_token("Invalid token signature"),
            other => AppError::internal(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_duplicate_is_conflict_on_field() {
        let err = AppError::from(RepoError::Duplicate("email".into()));
        assert_eq!(err.http_status(), StatusCode::CONFLICT);
        assert_eq!(err.details.unwrap()["field"], "email");
    }

    #[test]
    fn test_price_required_is_field_error() {
        let err = AppError::from(RepoError::PriceRequired("total_price"));
        assert_eq!(err.code, ErrorCode::PriceRequired);
        assert_eq!(err.http_status(), StatusCode::BAD_REQUEST);
        assert!(err.details.unwrap().contains_key("total_price"));
    }

    #[test]
    fn test_statuses() {
        let cases = [
            (RepoError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (RepoError::InvalidReference("x".into()), StatusCode::BAD_REQUEST),
            (RepoError::validation("end_time", "x"), StatusCode::BAD_REQUEST),
            (RepoError::Forbidden("x".into()), StatusCode::FORBIDDEN),
            (RepoError::Database("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (repo_err, status) in cases {
            assert_eq!(AppError::from(repo_err).http_status(), status);
        }
    }

    #[test]
    fn test_expired_token_is_unauthorized() {
        let err = AppError::from(JwtError::ExpiredToken);
        assert_eq!(err.code, ErrorCode::TokenExpired);
        assert_eq!(err.http_status(), StatusCode::UNAUTHORIZED);
    }
}
