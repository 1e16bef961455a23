use thiserror::Error;

use crate::auth::JwtError;
use crate::db::repository::RepoError;

/// Start-up and serving errors (never sent to HTTP clients)
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Repository error: {0}")]
    Repository(#[from] RepoError),

    #[error("JWT error: {0}")]
    Jwt(#[from] JwtError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ServerError>;
