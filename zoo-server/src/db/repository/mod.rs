//! Repository Module
//!
//! One module per table family. Each exposes plain `sqlx` functions over a
//! `&SqlitePool`, plus a unit struct implementing [`Repository`] so the
//! generic resource handlers can be instantiated per entity.

pub mod account;
pub mod animal;
pub mod announcement;
pub mod event;
pub mod personnel;
pub mod reservation;
pub mod sale;
pub mod ticket;
pub mod zoo_params;

pub use account::AccountRepository;
pub use animal::AnimalRepository;
pub use announcement::AnnouncementRepository;
pub use event::EventRepository;
pub use personnel::PersonnelRepository;
pub use reservation::ReservationRepository;
pub use sale::SaleRepository;
pub use ticket::TicketRepository;
pub use zoo_params::ZooParamsRepository;

use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};
use sqlx::SqlitePool;
use thiserror::Error;
use validator::Validate;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::pricing::RateBook;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    /// Unique constraint violated on the named column
    #[error("Duplicate: {0}")]
    Duplicate(String),

    /// Foreign key points at a missing row
    #[error("Invalid reference: {0}")]
    InvalidReference(String),

    #[error("Validation error on {field}: {message}")]
    Validation { field: String, message: String },

    /// No price given and none in the rate table
    #[error("Price required: {0}")]
    PriceRequired(&'static str),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl RepoError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        RepoError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => RepoError::NotFound("Record not found".into()),
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                RepoError::Duplicate(unique_column(db_err.message()))
            }
            sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation() => {
                RepoError::InvalidReference("Referenced record does not exist".into())
            }
            sqlx::Error::Database(db_err) if db_err.is_check_violation() => {
                RepoError::validation("non_field_errors", db_err.message().to_string())
            }
            _ => RepoError::Database(err.to_string()),
        }
    }
}

/// Column named by a SQLite unique violation
///
/// `"UNIQUE constraint failed: account.email"` → `"email"`
pub fn unique_column(message: &str) -> String {
    message
        .rsplit_once(':')
        .map(|(_, cols)| cols)
        .unwrap_or(message)
        .split(',')
        .next()
        .map(|col| col.trim())
        .map(|col| col.rsplit_once('.').map(|(_, c)| c).unwrap_or(col))
        .unwrap_or_default()
        .to_string()
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Everything a repository call may depend on besides its payload
pub struct RepoContext<'a> {
    pub pool: &'a SqlitePool,
    pub rates: &'a RateBook,
    pub actor: Option<&'a CurrentUser>,
}

impl<'a> RepoContext<'a> {
    pub fn new(state: &'a ServerState, actor: Option<&'a CurrentUser>) -> Self {
        Self {
            pool: &state.pool,
            rates: &state.rates,
            actor,
        }
    }

    pub fn actor_id(&self) -> Option<i64> {
        self.actor.map(|u| u.id)
    }

    pub fn actor_is_admin(&self) -> bool {
        self.actor.is_some_and(CurrentUser::is_admin)
    }
}

/// CRUD contract behind the generic resource handlers
///
/// Updates are partial: the payload is merged onto the stored record, the
/// derived fields are recomputed and the full row is written back.
#[async_trait]
pub trait Repository: Send + Sync + 'static {
    type Model: Serialize + Send + 'static;
    type Create: DeserializeOwned + Validate + Send + 'static;
    type Update: DeserializeOwned + Validate + Send + 'static;

    /// Resource name used in messages and logs
    const RESOURCE: &'static str;

    async fn find_all(ctx: &RepoContext<'_>) -> RepoResult<Vec<Self::Model>>;
    async fn find_by_id(ctx: &RepoContext<'_>, id: i64) -> RepoResult<Option<Self::Model>>;
    async fn create(ctx: &RepoContext<'_>, data: Self::Create) -> RepoResult<Self::Model>;
    async fn update(ctx: &RepoContext<'_>, id: i64, data: Self::Update)
    -> RepoResult<Self::Model>;
    async fn delete(ctx: &RepoContext<'_>, id: i64) -> RepoResult<bool>;
}

#[cfg(test)]
pub(crate) mod test_support {
    use shared::models::{Account, AccountCreate, Role};
    use sqlx::SqlitePool;

    use crate::auth::CurrentUser;
    use crate::db::DbService;

    pub async fn test_pool() -> SqlitePool {
        DbService::memory().await.unwrap().pool
    }

    pub async fn make_account(pool: &SqlitePool, email: &str, phone: &str, role: Role) -> Account {
        super::account::insert(
            pool,
            AccountCreate {
                name: "Test".into(),
                email: email.into(),
                phone_number: phone.into(),
                password: "secret5".into(),
                role: Some(role),
                is_active: None,
            },
        )
        .await
        .unwrap()
    }

    pub fn user(account: &Account) -> CurrentUser {
        CurrentUser::from(account)
    }
}
