use std::sync::Arc;

use sqlx::SqlitePool;

use crate::auth::JwtService;
use crate::core::{Config, Result};
use crate::db::{DbService, seed};
use crate::pricing::RateBook;

/// Server state shared by every handler
///
/// Cloning is cheap: the pool is reference-counted and the services sit
/// behind `Arc`.
///
/// | Field | Description |
/// |-------|-------------|
/// | config | immutable configuration |
/// | pool | SQLite connection pool |
/// | jwt_service | token issue/validation |
/// | rates | ticket and reservation rate tables |
#[derive(Clone, Debug)]
pub struct ServerState {
    pub config: Config,
    pub pool: SqlitePool,
    pub jwt_service: Arc<JwtService>,
    pub rates: Arc<RateBook>,
}

impl ServerState {
    pub fn new(config: Config, pool: SqlitePool, rates: RateBook) -> Self {
        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));
        Self {
            config,
            pool,
            jwt_service,
            rates: Arc::new(rates),
        }
    }

    /// Open the database, run migrations and seed the bootstrap admin
    pub async fn initialize(config: &Config) -> Result<Self> {
        let db = DbService::new(&config.database_url).await?;

        if let Some(admin) = &config.admin {
            seed::ensure_admin(&db.pool, admin).await?;
        }

        Ok(Self::new(config.clone(), db.pool, RateBook::default()))
    }

    pub fn get_jwt_service(&self) -> Arc<JwtService> {
        self.jwt_service.clone()
    }
}
