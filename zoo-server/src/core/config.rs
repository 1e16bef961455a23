use crate::auth::JwtConfig;
use crate::core::ServerError;

/// Server configuration
///
/// # Environment variables
///
/// | Variable | Default | Description |
/// |----------|---------|-------------|
/// | HTTP_PORT | 3000 | HTTP listen port |
/// | DATABASE_URL | sqlite:zoo.db | SQLite database |
/// | ENVIRONMENT | development | development, staging or production |
/// | LOG_LEVEL | info | tracing filter when RUST_LOG is unset |
/// | LOG_DIR | (unset) | daily rolling log files |
/// | REQUEST_TIMEOUT_MS | 30000 | per-request timeout |
/// | AUTH_DELAY_MS | 500 | fixed login delay |
/// | JWT_SECRET, JWT_* | | see [`JwtConfig`] |
/// | ADMIN_EMAIL, ADMIN_PASSWORD, ADMIN_PHONE, ADMIN_NAME | | bootstrap administrator |
#[derive(Debug, Clone)]
pub struct Config {
    pub http_port: u16,
    pub database_url: String,
    pub environment: String,
    pub log_level: String,
    pub log_dir: Option<String>,
    pub request_timeout_ms: u64,
    /// Every login answer waits this long, hit or miss
    pub auth_delay_ms: u64,
    pub jwt: JwtConfig,
    /// Created at start-up when no admin account exists
    pub admin: Option<AdminBootstrap>,
}

/// Bootstrap administrator credentials
#[derive(Clone)]
pub struct AdminBootstrap {
    pub email: String,
    pub password: String,
    pub phone_number: String,
    pub name: String,
}

impl std::fmt::Debug for AdminBootstrap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminBootstrap")
            .field("email", &self.email)
            .field("phone_number", &self.phone_number)
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl AdminBootstrap {
    /// Present only when both `ADMIN_EMAIL` and `ADMIN_PASSWORD` are set
    pub fn from_env() -> Option<Self> {
        let email = std::env::var("ADMIN_EMAIL").ok()?;
        let password = std::env::var("ADMIN_PASSWORD").ok()?;
        Some(Self {
            email,
            password,
            phone_number: std::env::var("ADMIN_PHONE").unwrap_or_else(|_| "+10000000000".into()),
            name: std::env::var("ADMIN_NAME").unwrap_or_else(|_| "Administrator".into()),
        })
    }
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl Config {
    /// Load from environment variables, falling back to defaults
    pub fn from_env() -> Result<Self, ServerError> {
        let jwt = JwtConfig::from_env().map_err(|e| ServerError::Config(e.to_string()))?;

        Ok(Self {
            http_port: env_parse("HTTP_PORT", 3000),
            database_url: std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite:zoo.db".into()),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("LOG_DIR").ok(),
            request_timeout_ms: env_parse("REQUEST_TIMEOUT_MS", 30_000),
            auth_delay_ms: env_parse("AUTH_DELAY_MS", 500),
            jwt,
            admin: AdminBootstrap::from_env(),
        })
    }

    /// Self-contained configuration for tests: in-memory database, no
    /// login delay, fixed JWT secret, no admin bootstrap
    pub fn for_tests() -> Self {
        Self {
            http_port: 0,
            database_url: "sqlite::memory:".into(),
            environment: "test".into(),
            log_level: "debug".into(),
            log_dir: None,
            request_timeout_ms: 5_000,
            auth_delay_ms: 0,
            jwt: JwtConfig {
                secret: "zoo-server-test-secret-0123456789abcdef".into(),
                expiration_minutes: 60,
                issuer: "zoo-server".into(),
                audience: "zoo-clients".into(),
            },
            admin: None,
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}
