//! Zoo Server - back-office HTTP API for a zoo
//!
//! # Overview
//!
//! - **Pricing** (`pricing`): rate tables and the derived-price rule for
//!   tickets and reservations
//! - **Auth** (`auth`): JWT + Argon2, role resolution, access policies
//! - **Database** (`db`): SQLite through `sqlx`, migrations, repositories
//! - **HTTP API** (`api`): generic resource routes plus auth and health
//!
//! # Layout
//!
//! ```text
//! zoo-server/src/
//! ├── core/        # config, state, server, start-up errors
//! ├── auth/        # JWT, principal, policies, middleware
//! ├── pricing/     # rate tables, reconcile_price
//! ├── db/          # pool, repositories, admin seed
//! ├── api/         # routers and handlers
//! ├── middleware/  # request logging
//! └── utils/       # error conversions, logger, validated JSON
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod middleware;
pub mod pricing;
pub mod utils;

pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use pricing::{RateBook, RateTable, reconcile_price};
pub use utils::{AppError, AppResult};

pub use utils::{ApiResponse, ErrorCategory, ErrorCode};

pub use utils::logger::{init_logger, init_logger_with_file};

/// Security event log, `target: "security"`
///
/// ```ignore
/// security_log!("WARN", "login_failed", email = email.clone(), reason = "unknown_email");
/// ```
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

pub fn print_banner() {
    println!(
        r#"
 _____               ____
|__  /___   ___     / ___|  ___ _ ____   _____ _ __
  / // _ \ / _ \    \___ \ / _ \ '__\ \ / / _ \ '__|
 / /| (_) | (_) |    ___) |  __/ |   \ V /  __/ |
/____\___/ \___/    |____/ \___|_|    \_/ \___|_|
    "#
    );
}
