//! Data models
//!
//! Shared between zoo-server and API clients.
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` (SQLite INTEGER PRIMARY KEY).

pub mod account;
pub mod animal;
pub mod announcement;
pub mod event;
pub mod reservation;
pub mod role;
pub mod sale;
pub mod staff;
pub mod ticket;
pub mod validators;
pub mod zoo_params;

// Re-exports
pub use account::*;
pub use animal::*;
pub use announcement::*;
pub use event::*;
pub use reservation::*;
pub use role::*;
pub use sale::*;
pub use staff::*;
pub use ticket::*;
pub use zoo_params::*;
