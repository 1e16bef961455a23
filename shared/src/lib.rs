//! Shared types for the zoo back-office
//!
//! Domain models, the unified error system and the client DTOs used by
//! zoo-server and its API clients.

pub mod client;
pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
pub use serde::{Deserialize, Serialize};
