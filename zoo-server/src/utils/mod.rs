//! Utilities
//!
//! - [`AppError`] / [`ApiResponse`] (from `shared::error`) plus conversions
//! - Logger setup
//! - Validated JSON bodies

pub mod error;
pub mod logger;
pub mod validation;

pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
pub use validation::ValidatedJson;
