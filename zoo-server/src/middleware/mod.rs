//! HTTP middleware shared by every route

mod logging;

pub use logging::logging_middleware;
