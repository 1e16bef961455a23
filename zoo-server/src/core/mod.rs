//! Core: configuration, shared state, server and start-up errors
//!
//! - [`Config`] - environment-driven configuration
//! - [`ServerState`] - state shared by handlers
//! - [`Server`] - HTTP server
//! - [`ServerError`] - start-up errors

pub mod config;
pub mod error;
pub mod server;
pub mod state;

pub use config::{AdminBootstrap, Config};
pub use error::{Result, ServerError};
pub use server::Server;
pub use state::ServerState;
