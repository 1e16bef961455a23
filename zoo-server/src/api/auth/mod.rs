//! Authentication Routes
//!
//! | Path | Method | Access |
//! |------|--------|--------|
//! | /api/auth/register | POST | public |
//! | /api/auth/login | POST | public |
//! | /api/auth/me | GET, PUT | authenticated |

mod handler;

use axum::{Router, routing::get, routing::post};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/auth/register", post(handler::register))
        .route("/api/auth/login", post(handler::login))
        // CurrentUser extractor rejects anonymous callers
        .route("/api/auth/me", get(handler::me).put(handler::update_me))
}
