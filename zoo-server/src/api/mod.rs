//! HTTP API
//!
//! - [`health`] - liveness
//! - [`auth`] - registration, login, own profile
//! - [`resource`] - generic CRUD routes, one instance per entity
//!
//! | Resource | Path | collection | item |
//! |----------|------|------------|------|
//! | Account | /api/accounts | AdminOnly | AdminOnly |
//! | Personnel | /api/personnel | AdminOnly | AdminOnly |
//! | Event | /api/events | ReadOpenWriteAdmin | ReadOpenWriteAdmin |
//! | Reservation | /api/reservations | Authenticated | Authenticated |
//! | Ticket | /api/tickets | ReadOpenWriteAdmin | ReadOpenWriteAdmin |
//! | Announcement | /api/announcements | AdminOnly | AdminOnly |
//! | Sale | /api/sales | AdminOnly | AdminOnly |
//! | Animal | /api/animals | ReadOpenWriteAdmin | AdminOnly |
//! | ZooParams | /api/zoo-params | ReadOpenWriteAdmin | ReadOpenWriteAdmin |

pub mod auth;
pub mod health;
pub mod resource;

use axum::Router;
use axum::middleware as axum_middleware;
use http::{HeaderName, HeaderValue};
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::auth::AccessPolicy::{AdminOnly, Authenticated, ReadOpenWriteAdmin};
use crate::auth::ResourcePolicy;
use crate::core::ServerState;
use crate::db::repository::{
    AccountRepository, AnimalRepository, AnnouncementRepository, EventRepository,
    PersonnelRepository, ReservationRepository, SaleRepository, TicketRepository,
    ZooParamsRepository,
};
use crate::middleware;
use resource::resource_router;

pub use crate::utils::{AppError, AppResult};

#[derive(Clone)]
struct XRequestId;

impl MakeRequestId for XRequestId {
    fn make_request_id<B>(&mut self, _request: &http::Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// Every route, no middleware, no state
pub fn build_router() -> Router<ServerState> {
    use ResourcePolicy as P;

    Router::new()
        .merge(health::router())
        .merge(auth::router())
        .merge(resource_router::<AccountRepository>("/api/accounts", P::uniform(AdminOnly)))
        .merge(resource_router::<PersonnelRepository>("/api/personnel", P::uniform(AdminOnly)))
        .merge(resource_router::<EventRepository>(
            "/api/events",
            P::uniform(ReadOpenWriteAdmin),
        ))
        .merge(resource_router::<ReservationRepository>(
            "/api/reservations",
            P::uniform(Authenticated),
        ))
        .merge(resource_router::<TicketRepository>(
            "/api/tickets",
            P::uniform(ReadOpenWriteAdmin),
        ))
        .merge(resource_router::<AnnouncementRepository>(
            "/api/announcements",
            P::uniform(AdminOnly),
        ))
        .merge(resource_router::<SaleRepository>("/api/sales", P::uniform(AdminOnly)))
        .merge(resource_router::<AnimalRepository>(
            "/api/animals",
            P::split(ReadOpenWriteAdmin, AdminOnly),
        ))
        .merge(resource_router::<ZooParamsRepository>(
            "/api/zoo-params",
            P::uniform(ReadOpenWriteAdmin),
        ))
}

/// Routes plus the full middleware stack
///
/// Used by the HTTP server and by tests driving the router in-process.
pub fn build_app(state: &ServerState) -> Router<ServerState> {
    build_router()
        .layer(CorsLayer::permissive())
        .layer(axum_middleware::from_fn(middleware::logging_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::new(
            HeaderName::from_static("x-request-id"),
            XRequestId,
        ))
        .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
            "x-request-id",
        )))
        // Outermost: resolves the caller before anything else runs
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            crate::auth::authenticate,
        ))
}
