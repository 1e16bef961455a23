//! Generic resource routes
//!
//! One set of CRUD handlers, instantiated per entity through its
//! [`Repository`] type and guarded by a [`ResourcePolicy`].
//!
//! | Path | Method | Handler | Policy |
//! |------|--------|---------|--------|
//! | {path} | GET | list | collection |
//! | {path} | POST | create (201) | collection |
//! | {path}/{id} | GET | retrieve | item |
//! | {path}/{id} | PUT, PATCH | update (partial merge) | item |
//! | {path}/{id} | DELETE | remove (`true`) | item |

use axum::{
    Json, Router,
    extract::{FromRequestParts, Path, State},
    http::{StatusCode, request::Parts},
    middleware,
    routing::get,
};

use crate::auth::{Caller, ResourcePolicy, require_policy};
use crate::core::ServerState;
use crate::db::repository::{RepoContext, Repository};
use crate::utils::{AppError, AppResult, ErrorCode, ValidatedJson};

pub fn resource_router<R: Repository>(path: &str, policy: ResourcePolicy) -> Router<ServerState> {
    let collection = Router::new()
        .route(path, get(list::<R>).post(create::<R>))
        .route_layer(middleware::from_fn(require_policy(policy.collection)));

    let item = Router::new()
        .route(
            &format!("{path}/{{id}}"),
            get(retrieve::<R>)
                .put(update::<R>)
                .patch(update::<R>)
                .delete(remove::<R>),
        )
        .route_layer(middleware::from_fn(require_policy(policy.item)));

    collection.merge(item)
}

/// Numeric `{id}` segment; anything else is an unknown record
#[derive(Debug, Clone, Copy)]
pub struct IdPath(pub i64);

impl<S> FromRequestParts<S> for IdPath
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Path::<i64>::from_request_parts(parts, state)
            .await
            .map(|Path(id)| IdPath(id))
            .map_err(|_| AppError::new(ErrorCode::NotFound))
    }
}

fn not_found<R: Repository>(id: i64) -> AppError {
    AppError::not_found(format!("{} {id}", R::RESOURCE))
}

async fn list<R: Repository>(
    State(state): State<ServerState>,
    caller: Caller,
) -> AppResult<Json<Vec<R::Model>>> {
    let ctx = RepoContext::new(&state, caller.user());
    Ok(Json(R::find_all(&ctx).await?))
}

async fn retrieve<R: Repository>(
    State(state): State<ServerState>,
    caller: Caller,
    IdPath(id): IdPath,
) -> AppResult<Json<R::Model>> {
    let ctx = RepoContext::new(&state, caller.user());
    let model = R::find_by_id(&ctx, id)
        .await?
        .ok_or_else(|| not_found::<R>(id))?;
    Ok(Json(model))
}

async fn create<R: Repository>(
    State(state): State<ServerState>,
    caller: Caller,
    ValidatedJson(payload): ValidatedJson<R::Create>,
) -> AppResult<(StatusCode, Json<R::Model>)> {
    let ctx = RepoContext::new(&state, caller.user());
    let model = R::create(&ctx, payload).await?;

    tracing::info!(resource = R::RESOURCE, actor = ?ctx.actor_id(), "Record created");
    Ok((StatusCode::CREATED, Json(model)))
}

async fn update<R: Repository>(
    State(state): State<ServerState>,
    caller: Caller,
    IdPath(id): IdPath,
    ValidatedJson(payload): ValidatedJson<R::Update>,
) -> AppResult<Json<R::Model>> {
    let ctx = RepoContext::new(&state, caller.user());
    let model = R::update(&ctx, id, payload).await?;

    tracing::info!(resource = R::RESOURCE, id, actor = ?ctx.actor_id(), "Record updated");
    Ok(Json(model))
}

async fn remove<R: Repository>(
    State(state): State<ServerState>,
    caller: Caller,
    IdPath(id): IdPath,
) -> AppResult<Json<bool>> {
    let ctx = RepoContext::new(&state, caller.user());
    if !R::delete(&ctx, id).await? {
        return Err(not_found::<R>(id));
    }

    tracing::info!(resource = R::RESOURCE, id, actor = ?ctx.actor_id(), "Record deleted");
    Ok(Json(true))
}
