//! Zoo Parameters Repository

use async_trait::async_trait;
use shared::models::{ZooParams, ZooParamsCreate, ZooParamsUpdate};
use shared::util::normalize_email;
use sqlx::SqlitePool;

use super::{RepoContext, RepoError, RepoResult, Repository};

pub const DEFAULT_LANGUAGE: &str = "fr";
pub const DEFAULT_FORMAT_DATE: &str = "DD/MM/YYYY";

const PARAMS_SELECT: &str =
    "SELECT id, name, email, phone, currency, address, language, format_date FROM zoo_params";

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<ZooParams>> {
    let sql = format!("{PARAMS_SELECT} ORDER BY id");
    let rows = sqlx::query_as::<_, ZooParams>(&sql).fetch_all(pool).await?;
    Ok(rows)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<ZooParams>> {
    let sql = format!("{PARAMS_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, ZooParams>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn create(pool: &SqlitePool, data: ZooParamsCreate) -> RepoResult<ZooParams> {
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO zoo_params (name, email, phone, currency, address, language, format_date) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7) RETURNING id",
    )
    .bind(&data.name)
    .bind(normalize_email(&data.email))
    .bind(&data.phone)
    .bind(data.currency.to_ascii_uppercase())
    .bind(&data.address)
    .bind(data.language.as_deref().unwrap_or(DEFAULT_LANGUAGE))
    .bind(data.format_date.as_deref().unwrap_or(DEFAULT_FORMAT_DATE))
    .fetch_one(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create zoo parameters".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: ZooParamsUpdate) -> RepoResult<ZooParams> {
    let mut params = find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Zoo parameters {id} not found")))?;
    data.apply(&mut params);

    sqlx::query(
        "UPDATE zoo_params SET name = ?1, email = ?2, phone = ?3, currency = ?4, address = ?5, language = ?6, format_date = ?7 WHERE id = ?8",
    )
    .bind(&params.name)
    .bind(&params.email)
    .bind(&params.phone)
    .bind(&params.currency)
    .bind(&params.address)
    .bind(&params.language)
    .bind(&params.format_date)
    .bind(id)
    .execute(pool)
    .await?;

    Ok(params)
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let result = sqlx::query("DELETE FROM zoo_params WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// `/api/zoo-params`
pub struct ZooParamsRepository;

#[async_trait]
impl Repository for ZooParamsRepository {
    type Model = ZooParams;
    type Create = ZooParamsCreate;
    type Update = ZooParamsUpdate;

    const RESOURCE: &'static str = "Zoo parameters";

    async fn find_all(ctx: &RepoContext<'_>) -> RepoResult<Vec<ZooParams>> {
        find_all(ctx.pool).await
    }

    async fn find_by_id(ctx: &RepoContext<'_>, id: i64) -> RepoResult<Option<ZooParams>> {
        find_by_id(ctx.pool, id).await
    }

    async fn create(ctx: &RepoContext<'_>, data: ZooParamsCreate) -> RepoResult<ZooParams> {
        create(ctx.pool, data).await
    }

    async fn update(
        ctx: &RepoContext<'_>,
        id: i64,
        data: ZooParamsUpdate,
    ) -> RepoResult<ZooParams> {
        update(ctx.pool, id, data).await
    }

    async fn delete(ctx: &RepoContext<'_>, id: i64) -> RepoResult<bool> {
        delete(ctx.pool, id).await
    }
}
