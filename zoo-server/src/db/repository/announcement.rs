//! Announcement Repository

use async_trait::async_trait;
use shared::models::{Announcement, AnnouncementCreate, AnnouncementUpdate};
use shared::util::now_millis;
use sqlx::SqlitePool;

use super::{RepoContext, RepoError, RepoResult, Repository};

const ANNOUNCEMENT_SELECT: &str = "SELECT id, title, content, status, created_by, created_at, messages, begin_date, end_date FROM announcement";

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Announcement>> {
    let sql = format!("{ANNOUNCEMENT_SELECT} ORDER BY created_at DESC, id DESC");
    let rows = sqlx::query_as::<_, Announcement>(&sql)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Announcement>> {
    let sql = format!("{ANNOUNCEMENT_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, Announcement>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

fn check_window(begin: Option<chrono::NaiveDate>, end: Option<chrono::NaiveDate>) -> RepoResult<()> {
    if let (Some(begin), Some(end)) = (begin, end)
        && end < begin
    {
        return Err(RepoError::validation(
            "end_date",
            "End date must not precede begin date",
        ));
    }
    Ok(())
}

/// Insert an announcement; `author` fills `created_by` when the payload
/// leaves it out
pub async fn create(
    pool: &SqlitePool,
    author: Option<i64>,
    data: AnnouncementCreate,
) -> RepoResult<Announcement> {
    check_window(data.begin_date, data.end_date)?;

    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO announcement (title, content, status, created_by, created_at, messages, begin_date, end_date) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8) RETURNING id",
    )
    .bind(&data.title)
    .bind(&data.content)
    .bind(data.status.unwrap_or_default())
    .bind(data.created_by.or(author))
    .bind(now_millis())
    .bind(&data.messages)
    .bind(data.begin_date)
    .bind(data.end_date)
    .fetch_one(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create announcement".into()))
}

pub async fn update(
    pool: &SqlitePool,
    id: i64,
    data: AnnouncementUpdate,
) -> RepoResult<Announcement> {
    let mut announcement = find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Announcement {id} not found")))?;
    data.apply(&mut announcement);
    check_window(announcement.begin_date, announcement.end_date)?;

    sqlx::query(
        "UPDATE announcement SET title = ?1, content = ?2, status = ?3, messages = ?4, begin_date = ?5, end_date = ?6 WHERE id = ?7",
    )
    .bind(&announcement.title)
    .bind(&announcement.content)
    .bind(announcement.status)
    .bind(&announcement.messages)
    .bind(announcement.begin_date)
    .bind(announcement.end_date)
    .bind(id)
    .execute(pool)
    .await?;

    Ok(announcement)
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let result = sqlx::query("DELETE FROM announcement WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// `/api/announcements`
pub struct AnnouncementRepository;

#[async_trait]
impl Repository for AnnouncementRepository {
    type Model = Announcement;
    type Create = AnnouncementCreate;
    type Update = AnnouncementUpdate;

    const RESOURCE: &'static str = "Announcement";

    async fn find_all(ctx: &RepoContext<'_>) -> RepoResult<Vec<Announcement>> {
        find_all(ctx.pool).await
    }

    async fn find_by_id(ctx: &RepoContext<'_>, id: i64) -> RepoResult<Option<Announcement>> {
        find_by_id(ctx.pool, id).await
    }

    async fn create(ctx: &RepoContext<'_>, data: AnnouncementCreate) -> RepoResult<Announcement> {
        create(ctx.pool, ctx.actor_id(), data).await
    }

    async fn update(
        ctx: &RepoContext<'_>,
        id: i64,
        data: AnnouncementUpdate,
    ) -> RepoResult<Announcement> {
        update(ctx.pool, id, data).await
    }

    async fn delete(ctx: &RepoContext<'_>, id: i64) -> RepoResult<bool> {
        delete(ctx.pool, id).await
    }
}
