//! Event Repository
//!
//! Participants live in `event_participant`; the set is rewritten with the
//! event row in one transaction.

use std::collections::HashMap;

use async_trait::async_trait;
use shared::models::{Event, EventCreate, EventUpdate};
use shared::util::now_millis;
use sqlx::{SqliteConnection, SqlitePool};

use super::{RepoContext, RepoError, RepoResult, Repository};

const EVENT_SELECT: &str = "SELECT id, title, description, event_date, day, start_time, end_time, price, created_at FROM event";

async fn participants_of(pool: &SqlitePool, event_id: i64) -> RepoResult<Vec<i64>> {
    let ids = sqlx::query_scalar::<_, i64>(
        "SELECT account_id FROM event_participant WHERE event_id = ? ORDER BY account_id",
    )
    .bind(event_id)
    .fetch_all(pool)
    .await?;
    Ok(ids)
}

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Event>> {
    let sql = format!("{EVENT_SELECT} ORDER BY event_date, start_time, id");
    let mut events = sqlx::query_as::<_, Event>(&sql).fetch_all(pool).await?;

    let pairs = sqlx::query_as::<_, (i64, i64)>(
        "SELECT event_id, account_id FROM event_participant ORDER BY event_id, account_id",
    )
    .fetch_all(pool)
    .await?;
    let mut by_event: HashMap<i64, Vec<i64>> = HashMap::new();
    for (event_id, account_id) in pairs {
        by_event.entry(event_id).or_default().push(account_id);
    }
    for event in &mut events {
        event.participants = by_event.remove(&event.id).unwrap_or_default();
    }
    Ok(events)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Event>> {
    let sql = format!("{EVENT_SELECT} WHERE id = ?");
    let event = sqlx::query_as::<_, Event>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    match event {
        Some(mut event) => {
            event.participants = participants_of(pool, id).await?;
            Ok(Some(event))
        }
        None => Ok(None),
    }
}

fn check_times(event: &Event) -> RepoResult<()> {
    if event.end_time <= event.start_time {
        return Err(RepoError::validation(
            "end_time",
            "End time must be after start time",
        ));
    }
    Ok(())
}

async fn replace_participants(
    conn: &mut SqliteConnection,
    event_id: i64,
    participants: &[i64],
) -> RepoResult<()> {
    sqlx::query("DELETE FROM event_participant WHERE event_id = ?")
        .bind(event_id)
        .execute(&mut *conn)
        .await?;
    for account_id in participants {
        sqlx::query(
            "INSERT OR IGNORE INTO event_participant (event_id, account_id) VALUES (?, ?)",
        )
        .bind(event_id)
        .bind(account_id)
        .execute(&mut *conn)
        .await?;
    }
    Ok(())
}

pub async fn create(pool: &SqlitePool, data: EventCreate) -> RepoResult<Event> {
    let draft = Event {
        id: 0,
        title: data.title,
        description: data.description,
        event_date: data.event_date,
        day: data.day,
        start_time: data.start_time,
        end_time: data.end_time,
        price: data.price,
        participants: data.participants,
        created_at: now_millis(),
    };
    check_times(&draft)?;

    let mut tx = pool.begin().await?;
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO event (title, description, event_date, day, start_time, end_time, price, created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8) RETURNING id",
    )
    .bind(&draft.title)
    .bind(&draft.description)
    .bind(draft.event_date)
    .bind(draft.day)
    .bind(draft.start_time)
    .bind(draft.end_time)
    .bind(draft.price)
    .bind(draft.created_at)
    .fetch_one(&mut *tx)
    .await?;
    replace_participants(&mut tx, id, &draft.participants).await?;
    tx.commit().await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create event".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: EventUpdate) -> RepoResult<Event> {
    let mut event = find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Event {id} not found")))?;
    data.apply(&mut event);
    check_times(&event)?;

    let mut tx = pool.begin().await?;
    sqlx::query(
        "UPDATE event SET title = ?1, description = ?2, event_date = ?3, day = ?4, start_time = ?5, end_time = ?6, price = ?7 WHERE id = ?8",
    )
    .bind(&event.title)
    .bind(&event.description)
    .bind(event.event_date)
    .bind(event.day)
    .bind(event.start_time)
    .bind(event.end_time)
    .bind(event.price)
    .bind(id)
    .execute(&mut *tx)
    .await?;
    replace_participants(&mut tx, id, &event.participants).await?;
    tx.commit().await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Event {id} not found")))
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let result = sqlx::query("DELETE FROM event WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// `/api/events`
pub struct EventRepository;

#[async_trait]
impl Repository for EventRepository {
    type Model = Event;
    type Create = EventCreate;
    type Update = EventUpdate;

    const RESOURCE: &'static str = "Event";

    async fn find_all(ctx: &RepoContext<'_>) -> RepoResult<Vec<Event>> {
        find_all(ctx.pool).await
    }

    async fn find_by_id(ctx: &RepoContext<'_>, id: i64) -> RepoResult<Option<Event>> {
        find_by_id(ctx.pool, id).await
    }

    async fn create(ctx: &RepoContext<'_>, data: EventCreate) -> RepoResult<Event> {
        create(ctx.pool, data).await
    }

    async fn update(ctx: &RepoContext<'_>, id: i64, data: EventUpdate) -> RepoResult<Event> {
        update(ctx.pool, id, data).await
    }

    async fn delete(ctx: &RepoContext<'_>, id: i64) -> RepoResult<bool> {
        delete(ctx.pool, id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::test_support::{make_account, test_pool};
    use chrono::{NaiveDate, NaiveTime};
    use shared::models::{DayOfWeek, Role};

    fn safari(participants: Vec<i64>) -> EventCreate {
        EventCreate {
            title: "Night safari".into(),
            description: None,
            event_date: NaiveDate::from_ymd_opt(2026, 10, 16).unwrap(),
            day: Some(DayOfWeek::Friday),
            start_time: NaiveTime::from_hms_opt(20, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(22, 0, 0).unwrap(),
            price: None,
            participants,
        }
    }

    #[tokio::test]
    async fn test_create_with_participants() {
        let pool = test_pool().await;
        let a = make_account(&pool, "a@z.io", "+243900000020", Role::Visitor).await;
        let b = make_account(&pool, "b@z.io", "+243900000021", Role::Visitor).await;

        let event = create(&pool, safari(vec![b.id, a.id])).await.unwrap();
        let mut expected = vec![a.id, b.id];
        expected.sort();
        assert_eq!(event.participants, expected);
        assert_eq!(event.day, Some(DayOfWeek::Friday));

        let all = find_all(&pool).await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].participants, expected);
    }

    #[tokio::test]
    async fn test_unknown_participant_is_invalid_reference() {
        let pool = test_pool().await;
        let err = create(&pool, safari(vec![999])).await.unwrap_err();
        assert!(matches!(err, RepoError::InvalidReference(_)));
        assert!(find_all(&pool).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_replaces_participants() {
        let pool = test_pool().await;
        let a = make_account(&pool, "a@z.io", "+243900000022", Role::Visitor).await;
        let b = make_account(&pool, "b@z.io", "+243900000023", Role::Visitor).await;
        let event = create(&pool, safari(vec![a.id])).await.unwrap();

        let updated = update(
            &pool,
            event.id,
            EventUpdate {
                participants: Some(vec![b.id]),
                price: Some(5_000),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(updated.participants, vec![b.id]);
        assert_eq!(updated.price, Some(5_000));

        // Untouched participants survive an unrelated update
        let renamed = update(
            &pool,
            event.id,
            EventUpdate {
                title: Some("Dawn safari".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(renamed.participants, vec![b.id]);
    }

    #[tokio::test]
    async fn test_end_before_start_rejected() {
        let pool = test_pool().await;
        let mut bad = safari(vec![]);
        bad.end_time = NaiveTime::from_hms_opt(19, 0, 0).unwrap();
        assert!(matches!(
            create(&pool, bad).await,
            Err(RepoError::Validation { ref field, .. }) if field == "end_time"
        ));
    }
}
