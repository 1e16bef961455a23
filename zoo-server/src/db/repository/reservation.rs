//! Reservation Repository

use async_trait::async_trait;
use shared::models::{Reservation, ReservationCreate, ReservationType, ReservationUpdate};
use shared::util::now_millis;
use sqlx::SqlitePool;

use super::{RepoContext, RepoError, RepoResult, Repository};
use crate::pricing::{RateTable, apply_rate, reconcile_price};

const RESERVATION_SELECT: &str = "SELECT id, visitors, tickets, event, type_of_reservation, total_price, arrival_time, has_booked, created_at, updated_at FROM reservation";

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Reservation>> {
    let sql = format!("{RESERVATION_SELECT} ORDER BY created_at DESC, id DESC");
    let rows = sqlx::query_as::<_, Reservation>(&sql)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Reservation>> {
    let sql = format!("{RESERVATION_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, Reservation>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn create(
    pool: &SqlitePool,
    rates: &RateTable<ReservationType>,
    data: ReservationCreate,
) -> RepoResult<Reservation> {
    let total_price = reconcile_price(rates, data.type_of_reservation, data.total_price)
        .ok_or(RepoError::PriceRequired("total_price"))?;
    let now = now_millis();

    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO reservation (visitors, tickets, event, type_of_reservation, total_price, arrival_time, has_booked, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?8) RETURNING id",
    )
    .bind(data.visitors)
    .bind(data.tickets)
    .bind(data.event)
    .bind(data.type_of_reservation)
    .bind(total_price)
    .bind(data.arrival_time)
    .bind(data.has_booked.unwrap_or(false))
    .bind(now)
    .fetch_one(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create reservation".into()))
}

pub async fn update(
    pool: &SqlitePool,
    rates: &RateTable<ReservationType>,
    id: i64,
    data: ReservationUpdate,
) -> RepoResult<Reservation> {
    let mut reservation = find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Reservation {id} not found")))?;
    data.apply(&mut reservation);
    apply_rate(rates, &mut reservation);
    reservation.updated_at = now_millis();

    sqlx::query(
        "UPDATE reservation SET visitors = ?1, tickets = ?2, event = ?3, type_of_reservation = ?4, total_price = ?5, arrival_time = ?6, has_booked = ?7, updated_at = ?8 WHERE id = ?9",
    )
    .bind(reservation.visitors)
    .bind(reservation.tickets)
    .bind(reservation.event)
    .bind(reservation.type_of_reservation)
    .bind(reservation.total_price)
    .bind(reservation.arrival_time)
    .bind(reservation.has_booked)
    .bind(reservation.updated_at)
    .bind(id)
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Reservation {id} not found")))
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let result = sqlx::query("DELETE FROM reservation WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// `/api/reservations`, priced from the reservation rate table
pub struct ReservationRepository;

#[async_trait]
impl Repository for ReservationRepository {
    type Model = Reservation;
    type Create = ReservationCreate;
    type Update = ReservationUpdate;

    const RESOURCE: &'static str = "Reservation";

    async fn find_all(ctx: &RepoContext<'_>) -> RepoResult<Vec<Reservation>> {
        find_all(ctx.pool).await
    }

    async fn find_by_id(ctx: &RepoContext<'_>, id: i64) -> RepoResult<Option<Reservation>> {
        find_by_id(ctx.pool, id).await
    }

    async fn create(ctx: &RepoContext<'_>, data: ReservationCreate) -> RepoResult<Reservation> {
        create(ctx.pool, &ctx.rates.reservations, data).await
    }

    async fn update(
        ctx: &RepoContext<'_>,
        id: i64,
        data: ReservationUpdate,
    ) -> RepoResult<Reservation> {
        update(ctx.pool, &ctx.rates.reservations, id, data).await
    }

    async fn delete(ctx: &RepoContext<'_>, id: i64) -> RepoResult<bool> {
        delete(ctx.pool, id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::test_support::test_pool;
    use crate::pricing::RateBook;

    fn booking(kind: ReservationType, total_price: Option<i64>) -> ReservationCreate {
        ReservationCreate {
            visitors: None,
            tickets: None,
            event: None,
            type_of_reservation: kind,
            total_price,
            arrival_time: None,
            has_booked: None,
        }
    }

    #[tokio::test]
    async fn test_enfant_without_price_takes_rate() {
        let pool = test_pool().await;
        let rates = RateBook::default();

        let r = create(&pool, &rates.reservations, booking(ReservationType::Enfant, None))
            .await
            .unwrap();
        assert_eq!(r.total_price, 1_000);
        assert!(!r.has_booked);
        assert_eq!(r.created_at, r.updated_at);
    }

    #[tokio::test]
    async fn test_update_bumps_timestamp_and_keeps_price() {
        let pool = test_pool().await;
        let rates = RateBook::default();
        let r = create(
            &pool,
            &rates.reservations,
            booking(ReservationType::Couple, Some(40_000)),
        )
        .await
        .unwrap();

        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        let updated = update(
            &pool,
            &rates.reservations,
            r.id,
            ReservationUpdate {
                has_booked: Some(true),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert!(updated.has_booked);
        assert_eq!(updated.total_price, 40_000);
        assert!(updated.updated_at > r.updated_at);
        assert_eq!(updated.created_at, r.created_at);
    }

    #[tokio::test]
    async fn test_unknown_event_is_invalid_reference() {
        let pool = test_pool().await;
        let rates = RateBook::default();
        let mut data = booking(ReservationType::Vip, None);
        data.event = Some(42);

        let err = create(&pool, &rates.reservations, data).await.unwrap_err();
        assert!(matches!(err, RepoError::InvalidReference(_)));
    }

    #[tokio::test]
    async fn test_missing_id() {
        let pool = test_pool().await;
        let rates = RateBook::default();
        assert!(find_by_id(&pool, 1).await.unwrap().is_none());
        assert!(!delete(&pool, 1).await.unwrap());
        assert!(matches!(
            update(&pool, &rates.reservations, 1, ReservationUpdate::default()).await,
            Err(RepoError::NotFound(_))
        ));
    }
}
