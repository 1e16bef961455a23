//! Ticket Repository

use async_trait::async_trait;
use shared::models::{Ticket, TicketCreate, TicketType, TicketUpdate};
use shared::util::now_millis;
use sqlx::SqlitePool;

use super::{RepoContext, RepoError, RepoResult, Repository};
use crate::pricing::{RateTable, apply_rate, reconcile_price};

const TICKET_SELECT: &str = "SELECT id, reference, visitor, type_ticket, category, visit_date, quantity, price, status, created_at FROM ticket";

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Ticket>> {
    let sql = format!("{TICKET_SELECT} ORDER BY created_at DESC, id DESC");
    let rows = sqlx::query_as::<_, Ticket>(&sql).fetch_all(pool).await?;
    Ok(rows)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Ticket>> {
    let sql = format!("{TICKET_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, Ticket>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn create(
    pool: &SqlitePool,
    rates: &RateTable<TicketType>,
    data: TicketCreate,
) -> RepoResult<Ticket> {
    let price = reconcile_price(rates, data.type_ticket, data.price)
        .ok_or(RepoError::PriceRequired("price"))?;
    let reference = data
        .reference
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO ticket (reference, visitor, type_ticket, category, visit_date, quantity, price, status, created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9) RETURNING id",
    )
    .bind(&reference)
    .bind(data.visitor)
    .bind(data.type_ticket)
    .bind(&data.category)
    .bind(data.visit_date)
    .bind(data.quantity.unwrap_or(1))
    .bind(price)
    .bind(data.status.unwrap_or_default())
    .bind(now_millis())
    .fetch_one(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create ticket".into()))
}

pub async fn update(
    pool: &SqlitePool,
    rates: &RateTable<TicketType>,
    id: i64,
    data: TicketUpdate,
) -> RepoResult<Ticket> {
    let mut ticket = find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Ticket {id} not found")))?;
    data.apply(&mut ticket);
    apply_rate(rates, &mut ticket);

    sqlx::query(
        "UPDATE ticket SET reference = ?1, visitor = ?2, type_ticket = ?3, category = ?4, visit_date = ?5, quantity = ?6, price = ?7, status = ?8 WHERE id = ?9",
    )
    .bind(&ticket.reference)
    .bind(ticket.visitor)
    .bind(ticket.type_ticket)
    .bind(&ticket.category)
    .bind(ticket.visit_date)
    .bind(ticket.quantity)
    .bind(ticket.price)
    .bind(ticket.status)
    .bind(id)
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Ticket {id} not found")))
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let result = sqlx::query("DELETE FROM ticket WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// `/api/tickets`, priced from the ticket rate table
pub struct TicketRepository;

#[async_trait]
impl Repository for TicketRepository {
    type Model = Ticket;
    type Create = TicketCreate;
    type Update = TicketUpdate;

    const RESOURCE: &'static str = "Ticket";

    async fn find_all(ctx: &RepoContext<'_>) -> RepoResult<Vec<Ticket>> {
        find_all(ctx.pool).await
    }

    async fn find_by_id(ctx: &RepoContext<'_>, id: i64) -> RepoResult<Option<Ticket>> {
        find_by_id(ctx.pool, id).await
    }

    async fn create(ctx: &RepoContext<'_>, data: TicketCreate) -> RepoResult<Ticket> {
        create(ctx.pool, &ctx.rates.tickets, data).await
    }

    async fn update(ctx: &RepoContext<'_>, id: i64, data: TicketUpdate) -> RepoResult<Ticket> {
        update(ctx.pool, &ctx.rates.tickets, id, data).await
    }

    async fn delete(ctx: &RepoContext<'_>, id: i64) -> RepoResult<bool> {
        delete(ctx.pool, id).await
    }
}
