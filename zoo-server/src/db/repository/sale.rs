//! Sale Repository

use async_trait::async_trait;
use shared::models::{Sale, SaleCreate, SaleUpdate};
use sqlx::SqlitePool;

use super::{RepoContext, RepoError, RepoResult, Repository};

const SALE_SELECT: &str =
    "SELECT id, client_name, total_revenue, total_paid, primary_currency, date FROM sale";

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Sale>> {
    let sql = format!("{SALE_SELECT} ORDER BY date DESC, id DESC");
    let rows = sqlx::query_as::<_, Sale>(&sql).fetch_all(pool).await?;
    Ok(rows)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Sale>> {
    let sql = format!("{SALE_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, Sale>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn create(pool: &SqlitePool, data: SaleCreate) -> RepoResult<Sale> {
    let data = data.normalized();
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO sale (client_name, total_revenue, total_paid, primary_currency, date) VALUES (?1, ?2, ?3, ?4, ?5) RETURNING id",
    )
    .bind(&data.client_name)
    .bind(data.total_revenue)
    .bind(data.total_paid)
    .bind(&data.primary_currency)
    .bind(data.date)
    .fetch_one(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create sale".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: SaleUpdate) -> RepoResult<Sale> {
    let mut sale = find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Sale {id} not found")))?;
    data.apply(&mut sale);

    sqlx::query(
        "UPDATE sale SET client_name = ?1, total_revenue = ?2, total_paid = ?3, primary_currency = ?4, date = ?5 WHERE id = ?6",
    )
    .bind(&sale.client_name)
    .bind(sale.total_revenue)
    .bind(sale.total_paid)
    .bind(&sale.primary_currency)
    .bind(sale.date)
    .bind(id)
    .execute(pool)
    .await?;

    Ok(sale)
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let result = sqlx::query("DELETE FROM sale WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

pub struct SaleRepository;

#[async_trait]
impl Repository for SaleRepository {
    type Model = Sale;
    type Create = SaleCreate;
    type Update = SaleUpdate;

    const RESOURCE: &'static str = "Sale";

    async fn find_all(ctx: &RepoContext<'_>) -> RepoResult<Vec<Sale>> {
        find_all(ctx.pool).await
    }

    async fn find_by_id(ctx: &RepoContext<'_>, id: i64) -> RepoResult<Option<Sale>> {
        find_by_id(ctx.pool, id).await
    }

    async fn create(ctx: &RepoContext<'_>, data: SaleCreate) -> RepoResult<Sale> {
        create(ctx.pool, data).await
    }

    async fn update(ctx: &RepoContext<'_>, id: i64, data: SaleUpdate) -> RepoResult<Sale> {
        update(ctx.pool, id, data).await
    }

    async fn delete(ctx: &RepoContext<'_>, id: i64) -> RepoResult<bool> {
        delete(ctx.pool, id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::test_support::test_pool;
    use chrono::NaiveDate;

    #[tokio::test]
    async fn test_amounts_stored_rounded() {
        let pool = test_pool().await;
        let sale = create(
            &pool,
            SaleCreate {
                client_name: "Ecole Saint-Joseph".into(),
                total_revenue: 1250.456,
                total_paid: 1000.0,
                primary_currency: "usd".into(),
                date: NaiveDate::from_ymd_opt(2026, 10, 16).unwrap(),
            },
        )
        .await
        .unwrap();
        assert_eq!(sale.total_revenue, 1250.46);
        assert_eq!(sale.primary_currency, "USD");

        let sale = update(
            &pool,
            sale.id,
            SaleUpdate {
                total_paid: Some(1250.456),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(sale.total_paid, 1250.46);

        let stored = find_by_id(&pool, sale.id).await.unwrap().unwrap();
        assert_eq!(stored.total_paid, 1250.46);
    }
}
