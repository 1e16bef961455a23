//! Animal Repository

use async_trait::async_trait;
use shared::models::{Animal, AnimalCreate, AnimalUpdate};
use sqlx::SqlitePool;

use super::{RepoContext, RepoError, RepoResult, Repository};

/// Health status recorded for a new animal when none is given
pub const DEFAULT_HEALTH_STATUS: &str = "healthy";

const ANIMAL_SELECT: &str = "SELECT id, name, age, species, enclosure, caretaker, health_status, is_being_treated, last_control FROM animal";

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Animal>> {
    let sql = format!("{ANIMAL_SELECT} ORDER BY species, name, id");
    let rows = sqlx::query_as::<_, Animal>(&sql).fetch_all(pool).await?;
    Ok(rows)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Animal>> {
    let sql = format!("{ANIMAL_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, Animal>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn create(pool: &SqlitePool, data: AnimalCreate) -> RepoResult<Animal> {
    let health_status = data
        .health_status
        .unwrap_or_else(|| DEFAULT_HEALTH_STATUS.to_string());

    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO animal (name, age, species, enclosure, caretaker, health_status, is_being_treated, last_control) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8) RETURNING id",
    )
    .bind(&data.name)
    .bind(data.age)
    .bind(&data.species)
    .bind(&data.enclosure)
    .bind(data.caretaker)
    .bind(&health_status)
    .bind(data.is_being_treated.unwrap_or(false))
    .bind(data.last_control)
    .fetch_one(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create animal".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: AnimalUpdate) -> RepoResult<Animal> {
    let mut animal = find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Animal {id} not found")))?;
    data.apply(&mut animal);

    sqlx::query(
        "UPDATE animal SET name = ?1, age = ?2, species = ?3, enclosure = ?4, caretaker = ?5, health_status = ?6, is_being_treated = ?7, last_control = ?8 WHERE id = ?9",
    )
    .bind(&animal.name)
    .bind(animal.age)
    .bind(&animal.species)
    .bind(&animal.enclosure)
    .bind(animal.caretaker)
    .bind(&animal.health_status)
    .bind(animal.is_being_treated)
    .bind(animal.last_control)
    .bind(id)
    .execute(pool)
    .await?;

    Ok(animal)
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let result = sqlx::query("DELETE FROM animal WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// `/api/animals`: listing is public, single records are back-office only
pub struct AnimalRepository;

#[async_trait]
impl Repository for AnimalRepository {
    type Model = Animal;
    type Create = AnimalCreate;
    type Update = AnimalUpdate;

    const RESOURCE: &'static str = "Animal";

    async fn find_all(ctx: &RepoContext<'_>) -> RepoResult<Vec<Animal>> {
        find_all(ctx.pool).await
    }

    async fn find_by_id(ctx: &RepoContext<'_>, id: i64) -> RepoResult<Option<Animal>> {
        find_by_id(ctx.pool, id).await
    }

    async fn create(ctx: &RepoContext<'_>, data: AnimalCreate) -> RepoResult<Animal> {
        create(ctx.pool, data).await
    }

    async fn update(ctx: &RepoContext<'_>, id: i64, data: AnimalUpdate) -> RepoResult<Animal> {
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
    use shared::models::Role;

    fn okapi(caretaker: Option<i64>) -> AnimalCreate {
        AnimalCreate {
            name: "Kito".into(),
            age: 4,
            species: "Okapi".into(),
            enclosure: "Forest B".into(),
            caretaker,
            health_status: None,
            is_being_treated: None,
            last_control: None,
        }
    }

    #[tokio::test]
    async fn test_defaults_and_treatment_update() {
        let pool = test_pool().await;
        let animal = create(&pool, okapi(None)).await.unwrap();
        assert_eq!(animal.health_status, DEFAULT_HEALTH_STATUS);
        assert!(!animal.is_being_treated);

        let animal = update(
            &pool,
            animal.id,
            AnimalUpdate {
                health_status: Some("injured".into()),
                is_being_treated: Some(true),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert!(animal.is_being_treated);
        assert_eq!(animal.name, "Kito");
    }

    #[tokio::test]
    async fn test_caretaker_removed_with_account() {
        let pool = test_pool().await;
        let keeper = make_account(&pool, "k@z.io", "+243900000050", Role::Staff).await;
        let animal = create(&pool, okapi(Some(keeper.id))).await.unwrap();
        assert_eq!(animal.caretaker, Some(keeper.id));

        crate::db::repository::account::delete(&pool, keeper.id)
            .await
            .unwrap();
        let animal = find_by_id(&pool, animal.id).await.unwrap().unwrap();
        assert_eq!(animal.caretaker, None);
    }
}
