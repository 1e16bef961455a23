//! Personnel Repository
//!
//! Staff accounts joined with their staff profile. Creating personnel
//! creates a staff account plus profile in one transaction; deleting it
//! deletes the account (the profile cascades).

use async_trait::async_trait;
use shared::models::{Personnel, PersonnelCreate, PersonnelUpdate, Role, StaffProfile};
use sqlx::{SqliteConnection, SqlitePool};

use super::{RepoContext, RepoError, RepoResult, Repository, account};
use crate::auth::password::UNUSABLE_PASSWORD;

const PERSONNEL_SELECT: &str = "SELECT a.id, a.name, a.email, a.phone_number, a.role, a.is_active, a.date_joined, p.title, p.department, p.role_personnel, p.hire_date, p.status FROM account a LEFT JOIN staff_profile p ON p.account_id = a.id";

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Personnel>> {
    let sql = format!("{PERSONNEL_SELECT} WHERE a.role = 'staff' ORDER BY a.name, a.id");
    let rows = sqlx::query_as::<_, Personnel>(&sql).fetch_all(pool).await?;
    Ok(rows)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Personnel>> {
    let sql = format!("{PERSONNEL_SELECT} WHERE a.id = ? AND a.role = 'staff'");
    let row = sqlx::query_as::<_, Personnel>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Extended shape of any account, profile columns null when absent
pub async fn find_extended(pool: &SqlitePool, account_id: i64) -> RepoResult<Option<Personnel>> {
    let sql = format!("{PERSONNEL_SELECT} WHERE a.id = ?");
    let row = sqlx::query_as::<_, Personnel>(&sql)
        .bind(account_id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

async fn find_profile(pool: &SqlitePool, account_id: i64) -> RepoResult<Option<StaffProfile>> {
    let row = sqlx::query_as::<_, StaffProfile>(
        "SELECT account_id, title, department, role_personnel, hire_date, status FROM staff_profile WHERE account_id = ?",
    )
    .bind(account_id)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

async fn write_profile(conn: &mut SqliteConnection, profile: &StaffProfile) -> RepoResult<()> {
    sqlx::query(
        "INSERT INTO staff_profile (account_id, title, department, role_personnel, hire_date, status) VALUES (?1, ?2, ?3, ?4, ?5, ?6) \
         ON CONFLICT(account_id) DO UPDATE SET title = excluded.title, department = excluded.department, role_personnel = excluded.role_personnel, hire_date = excluded.hire_date, status = excluded.status",
    )
    .bind(profile.account_id)
    .bind(&profile.title)
    .bind(&profile.department)
    .bind(&profile.role_personnel)
    .bind(profile.hire_date)
    .bind(profile.status)
    .execute(&mut *conn)
    .await?;
    Ok(())
}

pub async fn create(pool: &SqlitePool, data: PersonnelCreate) -> RepoResult<Personnel> {
    let password_hash = match &data.password {
        Some(password) => account::hash(password)?,
        None => UNUSABLE_PASSWORD.to_string(),
    };

    let mut tx = pool.begin().await?;
    let id = account::insert_row(
        &mut tx,
        &data.name,
        &data.email,
        &data.phone_number,
        &password_hash,
        Role::Staff,
        data.is_active.unwrap_or(true),
    )
    .await?;
    write_profile(&mut tx, &data.profile(id)).await?;
    tx.commit().await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create personnel".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: PersonnelUpdate) -> RepoResult<Personnel> {
    let not_found = || RepoError::NotFound(format!("Personnel {id} not found"));

    let mut account = account::find_by_id(pool, id)
        .await?
        .filter(|a| a.role == Role::Staff)
        .ok_or_else(not_found)?;
    let mut profile = find_profile(pool, id).await?.unwrap_or(StaffProfile {
        account_id: id,
        ..Default::default()
    });

    let account_update = data.account_update();
    if let Some(password) = &account_update.password {
        account.password_hash = account::hash(password)?;
    }
    account_update.apply(&mut account);
    data.apply_profile(&mut profile);

    let mut tx = pool.begin().await?;
    account::write_row(&mut tx, &account).await?;
    write_profile(&mut tx, &profile).await?;
    tx.commit().await?;

    find_by_id(pool, id).await?.ok_or_else(not_found)
}

/// Delete a staff account; other accounts are not personnel
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let result = sqlx::query("DELETE FROM account WHERE id = ? AND role = 'staff'")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// `/api/personnel`
pub struct PersonnelRepository;

#[async_trait]
impl Repository for PersonnelRepository {
    type Model = Personnel;
    type Create = PersonnelCreate;
    type Update = PersonnelUpdate;

    const RESOURCE: &'static str = "Personnel";

    async fn find_all(ctx: &RepoContext<'_>) -> RepoResult<Vec<Personnel>> {
        find_all(ctx.pool).await
    }

    async fn find_by_id(ctx: &RepoContext<'_>, id: i64) -> RepoResult<Option<Personnel>> {
        find_by_id(ctx.pool, id).await
    }

    async fn create(ctx: &RepoContext<'_>, data: PersonnelCreate) -> RepoResult<Personnel> {
        create(ctx.pool, data).await
    }

    async fn update(
        ctx: &RepoContext<'_>,
        id: i64,
        data: PersonnelUpdate,
    ) -> RepoResult<Personnel> {
        update(ctx.pool, id, data).await
    }

    async fn delete(ctx: &RepoContext<'_>, id: i64) -> RepoResult<bool> {
        delete(ctx.pool, id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::verify_password;
    use crate::db::repository::test_support::{make_account, test_pool};
    use chrono::NaiveDate;
    use shared::models::StaffStatus;

    fn keeper() -> PersonnelCreate {
        PersonnelCreate {
            name: "Neema".into(),
            email: "neema@zoo.io".into(),
            phone_number: "+243900000010".into(),
            password: None,
            is_active: None,
            title: Some("Keeper".into()),
            department: Some("Primates".into()),
            role_personnel: Some("keeper".into()),
            hire_date: NaiveDate::from_ymd_opt(2024, 3, 1),
            status: None,
        }
    }

    #[tokio::test]
    async fn test_create_makes_staff_account_and_profile() {
        let pool = test_pool().await;
        let p = create(&pool, keeper()).await.unwrap();

        assert_eq!(p.role, Role::Staff);
        assert_eq!(p.title.as_deref(), Some("Keeper"));
        assert_eq!(p.status, Some(StaffStatus::Active));
        assert_eq!(p.hire_date, NaiveDate::from_ymd_opt(2024, 3, 1));

        // No password given: the account exists but cannot log in
        let account = account::find_by_id(&pool, p.id).await.unwrap().unwrap();
        assert!(!verify_password("", &account.password_hash));
    }

    #[tokio::test]
    async fn test_update_merges_both_halves() {
        let pool = test_pool().await;
        let p = create(&pool, keeper()).await.unwrap();

        let updated = update(
            &pool,
            p.id,
            PersonnelUpdate {
                name: Some("Neema K.".into()),
                status: Some(StaffStatus::OnLeave),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        assert_eq!(updated.name, "Neema K.");
        assert_eq!(updated.status, Some(StaffStatus::OnLeave));
        assert_eq!(updated.department.as_deref(), Some("Primates"));
    }

    #[tokio::test]
    async fn test_visitors_are_not_personnel() {
        let pool = test_pool().await;
        let visitor = make_account(&pool, "v@z.io", "+243900000011", Role::Visitor).await;

        assert!(find_by_id(&pool, visitor.id).await.unwrap().is_none());
        assert!(find_all(&pool).await.unwrap().is_empty());
        assert!(!delete(&pool, visitor.id).await.unwrap());
        assert!(matches!(
            update(&pool, visitor.id, PersonnelUpdate::default()).await,
            Err(RepoError::NotFound(_))
        ));

        let extended = find_extended(&pool, visitor.id).await.unwrap().unwrap();
        assert!(extended.title.is_none());
        assert!(extended.status.is_none());
    }

    #[tokio::test]
    async fn test_delete_cascades_profile() {
        let pool = test_pool().await;
        let p = create(&pool, keeper()).await.unwrap();
        assert!(delete(&pool, p.id).await.unwrap());
        assert!(find_profile(&pool, p.id).await.unwrap().is_none());
        assert!(account::find_by_id(&pool, p.id).await.unwrap().is_none());
    }
}
