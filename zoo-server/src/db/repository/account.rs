//! Account Repository

use async_trait::async_trait;
use shared::models::{Account, AccountCreate, AccountUpdate, Role};
use shared::util::{normalize_email, now_millis};
use sqlx::{SqliteConnection, SqlitePool};

use super::{RepoContext, RepoError, RepoResult, Repository};
use crate::auth::hash_password;

const ACCOUNT_SELECT: &str = "SELECT id, name, email, phone_number, password_hash, role, is_active, date_joined FROM account";

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Account>> {
    let sql = format!("{ACCOUNT_SELECT} ORDER BY id");
    let rows = sqlx::query_as::<_, Account>(&sql).fetch_all(pool).await?;
    Ok(rows)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Account>> {
    let sql = format!("{ACCOUNT_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, Account>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn find_by_email(pool: &SqlitePool, email: &str) -> RepoResult<Option<Account>> {
    let sql = format!("{ACCOUNT_SELECT} WHERE email = ? LIMIT 1");
    let row = sqlx::query_as::<_, Account>(&sql)
        .bind(normalize_email(email))
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn count_by_role(pool: &SqlitePool, role: Role) -> RepoResult<i64> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM account WHERE role = ?")
        .bind(role)
        .fetch_one(pool)
        .await?;
    Ok(count)
}

pub(crate) fn hash(password: &str) -> RepoResult<String> {
    hash_password(password)
        .map_err(|e| RepoError::Database(format!("Failed to hash password: {e}")))
}

/// Insert the account row inside an open transaction
pub(crate) async fn insert_row(
    conn: &mut SqliteConnection,
    name: &str,
    email: &str,
    phone_number: &str,
    password_hash: &str,
    role: Role,
    is_active: bool,
) -> RepoResult<i64> {
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO account (name, email, phone_number, password_hash, role, is_active, date_joined) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7) RETURNING id",
    )
    .bind(name)
    .bind(normalize_email(email))
    .bind(phone_number)
    .bind(password_hash)
    .bind(role)
    .bind(is_active)
    .bind(now_millis())
    .fetch_one(&mut *conn)
    .await?;
    Ok(id)
}

/// Keep the staff profile in step with the role: created on promotion to
/// staff, removed on demotion
pub(crate) async fn sync_staff_profile(
    conn: &mut SqliteConnection,
    account_id: i64,
    role: Role,
) -> RepoResult<()> {
    if role == Role::Staff {
        sqlx::query("INSERT OR IGNORE INTO staff_profile (account_id) VALUES (?)")
            .bind(account_id)
            .execute(&mut *conn)
            .await?;
    } else {
        sqlx::query("DELETE FROM staff_profile WHERE account_id = ?")
            .bind(account_id)
            .execute(&mut *conn)
            .await?;
    }
    Ok(())
}

pub async fn insert(pool: &SqlitePool, data: AccountCreate) -> RepoResult<Account> {
    let password_hash = hash(&data.password)?;
    let role = data.role.unwrap_or_default();

    let mut tx = pool.begin().await?;
    let id = insert_row(
        &mut tx,
        &data.name,
        &data.email,
        &data.phone_number,
        &password_hash,
        role,
        data.is_active.unwrap_or(true),
    )
    .await?;
    sync_staff_profile(&mut tx, id, role).await?;
    tx.commit().await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create account".into()))
}

/// Merge `data` onto the stored account and write it back
pub async fn update(pool: &SqlitePool, id: i64, data: AccountUpdate) -> RepoResult<Account> {
    let mut account = find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Account {id} not found")))?;

    if let Some(password) = &data.password {
        account.password_hash = hash(password)?;
    }
    data.apply(&mut account);

    let mut tx = pool.begin().await?;
    write_row(&mut tx, &account).await?;
    sync_staff_profile(&mut tx, id, account.role).await?;
    tx.commit().await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Account {id} not found")))
}

pub(crate) async fn write_row(conn: &mut SqliteConnection, account: &Account) -> RepoResult<()> {
    sqlx::query(
        "UPDATE account SET name = ?1, email = ?2, phone_number = ?3, password_hash = ?4, role = ?5, is_active = ?6 WHERE id = ?7",
    )
    .bind(&account.name)
    .bind(&account.email)
    .bind(&account.phone_number)
    .bind(&account.password_hash)
    .bind(account.role)
    .bind(account.is_active)
    .bind(account.id)
    .execute(&mut *conn)
    .await?;
    Ok(())
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let result = sqlx::query("DELETE FROM account WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// `/api/accounts`
///
/// Granting a non-visitor role, changing a role at all, or writing to an
/// administrator account is reserved to administrators.
pub struct AccountRepository;

fn guard_admin_target(ctx: &RepoContext<'_>, target: &Account) -> RepoResult<()> {
    if target.role == Role::Admin && !ctx.actor_is_admin() {
        return Err(RepoError::Forbidden(
            "Only administrators may modify an administrator account".into(),
        ));
    }
    Ok(())
}

#[async_trait]
impl Repository for AccountRepository {
    type Model = Account;
    type Create = AccountCreate;
    type Update = AccountUpdate;

    const RESOURCE: &'static str = "Account";

    async fn find_all(ctx: &RepoContext<'_>) -> RepoResult<Vec<Account>> {
        find_all(ctx.pool).await
    }

    async fn find_by_id(ctx: &RepoContext<'_>, id: i64) -> RepoResult<Option<Account>> {
        find_by_id(ctx.pool, id).await
    }

    async fn create(ctx: &RepoContext<'_>, data: AccountCreate) -> RepoResult<Account> {
        if data.role.is_some_and(|r| r != Role::Visitor) && !ctx.actor_is_admin() {
            return Err(RepoError::Forbidden(
                "Only administrators may assign this role".into(),
            ));
        }
        insert(ctx.pool, data).await
    }

    async fn update(ctx: &RepoContext<'_>, id: i64, data: AccountUpdate) -> RepoResult<Account> {
        let existing = find_by_id(ctx.pool, id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Account {id} not found")))?;
        guard_admin_target(ctx, &existing)?;
        if data.changes_role(&existing) && !ctx.actor_is_admin() {
            return Err(RepoError::Forbidden(
                "Only administrators may change a role".into(),
            ));
        }
        update(ctx.pool, id, data).await
    }

    async fn delete(ctx: &RepoContext<'_>, id: i64) -> RepoResult<bool> {
        if let Some(existing) = find_by_id(ctx.pool, id).await? {
            guard_admin_target(ctx, &existing)?;
        }
        delete(ctx.pool, id).await
    }
}
