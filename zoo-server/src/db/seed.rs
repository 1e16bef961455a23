//! Bootstrap administrator
//!
//! Created at start-up from `ADMIN_*` environment variables when the
//! database holds no admin yet. Existing admins are never modified.

use shared::models::{AccountCreate, Role};
use sqlx::SqlitePool;

use super::repository::{RepoResult, account};
use crate::core::AdminBootstrap;

/// Create the bootstrap admin unless one already exists.
///
/// Returns whether an account was created.
pub async fn ensure_admin(pool: &SqlitePool, admin: &AdminBootstrap) -> RepoResult<bool> {
    if account::count_by_role(pool, Role::Admin).await? > 0 {
        tracing::debug!("Admin account present, skipping bootstrap");
        return Ok(false);
    }

    let created = account::insert(
        pool,
        AccountCreate {
            name: admin.name.clone(),
            email: admin.email.clone(),
            phone_number: admin.phone_number.clone(),
            password: admin.password.clone(),
            role: Some(Role::Admin),
            is_active: Some(true),
        },
    )
    .await?;

    tracing::info!(account_id = created.id, email = %created.email, "Bootstrap admin created");
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::verify_password;
    use crate::db::repository::test_support::test_pool;

    fn bootstrap() -> AdminBootstrap {
        AdminBootstrap {
            email: "root@zoo.cd".into(),
            password: "change-me".into(),
            phone_number: "+10000000000".into(),
            name: "Administrator".into(),
        }
    }

    #[tokio::test]
    async fn test_creates_admin_once() {
        let pool = test_pool().await;

        assert!(ensure_admin(&pool, &bootstrap()).await.unwrap());
        assert!(!ensure_admin(&pool, &bootstrap()).await.unwrap());
        assert_eq!(account::count_by_role(&pool, Role::Admin).await.unwrap(), 1);

        let admin = account::find_by_email(&pool, "root@zoo.cd")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(admin.role, Role::Admin);
        assert!(verify_password("change-me", &admin.password_hash));
    }
}
