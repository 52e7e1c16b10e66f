//! PostgreSQL Repository Implementation

use chrono::{DateTime, Utc};
use platform::password::HashedPassword;
use sqlx::PgPool;

use crate::domain::entity::{Account, AccountPatch, NewAccountRecord};
use crate::domain::repository::AccountRepository;
use crate::domain::value_object::{email::Email, username::Username};
use crate::error::AccountResult;

/// PostgreSQL-backed account repository
#[derive(Clone)]
pub struct PgAccountRepository {
    pool: PgPool,
}

impl PgAccountRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl AccountRepository for PgAccountRepository {
    async fn create(&self, record: &NewAccountRecord) -> AccountResult<Account> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            INSERT INTO accounts (
                username,
                email,
                password_hash,
                profile_picture,
                profile_description
            ) VALUES ($1, $2, $3, $4, $5)
            RETURNING
                id,
                username,
                email,
                password_hash,
                profile_picture,
                profile_description,
                created_at,
                updated_at
            "#,
        )
        .bind(record.username.as_str())
        .bind(record.email.as_str())
        .bind(record.password_hash.as_str())
        .bind(record.profile_picture.as_deref())
        .bind(record.profile_description.as_deref())
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into_account())
    }

    async fn find_by_id(&self, id: i64) -> AccountResult<Option<Account>> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT
                id,
                username,
                email,
                password_hash,
                profile_picture,
                profile_description,
                created_at,
                updated_at
            FROM accounts
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(AccountRow::into_account))
    }

    async fn find_by_username(&self, username: &Username) -> AccountResult<Option<Account>> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT
                id,
                username,
                email,
                password_hash,
                profile_picture,
                profile_description,
                created_at,
                updated_at
            FROM accounts
            WHERE username = $1
            "#,
        )
        .bind(username.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(AccountRow::into_account))
    }

    async fn list(&self, limit: i64, offset: i64) -> AccountResult<Vec<Account>> {
        let rows = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT
                id,
                username,
                email,
                password_hash,
                profile_picture,
                profile_description,
                created_at,
                updated_at
            FROM accounts
            ORDER BY id
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(AccountRow::into_account).collect())
    }

    async fn update(&self, id: i64, patch: &AccountPatch) -> AccountResult<Option<Account>> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            UPDATE accounts SET
                username = COALESCE($2, username),
                email = COALESCE($3, email),
                profile_picture = COALESCE($4, profile_picture),
                profile_description = COALESCE($5, profile_description),
                updated_at = now()
            WHERE id = $1
            RETURNING
                id,
                username,
                email,
                password_hash,
                profile_picture,
                profile_description,
                created_at,
                updated_at
            "#,
        )
        .bind(id)
        .bind(patch.username.as_ref().map(Username::as_str))
        .bind(patch.email.as_ref().map(Email::as_str))
        .bind(patch.profile_picture.as_deref())
        .bind(patch.profile_description.as_deref())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(AccountRow::into_account))
    }

    async fn delete(&self, id: i64) -> AccountResult<bool> {
        let deleted = sqlx::query("DELETE FROM accounts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }
}

// ============================================================================
// Row Type for sqlx mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct AccountRow {
    id: i64,
    username: String,
    email: String,
    password_hash: String,
    profile_picture: Option<String>,
    profile_description: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl AccountRow {
    fn into_account(self) -> Account {
        Account {
            id: self.id,
            username: Username::from_db(self.username),
            email: Email::from_db(self.email),
            password_hash: HashedPassword::from_digest(self.password_hash),
            profile_picture: self.profile_picture,
            profile_description: self.profile_description,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
