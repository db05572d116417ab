//! Repository for the `accounts` table.

use dayjob_core::account::{AccountFilter, CreateAccount};
use dayjob_core::types::{new_id, DbId};
use sqlx::PgPool;

use crate::models::account::AccountRow;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, username, email, password_hash, role, department, created_at";

pub struct AccountRepo;

impl AccountRepo {
    /// Insert a new account, returning the created row.
    ///
    /// Duplicate usernames or emails fail with a `uq_accounts_*` violation.
    pub async fn create(
        pool: &PgPool,
        input: &CreateAccount,
        password_hash: &str,
    ) -> Result<AccountRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO accounts (id, username, email, password_hash, role, department)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AccountRow>(&query)
            .bind(new_id())
            .bind(&input.username)
            .bind(&input.email)
            .bind(password_hash)
            .bind(input.role.as_str())
            .bind(&input.department)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<AccountRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM accounts WHERE id = $1");
        sqlx::query_as::<_, AccountRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find an account by username (case-sensitive).
    pub async fn find_by_username(
        pool: &PgPool,
        username: &str,
    ) -> Result<Option<AccountRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM accounts WHERE username = $1");
        sqlx::query_as::<_, AccountRow>(&query)
            .bind(username)
            .fetch_optional(pool)
            .await
    }

    /// List accounts newest first, optionally restricted to one role. A
    /// `NULL` limit or offset means no paging.
    pub async fn list(
        pool: &PgPool,
        filter: &AccountFilter,
    ) -> Result<Vec<AccountRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM accounts
             WHERE ($1::TEXT IS NULL OR role = $1)
             ORDER BY created_at DESC, id DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, AccountRow>(&query)
            .bind(filter.role.map(|r| r.as_str()))
            .bind(filter.limit.map(|l| l.max(0)))
            .bind(filter.offset.map(|o| o.max(0)))
            .fetch_all(pool)
            .await
    }

    /// Returns `None` if no row with the given `id` exists.
    pub async fn update_role(
        pool: &PgPool,
        id: DbId,
        role: &str,
    ) -> Result<Option<AccountRow>, sqlx::Error> {
        let query = format!("UPDATE accounts SET role = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, AccountRow>(&query)
            .bind(id)
            .bind(role)
            .fetch_optional(pool)
            .await
    }

    /// Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM accounts WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
