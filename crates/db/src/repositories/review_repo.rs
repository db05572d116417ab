//! Repository for the `reviews` table.

use dayjob_core::review::{CreateReview, ReviewFilter};
use dayjob_core::types::{new_id, DbId};
use sqlx::PgPool;

use crate::models::review::ReviewRow;

const COLUMNS: &str = "id, user_id, job_id, rating, comment, created_at";

pub struct ReviewRepo;

impl ReviewRepo {
    /// Insert a review written by `user_id`.
    ///
    /// The row is written only when `job_id` is unset or names an existing
    /// job; `None` means the job is missing.
    pub async fn create(
        pool: &PgPool,
        input: &CreateReview,
        user_id: DbId,
    ) -> Result<Option<ReviewRow>, sqlx::Error> {
        let query = format!(
            "INSERT INTO reviews (id, user_id, job_id, rating, comment)
             SELECT $1::UUID, $2::UUID, $3::UUID, $4::INTEGER, $5::TEXT
             WHERE $3::UUID IS NULL OR EXISTS (SELECT 1 FROM jobs WHERE id = $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ReviewRow>(&query)
            .bind(new_id())
            .bind(user_id)
            .bind(input.job_id)
            .bind(input.rating)
            .bind(&input.comment)
            .fetch_optional(pool)
            .await
    }

    /// List reviews newest first, optionally for one job. A `NULL` limit or
    /// offset means no paging.
    pub async fn list(pool: &PgPool, filter: &ReviewFilter) -> Result<Vec<ReviewRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM reviews
             WHERE ($1::UUID IS NULL OR job_id = $1)
             ORDER BY created_at DESC, id DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, ReviewRow>(&query)
            .bind(filter.job_id)
            .bind(filter.limit.map(|l| l.max(0)))
            .bind(filter.offset.map(|o| o.max(0)))
            .fetch_all(pool)
            .await
    }
}
