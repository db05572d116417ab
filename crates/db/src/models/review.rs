//! Review rows from the `reviews` table.

use dayjob_core::error::CoreError;
use dayjob_core::review::Review;
use dayjob_core::types::{DbId, Timestamp};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct ReviewRow {
    pub id: DbId,
    pub user_id: DbId,
    pub job_id: Option<DbId>,
    pub rating: i32,
    pub comment: Option<String>,
    pub created_at: Timestamp,
}

impl TryFrom<ReviewRow> for Review {
    type Error = CoreError;

    fn try_from(row: ReviewRow) -> Result<Self, Self::Error> {
        Ok(Review {
            id: row.id,
            user_id: row.user_id,
            job_id: row.job_id,
            rating: row.rating,
            comment: row.comment,
            created_at: row.created_at,
        })
    }
}
