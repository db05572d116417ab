//! Job rows from the `jobs` table.

use dayjob_core::error::CoreError;
use dayjob_core::job::Job;
use dayjob_core::types::{DbId, Timestamp};
use rust_decimal::Decimal;
use sqlx::FromRow;

use super::application::ApplicationRow;
use super::parse_column;

#[derive(Debug, Clone, FromRow)]
pub struct JobRow {
    pub id: DbId,
    pub title: String,
    pub slug: String,
    pub description: String,
    pub reward: Decimal,
    pub reward_type: String,
    pub department: Option<String>,
    pub estimated_time: Option<String>,
    pub skills_required: Vec<String>,
    pub status: String,
    pub is_featured: bool,
    pub image_url: Option<String>,
    pub posted_by: DbId,
    pub created_at: Timestamp,
}

impl TryFrom<JobRow> for Job {
    type Error = CoreError;

    fn try_from(row: JobRow) -> Result<Self, Self::Error> {
        Ok(Job {
            id: row.id,
            reward_type: parse_column("jobs", "reward_type", &row.reward_type)?,
            status: parse_column("jobs", "status", &row.status)?,
            title: row.title,
            slug: row.slug,
            description: row.description,
            reward: row.reward,
            department: row.department,
            estimated_time: row.estimated_time,
            skills_required: row.skills_required,
            is_featured: row.is_featured,
            image_url: row.image_url,
            posted_by: row.posted_by,
            created_at: row.created_at,
        })
    }
}

/// A job status change plus the applications completed alongside it.
#[derive(Debug)]
pub struct JobTransitionRows {
    pub job: JobRow,
    pub completed_applications: Vec<ApplicationRow>,
}
