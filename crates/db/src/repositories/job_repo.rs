//! Repository for the `jobs` table.

use dayjob_core::application::ApplicationStatus;
use dayjob_core::job::{CreateJob, JobFilter, JobStatus, UpdateJob};
use dayjob_core::store::JobDeletion;
use dayjob_core::types::{new_id, DbId};
use sqlx::PgPool;

use crate::models::application::ApplicationRow;
use crate::models::job::{JobRow, JobTransitionRows};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, slug, description, reward, reward_type, department, \
                        estimated_time, skills_required, status, is_featured, image_url, \
                        posted_by, created_at";

const APPLICATION_COLUMNS: &str = "id, job_id, applicant_id, status, submitted_work, created_at";

pub struct JobRepo;

impl JobRepo {
    /// Insert an `open` job under `slug`. Returns `None` if the slug is taken.
    pub async fn create(
        pool: &PgPool,
        input: &CreateJob,
        slug: &str,
        posted_by: DbId,
    ) -> Result<Option<JobRow>, sqlx::Error> {
        let query = format!(
            "INSERT INTO jobs (id, title, slug, description, reward, reward_type, department,
                               estimated_time, skills_required, status, is_featured, image_url,
                               posted_by)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, 'open', $10, $11, $12)
             ON CONFLICT ON CONSTRAINT uq_jobs_slug DO NOTHING
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, JobRow>(&query)
            .bind(new_id())
            .bind(&input.title)
            .bind(slug)
            .bind(&input.description)
            .bind(input.reward)
            .bind(input.reward_type.as_str())
            .bind(&input.department)
            .bind(&input.estimated_time)
            .bind(&input.skills_required)
            .bind(input.is_featured)
            .bind(&input.image_url)
            .bind(posted_by)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<JobRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM jobs WHERE id = $1");
        sqlx::query_as::<_, JobRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_slug(pool: &PgPool, slug: &str) -> Result<Option<JobRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM jobs WHERE slug = $1");
        sqlx::query_as::<_, JobRow>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// List jobs newest first. Unset filters match everything; a `NULL`
    /// limit or offset means no paging.
    pub async fn list(pool: &PgPool, filter: &JobFilter) -> Result<Vec<JobRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM jobs
             WHERE ($1::TEXT IS NULL OR department = $1)
               AND ($2::TEXT IS NULL OR status = $2)
               AND ($3::TEXT IS NULL OR reward_type = $3)
               AND ($4::UUID IS NULL OR posted_by = $4)
             ORDER BY created_at DESC, id DESC
             LIMIT $5 OFFSET $6"
        );
        sqlx::query_as::<_, JobRow>(&query)
            .bind(&filter.department)
            .bind(filter.status.map(JobStatus::as_str))
            .bind(filter.reward_type.map(|r| r.as_str()))
            .bind(filter.posted_by)
            .bind(filter.limit.map(|l| l.max(0)))
            .bind(filter.offset.map(|o| o.max(0)))
            .fetch_all(pool)
            .await
    }

    /// Apply the non-`None` fields of `input` to a job that is not completed.
    ///
    /// Returns `None` if the job is missing or completed.
    pub async fn update_details(
        pool: &PgPool,
        id: DbId,
        input: &UpdateJob,
    ) -> Result<Option<JobRow>, sqlx::Error> {
        let query = format!(
            "UPDATE jobs SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                reward = COALESCE($4, reward),
                reward_type = COALESCE($5, reward_type),
                department = COALESCE($6, department),
                estimated_time = COALESCE($7, estimated_time),
                skills_required = COALESCE($8, skills_required),
                is_featured = COALESCE($9, is_featured),
                image_url = COALESCE($10, image_url)
             WHERE id = $1 AND status <> 'completed'
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, JobRow>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.reward)
            .bind(input.reward_type.map(|r| r.as_str()))
            .bind(&input.department)
            .bind(&input.estimated_time)
            .bind(&input.skills_required)
            .bind(input.is_featured)
            .bind(&input.image_url)
            .fetch_optional(pool)
            .await
    }

    /// Compare-and-set the job status. Moving to `completed` also completes
    /// every accepted application of the job in the same transaction.
    ///
    /// Returns `None` if the job is missing or its status is no longer `from`.
    pub async fn transition(
        pool: &PgPool,
        id: DbId,
        from: JobStatus,
        to: JobStatus,
    ) -> Result<Option<JobTransitionRows>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE jobs SET status = $3
             WHERE id = $1 AND status = $2
             RETURNING {COLUMNS}"
        );
        let job = sqlx::query_as::<_, JobRow>(&query)
            .bind(id)
            .bind(from.as_str())
            .bind(to.as_str())
            .fetch_optional(&mut *tx)
            .await?;

        let Some(job) = job else {
            tx.rollback().await?;
            return Ok(None);
        };

        let completed_applications = if to == JobStatus::Completed {
            let query = format!(
                "UPDATE applications SET status = $2
                 WHERE job_id = $1 AND status = $3
                 RETURNING {APPLICATION_COLUMNS}"
            );
            sqlx::query_as::<_, ApplicationRow>(&query)
                .bind(id)
                .bind(ApplicationStatus::Completed.as_str())
                .bind(ApplicationStatus::Accepted.as_str())
                .fetch_all(&mut *tx)
                .await?
        } else {
            Vec::new()
        };

        tx.commit().await?;
        Ok(Some(JobTransitionRows {
            job,
            completed_applications,
        }))
    }

    /// Delete a job unless pending or accepted applications reference it.
    ///
    /// The job row is locked `FOR UPDATE` so a concurrent application insert
    /// (which locks it `FOR SHARE`) is either counted or sees the job gone.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<JobDeletion, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let locked: Option<(DbId,)> = sqlx::query_as("SELECT id FROM jobs WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;
        if locked.is_none() {
            tx.rollback().await?;
            return Ok(JobDeletion::NotFound);
        }

        let (outstanding,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM applications
             WHERE job_id = $1 AND status IN ('pending', 'accepted')",
        )
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;
        if outstanding > 0 {
            tx.rollback().await?;
            return Ok(JobDeletion::Blocked { outstanding });
        }

        sqlx::query("DELETE FROM jobs WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(JobDeletion::Deleted)
    }
}
