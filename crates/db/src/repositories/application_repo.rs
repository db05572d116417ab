//! Repository for the `applications` table.

use dayjob_core::application::ApplicationStatus;
use dayjob_core::job::JobStatus;
use dayjob_core::types::{new_id, DbId};
use sqlx::PgPool;

use crate::models::application::{
    ApplicationRow, CompletedWorkRow, InsertApplicationOutcome, JobApplicantRow,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, job_id, applicant_id, status, submitted_work, created_at";

pub struct ApplicationRepo;

impl ApplicationRepo {
    /// Insert a pending application.
    ///
    /// The parent job is locked `FOR SHARE` so its status cannot change until
    /// commit; the partial unique index on `(job_id, applicant_id)` rejects a
    /// second active application.
    pub async fn create(
        pool: &PgPool,
        job_id: DbId,
        applicant_id: DbId,
    ) -> Result<InsertApplicationOutcome, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let job: Option<(String,)> =
            sqlx::query_as("SELECT status FROM jobs WHERE id = $1 FOR SHARE")
                .bind(job_id)
                .fetch_optional(&mut *tx)
                .await?;
        match job {
            None => {
                tx.rollback().await?;
                return Ok(InsertApplicationOutcome::JobMissing);
            }
            Some((status,)) if status != JobStatus::Open.as_str() => {
                tx.rollback().await?;
                return Ok(InsertApplicationOutcome::JobNotOpen(status));
            }
            Some(_) => {}
        }

        let query = format!(
            "INSERT INTO applications (id, job_id, applicant_id, status)
             VALUES ($1, $2, $3, 'pending')
             ON CONFLICT (job_id, applicant_id) WHERE status <> 'rejected' DO NOTHING
             RETURNING {COLUMNS}"
        );
        let inserted = sqlx::query_as::<_, ApplicationRow>(&query)
            .bind(new_id())
            .bind(job_id)
            .bind(applicant_id)
            .fetch_optional(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(match inserted {
            Some(row) => InsertApplicationOutcome::Created(row),
            None => InsertApplicationOutcome::Duplicate,
        })
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<ApplicationRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM applications WHERE id = $1");
        sqlx::query_as::<_, ApplicationRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// The applicant's non-rejected application on a job, if any.
    pub async fn find_active(
        pool: &PgPool,
        job_id: DbId,
        applicant_id: DbId,
    ) -> Result<Option<ApplicationRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM applications
             WHERE job_id = $1 AND applicant_id = $2 AND status <> 'rejected'"
        );
        sqlx::query_as::<_, ApplicationRow>(&query)
            .bind(job_id)
            .bind(applicant_id)
            .fetch_optional(pool)
            .await
    }

    /// Applications for a job with their applicant's account, newest first.
    pub async fn list_for_job(
        pool: &PgPool,
        job_id: DbId,
    ) -> Result<Vec<JobApplicantRow>, sqlx::Error> {
        sqlx::query_as::<_, JobApplicantRow>(
            "SELECT a.id, a.job_id, a.applicant_id, a.status, a.submitted_work, a.created_at,
                    u.username AS applicant_username,
                    u.email AS applicant_email,
                    u.department AS applicant_department
             FROM applications a
             LEFT JOIN accounts u ON u.id = a.applicant_id
             WHERE a.job_id = $1
             ORDER BY a.created_at DESC, a.id DESC",
        )
        .bind(job_id)
        .fetch_all(pool)
        .await
    }

    pub async fn list_for_applicant(
        pool: &PgPool,
        applicant_id: DbId,
    ) -> Result<Vec<ApplicationRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM applications
             WHERE applicant_id = $1
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, ApplicationRow>(&query)
            .bind(applicant_id)
            .fetch_all(pool)
            .await
    }

    /// Compare-and-set the status. `None` if missing or no longer `from`.
    pub async fn transition(
        pool: &PgPool,
        id: DbId,
        from: ApplicationStatus,
        to: ApplicationStatus,
    ) -> Result<Option<ApplicationRow>, sqlx::Error> {
        let query = format!(
            "UPDATE applications SET status = $3
             WHERE id = $1 AND status = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ApplicationRow>(&query)
            .bind(id)
            .bind(from.as_str())
            .bind(to.as_str())
            .fetch_optional(pool)
            .await
    }

    /// Store work text on an accepted application. `None` if missing or not accepted.
    pub async fn record_submitted_work(
        pool: &PgPool,
        id: DbId,
        text: &str,
    ) -> Result<Option<ApplicationRow>, sqlx::Error> {
        let query = format!(
            "UPDATE applications SET submitted_work = $2
             WHERE id = $1 AND status = 'accepted'
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ApplicationRow>(&query)
            .bind(id)
            .bind(text)
            .fetch_optional(pool)
            .await
    }

    /// Completed applications of a doer left-joined to their job's reward.
    pub async fn completed_work(
        pool: &PgPool,
        applicant_id: DbId,
    ) -> Result<Vec<CompletedWorkRow>, sqlx::Error> {
        sqlx::query_as::<_, CompletedWorkRow>(
            "SELECT a.id AS application_id, a.job_id, j.reward, j.reward_type
             FROM applications a
             LEFT JOIN jobs j ON j.id = a.job_id
             WHERE a.applicant_id = $1 AND a.status = 'completed'",
        )
        .bind(applicant_id)
        .fetch_all(pool)
        .await
    }
}
