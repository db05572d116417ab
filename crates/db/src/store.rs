//! [`PgStore`]: the storage traits over a PostgreSQL pool.

use async_trait::async_trait;
use dayjob_core::account::{Account, AccountFilter, CreateAccount, Credentials};
use dayjob_core::application::{Application, ApplicationStatus, JobApplicant};
use dayjob_core::error::CoreError;
use dayjob_core::job::{CreateJob, Job, JobFilter, JobStatus, UpdateJob};
use dayjob_core::review::{CreateReview, Review, ReviewFilter};
use dayjob_core::roles::Role;
use dayjob_core::store::{
    AccountStore, ApplicationInsert, ApplicationStore, CompletedWork, JobDeletion, JobStore,
    JobTransition, ReviewInsert, ReviewStore, Store,
};
use dayjob_core::types::DbId;

use crate::models::application::InsertApplicationOutcome;
use crate::models::parse_column;
use crate::repositories::{AccountRepo, ApplicationRepo, JobRepo, ReviewRepo};
use crate::DbPool;

/// Cloneable handle over a shared connection pool.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Classify a sqlx error.
///
/// Unique violations on `uq_*` constraints are conflicts the caller can act
/// on; everything else is a storage failure.
pub fn classify_sqlx_error(err: sqlx::Error) -> CoreError {
    if let sqlx::Error::Database(db_err) = &err {
        // PostgreSQL unique constraint violation: error code 23505
        if db_err.code().as_deref() == Some("23505") {
            let constraint = db_err.constraint().unwrap_or("unknown");
            if constraint.starts_with("uq_") {
                return CoreError::Conflict(conflict_message(constraint));
            }
        }
    }
    tracing::error!(error = %err, "Database error");
    CoreError::Storage(err.to_string())
}

fn conflict_message(constraint: &str) -> String {
    match constraint {
        "uq_accounts_username" => "Username is already taken".to_string(),
        "uq_accounts_email" => "Email is already registered".to_string(),
        "uq_jobs_slug" => "Slug is already in use".to_string(),
        "uq_applications_active_job_applicant" => {
            "An active application by this account already exists for this job".to_string()
        }
        other => format!("Duplicate value violates unique constraint: {other}"),
    }
}

fn convert_all<R, T>(rows: Vec<R>) -> Result<Vec<T>, CoreError>
where
    T: TryFrom<R, Error = CoreError>,
{
    rows.into_iter().map(T::try_from).collect()
}

fn convert_opt<R, T>(row: Option<R>) -> Result<Option<T>, CoreError>
where
    T: TryFrom<R, Error = CoreError>,
{
    row.map(T::try_from).transpose()
}

#[async_trait]
impl AccountStore for PgStore {
    async fn insert_account(
        &self,
        input: &CreateAccount,
        password_hash: &str,
    ) -> Result<Account, CoreError> {
        let row = AccountRepo::create(&self.pool, input, password_hash)
            .await
            .map_err(classify_sqlx_error)?;
        Account::try_from(row)
    }

    async fn find_account(&self, id: DbId) -> Result<Option<Account>, CoreError> {
        let row = AccountRepo::find_by_id(&self.pool, id)
            .await
            .map_err(classify_sqlx_error)?;
        convert_opt(row)
    }

    async fn find_account_by_username(
        &self,
        username: &str,
    ) -> Result<Option<Account>, CoreError> {
        let row = AccountRepo::find_by_username(&self.pool, username)
            .await
            .map_err(classify_sqlx_error)?;
        convert_opt(row)
    }

    async fn find_credentials(&self, username: &str) -> Result<Option<Credentials>, CoreError> {
        let row = AccountRepo::find_by_username(&self.pool, username)
            .await
            .map_err(classify_sqlx_error)?;
        convert_opt(row)
    }

    async fn list_accounts(&self, filter: &AccountFilter) -> Result<Vec<Account>, CoreError> {
        let rows = AccountRepo::list(&self.pool, filter)
            .await
            .map_err(classify_sqlx_error)?;
        convert_all(rows)
    }

    async fn update_account_role(
        &self,
        id: DbId,
        role: Role,
    ) -> Result<Option<Account>, CoreError> {
        let row = AccountRepo::update_role(&self.pool, id, role.as_str())
            .await
            .map_err(classify_sqlx_error)?;
        convert_opt(row)
    }

    async fn delete_account(&self, id: DbId) -> Result<bool, CoreError> {
        AccountRepo::delete(&self.pool, id)
            .await
            .map_err(classify_sqlx_error)
    }
}

#[async_trait]
impl JobStore for PgStore {
    async fn insert_job(
        &self,
        input: &CreateJob,
        slug: &str,
        posted_by: DbId,
    ) -> Result<Option<Job>, CoreError> {
        let row = JobRepo::create(&self.pool, input, slug, posted_by)
            .await
            .map_err(classify_sqlx_error)?;
        convert_opt(row)
    }

    async fn find_job(&self, id: DbId) -> Result<Option<Job>, CoreError> {
        let row = JobRepo::find_by_id(&self.pool, id)
            .await
            .map_err(classify_sqlx_error)?;
        convert_opt(row)
    }

    async fn find_job_by_slug(&self, slug: &str) -> Result<Option<Job>, CoreError> {
        let row = JobRepo::find_by_slug(&self.pool, slug)
            .await
            .map_err(classify_sqlx_error)?;
        convert_opt(row)
    }

    async fn list_jobs(&self, filter: &JobFilter) -> Result<Vec<Job>, CoreError> {
        let rows = JobRepo::list(&self.pool, filter)
            .await
            .map_err(classify_sqlx_error)?;
        convert_all(rows)
    }

    async fn update_job_details(
        &self,
        id: DbId,
        patch: &UpdateJob,
    ) -> Result<Option<Job>, CoreError> {
        let row = JobRepo::update_details(&self.pool, id, patch)
            .await
            .map_err(classify_sqlx_error)?;
        convert_opt(row)
    }

    async fn transition_job(
        &self,
        id: DbId,
        from: JobStatus,
        to: JobStatus,
    ) -> Result<Option<JobTransition>, CoreError> {
        let Some(rows) = JobRepo::transition(&self.pool, id, from, to)
            .await
            .map_err(classify_sqlx_error)?
        else {
            return Ok(None);
        };
        Ok(Some(JobTransition {
            job: Job::try_from(rows.job)?,
            completed_applications: convert_all(rows.completed_applications)?,
        }))
    }

    async fn delete_job(&self, id: DbId) -> Result<JobDeletion, CoreError> {
        JobRepo::delete(&self.pool, id)
            .await
            .map_err(classify_sqlx_error)
    }
}

#[async_trait]
impl ApplicationStore for PgStore {
    async fn insert_application(
        &self,
        job_id: DbId,
        applicant_id: DbId,
    ) -> Result<ApplicationInsert, CoreError> {
        let outcome = ApplicationRepo::create(&self.pool, job_id, applicant_id)
            .await
            .map_err(classify_sqlx_error)?;
        Ok(match outcome {
            InsertApplicationOutcome::Created(row) => {
                ApplicationInsert::Created(Application::try_from(row)?)
            }
            InsertApplicationOutcome::JobMissing => ApplicationInsert::JobMissing,
            InsertApplicationOutcome::JobNotOpen(status) => {
                ApplicationInsert::JobNotOpen(parse_column("jobs", "status", &status)?)
            }
            InsertApplicationOutcome::Duplicate => ApplicationInsert::Duplicate,
        })
    }

    async fn find_application(&self, id: DbId) -> Result<Option<Application>, CoreError> {
        let row = ApplicationRepo::find_by_id(&self.pool, id)
            .await
            .map_err(classify_sqlx_error)?;
        convert_opt(row)
    }

    async fn find_active_application(
        &self,
        job_id: DbId,
        applicant_id: DbId,
    ) -> Result<Option<Application>, CoreError> {
        let row = ApplicationRepo::find_active(&self.pool, job_id, applicant_id)
            .await
            .map_err(classify_sqlx_error)?;
        convert_opt(row)
    }

    async fn list_applications_for_job(
        &self,
        job_id: DbId,
    ) -> Result<Vec<JobApplicant>, CoreError> {
        let rows = ApplicationRepo::list_for_job(&self.pool, job_id)
            .await
            .map_err(classify_sqlx_error)?;
        convert_all(rows)
    }

    async fn list_applications_for_applicant(
        &self,
        applicant_id: DbId,
    ) -> Result<Vec<Application>, CoreError> {
        let rows = ApplicationRepo::list_for_applicant(&self.pool, applicant_id)
            .await
            .map_err(classify_sqlx_error)?;
        convert_all(rows)
    }

    async fn transition_application(
        &self,
        id: DbId,
        from: ApplicationStatus,
        to: ApplicationStatus,
    ) -> Result<Option<Application>, CoreError> {
        let row = ApplicationRepo::transition(&self.pool, id, from, to)
            .await
            .map_err(classify_sqlx_error)?;
        convert_opt(row)
    }

    async fn record_submitted_work(
        &self,
        id: DbId,
        text: &str,
    ) -> Result<Option<Application>, CoreError> {
        let row = ApplicationRepo::record_submitted_work(&self.pool, id, text)
            .await
            .map_err(classify_sqlx_error)?;
        convert_opt(row)
    }

    async fn completed_work(&self, applicant_id: DbId) -> Result<Vec<CompletedWork>, CoreError> {
        let rows = ApplicationRepo::completed_work(&self.pool, applicant_id)
            .await
            .map_err(classify_sqlx_error)?;
        convert_all(rows)
    }
}

#[async_trait]
impl ReviewStore for PgStore {
    async fn insert_review(
        &self,
        input: &CreateReview,
        user_id: DbId,
    ) -> Result<ReviewInsert, CoreError> {
        let row = ReviewRepo::create(&self.pool, input, user_id)
            .await
            .map_err(classify_sqlx_error)?;
        Ok(match row {
            Some(row) => ReviewInsert::Created(Review::try_from(row)?),
            None => ReviewInsert::JobMissing,
        })
    }

    async fn list_reviews(&self, filter: &ReviewFilter) -> Result<Vec<Review>, CoreError> {
        let rows = ReviewRepo::list(&self.pool, filter)
            .await
            .map_err(classify_sqlx_error)?;
        convert_all(rows)
    }
}

#[async_trait]
impl Store for PgStore {
    async fn ping(&self) -> Result<(), CoreError> {
        crate::health_check(&self.pool)
            .await
            .map_err(classify_sqlx_error)
    }
}
