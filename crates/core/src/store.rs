//! Storage traits consumed by the domain components.
//!
//! Each method is one atomic unit against the backing store. Operations that
//! must hold an invariant under concurrency (slug uniqueness, one active
//! application per doer and job, status compare-and-set, the completion
//! cascade, blocked deletes) report their outcome in the return type instead
//! of leaving the caller to check-then-act.

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::account::{Account, AccountFilter, CreateAccount, Credentials};
use crate::application::{Application, ApplicationStatus, JobApplicant};
use crate::error::CoreError;
use crate::job::{CreateJob, Job, JobFilter, JobStatus, RewardType, UpdateJob};
use crate::review::{CreateReview, Review, ReviewFilter};
use crate::roles::Role;
use crate::types::DbId;

/// Result of a successful job status compare-and-set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobTransition {
    pub job: Job,
    /// Applications moved `accepted -> completed` by the same transaction.
    /// Empty unless the job moved to `completed`.
    pub completed_applications: Vec<Application>,
}

/// Outcome of an atomic job delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobDeletion {
    Deleted,
    NotFound,
    /// Pending or accepted applications still reference the job.
    Blocked { outstanding: i64 },
}

/// Outcome of an atomic application insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplicationInsert {
    Created(Application),
    JobMissing,
    JobNotOpen(JobStatus),
    /// A non-rejected application by the same applicant already exists.
    Duplicate,
}

/// Outcome of a review insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewInsert {
    Created(Review),
    /// The review names a job that does not exist.
    JobMissing,
}

/// A completed application joined to its job's reward, if the job still exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletedWork {
    pub application_id: DbId,
    pub job_id: DbId,
    pub reward: Option<Decimal>,
    pub reward_type: Option<RewardType>,
}

#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Insert a new account. Duplicate username or email is `Conflict`.
    async fn insert_account(
        &self,
        input: &CreateAccount,
        password_hash: &str,
    ) -> Result<Account, CoreError>;

    async fn find_account(&self, id: DbId) -> Result<Option<Account>, CoreError>;

    async fn find_account_by_username(&self, username: &str)
        -> Result<Option<Account>, CoreError>;

    async fn find_credentials(&self, username: &str) -> Result<Option<Credentials>, CoreError>;

    /// Accounts matching `filter`, newest first, honouring its limit and offset.
    async fn list_accounts(&self, filter: &AccountFilter) -> Result<Vec<Account>, CoreError>;

    async fn update_account_role(
        &self,
        id: DbId,
        role: Role,
    ) -> Result<Option<Account>, CoreError>;

    /// Returns `true` if a row was deleted.
    async fn delete_account(&self, id: DbId) -> Result<bool, CoreError>;
}

#[async_trait]
pub trait JobStore: Send + Sync {
    /// Insert a job under `slug` with status `open`. Returns `None` if the
    /// slug is already taken.
    async fn insert_job(
        &self,
        input: &CreateJob,
        slug: &str,
        posted_by: DbId,
    ) -> Result<Option<Job>, CoreError>;

    async fn find_job(&self, id: DbId) -> Result<Option<Job>, CoreError>;

    async fn find_job_by_slug(&self, slug: &str) -> Result<Option<Job>, CoreError>;

    /// Jobs matching `filter`, newest first, honouring its limit and offset.
    async fn list_jobs(&self, filter: &JobFilter) -> Result<Vec<Job>, CoreError>;

    /// Apply `patch` unless the job is completed. `None` if the job is
    /// missing or already completed.
    async fn update_job_details(
        &self,
        id: DbId,
        patch: &UpdateJob,
    ) -> Result<Option<Job>, CoreError>;

    /// Move the job from `from` to `to` only if its status is still `from`.
    /// When `to` is `completed`, accepted applications are completed in the
    /// same transaction. `None` if the job is missing or its status changed.
    async fn transition_job(
        &self,
        id: DbId,
        from: JobStatus,
        to: JobStatus,
    ) -> Result<Option<JobTransition>, CoreError>;

    /// Delete the job unless pending or accepted applications reference it.
    async fn delete_job(&self, id: DbId) -> Result<JobDeletion, CoreError>;
}

#[async_trait]
pub trait ApplicationStore: Send + Sync {
    /// Insert a pending application, atomically with the open-job and
    /// one-active-application checks.
    async fn insert_application(
        &self,
        job_id: DbId,
        applicant_id: DbId,
    ) -> Result<ApplicationInsert, CoreError>;

    async fn find_application(&self, id: DbId) -> Result<Option<Application>, CoreError>;

    /// The applicant's non-rejected application on the job, if any.
    async fn find_active_application(
        &self,
        job_id: DbId,
        applicant_id: DbId,
    ) -> Result<Option<Application>, CoreError>;

    /// Applications for a job with applicant summaries, newest first.
    async fn list_applications_for_job(
        &self,
        job_id: DbId,
    ) -> Result<Vec<JobApplicant>, CoreError>;

    async fn list_applications_for_applicant(
        &self,
        applicant_id: DbId,
    ) -> Result<Vec<Application>, CoreError>;

    /// Compare-and-set on application status. `None` if missing or changed.
    async fn transition_application(
        &self,
        id: DbId,
        from: ApplicationStatus,
        to: ApplicationStatus,
    ) -> Result<Option<Application>, CoreError>;

    /// Store work text while the application is `accepted`. `None` if the
    /// application is missing or not accepted.
    async fn record_submitted_work(
        &self,
        id: DbId,
        text: &str,
    ) -> Result<Option<Application>, CoreError>;

    /// Completed applications of the applicant left-joined to their jobs.
    async fn completed_work(&self, applicant_id: DbId) -> Result<Vec<CompletedWork>, CoreError>;
}

#[async_trait]
pub trait ReviewStore: Send + Sync {
    /// Insert a review written by `user_id`, checking in the same statement
    /// that the referenced job exists.
    async fn insert_review(
        &self,
        input: &CreateReview,
        user_id: DbId,
    ) -> Result<ReviewInsert, CoreError>;

    /// Reviews matching `filter`, newest first, honouring its limit and offset.
    async fn list_reviews(&self, filter: &ReviewFilter) -> Result<Vec<Review>, CoreError>;
}

/// Everything the marketplace needs from its backing store.
#[async_trait]
pub trait Store: AccountStore + JobStore + ApplicationStore + ReviewStore {
    /// Cheap connectivity check used by the health endpoint.
    async fn ping(&self) -> Result<(), CoreError>;
}
