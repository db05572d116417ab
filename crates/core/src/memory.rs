//! In-memory [`Store`] implementation.
//!
//! All state lives behind a single `RwLock`, so every trait method is
//! trivially atomic. Used by the test suites and for running the API without
//! a database.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::account::{Account, AccountFilter, AccountSummary, CreateAccount, Credentials};
use crate::application::{Application, ApplicationStatus, JobApplicant};
use crate::error::CoreError;
use crate::job::{CreateJob, Job, JobFilter, JobStatus, UpdateJob};
use crate::review::{CreateReview, Review, ReviewFilter};
use crate::roles::Role;
use crate::store::{
    AccountStore, ApplicationInsert, ApplicationStore, CompletedWork, JobDeletion, JobStore,
    JobTransition, ReviewInsert, ReviewStore, Store,
};
use crate::types::{new_id, DbId, Timestamp};

#[derive(Debug, Clone)]
struct StoredAccount {
    account: Account,
    password_hash: String,
}

#[derive(Debug, Default)]
struct Inner {
    accounts: HashMap<DbId, StoredAccount>,
    jobs: HashMap<DbId, Job>,
    applications: HashMap<DbId, Application>,
    reviews: HashMap<DbId, Review>,
}

impl Inner {
    fn account_by_username(&self, username: &str) -> Option<&StoredAccount> {
        self.accounts
            .values()
            .find(|s| s.account.username == username)
    }
}

/// Cloneable handle to a shared in-memory store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    inner: Arc<RwLock<Inner>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Sort newest first, breaking timestamp ties by id.
fn newest_first<T>(items: &mut [T], key: impl Fn(&T) -> (Timestamp, DbId)) {
    items.sort_by(|a, b| key(b).cmp(&key(a)));
}

fn page<T>(items: Vec<T>, limit: Option<i64>, offset: Option<i64>) -> Vec<T> {
    let offset = offset.and_then(|o| usize::try_from(o).ok()).unwrap_or(0);
    let limit = limit
        .map(|l| usize::try_from(l).unwrap_or(0))
        .unwrap_or(usize::MAX);
    items.into_iter().skip(offset).take(limit).collect()
}

#[async_trait]
impl AccountStore for InMemoryStore {
    async fn insert_account(
        &self,
        input: &CreateAccount,
        password_hash: &str,
    ) -> Result<Account, CoreError> {
        let mut inner = self.inner.write().await;

        if inner.account_by_username(&input.username).is_some() {
            return Err(CoreError::Conflict(format!(
                "Username '{}' is already taken",
                input.username
            )));
        }
        if inner
            .accounts
            .values()
            .any(|s| s.account.email == input.email)
        {
            return Err(CoreError::Conflict(format!(
                "Email '{}' is already registered",
                input.email
            )));
        }

        let account = Account {
            id: new_id(),
            username: input.username.clone(),
            email: input.email.clone(),
            role: input.role,
            department: input.department.clone(),
            created_at: chrono::Utc::now(),
        };
        inner.accounts.insert(
            account.id,
            StoredAccount {
                account: account.clone(),
                password_hash: password_hash.to_string(),
            },
        );
        Ok(account)
    }

    async fn find_account(&self, id: DbId) -> Result<Option<Account>, CoreError> {
        let inner = self.inner.read().await;
        Ok(inner.accounts.get(&id).map(|s| s.account.clone()))
    }

    async fn find_account_by_username(
        &self,
        username: &str,
    ) -> Result<Option<Account>, CoreError> {
        let inner = self.inner.read().await;
        Ok(inner.account_by_username(username).map(|s| s.account.clone()))
    }

    async fn find_credentials(&self, username: &str) -> Result<Option<Credentials>, CoreError> {
        let inner = self.inner.read().await;
        Ok(inner.account_by_username(username).map(|s| Credentials {
            account: s.account.clone(),
            password_hash: s.password_hash.clone(),
        }))
    }

    async fn list_accounts(&self, filter: &AccountFilter) -> Result<Vec<Account>, CoreError> {
        let inner = self.inner.read().await;
        let mut accounts: Vec<Account> = inner
            .accounts
            .values()
            .filter(|s| filter.role.is_none_or(|r| s.account.role == r))
            .map(|s| s.account.clone())
            .collect();
        newest_first(&mut accounts, |a| (a.created_at, a.id));
        Ok(page(accounts, filter.limit, filter.offset))
    }

    async fn update_account_role(
        &self,
        id: DbId,
        role: Role,
    ) -> Result<Option<Account>, CoreError> {
        let mut inner = self.inner.write().await;
        Ok(inner.accounts.get_mut(&id).map(|s| {
            s.account.role = role;
            s.account.clone()
        }))
    }

    async fn delete_account(&self, id: DbId) -> Result<bool, CoreError> {
        let mut inner = self.inner.write().await;
        Ok(inner.accounts.remove(&id).is_some())
    }
}

#[async_trait]
impl JobStore for InMemoryStore {
    async fn insert_job(
        &self,
        input: &CreateJob,
        slug: &str,
        posted_by: DbId,
    ) -> Result<Option<Job>, CoreError> {
        let mut inner = self.inner.write().await;
        if inner.jobs.values().any(|j| j.slug == slug) {
            return Ok(None);
        }

        let job = Job {
            id: new_id(),
            title: input.title.clone(),
            slug: slug.to_string(),
            description: input.description.clone(),
            reward: input.reward,
            reward_type: input.reward_type,
            department: input.department.clone(),
            estimated_time: input.estimated_time.clone(),
            skills_required: input.skills_required.clone(),
            status: JobStatus::Open,
            is_featured: input.is_featured,
            image_url: input.image_url.clone(),
            posted_by,
            created_at: chrono::Utc::now(),
        };
        inner.jobs.insert(job.id, job.clone());
        Ok(Some(job))
    }

    async fn find_job(&self, id: DbId) -> Result<Option<Job>, CoreError> {
        let inner = self.inner.read().await;
        Ok(inner.jobs.get(&id).cloned())
    }

    async fn find_job_by_slug(&self, slug: &str) -> Result<Option<Job>, CoreError> {
        let inner = self.inner.read().await;
        Ok(inner.jobs.values().find(|j| j.slug == slug).cloned())
    }

    async fn list_jobs(&self, filter: &JobFilter) -> Result<Vec<Job>, CoreError> {
        let inner = self.inner.read().await;
        let mut jobs: Vec<Job> = inner
            .jobs
            .values()
            .filter(|j| filter.matches(j))
            .cloned()
            .collect();
        newest_first(&mut jobs, |j| (j.created_at, j.id));
        Ok(page(jobs, filter.limit, filter.offset))
    }

    async fn update_job_details(
        &self,
        id: DbId,
        patch: &UpdateJob,
    ) -> Result<Option<Job>, CoreError> {
        let mut inner = self.inner.write().await;
        let Some(job) = inner.jobs.get_mut(&id) else {
            return Ok(None);
        };
        if job.status == JobStatus::Completed {
            return Ok(None);
        }

        if let Some(title) = &patch.title {
            job.title = title.clone();
        }
        if let Some(description) = &patch.description {
            job.description = description.clone();
        }
        if let Some(reward) = patch.reward {
            job.reward = reward;
        }
        if let Some(reward_type) = patch.reward_type {
            job.reward_type = reward_type;
        }
        if let Some(department) = &patch.department {
            job.department = Some(department.clone());
        }
        if let Some(estimated_time) = &patch.estimated_time {
            job.estimated_time = Some(estimated_time.clone());
        }
        if let Some(skills) = &patch.skills_required {
            job.skills_required = skills.clone();
        }
        if let Some(is_featured) = patch.is_featured {
            job.is_featured = is_featured;
        }
        if let Some(image_url) = &patch.image_url {
            job.image_url = Some(image_url.clone());
        }
        Ok(Some(job.clone()))
    }

    async fn transition_job(
        &self,
        id: DbId,
        from: JobStatus,
        to: JobStatus,
    ) -> Result<Option<JobTransition>, CoreError> {
        let mut inner = self.inner.write().await;
        let job = match inner.jobs.get_mut(&id) {
            Some(job) if job.status == from => {
                job.status = to;
                job.clone()
            }
            _ => return Ok(None),
        };

        let mut completed_applications = Vec::new();
        if to == JobStatus::Completed {
            for application in inner.applications.values_mut() {
                if application.job_id == id && application.status == ApplicationStatus::Accepted {
                    application.status = ApplicationStatus::Completed;
                    completed_applications.push(application.clone());
                }
            }
            newest_first(&mut completed_applications, |a| (a.created_at, a.id));
        }

        Ok(Some(JobTransition {
            job,
            completed_applications,
        }))
    }

    async fn delete_job(&self, id: DbId) -> Result<JobDeletion, CoreError> {
        let mut inner = self.inner.write().await;
        if !inner.jobs.contains_key(&id) {
            return Ok(JobDeletion::NotFound);
        }

        let outstanding = inner
            .applications
            .values()
            .filter(|a| a.job_id == id && a.status.is_outstanding())
            .count() as i64;
        if outstanding > 0 {
            return Ok(JobDeletion::Blocked { outstanding });
        }

        inner.jobs.remove(&id);
        Ok(JobDeletion::Deleted)
    }
}

#[async_trait]
impl ApplicationStore for InMemoryStore {
    async fn insert_application(
        &self,
        job_id: DbId,
        applicant_id: DbId,
    ) -> Result<ApplicationInsert, CoreError> {
        let mut inner = self.inner.write().await;

        match inner.jobs.get(&job_id) {
            None => return Ok(ApplicationInsert::JobMissing),
            Some(job) if job.status != JobStatus::Open => {
                return Ok(ApplicationInsert::JobNotOpen(job.status))
            }
            Some(_) => {}
        }

        let duplicate = inner.applications.values().any(|a| {
            a.job_id == job_id && a.applicant_id == applicant_id && a.status.is_active()
        });
        if duplicate {
            return Ok(ApplicationInsert::Duplicate);
        }

        let application = Application {
            id: new_id(),
            job_id,
            applicant_id,
            status: ApplicationStatus::Pending,
            submitted_work: None,
            created_at: chrono::Utc::now(),
        };
        inner
            .applications
            .insert(application.id, application.clone());
        Ok(ApplicationInsert::Created(application))
    }

    async fn find_application(&self, id: DbId) -> Result<Option<Application>, CoreError> {
        let inner = self.inner.read().await;
        Ok(inner.applications.get(&id).cloned())
    }

    async fn find_active_application(
        &self,
        job_id: DbId,
        applicant_id: DbId,
    ) -> Result<Option<Application>, CoreError> {
        let inner = self.inner.read().await;
        Ok(inner
            .applications
            .values()
            .find(|a| a.job_id == job_id && a.applicant_id == applicant_id && a.status.is_active())
            .cloned())
    }

    async fn list_applications_for_job(
        &self,
        job_id: DbId,
    ) -> Result<Vec<JobApplicant>, CoreError> {
        let inner = self.inner.read().await;
        let mut applications: Vec<Application> = inner
            .applications
            .values()
            .filter(|a| a.job_id == job_id)
            .cloned()
            .collect();
        newest_first(&mut applications, |a| (a.created_at, a.id));

        Ok(applications
            .into_iter()
            .map(|application| {
                let applicant = inner
                    .accounts
                    .get(&application.applicant_id)
                    .map(|s| AccountSummary::from(&s.account));
                JobApplicant {
                    application,
                    applicant,
                }
            })
            .collect())
    }

    async fn list_applications_for_applicant(
        &self,
        applicant_id: DbId,
    ) -> Result<Vec<Application>, CoreError> {
        let inner = self.inner.read().await;
        let mut applications: Vec<Application> = inner
            .applications
            .values()
            .filter(|a| a.applicant_id == applicant_id)
            .cloned()
            .collect();
        newest_first(&mut applications, |a| (a.created_at, a.id));
        Ok(applications)
    }

    async fn transition_application(
        &self,
        id: DbId,
        from: ApplicationStatus,
        to: ApplicationStatus,
    ) -> Result<Option<Application>, CoreError> {
        let mut inner = self.inner.write().await;
        Ok(match inner.applications.get_mut(&id) {
            Some(application) if application.status == from => {
                application.status = to;
                Some(application.clone())
            }
            _ => None,
        })
    }

    async fn record_submitted_work(
        &self,
        id: DbId,
        text: &str,
    ) -> Result<Option<Application>, CoreError> {
        let mut inner = self.inner.write().await;
        Ok(match inner.applications.get_mut(&id) {
            Some(application) if application.status == ApplicationStatus::Accepted => {
                application.submitted_work = Some(text.to_string());
                Some(application.clone())
            }
            _ => None,
        })
    }

    async fn completed_work(&self, applicant_id: DbId) -> Result<Vec<CompletedWork>, CoreError> {
        let inner = self.inner.read().await;
        Ok(inner
            .applications
            .values()
            .filter(|a| a.applicant_id == applicant_id && a.status == ApplicationStatus::Completed)
            .map(|a| {
                let job = inner.jobs.get(&a.job_id);
                CompletedWork {
                    application_id: a.id,
                    job_id: a.job_id,
                    reward: job.map(|j| j.reward),
                    reward_type: job.map(|j| j.reward_type),
                }
            })
            .collect())
    }
}

#[async_trait]
impl ReviewStore for InMemoryStore {
    async fn insert_review(
        &self,
        input: &CreateReview,
        user_id: DbId,
    ) -> Result<ReviewInsert, CoreError> {
        let mut inner = self.inner.write().await;
        if input.job_id.is_some_and(|id| !inner.jobs.contains_key(&id)) {
            return Ok(ReviewInsert::JobMissing);
        }

        let review = Review {
            id: new_id(),
            user_id,
            job_id: input.job_id,
            rating: input.rating,
            comment: input.comment.clone(),
            created_at: chrono::Utc::now(),
        };
        inner.reviews.insert(review.id, review.clone());
        Ok(ReviewInsert::Created(review))
    }

    async fn list_reviews(&self, filter: &ReviewFilter) -> Result<Vec<Review>, CoreError> {
        let inner = self.inner.read().await;
        let mut reviews: Vec<Review> = inner
            .reviews
            .values()
            .filter(|r| filter.matches(r))
            .cloned()
            .collect();
        newest_first(&mut reviews, |r| (r.created_at, r.id));
        Ok(page(reviews, filter.limit, filter.offset))
    }
}

#[async_trait]
impl Store for InMemoryStore {
    async fn ping(&self) -> Result<(), CoreError> {
        Ok(())
    }
}
