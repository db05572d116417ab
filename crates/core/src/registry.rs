//! Job postings: creation, listing, edits, status changes and deletion.

use std::sync::Arc;

use crate::authz::{evaluate, Action, Actor, Resource};
use crate::error::CoreError;
use crate::job::{self, CreateJob, Job, JobFilter, JobStatus, UpdateJob};
use crate::slug::{candidates, slugify, MAX_SLUG_ATTEMPTS};
use crate::store::{JobDeletion, Store};
use crate::types::DbId;

#[derive(Clone)]
pub struct JobRegistry {
    store: Arc<dyn Store>,
}

impl JobRegistry {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Post a new job as `actor`. The job starts `open` under a unique slug
    /// derived from its title.
    pub async fn create_job(&self, actor: &Actor, input: CreateJob) -> Result<Job, CoreError> {
        evaluate(actor, Action::CreateJob, &Resource::None).into_result(Action::CreateJob)?;
        job::validate_create(&input)?;

        let base = slugify(&input.title);
        for slug in candidates(&base) {
            if let Some(job) = self.store.insert_job(&input, &slug, actor.id).await? {
                tracing::info!(
                    job_id = %job.id,
                    slug = %job.slug,
                    posted_by = %actor.id,
                    "Job created",
                );
                return Ok(job);
            }
        }

        Err(CoreError::Conflict(format!(
            "Could not allocate a unique slug for '{base}' after {MAX_SLUG_ATTEMPTS} attempts"
        )))
    }

    pub async fn list_jobs(&self, filter: &JobFilter) -> Result<Vec<Job>, CoreError> {
        self.store.list_jobs(filter).await
    }

    /// Jobs posted by `actor`, optionally restricted to one status.
    pub async fn list_my_jobs(
        &self,
        actor: &Actor,
        status: Option<JobStatus>,
    ) -> Result<Vec<Job>, CoreError> {
        let filter = JobFilter {
            status,
            posted_by: Some(actor.id),
            ..Default::default()
        };
        self.store.list_jobs(&filter).await
    }

    pub async fn get_job(&self, id: DbId) -> Result<Job, CoreError> {
        self.store
            .find_job(id)
            .await?
            .ok_or(CoreError::NotFound { entity: "Job", id })
    }

    pub async fn get_job_by_slug(&self, slug: &str) -> Result<Job, CoreError> {
        self.store
            .find_job_by_slug(slug)
            .await?
            .ok_or_else(|| CoreError::NotFoundByKey {
                entity: "Job",
                field: "slug",
                value: slug.to_string(),
            })
    }

    /// Edit the descriptive fields of a job that is not yet completed.
    pub async fn update_details(
        &self,
        actor: &Actor,
        id: DbId,
        patch: UpdateJob,
    ) -> Result<Job, CoreError> {
        let job = self.get_job(id).await?;
        evaluate(actor, Action::UpdateJob, &Resource::Job(&job)).into_result(Action::UpdateJob)?;
        if job.status == JobStatus::Completed {
            return Err(completed_job_is_frozen());
        }
        job::validate_update(&patch)?;

        match self.store.update_job_details(id, &patch).await? {
            Some(updated) => {
                tracing::info!(job_id = %id, actor_id = %actor.id, "Job details updated");
                Ok(updated)
            }
            // Deleted or completed since it was read.
            None => {
                self.get_job(id).await?;
                Err(completed_job_is_frozen())
            }
        }
    }

    /// Move a job forward through its lifecycle. Completing a job also
    /// completes its accepted applications.
    pub async fn update_status(
        &self,
        actor: &Actor,
        id: DbId,
        new_status: JobStatus,
    ) -> Result<Job, CoreError> {
        let job = self.get_job(id).await?;
        evaluate(actor, Action::UpdateJobStatus, &Resource::Job(&job))
            .into_result(Action::UpdateJobStatus)?;
        job::validate_transition(job.status, new_status)?;

        let Some(transition) = self
            .store
            .transition_job(id, job.status, new_status)
            .await?
        else {
            self.get_job(id).await?;
            return Err(CoreError::Conflict(format!(
                "Job status changed concurrently; it is no longer '{}'",
                job.status
            )));
        };

        tracing::info!(
            job_id = %id,
            from = %job.status,
            to = %new_status,
            actor_id = %actor.id,
            completed_applications = transition.completed_applications.len(),
            "Job status updated",
        );
        Ok(transition.job)
    }

    /// Delete a job with no pending or accepted applications.
    pub async fn delete_job(&self, actor: &Actor, id: DbId) -> Result<(), CoreError> {
        let job = self.get_job(id).await?;
        evaluate(actor, Action::DeleteJob, &Resource::Job(&job)).into_result(Action::DeleteJob)?;

        match self.store.delete_job(id).await? {
            JobDeletion::Deleted => {
                tracing::info!(job_id = %id, actor_id = %actor.id, "Job deleted");
                Ok(())
            }
            JobDeletion::NotFound => Err(CoreError::NotFound { entity: "Job", id }),
            JobDeletion::Blocked { outstanding } => Err(CoreError::InvalidState(format!(
                "Job has {outstanding} pending or accepted application(s); \
                 resolve them before deleting"
            ))),
        }
    }
}

fn completed_job_is_frozen() -> CoreError {
    CoreError::InvalidState("A completed job can no longer be edited".into())
}
