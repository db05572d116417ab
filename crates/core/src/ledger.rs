//! Applications to jobs and their lifecycle.

use std::sync::Arc;

use crate::application::{self, Application, ApplicationStatus, JobApplicant};
use crate::authz::{evaluate, Action, Actor, Denial, Resource};
use crate::error::CoreError;
use crate::job::{Job, JobStatus};
use crate::store::{ApplicationInsert, Store};
use crate::types::DbId;

#[derive(Clone)]
pub struct ApplicationLedger {
    store: Arc<dyn Store>,
}

impl ApplicationLedger {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    async fn job(&self, id: DbId) -> Result<Job, CoreError> {
        self.store
            .find_job(id)
            .await?
            .ok_or(CoreError::NotFound { entity: "Job", id })
    }

    async fn application(&self, id: DbId) -> Result<Application, CoreError> {
        self.store
            .find_application(id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "Application",
                id,
            })
    }

    /// Apply to an open job as `actor`.
    ///
    /// The gate decision is made on a snapshot; the store re-checks the job
    /// status and the one-active-application rule atomically with the insert.
    pub async fn create_application(
        &self,
        actor: &Actor,
        job_id: DbId,
    ) -> Result<Application, CoreError> {
        let job = self.job(job_id).await?;
        let existing = self.store.find_active_application(job_id, actor.id).await?;
        evaluate(
            actor,
            Action::CreateApplication,
            &Resource::NewApplication {
                job: &job,
                existing: existing.as_ref(),
            },
        )
        .into_result(Action::CreateApplication)?;

        match self.store.insert_application(job_id, actor.id).await? {
            ApplicationInsert::Created(application) => {
                tracing::info!(
                    application_id = %application.id,
                    job_id = %job_id,
                    applicant_id = %actor.id,
                    "Application created",
                );
                Ok(application)
            }
            ApplicationInsert::JobMissing => Err(CoreError::NotFound {
                entity: "Job",
                id: job_id,
            }),
            ApplicationInsert::JobNotOpen(status) => {
                Err(Denial::JobNotOpen(status).into_error(Action::CreateApplication))
            }
            ApplicationInsert::Duplicate => {
                Err(Denial::AlreadyApplied.into_error(Action::CreateApplication))
            }
        }
    }

    /// Applications for a job, visible to its owner.
    pub async fn list_for_job(
        &self,
        actor: &Actor,
        job_id: DbId,
    ) -> Result<Vec<JobApplicant>, CoreError> {
        let job = self.job(job_id).await?;
        evaluate(actor, Action::ViewApplicationsForJob, &Resource::Job(&job))
            .into_result(Action::ViewApplicationsForJob)?;
        self.store.list_applications_for_job(job_id).await
    }

    /// The actor's own applications in any status.
    pub async fn list_for_applicant(&self, actor: &Actor) -> Result<Vec<Application>, CoreError> {
        self.store.list_applications_for_applicant(actor.id).await
    }

    pub async fn get_application(
        &self,
        actor: &Actor,
        id: DbId,
    ) -> Result<Application, CoreError> {
        let application = self.application(id).await?;
        let job = self.store.find_job(application.job_id).await?;
        evaluate(
            actor,
            Action::ViewApplication,
            &Resource::Application {
                application: &application,
                job: job.as_ref(),
            },
        )
        .into_result(Action::ViewApplication)?;
        Ok(application)
    }

    /// Accept, reject or complete an application as the job owner.
    pub async fn update_status(
        &self,
        actor: &Actor,
        id: DbId,
        new_status: ApplicationStatus,
    ) -> Result<Application, CoreError> {
        let application = self.application(id).await?;
        let job = self.job(application.job_id).await?;
        evaluate(
            actor,
            Action::UpdateApplicationStatus,
            &Resource::Application {
                application: &application,
                job: Some(&job),
            },
        )
        .into_result(Action::UpdateApplicationStatus)?;
        application::validate_transition(application.status, new_status)?;

        if new_status == ApplicationStatus::Completed && job.status != JobStatus::Completed {
            return Err(CoreError::InvalidState(format!(
                "An application can be completed only after its job is completed (job is '{}')",
                job.status
            )));
        }

        let Some(updated) = self
            .store
            .transition_application(id, application.status, new_status)
            .await?
        else {
            self.application(id).await?;
            return Err(CoreError::Conflict(format!(
                "Application status changed concurrently; it is no longer '{}'",
                application.status
            )));
        };

        tracing::info!(
            application_id = %id,
            job_id = %job.id,
            from = %application.status,
            to = %new_status,
            actor_id = %actor.id,
            "Application status updated",
        );
        Ok(updated)
    }

    /// Attach work text to an accepted application.
    pub async fn submit_work(
        &self,
        actor: &Actor,
        id: DbId,
        text: &str,
    ) -> Result<Application, CoreError> {
        let application = self.application(id).await?;
        let job = self.store.find_job(application.job_id).await?;
        evaluate(
            actor,
            Action::SubmitWork,
            &Resource::Application {
                application: &application,
                job: job.as_ref(),
            },
        )
        .into_result(Action::SubmitWork)?;
        application::validate_submitted_work(text)?;

        if application.status != ApplicationStatus::Accepted {
            return Err(work_requires_accepted(application.status));
        }

        match self.store.record_submitted_work(id, text).await? {
            Some(updated) => {
                tracing::info!(application_id = %id, actor_id = %actor.id, "Work submitted");
                Ok(updated)
            }
            None => {
                let current = self.application(id).await?;
                Err(work_requires_accepted(current.status))
            }
        }
    }
}

fn work_requires_accepted(status: ApplicationStatus) -> CoreError {
    CoreError::InvalidState(format!(
        "Work can be submitted only while the application is accepted (it is '{status}')"
    ))
}
