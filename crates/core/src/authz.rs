//! The authorization gate.
//!
//! Every permission rule in the system lives in [`evaluate`]. It is a pure
//! function of `(actor, action, resource)`: no I/O, no panics, and every
//! combination without an explicit rule is denied.
//!
//! Rules, first match wins:
//!
//! 1. `admin` may perform any action.
//! 2. Updating, re-statusing, or deleting a job requires owning it.
//! 3. Updating an application's status requires owning its parent job.
//! 4. Applying requires the `doer` role, an `open` job, and no active
//!    application by the same actor on that job.
//! 5. Viewing a job's applications requires owning the job.
//! 6. Posting a job requires the `poster` role; submitting work requires being
//!    the applicant; viewing an application requires being its applicant or
//!    the job owner; viewing earnings requires being that account; any
//!    account may leave a review.
//! 7. Everything else is denied.

use crate::application::Application;
use crate::error::CoreError;
use crate::job::{Job, JobStatus};
use crate::roles::Role;
use crate::types::DbId;

/// The authenticated caller of an operation. Resolved once per request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub id: DbId,
    pub role: Role,
}

impl Actor {
    pub fn new(id: DbId, role: Role) -> Self {
        Self { id, role }
    }
}

/// Operations subject to authorization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    CreateJob,
    UpdateJob,
    UpdateJobStatus,
    DeleteJob,
    ViewApplicationsForJob,
    CreateApplication,
    ViewApplication,
    UpdateApplicationStatus,
    SubmitWork,
    ViewEarnings,
    CreateReview,
    ManageAccounts,
}

impl Action {
    pub const ALL: &'static [Action] = &[
        Action::CreateJob,
        Action::UpdateJob,
        Action::UpdateJobStatus,
        Action::DeleteJob,
        Action::ViewApplicationsForJob,
        Action::CreateApplication,
        Action::ViewApplication,
        Action::UpdateApplicationStatus,
        Action::SubmitWork,
        Action::ViewEarnings,
        Action::CreateReview,
        Action::ManageAccounts,
    ];

    /// Human-readable verb phrase used in error messages.
    pub fn describe(self) -> &'static str {
        match self {
            Action::CreateJob => "create job",
            Action::UpdateJob => "update job",
            Action::UpdateJobStatus => "update job status",
            Action::DeleteJob => "delete job",
            Action::ViewApplicationsForJob => "view applications for job",
            Action::CreateApplication => "create application",
            Action::ViewApplication => "view application",
            Action::UpdateApplicationStatus => "update application status",
            Action::SubmitWork => "submit work",
            Action::ViewEarnings => "view earnings",
            Action::CreateReview => "create review",
            Action::ManageAccounts => "manage accounts",
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.describe())
    }
}

/// The entity an action targets, carrying whatever context the rules need.
#[derive(Debug, Clone, Copy)]
pub enum Resource<'a> {
    /// No target entity (e.g. posting a new job, account administration).
    None,
    Job(&'a Job),
    /// An existing application and its parent job, if the job still exists.
    Application {
        application: &'a Application,
        job: Option<&'a Job>,
    },
    /// A prospective application: the target job and the actor's current
    /// active application on it, if any.
    NewApplication {
        job: &'a Job,
        existing: Option<&'a Application>,
    },
    Account(DbId),
}

/// Why the gate said no.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Denial {
    NotOwner,
    NotApplicant,
    RoleNotPermitted(Role),
    JobNotOpen(JobStatus),
    AlreadyApplied,
    AdminOnly,
    /// The resource does not fit the action, or no rule covers the pair.
    NoRule,
}

impl Denial {
    /// Convert a denial into the error surfaced to the caller.
    ///
    /// State-dependent denials of rule 4 keep their own error kinds so the
    /// caller can tell "not allowed" from "not now" and "already done".
    pub fn into_error(self, action: Action) -> CoreError {
        match self {
            Denial::JobNotOpen(status) => CoreError::InvalidState(format!(
                "Applications are accepted only while the job is open (job is '{status}')"
            )),
            Denial::AlreadyApplied => CoreError::Conflict(
                "An active application by this account already exists for this job".into(),
            ),
            Denial::NotOwner => CoreError::Forbidden(format!(
                "Only the job owner or an admin may {action}"
            )),
            Denial::NotApplicant => CoreError::Forbidden(format!(
                "Only the applicant or an admin may {action}"
            )),
            Denial::RoleNotPermitted(role) => {
                CoreError::Forbidden(format!("Role '{role}' may not {action}"))
            }
            Denial::AdminOnly => CoreError::Forbidden(format!("Admin role required to {action}")),
            Denial::NoRule => CoreError::Forbidden(format!("Not permitted to {action}")),
        }
    }
}

/// The gate's verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny(Denial),
}

impl Decision {
    pub fn is_allowed(self) -> bool {
        self == Decision::Allow
    }

    /// `Ok(())` when allowed, otherwise the mapped error.
    pub fn into_result(self, action: Action) -> Result<(), CoreError> {
        match self {
            Decision::Allow => Ok(()),
            Decision::Deny(denial) => Err(denial.into_error(action)),
        }
    }
}

fn owner(actor: &Actor, posted_by: DbId) -> Decision {
    if actor.id == posted_by {
        Decision::Allow
    } else {
        Decision::Deny(Denial::NotOwner)
    }
}

/// Evaluate the rules for `(actor, action, resource)`.
pub fn evaluate(actor: &Actor, action: Action, resource: &Resource<'_>) -> Decision {
    if actor.role == Role::Admin {
        return Decision::Allow;
    }

    match (action, resource) {
        (Action::UpdateJobStatus | Action::DeleteJob | Action::UpdateJob, Resource::Job(job)) => {
            owner(actor, job.posted_by)
        }

        (
            Action::UpdateApplicationStatus,
            Resource::Application {
                job: Some(job), ..
            },
        ) => owner(actor, job.posted_by),

        (Action::CreateApplication, Resource::NewApplication { job, existing }) => {
            if actor.role != Role::Doer {
                Decision::Deny(Denial::RoleNotPermitted(actor.role))
            } else if job.status != JobStatus::Open {
                Decision::Deny(Denial::JobNotOpen(job.status))
            } else if existing.is_some_and(|a| {
                a.applicant_id == actor.id && a.job_id == job.id && a.status.is_active()
            }) {
                Decision::Deny(Denial::AlreadyApplied)
            } else {
                Decision::Allow
            }
        }

        (Action::ViewApplicationsForJob, Resource::Job(job)) => owner(actor, job.posted_by),

        (Action::CreateJob, Resource::None) => {
            if actor.role == Role::Poster {
                Decision::Allow
            } else {
                Decision::Deny(Denial::RoleNotPermitted(actor.role))
            }
        }

        (Action::SubmitWork, Resource::Application { application, .. }) => {
            if application.applicant_id == actor.id {
                Decision::Allow
            } else {
                Decision::Deny(Denial::NotApplicant)
            }
        }

        (Action::ViewApplication, Resource::Application { application, job }) => {
            let is_owner = job.is_some_and(|j| j.posted_by == actor.id);
            if application.applicant_id == actor.id || is_owner {
                Decision::Allow
            } else {
                Decision::Deny(Denial::NotApplicant)
            }
        }

        (Action::ViewEarnings, Resource::Account(id)) => {
            if *id == actor.id {
                Decision::Allow
            } else {
                Decision::Deny(Denial::NoRule)
            }
        }

        (Action::CreateReview, Resource::None) => Decision::Allow,

        (Action::ManageAccounts, _) => Decision::Deny(Denial::AdminOnly),

        _ => Decision::Deny(Denial::NoRule),
    }
}

/// Boolean form of [`evaluate`].
pub fn is_allowed(actor: &Actor, action: Action, resource: &Resource<'_>) -> bool {
    evaluate(actor, action, resource).is_allowed()
}
