//! Applications to jobs and their status state machine.

use serde::{Deserialize, Serialize};

use crate::account::AccountSummary;
use crate::error::CoreError;
use crate::text_enum::define_text_enum;
use crate::types::{DbId, Timestamp};

define_text_enum! {
    /// Application lifecycle status.
    ApplicationStatus("application status") {
        Pending = "pending",
        Accepted = "accepted",
        Rejected = "rejected",
        Completed = "completed",
    }
}

/// A doer's application to a job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Application {
    pub id: DbId,
    pub job_id: DbId,
    pub applicant_id: DbId,
    pub status: ApplicationStatus,
    pub submitted_work: Option<String>,
    pub created_at: Timestamp,
}

/// An application as seen by the job owner: the record plus who applied.
///
/// `applicant` is `None` when the applicant's account has since been deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobApplicant {
    #[serde(flatten)]
    pub application: Application,
    pub applicant: Option<AccountSummary>,
}

/// Maximum length of submitted work text (characters).
pub const MAX_SUBMITTED_WORK_LENGTH: usize = 20_000;

pub fn validate_submitted_work(text: &str) -> Result<(), CoreError> {
    if text.trim().is_empty() {
        return Err(CoreError::Validation(
            "submitted_work must not be empty".into(),
        ));
    }
    if text.chars().count() > MAX_SUBMITTED_WORK_LENGTH {
        return Err(CoreError::Validation(format!(
            "submitted_work exceeds maximum length of {MAX_SUBMITTED_WORK_LENGTH} characters"
        )));
    }
    Ok(())
}

impl ApplicationStatus {
    /// Statuses reachable from `self` in one step.
    ///
    /// - `pending`   -> `accepted`, `rejected`
    /// - `accepted`  -> `completed`
    /// - `rejected`, `completed` -> (terminal)
    pub fn valid_transitions(self) -> &'static [ApplicationStatus] {
        match self {
            ApplicationStatus::Pending => {
                &[ApplicationStatus::Accepted, ApplicationStatus::Rejected]
            }
            ApplicationStatus::Accepted => &[ApplicationStatus::Completed],
            ApplicationStatus::Rejected | ApplicationStatus::Completed => &[],
        }
    }

    pub fn can_transition_to(self, next: ApplicationStatus) -> bool {
        self.valid_transitions().contains(&next)
    }

    pub fn is_terminal(self) -> bool {
        self.valid_transitions().is_empty()
    }

    /// Whether an application in this status blocks the same doer from
    /// applying to the same job again.
    pub fn is_active(self) -> bool {
        self != ApplicationStatus::Rejected
    }

    /// Whether an application in this status blocks deleting its job.
    pub fn is_outstanding(self) -> bool {
        matches!(self, ApplicationStatus::Pending | ApplicationStatus::Accepted)
    }
}

/// Validate an application status change.
pub fn validate_transition(
    from: ApplicationStatus,
    to: ApplicationStatus,
) -> Result<(), CoreError> {
    if from.can_transition_to(to) {
        Ok(())
    } else {
        Err(CoreError::InvalidTransition {
            entity: "Application",
            from: from.as_str(),
            to: to.as_str(),
        })
    }
}
