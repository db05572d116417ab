//! Application rows from the `applications` table, and the joins built on it.

use dayjob_core::account::AccountSummary;
use dayjob_core::application::{Application, JobApplicant};
use dayjob_core::error::CoreError;
use dayjob_core::store::CompletedWork;
use dayjob_core::types::{DbId, Timestamp};
use rust_decimal::Decimal;
use sqlx::FromRow;

use super::parse_column;

#[derive(Debug, Clone, FromRow)]
pub struct ApplicationRow {
    pub id: DbId,
    pub job_id: DbId,
    pub applicant_id: DbId,
    pub status: String,
    pub submitted_work: Option<String>,
    pub created_at: Timestamp,
}

impl TryFrom<ApplicationRow> for Application {
    type Error = CoreError;

    fn try_from(row: ApplicationRow) -> Result<Self, Self::Error> {
        Ok(Application {
            id: row.id,
            job_id: row.job_id,
            applicant_id: row.applicant_id,
            status: parse_column("applications", "status", &row.status)?,
            submitted_work: row.submitted_work,
            created_at: row.created_at,
        })
    }
}

/// An application left-joined to its applicant's account.
#[derive(Debug, Clone, FromRow)]
pub struct JobApplicantRow {
    #[sqlx(flatten)]
    pub application: ApplicationRow,
    pub applicant_username: Option<String>,
    pub applicant_email: Option<String>,
    pub applicant_department: Option<String>,
}

impl TryFrom<JobApplicantRow> for JobApplicant {
    type Error = CoreError;

    fn try_from(row: JobApplicantRow) -> Result<Self, Self::Error> {
        let applicant = match (row.applicant_username, row.applicant_email) {
            (Some(username), Some(email)) => Some(AccountSummary {
                id: row.application.applicant_id,
                username,
                email,
                department: row.applicant_department,
            }),
            _ => None,
        };
        Ok(JobApplicant {
            application: Application::try_from(row.application)?,
            applicant,
        })
    }
}

/// A completed application left-joined to its job's reward.
#[derive(Debug, Clone, FromRow)]
pub struct CompletedWorkRow {
    pub application_id: DbId,
    pub job_id: DbId,
    pub reward: Option<Decimal>,
    pub reward_type: Option<String>,
}

impl TryFrom<CompletedWorkRow> for CompletedWork {
    type Error = CoreError;

    fn try_from(row: CompletedWorkRow) -> Result<Self, Self::Error> {
        let reward_type = row
            .reward_type
            .as_deref()
            .map(|v| parse_column("jobs", "reward_type", v))
            .transpose()?;
        Ok(CompletedWork {
            application_id: row.application_id,
            job_id: row.job_id,
            reward: row.reward,
            reward_type,
        })
    }
}

/// Outcome of an application insert, before conversion to core types.
#[derive(Debug)]
pub enum InsertApplicationOutcome {
    Created(ApplicationRow),
    JobMissing,
    JobNotOpen(String),
    Duplicate,
}
