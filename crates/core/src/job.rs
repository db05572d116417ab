//! Job postings: record type, input DTOs, field validation, and the status
//! state machine.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::text_enum::define_text_enum;
use crate::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// Enumerations
// ---------------------------------------------------------------------------

define_text_enum! {
    /// Job lifecycle status.
    JobStatus("job status") {
        Open = "open",
        InProgress = "in_progress",
        Completed = "completed",
    }
}

define_text_enum! {
    /// Unit the reward is denominated in.
    RewardType("reward type") {
        Cash = "cash",
        Credits = "credits",
    }
}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// A job posting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    pub id: DbId,
    pub title: String,
    pub slug: String,
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub reward: Decimal,
    pub reward_type: RewardType,
    pub department: Option<String>,
    pub estimated_time: Option<String>,
    pub skills_required: Vec<String>,
    pub status: JobStatus,
    pub is_featured: bool,
    pub image_url: Option<String>,
    pub posted_by: DbId,
    pub created_at: Timestamp,
}

/// Fields accepted when posting a job.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateJob {
    pub title: String,
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub reward: Decimal,
    pub reward_type: RewardType,
    pub department: Option<String>,
    pub estimated_time: Option<String>,
    #[serde(default)]
    pub skills_required: Vec<String>,
    #[serde(default)]
    pub is_featured: bool,
    pub image_url: Option<String>,
}

/// Editable job fields. `None` leaves the stored value unchanged; status is
/// not editable here.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateJob {
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub reward: Option<Decimal>,
    pub reward_type: Option<RewardType>,
    pub department: Option<String>,
    pub estimated_time: Option<String>,
    pub skills_required: Option<Vec<String>>,
    pub is_featured: Option<bool>,
    pub image_url: Option<String>,
}

/// Exact-match listing filters plus caller-supplied paging.
#[derive(Debug, Clone, Default)]
pub struct JobFilter {
    pub department: Option<String>,
    pub status: Option<JobStatus>,
    pub reward_type: Option<RewardType>,
    pub posted_by: Option<DbId>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl JobFilter {
    /// Whether `job` satisfies every set filter (paging is not considered).
    pub fn matches(&self, job: &Job) -> bool {
        self.department
            .as_deref()
            .is_none_or(|d| job.department.as_deref() == Some(d))
            && self.status.is_none_or(|s| job.status == s)
            && self.reward_type.is_none_or(|r| job.reward_type == r)
            && self.posted_by.is_none_or(|p| job.posted_by == p)
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

pub const MAX_TITLE_LENGTH: usize = 255;
pub const MAX_SHORT_FIELD_LENGTH: usize = 50;
pub const MAX_IMAGE_URL_LENGTH: usize = 500;
/// Rewards are stored as `NUMERIC(10,2)`.
pub const MAX_REWARD_SCALE: u32 = 2;

fn max_reward() -> Decimal {
    Decimal::from(100_000_000)
}

pub fn validate_title(title: &str) -> Result<(), CoreError> {
    if title.trim().is_empty() {
        return Err(CoreError::Validation("title must not be empty".into()));
    }
    if title.chars().count() > MAX_TITLE_LENGTH {
        return Err(CoreError::Validation(format!(
            "title exceeds maximum length of {MAX_TITLE_LENGTH} characters"
        )));
    }
    Ok(())
}

pub fn validate_description(description: &str) -> Result<(), CoreError> {
    if description.trim().is_empty() {
        return Err(CoreError::Validation("description must not be empty".into()));
    }
    Ok(())
}

pub fn validate_reward(reward: Decimal) -> Result<(), CoreError> {
    if reward <= Decimal::ZERO {
        return Err(CoreError::Validation(format!(
            "reward must be greater than zero (got {reward})"
        )));
    }
    if reward.normalize().scale() > MAX_REWARD_SCALE {
        return Err(CoreError::Validation(format!(
            "reward must have at most {MAX_REWARD_SCALE} decimal places (got {reward})"
        )));
    }
    if reward >= max_reward() {
        return Err(CoreError::Validation(format!(
            "reward must be less than {}",
            max_reward()
        )));
    }
    Ok(())
}

fn validate_optional_length(
    field: &str,
    value: Option<&str>,
    max: usize,
) -> Result<(), CoreError> {
    match value {
        Some(v) if v.chars().count() > max => Err(CoreError::Validation(format!(
            "{field} exceeds maximum length of {max} characters"
        ))),
        _ => Ok(()),
    }
}

fn validate_skills(skills: &[String]) -> Result<(), CoreError> {
    if skills.iter().any(|s| s.trim().is_empty()) {
        return Err(CoreError::Validation(
            "skills_required entries must not be empty".into(),
        ));
    }
    Ok(())
}

/// Validate every field of a new posting.
pub fn validate_create(input: &CreateJob) -> Result<(), CoreError> {
    validate_title(&input.title)?;
    validate_description(&input.description)?;
    validate_reward(input.reward)?;
    validate_optional_length(
        "department",
        input.department.as_deref(),
        MAX_SHORT_FIELD_LENGTH,
    )?;
    validate_optional_length(
        "estimated_time",
        input.estimated_time.as_deref(),
        MAX_SHORT_FIELD_LENGTH,
    )?;
    validate_optional_length("image_url", input.image_url.as_deref(), MAX_IMAGE_URL_LENGTH)?;
    validate_skills(&input.skills_required)
}

/// Validate the fields present in a patch.
pub fn validate_update(input: &UpdateJob) -> Result<(), CoreError> {
    if let Some(title) = &input.title {
        validate_title(title)?;
    }
    if let Some(description) = &input.description {
        validate_description(description)?;
    }
    if let Some(reward) = input.reward {
        validate_reward(reward)?;
    }
    validate_optional_length(
        "department",
        input.department.as_deref(),
        MAX_SHORT_FIELD_LENGTH,
    )?;
    validate_optional_length(
        "estimated_time",
        input.estimated_time.as_deref(),
        MAX_SHORT_FIELD_LENGTH,
    )?;
    validate_optional_length("image_url", input.image_url.as_deref(), MAX_IMAGE_URL_LENGTH)?;
    if let Some(skills) = &input.skills_required {
        validate_skills(skills)?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// State machine
// ---------------------------------------------------------------------------

impl JobStatus {
    /// Statuses reachable from `self` in one step.
    ///
    /// - `open`        -> `in_progress`, `completed`
    /// - `in_progress` -> `completed`
    /// - `completed`   -> (terminal)
    pub fn valid_transitions(self) -> &'static [JobStatus] {
        match self {
            JobStatus::Open => &[JobStatus::InProgress, JobStatus::Completed],
            JobStatus::InProgress => &[JobStatus::Completed],
            JobStatus::Completed => &[],
        }
    }

    pub fn can_transition_to(self, next: JobStatus) -> bool {
        self.valid_transitions().contains(&next)
    }

    pub fn is_terminal(self) -> bool {
        self.valid_transitions().is_empty()
    }
}

/// Validate a job status change.
pub fn validate_transition(from: JobStatus, to: JobStatus) -> Result<(), CoreError> {
    if from.can_transition_to(to) {
        Ok(())
    } else {
        Err(CoreError::InvalidTransition {
            entity: "Job",
            from: from.as_str(),
            to: to.as_str(),
        })
    }
}
