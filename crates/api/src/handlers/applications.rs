//! Handlers for the `/applications` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use dayjob_core::application::{Application, ApplicationStatus, JobApplicant};
use dayjob_core::earnings::Earnings;
use dayjob_core::types::DbId;
use serde::Deserialize;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /applications`.
#[derive(Debug, Deserialize)]
pub struct CreateApplicationRequest {
    pub job_id: DbId,
}

/// Request body for `PUT /applications/{id}/status`.
#[derive(Debug, Deserialize)]
pub struct UpdateApplicationStatusRequest {
    pub status: ApplicationStatus,
}

/// Request body for `PUT /applications/{id}/work`.
#[derive(Debug, Deserialize)]
pub struct SubmitWorkRequest {
    pub submitted_work: String,
}

/// POST /api/v1/applications
pub async fn create_application(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<CreateApplicationRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Application>>)> {
    let application = state
        .marketplace
        .applications
        .create_application(&auth.actor, input.job_id)
        .await?;
    Ok((StatusCode::CREATED, Json(DataResponse::new(application))))
}

/// GET /api/v1/applications/my
pub async fn my_applications(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<DataResponse<Vec<Application>>>> {
    let applications = state
        .marketplace
        .applications
        .list_for_applicant(&auth.actor)
        .await?;
    Ok(Json(DataResponse::new(applications)))
}

/// GET /api/v1/applications/job/{job_id}
///
/// Applications for a job with applicant details, for the job's owner.
pub async fn applications_for_job(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(job_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<JobApplicant>>>> {
    let applicants = state
        .marketplace
        .applications
        .list_for_job(&auth.actor, job_id)
        .await?;
    Ok(Json(DataResponse::new(applicants)))
}

/// GET /api/v1/applications/{id}
pub async fn get_application(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Application>>> {
    let application = state
        .marketplace
        .applications
        .get_application(&auth.actor, id)
        .await?;
    Ok(Json(DataResponse::new(application)))
}

/// PUT /api/v1/applications/{id}/status
pub async fn update_application_status(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateApplicationStatusRequest>,
) -> AppResult<Json<DataResponse<Application>>> {
    let application = state
        .marketplace
        .applications
        .update_status(&auth.actor, id, input.status)
        .await?;
    Ok(Json(DataResponse::new(application)))
}

/// PUT /api/v1/applications/{id}/work
pub async fn submit_work(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<SubmitWorkRequest>,
) -> AppResult<Json<DataResponse<Application>>> {
    let application = state
        .marketplace
        .applications
        .submit_work(&auth.actor, id, &input.submitted_work)
        .await?;
    Ok(Json(DataResponse::new(application)))
}

/// GET /api/v1/applications/earnings/my
pub async fn my_earnings(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<DataResponse<Earnings>>> {
    let earnings = state
        .marketplace
        .earnings
        .earnings_for(&auth.actor, auth.actor.id)
        .await?;
    Ok(Json(DataResponse::new(earnings)))
}
