//! Handlers for the `/jobs` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use dayjob_core::job::{CreateJob, Job, JobFilter, JobStatus, RewardType, UpdateJob};
use dayjob_core::types::DbId;
use serde::Deserialize;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for `GET /jobs`.
#[derive(Debug, Default, Deserialize)]
pub struct JobListParams {
    pub department: Option<String>,
    pub status: Option<JobStatus>,
    pub reward_type: Option<RewardType>,
}

/// Query parameters for `GET /jobs/my-jobs`.
#[derive(Debug, Default, Deserialize)]
pub struct MyJobsParams {
    pub status: Option<JobStatus>,
}

/// Request body for `PUT /jobs/{id}/status`.
#[derive(Debug, Deserialize)]
pub struct UpdateJobStatusRequest {
    pub status: JobStatus,
}

/// GET /api/v1/jobs
///
/// Public listing, newest first.
pub async fn list_jobs(
    State(state): State<AppState>,
    Query(params): Query<JobListParams>,
    Query(page): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<Vec<Job>>>> {
    let filter = JobFilter {
        department: params.department,
        status: params.status,
        reward_type: params.reward_type,
        posted_by: None,
        limit: Some(page.limit()),
        offset: Some(page.offset()),
    };
    let jobs = state.marketplace.jobs.list_jobs(&filter).await?;
    Ok(Json(DataResponse::new(jobs)))
}

/// POST /api/v1/jobs
pub async fn create_job(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<CreateJob>,
) -> AppResult<(StatusCode, Json<DataResponse<Job>>)> {
    let job = state.marketplace.jobs.create_job(&auth.actor, input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse::new(job))))
}

/// GET /api/v1/jobs/my-jobs
pub async fn my_jobs(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<MyJobsParams>,
) -> AppResult<Json<DataResponse<Vec<Job>>>> {
    let jobs = state
        .marketplace
        .jobs
        .list_my_jobs(&auth.actor, params.status)
        .await?;
    Ok(Json(DataResponse::new(jobs)))
}

/// GET /api/v1/jobs/slug/{slug}
pub async fn get_job_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Json<DataResponse<Job>>> {
    let job = state.marketplace.jobs.get_job_by_slug(&slug).await?;
    Ok(Json(DataResponse::new(job)))
}

/// GET /api/v1/jobs/{id}
pub async fn get_job(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Job>>> {
    let job = state.marketplace.jobs.get_job(id).await?;
    Ok(Json(DataResponse::new(job)))
}

/// PUT /api/v1/jobs/{id}
pub async fn update_job(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(patch): Json<UpdateJob>,
) -> AppResult<Json<DataResponse<Job>>> {
    let job = state
        .marketplace
        .jobs
        .update_details(&auth.actor, id, patch)
        .await?;
    Ok(Json(DataResponse::new(job)))
}

/// PUT /api/v1/jobs/{id}/status
pub async fn update_job_status(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateJobStatusRequest>,
) -> AppResult<Json<DataResponse<Job>>> {
    let job = state
        .marketplace
        .jobs
        .update_status(&auth.actor, id, input.status)
        .await?;
    Ok(Json(DataResponse::new(job)))
}

/// DELETE /api/v1/jobs/{id}
///
/// Blocked while the job has pending or accepted applications.
pub async fn delete_job(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    state.marketplace.jobs.delete_job(&auth.actor, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
