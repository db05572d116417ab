//! Route definitions for the `/jobs` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::jobs;
use crate::state::AppState;

/// Routes mounted at `/jobs`.
///
/// Static segments (`my-jobs`, `slug`) take precedence over `{id}`.
///
/// ```text
/// GET    /               -> list_jobs (public)
/// POST   /               -> create_job
/// GET    /my-jobs        -> my_jobs
/// GET    /slug/{slug}    -> get_job_by_slug (public)
/// GET    /{id}           -> get_job (public)
/// PUT    /{id}           -> update_job
/// DELETE /{id}           -> delete_job
/// PUT    /{id}/status    -> update_job_status
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(jobs::list_jobs).post(jobs::create_job))
        .route("/my-jobs", get(jobs::my_jobs))
        .route("/slug/{slug}", get(jobs::get_job_by_slug))
        .route(
            "/{id}",
            get(jobs::get_job)
                .put(jobs::update_job)
                .delete(jobs::delete_job),
        )
        .route("/{id}/status", put(jobs::update_job_status))
}
