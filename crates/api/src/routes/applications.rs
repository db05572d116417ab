//! Route definitions for the `/applications` resource.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::applications;
use crate::state::AppState;

/// Routes mounted at `/applications`.
///
/// ```text
/// POST /                  -> create_application
/// GET  /my                -> my_applications
/// GET  /earnings/my       -> my_earnings
/// GET  /job/{job_id}      -> applications_for_job
/// GET  /{id}              -> get_application
/// PUT  /{id}/status       -> update_application_status
/// PUT  /{id}/work         -> submit_work
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(applications::create_application))
        .route("/my", get(applications::my_applications))
        .route("/earnings/my", get(applications::my_earnings))
        .route("/job/{job_id}", get(applications::applications_for_job))
        .route("/{id}", get(applications::get_application))
        .route("/{id}/status", put(applications::update_application_status))
        .route("/{id}/work", put(applications::submit_work))
}
