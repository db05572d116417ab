pub mod admin;
pub mod applications;
pub mod auth;
pub mod health;
pub mod jobs;
pub mod reviews;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/signup                          sign up (public)
/// /auth/login                           login (public)
/// /auth/user                            current account
///
/// /jobs                                 list (public), create
/// /jobs/my-jobs                         jobs posted by the caller
/// /jobs/slug/{slug}                     get by slug (public)
/// /jobs/{id}                            get (public), update, delete
/// /jobs/{id}/status                     update status
///
/// /applications                         apply
/// /applications/my                      caller's applications
/// /applications/earnings/my             caller's earnings
/// /applications/job/{job_id}            applications for a job
/// /applications/{id}                    get
/// /applications/{id}/status             update status
/// /applications/{id}/work               submit work
///
/// /reviews                              list (public), create
/// /admin/users                          list (admin only)
/// /admin/users/{id}                     delete
/// /admin/users/{username}/role          change role
/// /admin/users/{id}/earnings            earnings for any account
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/jobs", jobs::router())
        .nest("/applications", applications::router())
        .nest("/reviews", reviews::router())
        .nest("/admin", admin::router())
}
