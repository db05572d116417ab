//! Route definitions for the `/reviews` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::reviews;
use crate::state::AppState;

/// Routes mounted at `/reviews`.
///
/// ```text
/// GET  /    -> list_reviews (public; ?job_id=&limit=&offset=)
/// POST /    -> create_review
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(reviews::list_reviews).post(reviews::create_review))
}
