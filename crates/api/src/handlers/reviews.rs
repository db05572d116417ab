//! Handlers for the `/reviews` resource.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use dayjob_core::review::{CreateReview, Review, ReviewFilter};
use dayjob_core::types::DbId;
use serde::Deserialize;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for `GET /reviews`.
#[derive(Debug, Default, Deserialize)]
pub struct ReviewListParams {
    pub job_id: Option<DbId>,
}

/// GET /api/v1/reviews
///
/// Public listing, newest first.
pub async fn list_reviews(
    State(state): State<AppState>,
    Query(params): Query<ReviewListParams>,
    Query(page): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<Vec<Review>>>> {
    let filter = ReviewFilter {
        job_id: params.job_id,
        limit: Some(page.limit()),
        offset: Some(page.offset()),
    };
    let reviews = state.marketplace.reviews.list_reviews(&filter).await?;
    Ok(Json(DataResponse::new(reviews)))
}

/// POST /api/v1/reviews
pub async fn create_review(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<CreateReview>,
) -> AppResult<(StatusCode, Json<DataResponse<Review>>)> {
    let review = state
        .marketplace
        .reviews
        .create_review(&auth.actor, input)
        .await?;
    Ok((StatusCode::CREATED, Json(DataResponse::new(review))))
}
