//! Reviews left by accounts, optionally about a job.

use std::sync::Arc;

use validator::Validate;

use crate::authz::{evaluate, Action, Actor, Resource};
use crate::error::CoreError;
use crate::review::{CreateReview, Review, ReviewFilter};
use crate::store::{ReviewInsert, Store};

#[derive(Clone)]
pub struct ReviewBoard {
    store: Arc<dyn Store>,
}

impl ReviewBoard {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Record a review written by `actor`. A named job must exist.
    pub async fn create_review(
        &self,
        actor: &Actor,
        input: CreateReview,
    ) -> Result<Review, CoreError> {
        evaluate(actor, Action::CreateReview, &Resource::None)
            .into_result(Action::CreateReview)?;
        input.validate()?;

        match self.store.insert_review(&input, actor.id).await? {
            ReviewInsert::Created(review) => {
                tracing::info!(
                    review_id = %review.id,
                    user_id = %actor.id,
                    job_id = ?review.job_id,
                    rating = review.rating,
                    "Review created",
                );
                Ok(review)
            }
            ReviewInsert::JobMissing => match input.job_id {
                Some(id) => Err(CoreError::NotFound { entity: "Job", id }),
                None => Err(CoreError::Internal(
                    "Store reported a missing job for a review without one".into(),
                )),
            },
        }
    }

    /// Public listing, newest first.
    pub async fn list_reviews(&self, filter: &ReviewFilter) -> Result<Vec<Review>, CoreError> {
        self.store.list_reviews(filter).await
    }
}
