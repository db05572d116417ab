//! Reviews: a 1-5 rating with an optional comment, optionally about a job.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::types::{DbId, Timestamp};

pub const MIN_RATING: i32 = 1;
pub const MAX_RATING: i32 = 5;
pub const MAX_COMMENT_LENGTH: u64 = 2000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    pub id: DbId,
    /// The account that wrote the review.
    pub user_id: DbId,
    pub job_id: Option<DbId>,
    pub rating: i32,
    pub comment: Option<String>,
    pub created_at: Timestamp,
}

/// Fields accepted when leaving a review. The author is the caller.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateReview {
    #[validate(range(min = MIN_RATING, max = MAX_RATING, message = "rating must be between 1 and 5"))]
    pub rating: i32,
    #[validate(length(max = MAX_COMMENT_LENGTH, message = "comment must be at most 2000 characters"))]
    pub comment: Option<String>,
    pub job_id: Option<DbId>,
}

/// Public listing filter plus caller-supplied paging.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReviewFilter {
    pub job_id: Option<DbId>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl ReviewFilter {
    /// Whether `review` satisfies the job filter (paging is not considered).
    pub fn matches(&self, review: &Review) -> bool {
        self.job_id.is_none_or(|id| review.job_id == Some(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(rating: i32) -> CreateReview {
        CreateReview {
            rating,
            comment: Some("Clear instructions, paid on time".into()),
            job_id: None,
        }
    }

    #[test]
    fn rating_bounds_are_inclusive() {
        assert!(input(MIN_RATING).validate().is_ok());
        assert!(input(MAX_RATING).validate().is_ok());
    }

    #[test]
    fn rating_outside_range_fails() {
        for rating in [0, 6, -1] {
            let err = input(rating).validate().unwrap_err();
            assert!(err.to_string().contains("rating"), "rating {rating}");
        }
    }

    #[test]
    fn long_comment_fails() {
        let mut review = input(4);
        review.comment = Some("x".repeat(MAX_COMMENT_LENGTH as usize + 1));
        assert!(review.validate().is_err());

        review.comment = None;
        assert!(review.validate().is_ok());
    }
}
