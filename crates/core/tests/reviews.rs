//! Review board: creation rules and the public listing.

mod common;

use assert_matches::assert_matches;
use common::{actor, marketplace, post_job};
use dayjob_core::error::CoreError;
use dayjob_core::review::{CreateReview, ReviewFilter};
use dayjob_core::roles::Role;
use dayjob_core::types::{new_id, DbId};

fn review(rating: i32, job_id: Option<DbId>) -> CreateReview {
    CreateReview {
        rating,
        comment: Some("Would work with them again".into()),
        job_id,
    }
}

#[tokio::test]
async fn any_role_may_review_a_job_or_the_site() {
    let market = marketplace();
    let poster = actor(&market, "poster1", Role::Poster).await;
    let doer = actor(&market, "doer1", Role::Doer).await;
    let job = post_job(&market, &poster, "Shelve Books", 15).await;

    let about_job = market
        .reviews
        .create_review(&doer, review(5, Some(job.id)))
        .await
        .unwrap();
    assert_eq!(about_job.user_id, doer.id);
    assert_eq!(about_job.job_id, Some(job.id));
    assert_eq!(about_job.rating, 5);

    let general = market
        .reviews
        .create_review(&poster, review(3, None))
        .await
        .unwrap();
    assert_eq!(general.job_id, None);
    assert_eq!(general.user_id, poster.id);
}

#[tokio::test]
async fn rating_out_of_range_is_a_validation_error() {
    let market = marketplace();
    let doer = actor(&market, "doer1", Role::Doer).await;

    for rating in [0, 6] {
        assert_matches!(
            market.reviews.create_review(&doer, review(rating, None)).await,
            Err(CoreError::Validation(_))
        );
    }
    assert!(market
        .reviews
        .list_reviews(&ReviewFilter::default())
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn review_of_missing_job_is_not_found() {
    let market = marketplace();
    let doer = actor(&market, "doer1", Role::Doer).await;
    let missing = new_id();

    assert_matches!(
        market
            .reviews
            .create_review(&doer, review(4, Some(missing)))
            .await,
        Err(CoreError::NotFound { entity: "Job", id }) if id == missing
    );
}

#[tokio::test]
async fn listing_filters_by_job_and_pages_newest_first() {
    let market = marketplace();
    let poster = actor(&market, "poster1", Role::Poster).await;
    let doer = actor(&market, "doer1", Role::Doer).await;
    let job = post_job(&market, &poster, "Lab Assistant", 25).await;
    let other = post_job(&market, &poster, "Event Setup", 10).await;

    for rating in [1, 2, 3] {
        market
            .reviews
            .create_review(&doer, review(rating, Some(job.id)))
            .await
            .unwrap();
    }
    market
        .reviews
        .create_review(&doer, review(5, Some(other.id)))
        .await
        .unwrap();

    let for_job = market
        .reviews
        .list_reviews(&ReviewFilter {
            job_id: Some(job.id),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(for_job.len(), 3);
    assert!(for_job.iter().all(|r| r.job_id == Some(job.id)));
    assert!(for_job
        .windows(2)
        .all(|w| (w[0].created_at, w[0].id) > (w[1].created_at, w[1].id)));

    let all = market
        .reviews
        .list_reviews(&ReviewFilter::default())
        .await
        .unwrap();
    assert_eq!(all.len(), 4);

    let page = market
        .reviews
        .list_reviews(&ReviewFilter {
            job_id: None,
            limit: Some(2),
            offset: Some(1),
        })
        .await
        .unwrap();
    assert_eq!(page, all[1..3].to_vec());
}

#[tokio::test]
async fn reviews_outlive_their_job() {
    let market = marketplace();
    let poster = actor(&market, "poster1", Role::Poster).await;
    let doer = actor(&market, "doer1", Role::Doer).await;
    let job = post_job(&market, &poster, "Poster Run", 12).await;

    market
        .reviews
        .create_review(&doer, review(4, Some(job.id)))
        .await
        .unwrap();
    market.jobs.delete_job(&poster, job.id).await.unwrap();

    let kept = market
        .reviews
        .list_reviews(&ReviewFilter {
            job_id: Some(job.id),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(kept.len(), 1);
}
