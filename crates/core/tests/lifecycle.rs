//! End-to-end job and application lifecycles against the in-memory store.

mod common;

use assert_matches::assert_matches;
use common::{actor, job_input, marketplace, post_job};
use dayjob_core::application::ApplicationStatus;
use dayjob_core::error::CoreError;
use dayjob_core::job::{JobFilter, JobStatus, RewardType, UpdateJob};
use dayjob_core::roles::Role;
use rust_decimal::Decimal;

// ---------------------------------------------------------------------------
// Full lifecycle
// ---------------------------------------------------------------------------

/// Poster posts, doer applies, poster accepts, job moves to completed and the
/// accepted application is completed with it. Earnings reflect the reward.
#[tokio::test]
async fn posting_to_payout() {
    let market = marketplace();
    let poster = actor(&market, "poster1", Role::Poster).await;
    let doer = actor(&market, "doer1", Role::Doer).await;

    let job = post_job(&market, &poster, "Help Move Boxes", 50).await;
    assert_eq!(job.status, JobStatus::Open);
    assert_eq!(job.slug, "help-move-boxes");

    let application = market
        .applications
        .create_application(&doer, job.id)
        .await
        .unwrap();
    assert_eq!(application.status, ApplicationStatus::Pending);

    market
        .applications
        .update_status(&poster, application.id, ApplicationStatus::Accepted)
        .await
        .unwrap();
    market
        .jobs
        .update_status(&poster, job.id, JobStatus::InProgress)
        .await
        .unwrap();
    market
        .jobs
        .update_status(&poster, job.id, JobStatus::Completed)
        .await
        .unwrap();

    let after = market
        .applications
        .get_application(&doer, application.id)
        .await
        .unwrap();
    assert_eq!(after.status, ApplicationStatus::Completed);

    let earnings = market.earnings.compute_earnings(doer.id).await.unwrap();
    assert_eq!(earnings.total_cash, Decimal::from(50));
    assert_eq!(earnings.total_credits, Decimal::ZERO);
    assert_eq!(earnings.total_completed_jobs, 1);
}

/// Completing a job leaves pending applications untouched.
#[tokio::test]
async fn completion_cascade_skips_pending() {
    let market = marketplace();
    let poster = actor(&market, "poster1", Role::Poster).await;
    let accepted_doer = actor(&market, "doer1", Role::Doer).await;
    let pending_doer = actor(&market, "doer2", Role::Doer).await;

    let job = post_job(&market, &poster, "Flyers", 20).await;
    let accepted = market
        .applications
        .create_application(&accepted_doer, job.id)
        .await
        .unwrap();
    let pending = market
        .applications
        .create_application(&pending_doer, job.id)
        .await
        .unwrap();
    market
        .applications
        .update_status(&poster, accepted.id, ApplicationStatus::Accepted)
        .await
        .unwrap();

    market
        .jobs
        .update_status(&poster, job.id, JobStatus::Completed)
        .await
        .unwrap();

    let listed = market
        .applications
        .list_for_job(&poster, job.id)
        .await
        .unwrap();
    let status_of = |id| {
        listed
            .iter()
            .find(|a| a.application.id == id)
            .map(|a| a.application.status)
    };
    assert_eq!(status_of(accepted.id), Some(ApplicationStatus::Completed));
    assert_eq!(status_of(pending.id), Some(ApplicationStatus::Pending));
}

// ---------------------------------------------------------------------------
// Rejections
// ---------------------------------------------------------------------------

/// A second application by the same doer is a conflict.
#[tokio::test]
async fn duplicate_application_conflicts() {
    let market = marketplace();
    let poster = actor(&market, "poster1", Role::Poster).await;
    let doer = actor(&market, "doer1", Role::Doer).await;
    let job = post_job(&market, &poster, "Tutor", 30).await;

    market
        .applications
        .create_application(&doer, job.id)
        .await
        .unwrap();
    let second = market.applications.create_application(&doer, job.id).await;
    assert_matches!(second, Err(CoreError::Conflict(_)));
}

/// A rejected application frees the doer to apply again.
#[tokio::test]
async fn reapply_after_rejection() {
    let market = marketplace();
    let poster = actor(&market, "poster1", Role::Poster).await;
    let doer = actor(&market, "doer1", Role::Doer).await;
    let job = post_job(&market, &poster, "Tutor", 30).await;

    let first = market
        .applications
        .create_application(&doer, job.id)
        .await
        .unwrap();
    market
        .applications
        .update_status(&poster, first.id, ApplicationStatus::Rejected)
        .await
        .unwrap();

    let second = market
        .applications
        .create_application(&doer, job.id)
        .await
        .unwrap();
    assert_ne!(first.id, second.id);
}

/// A doer cannot change the status of someone else's job.
#[tokio::test]
async fn doer_cannot_change_job_status() {
    let market = marketplace();
    let poster = actor(&market, "poster1", Role::Poster).await;
    let doer = actor(&market, "doer1", Role::Doer).await;
    let job = post_job(&market, &poster, "Tutor", 30).await;

    let result = market
        .jobs
        .update_status(&doer, job.id, JobStatus::Completed)
        .await;
    assert_matches!(result, Err(CoreError::Forbidden(_)));

    let unchanged = market.jobs.get_job(job.id).await.unwrap();
    assert_eq!(unchanged.status, JobStatus::Open);
}

/// Applying to a job that is no longer open is an invalid state.
#[tokio::test]
async fn applying_to_in_progress_job_fails() {
    let market = marketplace();
    let poster = actor(&market, "poster1", Role::Poster).await;
    let doer = actor(&market, "doer1", Role::Doer).await;
    let job = post_job(&market, &poster, "Tutor", 30).await;
    market
        .jobs
        .update_status(&poster, job.id, JobStatus::InProgress)
        .await
        .unwrap();

    let result = market.applications.create_application(&doer, job.id).await;
    assert_matches!(result, Err(CoreError::InvalidState(_)));
}

#[tokio::test]
async fn posters_cannot_apply_and_doers_cannot_post() {
    let market = marketplace();
    let poster = actor(&market, "poster1", Role::Poster).await;
    let doer = actor(&market, "doer1", Role::Doer).await;
    let job = post_job(&market, &poster, "Tutor", 30).await;

    assert_matches!(
        market.applications.create_application(&poster, job.id).await,
        Err(CoreError::Forbidden(_))
    );
    assert_matches!(
        market
            .jobs
            .create_job(&doer, job_input("Mine", 5, RewardType::Cash))
            .await,
        Err(CoreError::Forbidden(_))
    );
}

#[tokio::test]
async fn job_status_never_moves_backward() {
    let market = marketplace();
    let poster = actor(&market, "poster1", Role::Poster).await;
    let job = post_job(&market, &poster, "Tutor", 30).await;
    market
        .jobs
        .update_status(&poster, job.id, JobStatus::Completed)
        .await
        .unwrap();

    for target in JobStatus::ALL {
        assert_matches!(
            market.jobs.update_status(&poster, job.id, *target).await,
            Err(CoreError::InvalidTransition { .. })
        );
    }
}

#[tokio::test]
async fn application_cannot_complete_before_job() {
    let market = marketplace();
    let poster = actor(&market, "poster1", Role::Poster).await;
    let doer = actor(&market, "doer1", Role::Doer).await;
    let job = post_job(&market, &poster, "Tutor", 30).await;
    let application = market
        .applications
        .create_application(&doer, job.id)
        .await
        .unwrap();
    market
        .applications
        .update_status(&poster, application.id, ApplicationStatus::Accepted)
        .await
        .unwrap();

    assert_matches!(
        market
            .applications
            .update_status(&poster, application.id, ApplicationStatus::Completed)
            .await,
        Err(CoreError::InvalidState(_))
    );
}

/// An application still pending when its job completes is not swept up by the
/// cascade; the poster can accept and then complete it by hand.
#[tokio::test]
async fn pending_application_is_completed_by_hand_after_job() {
    let market = marketplace();
    let poster = actor(&market, "poster1", Role::Poster).await;
    let doer = actor(&market, "doer1", Role::Doer).await;
    let job = post_job(&market, &poster, "Tutor", 30).await;
    let application = market
        .applications
        .create_application(&doer, job.id)
        .await
        .unwrap();

    for status in [JobStatus::InProgress, JobStatus::Completed] {
        market
            .jobs
            .update_status(&poster, job.id, status)
            .await
            .unwrap();
    }
    let untouched = market
        .applications
        .get_application(&doer, application.id)
        .await
        .unwrap();
    assert_eq!(untouched.status, ApplicationStatus::Pending);

    let accepted = market
        .applications
        .update_status(&poster, application.id, ApplicationStatus::Accepted)
        .await
        .unwrap();
    assert_eq!(accepted.status, ApplicationStatus::Accepted);

    let completed = market
        .applications
        .update_status(&poster, application.id, ApplicationStatus::Completed)
        .await
        .unwrap();
    assert_eq!(completed.status, ApplicationStatus::Completed);

    let earnings = market.earnings.compute_earnings(doer.id).await.unwrap();
    assert_eq!(earnings.total_cash, Decimal::from(30));
    assert_eq!(earnings.total_credits, Decimal::ZERO);
    assert_eq!(earnings.total_completed_jobs, 1);
}

// ---------------------------------------------------------------------------
// Work submission
// ---------------------------------------------------------------------------

#[tokio::test]
async fn work_is_accepted_only_while_accepted() {
    let market = marketplace();
    let poster = actor(&market, "poster1", Role::Poster).await;
    let doer = actor(&market, "doer1", Role::Doer).await;
    let job = post_job(&market, &poster, "Report", 30).await;
    let application = market
        .applications
        .create_application(&doer, job.id)
        .await
        .unwrap();

    assert_matches!(
        market
            .applications
            .submit_work(&doer, application.id, "draft")
            .await,
        Err(CoreError::InvalidState(_))
    );

    market
        .applications
        .update_status(&poster, application.id, ApplicationStatus::Accepted)
        .await
        .unwrap();

    assert_matches!(
        market.applications.submit_work(&doer, application.id, "  ").await,
        Err(CoreError::Validation(_))
    );
    assert_matches!(
        market
            .applications
            .submit_work(&poster, application.id, "not mine")
            .await,
        Err(CoreError::Forbidden(_))
    );

    let updated = market
        .applications
        .submit_work(&doer, application.id, "https://drive.example/report")
        .await
        .unwrap();
    assert_eq!(updated.status, ApplicationStatus::Accepted);
    assert_eq!(
        updated.submitted_work.as_deref(),
        Some("https://drive.example/report")
    );
}

// ---------------------------------------------------------------------------
// Registry extras
// ---------------------------------------------------------------------------

#[tokio::test]
async fn colliding_titles_get_numbered_slugs() {
    let market = marketplace();
    let poster = actor(&market, "poster1", Role::Poster).await;

    let first = post_job(&market, &poster, "Library Shift", 10).await;
    let second = post_job(&market, &poster, "Library shift!", 10).await;
    let third = post_job(&market, &poster, "library   shift", 10).await;

    assert_eq!(first.slug, "library-shift");
    assert_eq!(second.slug, "library-shift-2");
    assert_eq!(third.slug, "library-shift-3");

    let found = market.jobs.get_job_by_slug("library-shift-2").await.unwrap();
    assert_eq!(found.id, second.id);
    assert_matches!(
        market.jobs.get_job_by_slug("missing").await,
        Err(CoreError::NotFoundByKey { field: "slug", .. })
    );
}

#[tokio::test]
async fn listing_filters_by_exact_match() {
    let market = marketplace();
    let poster = actor(&market, "poster1", Role::Poster).await;
    let other = actor(&market, "poster2", Role::Poster).await;

    post_job(&market, &poster, "Cash job", 10).await;
    market
        .jobs
        .create_job(&poster, job_input("Credit job", 10, RewardType::Credits))
        .await
        .unwrap();
    post_job(&market, &other, "Other job", 10).await;

    let credits = market
        .jobs
        .list_jobs(&JobFilter {
            reward_type: Some(RewardType::Credits),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(credits.len(), 1);
    assert_eq!(credits[0].title, "Credit job");

    let mine = market.jobs.list_my_jobs(&poster, None).await.unwrap();
    assert_eq!(mine.len(), 2);
    assert!(mine.iter().all(|j| j.posted_by == poster.id));

    let none = market
        .jobs
        .list_jobs(&JobFilter {
            department: Some("library".into()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert!(none.is_empty(), "department match is case-sensitive");
}

#[tokio::test]
async fn completed_jobs_cannot_be_edited() {
    let market = marketplace();
    let poster = actor(&market, "poster1", Role::Poster).await;
    let job = post_job(&market, &poster, "Tutor", 30).await;

    let edited = market
        .jobs
        .update_details(
            &poster,
            job.id,
            UpdateJob {
                reward: Some(Decimal::new(3550, 2)),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(edited.reward, Decimal::new(3550, 2));
    assert_eq!(edited.slug, job.slug);

    market
        .jobs
        .update_status(&poster, job.id, JobStatus::Completed)
        .await
        .unwrap();
    assert_matches!(
        market
            .jobs
            .update_details(&poster, job.id, UpdateJob::default())
            .await,
        Err(CoreError::InvalidState(_))
    );
}

#[tokio::test]
async fn delete_is_blocked_by_outstanding_applications() {
    let market = marketplace();
    let poster = actor(&market, "poster1", Role::Poster).await;
    let doer = actor(&market, "doer1", Role::Doer).await;
    let job = post_job(&market, &poster, "Tutor", 30).await;
    let application = market
        .applications
        .create_application(&doer, job.id)
        .await
        .unwrap();

    assert_matches!(
        market.jobs.delete_job(&poster, job.id).await,
        Err(CoreError::InvalidState(_))
    );

    market
        .applications
        .update_status(&poster, application.id, ApplicationStatus::Rejected)
        .await
        .unwrap();
    market.jobs.delete_job(&poster, job.id).await.unwrap();
    assert_matches!(
        market.jobs.get_job(job.id).await,
        Err(CoreError::NotFound { entity: "Job", .. })
    );
}

#[tokio::test]
async fn admin_overrides_ownership() {
    let market = marketplace();
    let poster = actor(&market, "poster1", Role::Poster).await;
    let admin = actor(&market, "admin1", Role::Admin).await;
    let job = post_job(&market, &poster, "Tutor", 30).await;

    let moved = market
        .jobs
        .update_status(&admin, job.id, JobStatus::InProgress)
        .await
        .unwrap();
    assert_eq!(moved.status, JobStatus::InProgress);
    market.jobs.delete_job(&admin, job.id).await.unwrap();
}

// ---------------------------------------------------------------------------
// Earnings
// ---------------------------------------------------------------------------

#[tokio::test]
async fn earnings_keep_deleted_jobs_in_the_count() {
    let market = marketplace();
    let poster = actor(&market, "poster1", Role::Poster).await;
    let doer = actor(&market, "doer1", Role::Doer).await;

    for (title, reward, reward_type) in [
        ("Cash one", 40, RewardType::Cash),
        ("Credit one", 15, RewardType::Credits),
    ] {
        let job = market
            .jobs
            .create_job(&poster, job_input(title, reward, reward_type))
            .await
            .unwrap();
        let application = market
            .applications
            .create_application(&doer, job.id)
            .await
            .unwrap();
        market
            .applications
            .update_status(&poster, application.id, ApplicationStatus::Accepted)
            .await
            .unwrap();
        market
            .jobs
            .update_status(&poster, job.id, JobStatus::Completed)
            .await
            .unwrap();
    }

    let before = market.earnings.compute_earnings(doer.id).await.unwrap();
    assert_eq!(before.total_cash, Decimal::from(40));
    assert_eq!(before.total_credits, Decimal::from(15));
    assert_eq!(before.total_completed_jobs, 2);
    assert_eq!(
        market.earnings.compute_earnings(doer.id).await.unwrap(),
        before,
        "computation is idempotent"
    );

    let cash_job = market
        .jobs
        .get_job_by_slug("cash-one")
        .await
        .unwrap();
    market.jobs.delete_job(&poster, cash_job.id).await.unwrap();

    let after = market.earnings.compute_earnings(doer.id).await.unwrap();
    assert_eq!(after.total_cash, Decimal::ZERO);
    assert_eq!(after.total_credits, Decimal::from(15));
    assert_eq!(after.total_completed_jobs, 2);
}

#[tokio::test]
async fn earnings_are_private() {
    let market = marketplace();
    let doer = actor(&market, "doer1", Role::Doer).await;
    let other = actor(&market, "doer2", Role::Doer).await;
    let admin = actor(&market, "admin1", Role::Admin).await;

    assert!(market.earnings.earnings_for(&doer, doer.id).await.is_ok());
    assert!(market.earnings.earnings_for(&admin, doer.id).await.is_ok());
    assert_matches!(
        market.earnings.earnings_for(&other, doer.id).await,
        Err(CoreError::Forbidden(_))
    );
}
