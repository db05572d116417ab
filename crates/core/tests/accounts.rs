//! Account directory: sign-up rules and admin management.

mod common;

use assert_matches::assert_matches;
use common::{actor, marketplace, TEST_HASH};
use dayjob_core::account::{AccountFilter, CreateAccount};
use dayjob_core::error::CoreError;
use dayjob_core::roles::Role;

fn signup(username: &str, role: Role) -> CreateAccount {
    CreateAccount {
        username: username.to_string(),
        email: format!("{username}@campus.edu"),
        role,
        department: None,
    }
}

#[tokio::test]
async fn duplicate_username_or_email_conflicts() {
    let market = marketplace();
    market
        .accounts
        .sign_up(&signup("alice", Role::Doer), TEST_HASH)
        .await
        .unwrap();

    assert_matches!(
        market
            .accounts
            .sign_up(&signup("alice", Role::Poster), TEST_HASH)
            .await,
        Err(CoreError::Conflict(_))
    );

    let mut same_email = signup("alice2", Role::Doer);
    same_email.email = "alice@campus.edu".into();
    assert_matches!(
        market.accounts.sign_up(&same_email, TEST_HASH).await,
        Err(CoreError::Conflict(_))
    );
}

#[tokio::test]
async fn admin_cannot_self_register() {
    let market = marketplace();
    assert_matches!(
        market
            .accounts
            .sign_up(&signup("root", Role::Admin), TEST_HASH)
            .await,
        Err(CoreError::Forbidden(_))
    );
}

#[tokio::test]
async fn invalid_signup_is_a_validation_error() {
    let market = marketplace();
    assert_matches!(
        market
            .accounts
            .sign_up(&signup("ab", Role::Doer), TEST_HASH)
            .await,
        Err(CoreError::Validation(_))
    );
}

#[tokio::test]
async fn role_changes_are_admin_only_and_take_effect() {
    let market = marketplace();
    let admin = actor(&market, "admin1", Role::Admin).await;
    let doer = actor(&market, "doer1", Role::Doer).await;

    assert_matches!(
        market
            .accounts
            .update_role(&doer, "doer1", Role::Admin)
            .await,
        Err(CoreError::Forbidden(_))
    );

    let updated = market
        .accounts
        .update_role(&admin, "doer1", Role::Poster)
        .await
        .unwrap();
    assert_eq!(updated.role, Role::Poster);

    let resolved = market.accounts.resolve_actor(doer.id).await.unwrap();
    assert_eq!(resolved.role, Role::Poster);

    assert_matches!(
        market
            .accounts
            .update_role(&admin, "nobody", Role::Doer)
            .await,
        Err(CoreError::NotFoundByKey { field: "username", .. })
    );
}

#[tokio::test]
async fn listing_filters_by_role() {
    let market = marketplace();
    let admin = actor(&market, "admin1", Role::Admin).await;
    actor(&market, "doer1", Role::Doer).await;
    actor(&market, "doer2", Role::Doer).await;
    actor(&market, "poster1", Role::Poster).await;

    let doers = market
        .accounts
        .list(
            &admin,
            &AccountFilter {
                role: Some(Role::Doer),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(doers.len(), 2);
    assert!(doers.iter().all(|a| a.role == Role::Doer));

    let everyone = market
        .accounts
        .list(&admin, &AccountFilter::default())
        .await
        .unwrap();
    assert_eq!(everyone.len(), 4);
}

#[tokio::test]
async fn listing_pages_newest_first() {
    let market = marketplace();
    let admin = actor(&market, "admin1", Role::Admin).await;
    for name in ["doer1", "doer2", "doer3", "doer4"] {
        actor(&market, name, Role::Doer).await;
    }

    let everyone = market
        .accounts
        .list(&admin, &AccountFilter::default())
        .await
        .unwrap();
    assert_eq!(everyone.len(), 5);

    let page = market
        .accounts
        .list(
            &admin,
            &AccountFilter {
                role: None,
                limit: Some(2),
                offset: Some(1),
            },
        )
        .await
        .unwrap();
    assert_eq!(page, everyone[1..3].to_vec());

    let past_end = market
        .accounts
        .list(
            &admin,
            &AccountFilter {
                offset: Some(10),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert!(past_end.is_empty());
}

#[tokio::test]
async fn listing_requires_admin() {
    let market = marketplace();
    let poster = actor(&market, "poster1", Role::Poster).await;
    assert_matches!(
        market.accounts.list(&poster, &AccountFilter::default()).await,
        Err(CoreError::Forbidden(_))
    );
}

#[tokio::test]
async fn deleted_accounts_stop_resolving() {
    let market = marketplace();
    let admin = actor(&market, "admin1", Role::Admin).await;
    let doer = actor(&market, "doer1", Role::Doer).await;

    assert_matches!(
        market.accounts.delete(&admin, admin.id).await,
        Err(CoreError::InvalidState(_))
    );

    market.accounts.delete(&admin, doer.id).await.unwrap();
    assert_matches!(
        market.accounts.resolve_actor(doer.id).await,
        Err(CoreError::Unauthorized(_))
    );
    assert_matches!(
        market.accounts.delete(&admin, doer.id).await,
        Err(CoreError::NotFound { .. })
    );
}

/// Applications by a deleted doer remain listed with no applicant summary.
#[tokio::test]
async fn applications_outlive_their_applicant() {
    let market = marketplace();
    let admin = actor(&market, "admin1", Role::Admin).await;
    let poster = actor(&market, "poster1", Role::Poster).await;
    let doer = actor(&market, "doer1", Role::Doer).await;
    let job = common::post_job(&market, &poster, "Tutor", 30).await;
    market
        .applications
        .create_application(&doer, job.id)
        .await
        .unwrap();

    market.accounts.delete(&admin, doer.id).await.unwrap();

    let listed = market
        .applications
        .list_for_job(&poster, job.id)
        .await
        .unwrap();
    assert_eq!(listed.len(), 1);
    assert!(listed[0].applicant.is_none());
}
