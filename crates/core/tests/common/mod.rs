//! Shared fixtures for the marketplace integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use dayjob_core::account::CreateAccount;
use dayjob_core::authz::Actor;
use dayjob_core::job::{CreateJob, Job, RewardType};
use dayjob_core::marketplace::Marketplace;
use dayjob_core::memory::InMemoryStore;
use dayjob_core::roles::Role;
use rust_decimal::Decimal;

pub const TEST_HASH: &str = "$argon2id$v=19$m=19456,t=2,p=1$c2FsdHNhbHQ$aGFzaGhhc2g";

pub fn marketplace() -> Marketplace {
    Marketplace::new(Arc::new(InMemoryStore::new()))
}

/// Create an account with the given role and return it as an actor.
///
/// Admins cannot sign up, so they are created as posters and promoted by a
/// bootstrap admin actor.
pub async fn actor(market: &Marketplace, username: &str, role: Role) -> Actor {
    let signup_role = if role == Role::Admin { Role::Poster } else { role };
    let account = market
        .accounts
        .sign_up(
            &CreateAccount {
                username: username.to_string(),
                email: format!("{username}@campus.edu"),
                role: signup_role,
                department: Some("Computer Science".into()),
            },
            TEST_HASH,
        )
        .await
        .expect("sign up should succeed");

    if role == Role::Admin {
        let bootstrap = Actor::new(uuid::Uuid::nil(), Role::Admin);
        market
            .accounts
            .update_role(&bootstrap, username, Role::Admin)
            .await
            .expect("promotion should succeed");
    }
    Actor::new(account.id, role)
}

pub fn job_input(title: &str, reward: i64, reward_type: RewardType) -> CreateJob {
    CreateJob {
        title: title.to_string(),
        description: format!("{title} for the department"),
        reward: Decimal::from(reward),
        reward_type,
        department: Some("Library".into()),
        estimated_time: Some("2 hours".into()),
        skills_required: vec!["teamwork".into()],
        is_featured: false,
        image_url: None,
    }
}

pub async fn post_job(market: &Marketplace, poster: &Actor, title: &str, reward: i64) -> Job {
    market
        .jobs
        .create_job(poster, job_input(title, reward, RewardType::Cash))
        .await
        .expect("job creation should succeed")
}
