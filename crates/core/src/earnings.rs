//! Completed-work totals per doer.

use std::collections::HashSet;
use std::sync::Arc;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::authz::{evaluate, Action, Actor, Resource};
use crate::error::CoreError;
use crate::job::RewardType;
use crate::store::{CompletedWork, Store};
use crate::types::DbId;

/// A doer's totals over their completed applications.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Earnings {
    #[serde(with = "rust_decimal::serde::float")]
    pub total_cash: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_credits: Decimal,
    pub total_completed_jobs: i64,
}

/// Fold completed work into totals.
///
/// Returns the totals plus the ids of completed applications whose job no
/// longer exists; those count as completed jobs but add no reward.
pub fn fold_earnings(work: &[CompletedWork]) -> (Earnings, Vec<DbId>) {
    let mut earnings = Earnings::default();
    let mut seen = HashSet::new();
    let mut orphans = Vec::new();

    for item in work {
        if !seen.insert(item.application_id) {
            continue;
        }
        earnings.total_completed_jobs += 1;

        match (item.reward, item.reward_type) {
            (Some(reward), Some(RewardType::Cash)) => earnings.total_cash += reward,
            (Some(reward), Some(RewardType::Credits)) => earnings.total_credits += reward,
            _ => orphans.push(item.application_id),
        }
    }

    (earnings, orphans)
}

#[derive(Clone)]
pub struct EarningsAggregator {
    store: Arc<dyn Store>,
}

impl EarningsAggregator {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Totals for `doer_id`. Read-only.
    pub async fn compute_earnings(&self, doer_id: DbId) -> Result<Earnings, CoreError> {
        let work = self.store.completed_work(doer_id).await?;
        let (earnings, orphans) = fold_earnings(&work);

        for application_id in &orphans {
            tracing::warn!(
                %application_id,
                doer_id = %doer_id,
                "Completed application references a deleted job; reward not counted",
            );
        }
        Ok(earnings)
    }

    /// Totals for `account_id` as seen by `actor`: their own, or anyone's for
    /// an admin.
    pub async fn earnings_for(
        &self,
        actor: &Actor,
        account_id: DbId,
    ) -> Result<Earnings, CoreError> {
        evaluate(actor, Action::ViewEarnings, &Resource::Account(account_id))
            .into_result(Action::ViewEarnings)?;
        if self.store.find_account(account_id).await?.is_none() {
            return Err(CoreError::NotFound {
                entity: "Account",
                id: account_id,
            });
        }
        self.compute_earnings(account_id).await
    }
}
