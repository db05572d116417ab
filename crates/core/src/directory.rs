//! Accounts, roles and actor resolution.

use std::sync::Arc;

use validator::Validate;

use crate::account::{Account, AccountFilter, CreateAccount, Credentials};
use crate::authz::{evaluate, Action, Actor, Resource};
use crate::error::CoreError;
use crate::roles::Role;
use crate::store::Store;
use crate::types::DbId;

#[derive(Clone)]
pub struct AccountDirectory {
    store: Arc<dyn Store>,
}

impl AccountDirectory {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    fn require_admin(actor: &Actor) -> Result<(), CoreError> {
        evaluate(actor, Action::ManageAccounts, &Resource::None)
            .into_result(Action::ManageAccounts)
    }

    /// Register a poster or doer. Admin accounts cannot be self-created.
    pub async fn sign_up(
        &self,
        input: &CreateAccount,
        password_hash: &str,
    ) -> Result<Account, CoreError> {
        input.validate()?;
        if input.role == Role::Admin {
            return Err(CoreError::Forbidden(
                "Admin accounts cannot be created through sign-up".into(),
            ));
        }

        let account = self.store.insert_account(input, password_hash).await?;
        tracing::info!(account_id = %account.id, role = %account.role, "Account created");
        Ok(account)
    }

    pub async fn get(&self, id: DbId) -> Result<Account, CoreError> {
        self.store
            .find_account(id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "Account",
                id,
            })
    }

    /// Resolve an authenticated subject into an [`Actor`] with its current role.
    pub async fn resolve_actor(&self, id: DbId) -> Result<Actor, CoreError> {
        match self.store.find_account(id).await? {
            Some(account) => Ok(Actor::new(account.id, account.role)),
            None => Err(CoreError::Unauthorized("Account no longer exists".into())),
        }
    }

    pub async fn find_credentials(&self, username: &str) -> Result<Option<Credentials>, CoreError> {
        self.store.find_credentials(username).await
    }

    /// Accounts for the admin listing, paged by the store.
    pub async fn list(
        &self,
        actor: &Actor,
        filter: &AccountFilter,
    ) -> Result<Vec<Account>, CoreError> {
        Self::require_admin(actor)?;
        self.store.list_accounts(filter).await
    }

    pub async fn update_role(
        &self,
        actor: &Actor,
        username: &str,
        role: Role,
    ) -> Result<Account, CoreError> {
        Self::require_admin(actor)?;
        let not_found = || CoreError::NotFoundByKey {
            entity: "Account",
            field: "username",
            value: username.to_string(),
        };

        let account = self
            .store
            .find_account_by_username(username)
            .await?
            .ok_or_else(not_found)?;
        let updated = self
            .store
            .update_account_role(account.id, role)
            .await?
            .ok_or_else(not_found)?;

        tracing::info!(
            account_id = %updated.id,
            from = %account.role,
            to = %role,
            actor_id = %actor.id,
            "Account role updated",
        );
        Ok(updated)
    }

    /// Delete an account. Jobs and applications it authored are kept.
    pub async fn delete(&self, actor: &Actor, id: DbId) -> Result<(), CoreError> {
        Self::require_admin(actor)?;
        if actor.id == id {
            return Err(CoreError::InvalidState(
                "Admins cannot delete their own account".into(),
            ));
        }

        if !self.store.delete_account(id).await? {
            return Err(CoreError::NotFound {
                entity: "Account",
                id,
            });
        }
        tracing::info!(account_id = %id, actor_id = %actor.id, "Account deleted");
        Ok(())
    }
}
