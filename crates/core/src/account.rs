//! Account records and sign-up input.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::roles::Role;
use crate::types::{DbId, Timestamp};

/// Public account representation. The password hash never lives here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: DbId,
    pub username: String,
    pub email: String,
    pub role: Role,
    pub department: Option<String>,
    pub created_at: Timestamp,
}

/// Applicant details embedded in a job's application listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountSummary {
    pub id: DbId,
    pub username: String,
    pub email: String,
    pub department: Option<String>,
}

impl From<&Account> for AccountSummary {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id,
            username: account.username.clone(),
            email: account.email.clone(),
            department: account.department.clone(),
        }
    }
}

/// An account together with its stored PHC password hash. Used only by login.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub account: Account,
    pub password_hash: String,
}

/// Admin listing filter: an optional role plus caller-supplied paging.
#[derive(Debug, Clone, Copy, Default)]
pub struct AccountFilter {
    pub role: Option<Role>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Validated sign-up fields. The password is hashed at the HTTP boundary and
/// passed to the store separately.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateAccount {
    #[validate(length(min = 3, max = 50, message = "username must be 3-50 characters"))]
    pub username: String,
    #[validate(
        email(message = "email must be a valid address"),
        length(max = 100, message = "email must be at most 100 characters")
    )]
    pub email: String,
    pub role: Role,
    #[validate(length(max = 50, message = "department must be at most 50 characters"))]
    pub department: Option<String>,
}
