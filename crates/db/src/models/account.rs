//! Account rows from the `accounts` table.

use dayjob_core::account::{Account, Credentials};
use dayjob_core::error::CoreError;
use dayjob_core::types::{DbId, Timestamp};
use sqlx::FromRow;

use super::parse_column;

/// Full row from the `accounts` table.
///
/// Contains the password hash -- convert to [`Account`] before it leaves the
/// storage layer.
#[derive(Debug, Clone, FromRow)]
pub struct AccountRow {
    pub id: DbId,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub department: Option<String>,
    pub created_at: Timestamp,
}

impl TryFrom<AccountRow> for Account {
    type Error = CoreError;

    fn try_from(row: AccountRow) -> Result<Self, Self::Error> {
        Ok(Account {
            id: row.id,
            role: parse_column("accounts", "role", &row.role)?,
            username: row.username,
            email: row.email,
            department: row.department,
            created_at: row.created_at,
        })
    }
}

impl TryFrom<AccountRow> for Credentials {
    type Error = CoreError;

    fn try_from(mut row: AccountRow) -> Result<Self, Self::Error> {
        let password_hash = std::mem::take(&mut row.password_hash);
        Ok(Credentials {
            account: Account::try_from(row)?,
            password_hash,
        })
    }
}
