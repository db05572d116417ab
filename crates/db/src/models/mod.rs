//! Row types read from and written to PostgreSQL.
//!
//! Status and role columns are `TEXT`; rows hold them as strings and are
//! converted into the typed core records with `TryFrom`. A value outside the
//! closed set is a data-integrity failure and surfaces as
//! [`CoreError::Internal`].

pub mod account;
pub mod application;
pub mod job;
pub mod review;

use std::str::FromStr;

use dayjob_core::error::CoreError;

/// Parse a `TEXT` column into a closed enum.
pub(crate) fn parse_column<T>(table: &str, column: &str, value: &str) -> Result<T, CoreError>
where
    T: FromStr<Err = CoreError>,
{
    value.parse().map_err(|_| {
        CoreError::Internal(format!("Unexpected value '{value}' in {table}.{column}"))
    })
}
