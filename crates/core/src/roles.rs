//! Account roles.
//!
//! The literals must match the `accounts.role` CHECK constraint in
//! `20260301000001_create_accounts.sql`.

use crate::text_enum::define_text_enum;

define_text_enum! {
    /// The role carried by every account. Consumed only by [`crate::authz`].
    Role("role") {
        /// Creates job listings and manages applications to them.
        Poster = "poster",
        /// Applies to jobs and performs the work.
        Doer = "doer",
        /// Unrestricted authorization over all entities.
        Admin = "admin",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_literal() {
        for role in Role::ALL {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), *role);
        }
    }

    #[test]
    fn unknown_role_is_a_validation_error() {
        let err = "superuser".parse::<Role>().unwrap_err();
        assert!(err.to_string().contains("Invalid role 'superuser'"));
        assert!("Admin".parse::<Role>().is_err(), "parsing is case-sensitive");
    }

    #[test]
    fn serializes_as_lowercase_literal() {
        assert_eq!(serde_json::to_string(&Role::Doer).unwrap(), "\"doer\"");
        let parsed: Role = serde_json::from_str("\"poster\"").unwrap();
        assert_eq!(parsed, Role::Poster);
    }
}
