//! Domain core for the campus micro-job marketplace.
//!
//! This crate has zero internal dependencies. It owns the record types, the
//! job and application state machines, the authorization gate, and the
//! domain components that sit on top of the storage traits:
//!
//! - [`directory::AccountDirectory`] -- accounts and roles.
//! - [`registry::JobRegistry`] -- job postings and their status.
//! - [`ledger::ApplicationLedger`] -- applications and their status.
//! - [`earnings::EarningsAggregator`] -- completed-work totals per doer.
//! - [`board::ReviewBoard`] -- ratings and comments left by accounts.
//!
//! [`marketplace::Marketplace`] bundles them all over a single [`store::Store`].

mod text_enum;

pub mod account;
pub mod application;
pub mod authz;
pub mod board;
pub mod directory;
pub mod earnings;
pub mod error;
pub mod job;
pub mod ledger;
pub mod marketplace;
pub mod memory;
pub mod registry;
pub mod review;
pub mod roles;
pub mod slug;
pub mod store;
pub mod types;
