//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async operations that
//! accept `&PgPool` as the first argument and return raw rows.

pub mod account_repo;
pub mod application_repo;
pub mod job_repo;
pub mod review_repo;

pub use account_repo::AccountRepo;
pub use application_repo::ApplicationRepo;
pub use job_repo::JobRepo;
pub use review_repo::ReviewRepo;
