//! Repository Module
//!
//! CRUD operations for the SurrealDB tables.

pub mod check_in;
pub mod client;
pub mod organization;
pub mod organization_user;
pub mod report;
pub mod sale;
pub mod user;

pub use check_in::CheckInRepository;
pub use client::ClientRepository;
pub use organization::OrganizationRepository;
pub use organization_user::OrganizationUserRepository;
pub use report::ReportRepository;
pub use sale::SaleRepository;
pub use user::UserRepository;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

// ID convention: "table:id" strings at the API boundary, surrealdb::RecordId
// everywhere else. Parse with `id.parse::<RecordId>()`.

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }
}

pub(crate) fn parse_id(id: &str) -> RepoResult<surrealdb::RecordId> {
    id.parse()
        .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))
}
