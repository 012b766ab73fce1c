//! Port for movie persistence.

use async_trait::async_trait;

use crate::domain::{Movie, MovieDraft};

use super::define_port_error;

define_port_error! {
    /// Errors raised by movie repository adapters.
    pub enum MovieRepositoryError {
        /// No record exists for the requested id.
        NotFound => "record not found",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "movie repository query failed: {message}",
    }
}

/// Port for storing and reading movie records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MovieRepository: Send + Sync {
    /// Persist a new record, assigning its id, creation time and version.
    async fn insert(&self, draft: MovieDraft) -> Result<Movie, MovieRepositoryError>;

    /// Fetch the record with `id`.
    async fn get(&self, id: i64) -> Result<Movie, MovieRepositoryError>;

    /// Replace the stored record with `movie`, returning it with its new version.
    async fn update(&self, movie: Movie) -> Result<Movie, MovieRepositoryError>;

    /// Remove the record with `id`.
    async fn delete(&self, id: i64) -> Result<(), MovieRepositoryError>;
}
