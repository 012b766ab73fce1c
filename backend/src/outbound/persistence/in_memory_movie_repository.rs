//! In-process `MovieRepository` implementation.
//!
//! Records live in a map guarded by an async lock; ids are assigned
//! sequentially from 1 and never reused.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::domain::ports::{MovieRepository, MovieRepositoryError};
use crate::domain::{Movie, MovieDraft};

#[derive(Debug, Default)]
struct Store {
    next_id: i64,
    movies: BTreeMap<i64, Movie>,
}

/// Map-backed implementation of the movie repository port.
#[derive(Debug, Default)]
pub struct InMemoryMovieRepository {
    store: RwLock<Store>,
}

impl InMemoryMovieRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MovieRepository for InMemoryMovieRepository {
    async fn insert(&self, draft: MovieDraft) -> Result<Movie, MovieRepositoryError> {
        let mut store = self.store.write().await;
        let id = store
            .next_id
            .checked_add(1)
            .ok_or_else(|| MovieRepositoryError::query("movie id space exhausted"))?;
        store.next_id = id;
        let movie = Movie::from_draft(id, Utc::now(), draft);
        store.movies.insert(id, movie.clone());
        Ok(movie)
    }

    async fn get(&self, id: i64) -> Result<Movie, MovieRepositoryError> {
        self.store
            .read()
            .await
            .movies
            .get(&id)
            .cloned()
            .ok_or_else(MovieRepositoryError::not_found)
    }

    async fn update(&self, mut movie: Movie) -> Result<Movie, MovieRepositoryError> {
        let mut store = self.store.write().await;
        let stored = store
            .movies
            .get_mut(&movie.id)
            .ok_or_else(MovieRepositoryError::not_found)?;
        movie.created_at = stored.created_at;
        movie.version = stored
            .version
            .checked_add(1)
            .ok_or_else(|| MovieRepositoryError::query("movie version overflow"))?;
        *stored = movie.clone();
        Ok(movie)
    }

    async fn delete(&self, id: i64) -> Result<(), MovieRepositoryError> {
        self.store
            .write()
            .await
            .movies
            .remove(&id)
            .map(|_| ())
            .ok_or_else(MovieRepositoryError::not_found)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for the in-memory adapter.

    use rstest::{fixture, rstest};

    use super::*;
    use crate::domain::Runtime;

    #[fixture]
    fn draft() -> MovieDraft {
        MovieDraft {
            title: "Casablanca".to_owned(),
            year: 1942,
            runtime: Runtime::new(102),
            genres: vec!["drama".to_owned(), "romance".to_owned()],
        }
    }

    #[rstest]
    #[tokio::test]
    async fn insert_assigns_sequential_ids(draft: MovieDraft) {
        let repo = InMemoryMovieRepository::new();
        let first = repo.insert(draft.clone()).await.expect("insert succeeds");
        let second = repo.insert(draft).await.expect("insert succeeds");
        assert_eq!((first.id, second.id), (1, 2));
        assert_eq!(first.version, 1);
    }

    #[rstest]
    #[tokio::test]
    async fn get_missing_is_not_found() {
        let repo = InMemoryMovieRepository::new();
        assert_eq!(repo.get(7).await, Err(MovieRepositoryError::NotFound));
    }

    #[rstest]
    #[tokio::test]
    async fn update_bumps_version_and_keeps_created_at(draft: MovieDraft) {
        let repo = InMemoryMovieRepository::new();
        let mut movie = repo.insert(draft).await.expect("insert succeeds");
        let created_at = movie.created_at;
        movie.title = "Casablanca (restored)".to_owned();
        movie.created_at = Utc::now();

        let updated = repo.update(movie).await.expect("update succeeds");
        assert_eq!(updated.version, 2);
        assert_eq!(updated.created_at, created_at);
        assert_eq!(
            repo.get(updated.id).await.expect("stored").title,
            "Casablanca (restored)"
        );
    }

    #[rstest]
    #[tokio::test]
    async fn update_missing_is_not_found(draft: MovieDraft) {
        let repo = InMemoryMovieRepository::new();
        let ghost = Movie::from_draft(9, Utc::now(), draft);
        assert_eq!(repo.update(ghost).await, Err(MovieRepositoryError::NotFound));
    }

    #[rstest]
    #[tokio::test]
    async fn delete_removes_record_once(draft: MovieDraft) {
        let repo = InMemoryMovieRepository::new();
        let movie = repo.insert(draft).await.expect("insert succeeds");
        assert_eq!(repo.delete(movie.id).await, Ok(()));
        assert_eq!(repo.delete(movie.id).await, Err(MovieRepositoryError::NotFound));
    }
}
