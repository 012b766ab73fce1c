//! Persistence adapters for the movie repository port.

mod in_memory_movie_repository;

pub use in_memory_movie_repository::InMemoryMovieRepository;
