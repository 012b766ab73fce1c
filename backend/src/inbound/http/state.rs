//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` and only ever see domain ports,
//! so they can be exercised against in-memory or mocked adapters.

use std::sync::Arc;

use crate::domain::ports::MovieRepository;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub movies: Arc<dyn MovieRepository>,
    /// Deployment environment reported by the healthcheck.
    pub environment: String,
    /// Application version reported by the healthcheck.
    pub version: String,
}

impl HttpState {
    /// Bundle the movie port with the running environment's name.
    ///
    /// The version is taken from the crate manifest.
    pub fn new(movies: Arc<dyn MovieRepository>, environment: impl Into<String>) -> Self {
        Self {
            movies,
            environment: environment.into(),
            version: env!("CARGO_PKG_VERSION").to_owned(),
        }
    }
}
