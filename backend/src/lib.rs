//! Movie API library: domain model, HTTP adapter and in-memory persistence.

pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

pub use middleware::Trace;
