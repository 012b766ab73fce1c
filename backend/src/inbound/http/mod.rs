//! HTTP inbound adapter exposing the JSON API.

pub mod decode;
pub mod envelope;
pub mod error;
pub mod extract;
pub mod health;
pub mod movies;
pub mod routing;
pub mod state;

pub use error::ApiResult;
