//! Server settings loaded via OrthoConfig.

use std::fmt;
use std::net::{Ipv4Addr, SocketAddr};
use std::str::FromStr;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;

const DEFAULT_PORT: u16 = 4000;

/// Deployment environment the server reports on its healthcheck.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Staging => "staging",
            Self::Production => "production",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An environment name outside `development|staging|production`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown environment {0:?} (expected development, staging or production)")]
pub struct UnknownEnvironment(String);

impl FromStr for Environment {
    type Err = UnknownEnvironment;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "development" => Ok(Self::Development),
            "staging" => Ok(Self::Staging),
            "production" => Ok(Self::Production),
            other => Err(UnknownEnvironment(other.to_owned())),
        }
    }
}

/// Listener and environment settings, layered from CLI flags,
/// `GREENLIGHT_*` environment variables and defaults.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "GREENLIGHT")]
pub struct ServerSettings {
    /// TCP port to listen on.
    pub port: Option<u16>,
    /// Deployment environment name.
    pub env: Option<String>,
}

impl ServerSettings {
    /// Return the configured port, falling back to the default.
    pub fn port(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }

    /// Address the listener binds to.
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::from((Ipv4Addr::UNSPECIFIED, self.port()))
    }

    /// Parse the configured environment, defaulting to development.
    pub fn environment(&self) -> Result<Environment, UnknownEnvironment> {
        self.env
            .as_deref()
            .map_or(Ok(Environment::default()), Environment::from_str)
    }
}
