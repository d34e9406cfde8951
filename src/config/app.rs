use super::error::ConfigError;
use super::loader::RawConfig;
use std::fmt;
use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

/// Connection settings for the Karbon API. Built once at startup and shared
/// read-only for the lifetime of the process.
#[derive(Clone, PartialEq, Eq)]
pub struct KarbonConfig {
    pub base_url: String,
    pub bearer_token: String,
    pub access_key: String,
    pub timeout: Duration,
}

impl fmt::Debug for KarbonConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KarbonConfig")
            .field("base_url", &self.base_url)
            .field("bearer_token", &"<redacted>")
            .field("access_key", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Application configuration: optional `server.toml` plus credentials from
/// the environment.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub karbon: KarbonConfig,
    pub rest_addr: SocketAddr,
}

impl AppConfig {
    /// Load configuration from a file path (or default path if None)
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        super::loader::load_config(path)
    }

    /// Builds the configuration from an already-parsed file and an environment
    /// lookup, without touching the process environment.
    pub fn from_parts<F>(raw: RawConfig, env: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        super::loader::validate_and_build(raw, env)
    }
}
