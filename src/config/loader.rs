use super::error::ConfigError;
use super::{AppConfig, KarbonConfig};
use crate::constants::{
    ACCESS_KEY_VAR, BEARER_TOKEN_VAR, CONFIG_PATH, DEFAULT_BASE_URL, DEFAULT_REST_ADDR,
    DEFAULT_TIMEOUT_SECS, ENV_PATH,
};
use dotenvy::from_filename;
use serde::Deserialize;
use std::fs;
use std::io;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Once;
use std::time::Duration;
use tracing::debug;

static ENV_LOADER: Once = Once::new();

/// Raw configuration structure for deserialization from TOML
#[derive(Debug, Deserialize, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct RawConfig {
    #[serde(default)]
    pub karbon: RawKarbon,
    #[serde(default)]
    pub server: RawServer,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct RawKarbon {
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct RawServer {
    pub rest_addr: Option<String>,
}

/// Ensures environment variables are loaded from config/.env
pub fn ensure_env_loaded() {
    ENV_LOADER.call_once(|| {
        let _ = from_filename(ENV_PATH);
    });
}

/// Load and validate configuration from a file path
///
/// The default file is optional; an explicitly requested one must exist.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    ensure_env_loaded();
    let raw = match path {
        Some(path) => read_config(path)?,
        None => match read_config(Path::new(CONFIG_PATH)) {
            Err(ConfigError::NotFound { .. }) => {
                debug!(path = CONFIG_PATH, "No configuration file; using defaults");
                RawConfig::default()
            }
            other => other?,
        },
    };
    validate_and_build(raw, |name| std::env::var(name).ok())
}

fn read_config(path: &Path) -> Result<RawConfig, ConfigError> {
    debug!(path = %path.display(), "Reading server configuration file");

    let content = fs::read_to_string(path).map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            ConfigError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

pub(super) fn validate_and_build<F>(raw: RawConfig, env: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let bearer_token = credential(&env, BEARER_TOKEN_VAR)?;
    let access_key = credential(&env, ACCESS_KEY_VAR)?;

    let base_url = raw
        .karbon
        .base_url
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
    if base_url.trim().is_empty() {
        return Err(ConfigError::InvalidValue {
            field: "karbon.base_url",
            reason: "must not be empty".to_string(),
        });
    }

    let timeout_secs = raw.karbon.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS);
    if timeout_secs == 0 {
        return Err(ConfigError::InvalidValue {
            field: "karbon.timeout_secs",
            reason: "must be greater than zero".to_string(),
        });
    }

    let rest_addr = raw
        .server
        .rest_addr
        .as_deref()
        .unwrap_or(DEFAULT_REST_ADDR)
        .parse::<SocketAddr>()
        .map_err(|err| ConfigError::InvalidValue {
            field: "server.rest_addr",
            reason: err.to_string(),
        })?;

    Ok(AppConfig {
        karbon: KarbonConfig {
            base_url,
            bearer_token,
            access_key,
            timeout: Duration::from_secs(timeout_secs),
        },
        rest_addr,
    })
}

fn credential<F>(env: &F, var: &'static str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    env(var)
        .filter(|value| !value.trim().is_empty())
        .ok_or(ConfigError::MissingCredential { var })
}
