pub mod app;
pub mod error;
pub mod loader;

pub use crate::constants::CONFIG_PATH;
pub use app::{AppConfig, KarbonConfig};
pub use error::ConfigError;
pub use loader::{RawConfig, RawKarbon, RawServer, ensure_env_loaded};
