//! Application constants
//!
//! Single source of truth for paths, endpoints and protocol identifiers.

/// Default configuration file path
pub const CONFIG_PATH: &str = "config/server.toml";

/// Default environment file path
pub const ENV_PATH: &str = "config/.env";

/// Karbon API v3 root
pub const DEFAULT_BASE_URL: &str = "https://api.karbonhq.com/v3";

/// Per-request timeout against the Karbon API
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Listen address for `--mode rest`
pub const DEFAULT_REST_ADDR: &str = "127.0.0.1:8080";

pub const BEARER_TOKEN_VAR: &str = "KARBON_BEARER_TOKEN";
pub const ACCESS_KEY_VAR: &str = "KARBON_ACCESS_KEY";

/// Name reported in the MCP `initialize` handshake
pub const SERVER_NAME: &str = "karbon-server";

/// Protocol revision offered when the client does not ask for one
pub const DEFAULT_PROTOCOL_VERSION: &str = "2024-11-05";
