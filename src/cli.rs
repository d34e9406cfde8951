use std::net::SocketAddr;

use clap::{Parser, ValueEnum};

#[derive(Parser, Debug)]
#[command(
    name = "karbon-mcp",
    version,
    about = "Read-only MCP gateway to the Karbon practice-management API"
)]
pub struct Cli {
    /// Configuration file path (defaults to config/server.toml when present)
    #[arg(long, short)]
    pub config: Option<String>,
    #[arg(long, short, value_enum, default_value_t = RunMode::Stdio)]
    pub mode: RunMode,
    /// Overrides `server.rest_addr` from the configuration file
    #[arg(long)]
    pub rest_addr: Option<SocketAddr>,
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum RunMode {
    /// JSON-RPC over stdin/stdout
    Stdio,
    /// JSON-RPC over HTTP (`POST /rpc`)
    Rest,
}
