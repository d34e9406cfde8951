use clap::Parser;
use karbon_mcp_server::{Cli, run};
use std::error::Error;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    run(cli).await
}
