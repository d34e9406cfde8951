mod error;
mod router;
mod state;

pub use error::ServerError;
pub use router::router;

use crate::application::tooling::{KarbonTools, KarbonTransport};
use std::future::Future;
use std::net::SocketAddr;

/// Serves the JSON-RPC endpoint over HTTP until `shutdown` resolves.
pub async fn serve<T, F>(
    tools: KarbonTools<T>,
    addr: SocketAddr,
    shutdown: F,
) -> Result<(), ServerError>
where
    T: KarbonTransport + 'static,
    F: Future<Output = ()> + Send + 'static,
{
    router::serve(tools, addr, shutdown).await
}
