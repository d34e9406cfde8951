use crate::application::tooling::{KarbonTools, KarbonTransport};
use crate::infrastructure::rpc::{RpcRequest, RpcResponse, handle_rpc};
use thiserror::Error;
use tokio::io::{self, AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum StdioError {
    #[error("stdin/stdout I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to serialize stdio response: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Runs the line-delimited JSON-RPC loop on the process stdin/stdout.
pub async fn run<T>(tools: KarbonTools<T>) -> Result<(), StdioError>
where
    T: KarbonTransport + 'static,
{
    info!("Karbon MCP server running on stdio");
    serve(&tools, BufReader::new(io::stdin()), io::stdout()).await
}

/// Reads one JSON-RPC message per line and writes one response per line.
/// Requests are handled in arrival order; notifications produce no output.
/// Lines that are not valid UTF-8 are decoded lossily and answered with a
/// parse error instead of ending the loop.
pub async fn serve<T, R, W>(
    tools: &KarbonTools<T>,
    mut reader: R,
    mut writer: W,
) -> Result<(), StdioError>
where
    T: KarbonTransport,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut buffer = Vec::new();

    loop {
        buffer.clear();
        if reader.read_until(b'\n', &mut buffer).await? == 0 {
            break;
        }
        let line = String::from_utf8_lossy(&buffer);
        if line.trim().is_empty() {
            continue;
        }
        debug!("Received STDIO line");

        let response = match RpcRequest::parse(&line) {
            Ok(request) => handle_rpc(tools, request).await,
            Err(response) => Some(response),
        };

        if let Some(response) = response {
            write_response(&mut writer, &response).await?;
        }
    }

    writer.flush().await?;
    debug!("STDIO input closed");
    Ok(())
}

async fn write_response<W>(writer: &mut W, response: &RpcResponse) -> Result<(), StdioError>
where
    W: AsyncWrite + Unpin,
{
    let mut payload = serde_json::to_vec(response)?;
    payload.push(b'\n');
    writer.write_all(&payload).await?;
    writer.flush().await?;
    Ok(())
}
