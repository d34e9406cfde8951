use super::error::ServerError;
use super::state::ServerState;
use crate::application::tooling::{KarbonTools, KarbonTransport};
use crate::infrastructure::rpc::{RpcRequest, RpcResponse, handle_rpc};
use axum::Json;
use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

/// Builds the REST router: `POST /rpc` for JSON-RPC and `GET /health`.
pub fn router<T>(tools: KarbonTools<T>) -> Router
where
    T: KarbonTransport + 'static,
{
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_handler))
        .route("/rpc", post(rpc_handler::<T>))
        .layer(cors)
        .with_state(Arc::new(ServerState::new(tools)))
}

pub(super) async fn serve<T, F>(
    tools: KarbonTools<T>,
    addr: SocketAddr,
    shutdown: F,
) -> Result<(), ServerError>
where
    T: KarbonTransport + 'static,
    F: Future<Output = ()> + Send + 'static,
{
    info!(%addr, "Binding REST server");
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind { addr, source })?;
    info!(%addr, "REST server ready to accept connections");

    axum::serve(listener, router(tools).into_make_service())
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(ServerError::Serve)
}

async fn health_handler() -> &'static str {
    "ok"
}

async fn rpc_handler<T>(
    State(state): State<Arc<ServerState<T>>>,
    body: String,
) -> Response
where
    T: KarbonTransport + 'static,
{
    let request = match RpcRequest::parse(&body) {
        Ok(request) => request,
        Err(response) => return Json(response).into_response(),
    };

    match handle_rpc(state.tools(), request).await {
        Some(response) => Json::<RpcResponse>(response).into_response(),
        None => StatusCode::ACCEPTED.into_response(),
    }
}
