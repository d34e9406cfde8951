use crate::application::tooling::{INTERNAL_ERROR, KarbonTools, KarbonTransport};
use crate::constants::{DEFAULT_PROTOCOL_VERSION, SERVER_NAME};
use crate::rpc::types::{RpcRequest, RpcResponse};
use serde_json::{Value, json};
use tracing::{debug, error, info, warn};

/// Dispatches one JSON-RPC message. Returns `None` for notifications.
pub async fn handle_rpc<T: KarbonTransport>(
    tools: &KarbonTools<T>,
    request: RpcRequest,
) -> Option<RpcResponse> {
    debug!(method = %request.method, "Received JSON-RPC request");

    if request.is_notification() {
        debug!(method = %request.method, "Ignoring notification");
        return None;
    }

    if request.jsonrpc != "2.0" {
        return Some(RpcResponse::invalid_request(
            request.id,
            "Unsupported jsonrpc version (expected 2.0)",
        ));
    }

    let response = match request.method.as_str() {
        "initialize" => handle_initialize(&request),
        "ping" => RpcResponse::success(request.id.clone(), json!({})),
        "tools/list" => handle_tool_list(tools, request.id.clone()),
        "tools/call" => handle_tool_call(tools, &request).await,
        other => {
            warn!(method = other, "Unknown JSON-RPC method");
            RpcResponse::method_not_found(request.id.clone(), other)
        }
    };

    Some(response)
}

fn handle_initialize(request: &RpcRequest) -> RpcResponse {
    let protocol_version = request
        .params
        .as_ref()
        .and_then(|params| params.get("protocolVersion"))
        .and_then(Value::as_str)
        .unwrap_or(DEFAULT_PROTOCOL_VERSION);
    info!(protocol_version, "MCP session initialized");

    RpcResponse::success(
        request.id.clone(),
        json!({
            "protocolVersion": protocol_version,
            "capabilities": {
                "tools": {},
            },
            "serverInfo": {
                "name": SERVER_NAME,
                "version": env!("CARGO_PKG_VERSION"),
            },
        }),
    )
}

fn handle_tool_list<T: KarbonTransport>(tools: &KarbonTools<T>, id: Option<Value>) -> RpcResponse {
    RpcResponse::success(
        id,
        json!({
            "tools": tools.definitions(),
        }),
    )
}

async fn handle_tool_call<T: KarbonTransport>(
    tools: &KarbonTools<T>,
    request: &RpcRequest,
) -> RpcResponse {
    let Some(Value::Object(params)) = &request.params else {
        return RpcResponse::invalid_params(
            request.id.clone(),
            "params must be an object with name",
        );
    };

    let name = match params.get("name") {
        Some(Value::String(value)) => value.as_str(),
        _ => {
            return RpcResponse::invalid_params(
                request.id.clone(),
                "params.name must be a string",
            );
        }
    };
    let arguments = params.get("arguments").cloned();

    match tools.call(name, arguments).await {
        Ok(response) => match serde_json::to_value(&response) {
            Ok(result) => RpcResponse::success(request.id.clone(), result),
            Err(err) => {
                error!(%err, "Failed to serialize tool response");
                RpcResponse::error(request.id.clone(), INTERNAL_ERROR, err.to_string())
            }
        },
        Err(err) => RpcResponse::error(request.id.clone(), err.code(), err.to_string()),
    }
}
