use crate::application::tooling::{INVALID_PARAMS, INVALID_REQUEST, METHOD_NOT_FOUND};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

pub const PARSE_ERROR: i64 = -32700;

#[derive(Debug, Serialize, Deserialize)]
pub struct RpcRequest {
    pub jsonrpc: String,
    #[serde(default)]
    pub method: String,
    #[serde(default)]
    pub params: Option<Value>,
    #[serde(default, deserialize_with = "present_id")]
    pub id: Option<Value>,
}

/// Keeps an explicit `"id": null` as `Some(Value::Null)`; only a missing key is `None`.
fn present_id<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

impl RpcRequest {
    /// Requests without an `id` key are notifications and get no response.
    pub fn is_notification(&self) -> bool {
        self.id.is_none()
    }

    /// Parses one JSON-RPC message, answering malformed input with the
    /// matching error response.
    pub fn parse(raw: &str) -> Result<Self, RpcResponse> {
        let value: Value = serde_json::from_str(raw)
            .map_err(|err| RpcResponse::error(None, PARSE_ERROR, format!("Parse error: {err}")))?;
        let id = value.get("id").cloned();
        serde_json::from_value(value)
            .map_err(|err| RpcResponse::error(id, INVALID_REQUEST, format!("Invalid request: {err}")))
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RpcError {
    pub code: i64,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RpcResponse {
    pub jsonrpc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<RpcError>,
    pub id: Option<Value>,
}

impl RpcResponse {
    pub fn success(id: Option<Value>, result: Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            result: Some(result),
            error: None,
            id,
        }
    }

    pub fn error(id: Option<Value>, code: i64, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            result: None,
            error: Some(RpcError {
                code,
                message: message.into(),
            }),
            id,
        }
    }

    pub fn invalid_request(id: Option<Value>, message: impl Into<String>) -> Self {
        Self::error(id, INVALID_REQUEST, message.into())
    }

    pub fn invalid_params(id: Option<Value>, message: impl Into<String>) -> Self {
        Self::error(id, INVALID_PARAMS, message.into())
    }

    pub fn method_not_found(id: Option<Value>, method: &str) -> Self {
        Self::error(id, METHOD_NOT_FOUND, format!("Method not found: {method}"))
    }

    pub fn error_code(&self) -> Option<i64> {
        self.error.as_ref().map(|error| error.code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parse_error_has_null_id() {
        let response = RpcRequest::parse("{not json").expect_err("invalid json");
        assert_eq!(response.error_code(), Some(PARSE_ERROR));
        assert_eq!(
            serde_json::to_value(&response).expect("serializable")["id"],
            Value::Null
        );
    }

    #[test]
    fn malformed_request_keeps_its_id() {
        let response = RpcRequest::parse(r#"{"id": 7, "method": "ping"}"#).expect_err("no jsonrpc");
        assert_eq!(response.error_code(), Some(-32600));
        assert_eq!(response.id, Some(json!(7)));
    }

    #[test]
    fn request_without_id_is_notification() {
        let request =
            RpcRequest::parse(r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#)
                .expect("valid request");
        assert!(request.is_notification());
    }

    #[test]
    fn explicit_null_id_is_a_request() {
        let request = RpcRequest::parse(r#"{"jsonrpc":"2.0","id":null,"method":"ping"}"#)
            .expect("valid request");
        assert!(!request.is_notification());
        assert_eq!(request.id, Some(Value::Null));
    }

    #[test]
    fn error_serializes_code_and_message_only() {
        let value = serde_json::to_value(RpcResponse::method_not_found(Some(json!(3)), "x"))
            .expect("serializable");
        assert_eq!(
            value["error"],
            json!({ "code": -32601, "message": "Method not found: x" })
        );
    }

    #[test]
    fn success_omits_error_field() {
        let value = serde_json::to_value(RpcResponse::success(Some(json!(1)), json!({})))
            .expect("serializable");
        assert_eq!(value, json!({ "jsonrpc": "2.0", "result": {}, "id": 1 }));
    }
}
