use crate::types::ToolName;
use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

pub const INVALID_REQUEST: i64 = -32600;
pub const METHOD_NOT_FOUND: i64 = -32601;
pub const INVALID_PARAMS: i64 = -32602;
pub const INTERNAL_ERROR: i64 = -32603;

/// Why a tool's arguments were rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArgumentError {
    #[error("arguments must be an object")]
    NotAnObject,
    #[error("missing required field '{field}'")]
    Missing { field: &'static str },
    #[error("field '{field}' must be a {expected}")]
    WrongType {
        field: &'static str,
        expected: &'static str,
    },
    #[error("field '{field}' must not be empty")]
    Empty { field: &'static str },
    #[error("field '{field}' has unsupported value '{value}'")]
    UnknownVariant { field: &'static str, value: String },
}

/// Failure talking to the Karbon API.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Request failed with status code {}", status.as_u16())]
    Status {
        status: StatusCode,
        body: Option<Value>,
    },
    #[error("{0}")]
    Network(#[source] reqwest::Error),
    #[error("invalid response body: {0}")]
    Decode(String),
    #[error("invalid request URL: {0}")]
    InvalidUrl(String),
    #[error("failed to configure HTTP client: {0}")]
    Setup(String),
}

impl TransportError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            TransportError::Status { status, .. } => Some(*status),
            TransportError::Network(source) => source.status(),
            _ => None,
        }
    }

    /// `message` at the top of the error body, as sent on rate limiting.
    fn body_message(&self) -> Option<&str> {
        match self {
            TransportError::Status {
                body: Some(body), ..
            } => body.get("message").and_then(Value::as_str),
            _ => None,
        }
    }

    /// `error.message` in the error body, the usual Karbon error shape.
    fn body_error_message(&self) -> Option<&str> {
        match self {
            TransportError::Status {
                body: Some(body), ..
            } => body
                .get("error")
                .and_then(|error| error.get("message"))
                .and_then(Value::as_str),
            _ => None,
        }
    }
}

/// Protocol-level failure returned to the MCP host.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ToolError {
    #[error("{0}")]
    InvalidParams(String),
    #[error("{0}")]
    InvalidRequest(String),
    #[error("{0}")]
    Internal(String),
    #[error("Unknown tool: {0}")]
    MethodNotFound(String),
}

impl ToolError {
    pub fn code(&self) -> i64 {
        match self {
            ToolError::InvalidParams(_) => INVALID_PARAMS,
            ToolError::InvalidRequest(_) => INVALID_REQUEST,
            ToolError::Internal(_) => INTERNAL_ERROR,
            ToolError::MethodNotFound(_) => METHOD_NOT_FOUND,
        }
    }

    pub fn invalid_arguments(tool: ToolName, reason: &ArgumentError) -> Self {
        ToolError::InvalidParams(format!(
            "Invalid arguments for {tool}. {usage} ({reason})",
            usage = usage(tool)
        ))
    }

    /// Classifies a failed single-request call. `action` names the operation for
    /// failures that never produced an HTTP response worth classifying.
    pub fn from_transport(error: TransportError, action: &str) -> Self {
        match error.status() {
            Some(StatusCode::TOO_MANY_REQUESTS) => ToolError::Internal(format!(
                "Karbon API rate limit exceeded: {}",
                error.body_message().map(str::to_owned).unwrap_or_else(|| error.to_string())
            )),
            Some(StatusCode::UNAUTHORIZED) => ToolError::Internal(
                "Karbon API authentication failed. Please check your credentials.".to_string(),
            ),
            Some(StatusCode::NOT_FOUND) => ToolError::InvalidRequest(format!(
                "Resource not found: {}",
                upstream_detail(&error)
            )),
            _ => match error {
                TransportError::Decode(_)
                | TransportError::InvalidUrl(_)
                | TransportError::Setup(_) => {
                    ToolError::Internal(format!("Failed to {action}: {error}"))
                }
                _ => ToolError::Internal(format!("Karbon API error: {}", upstream_detail(&error))),
            },
        }
    }
}

fn upstream_detail(error: &TransportError) -> String {
    error
        .body_error_message()
        .map(str::to_owned)
        .unwrap_or_else(|| error.to_string())
}

fn usage(tool: ToolName) -> &'static str {
    match tool {
        ToolName::GetClientById => {
            "Required: client_id (string), client_type (Contact|Organization|ClientGroup)"
        }
        ToolName::SearchClients => {
            "Required: search_term (string), optional: max_results (number)"
        }
        ToolName::GetWorkItems => {
            "All parameters are optional: client_key, work_type, title_filter, max_results"
        }
        ToolName::GetWorkItemById => "Required: work_item_key (string)",
    }
}
