mod catalog;
mod error;
mod interface;
pub mod query;
mod response;
mod service;
pub mod validation;

pub use catalog::{ToolDefinition, definition, tool_definitions};
pub use error::{
    ArgumentError, INTERNAL_ERROR, INVALID_PARAMS, INVALID_REQUEST, METHOD_NOT_FOUND, ToolError,
    TransportError,
};
pub use interface::KarbonTransport;
pub use query::{RemoteQuery, RemoteRequest};
pub use response::{ContentBlock, ToolResponse};
pub use service::KarbonTools;
