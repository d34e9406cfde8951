use async_trait::async_trait;
use serde_json::Value;

use super::error::TransportError;
use super::query::RemoteRequest;

/// Outbound side of the gateway: performs one GET against the Karbon API and
/// returns the decoded JSON body.
#[async_trait]
pub trait KarbonTransport: Send + Sync {
    async fn get(&self, request: &RemoteRequest) -> Result<Value, TransportError>;
}
