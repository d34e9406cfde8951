#![allow(dead_code)]

use async_trait::async_trait;
use karbon_mcp_server::tooling::{KarbonTools, KarbonTransport, RemoteRequest, TransportError};
use reqwest::StatusCode;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Barrier, Mutex};

/// Scripted reply for one upstream path.
#[derive(Clone)]
pub enum Reply {
    Json(Value),
    Status(u16, Option<Value>),
    Undecodable,
}

/// Records every request and answers from a per-path script. Unscripted
/// paths answer with an empty OData page.
#[derive(Default)]
pub struct StubTransport {
    replies: HashMap<String, Reply>,
    requests: Mutex<Vec<RemoteRequest>>,
    rendezvous: Option<(Vec<String>, Barrier)>,
}

impl StubTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(mut self, path: &str, reply: Reply) -> Self {
        self.replies.insert(path.to_string(), reply);
        self
    }

    /// Requests to `paths` block until all of them are in flight at once.
    pub fn rendezvous(mut self, paths: &[&str]) -> Self {
        let paths: Vec<String> = paths.iter().map(|path| path.to_string()).collect();
        let barrier = Barrier::new(paths.len());
        self.rendezvous = Some((paths, barrier));
        self
    }

    pub async fn requests(&self) -> Vec<RemoteRequest> {
        self.requests.lock().await.clone()
    }

    pub async fn request_for(&self, path: &str) -> RemoteRequest {
        self.requests()
            .await
            .into_iter()
            .find(|request| request.path == path)
            .unwrap_or_else(|| panic!("no request recorded for {path}"))
    }
}

#[async_trait]
impl KarbonTransport for StubTransport {
    async fn get(&self, request: &RemoteRequest) -> Result<Value, TransportError> {
        self.requests.lock().await.push(request.clone());
        if let Some((paths, barrier)) = &self.rendezvous {
            if paths.contains(&request.path) {
                barrier.wait().await;
            }
        }
        match self.replies.get(&request.path) {
            Some(Reply::Json(value)) => Ok(value.clone()),
            Some(Reply::Status(code, body)) => Err(TransportError::Status {
                status: StatusCode::from_u16(*code).expect("valid status"),
                body: body.clone(),
            }),
            Some(Reply::Undecodable) => {
                Err(TransportError::Decode("expected value at line 1".to_string()))
            }
            None => Ok(serde_json::json!({ "value": [] })),
        }
    }
}

pub fn tools(stub: StubTransport) -> (KarbonTools<StubTransport>, Arc<StubTransport>) {
    let stub = Arc::new(stub);
    (KarbonTools::new(Arc::clone(&stub)), stub)
}
