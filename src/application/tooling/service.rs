use super::catalog::{ToolDefinition, tool_definitions};
use super::error::{ToolError, TransportError};
use super::interface::KarbonTransport;
use super::query::{self, RemoteRequest};
use super::response::{
    AppliedFilters, ClientEnvelope, ClientSearchEnvelope, ToolResponse, WorkItemEnvelope,
    WorkItemsEnvelope, collection_items,
};
use super::validation;
use crate::types::ToolName;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, error, warn};

/// The four Karbon tools, bound to a transport.
pub struct KarbonTools<T> {
    transport: Arc<T>,
}

impl<T> Clone for KarbonTools<T> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
        }
    }
}

impl<T: KarbonTransport> KarbonTools<T> {
    pub fn new(transport: Arc<T>) -> Self {
        Self { transport }
    }

    pub fn definitions(&self) -> Vec<ToolDefinition> {
        tool_definitions()
    }

    /// Runs `name` with `arguments`. Omitted arguments count as an empty object.
    pub async fn call(
        &self,
        name: &str,
        arguments: Option<Value>,
    ) -> Result<ToolResponse, ToolError> {
        let Some(tool) = ToolName::from_str(name) else {
            warn!(tool = name, "Unknown tool requested");
            return Err(ToolError::MethodNotFound(name.to_string()));
        };
        let arguments = arguments.unwrap_or_else(|| Value::Object(Default::default()));
        debug!(%tool, "Dispatching tool call");

        let result = match tool {
            ToolName::GetClientById => self.get_client_by_id(&arguments).await,
            ToolName::SearchClients => self.search_clients(&arguments).await,
            ToolName::GetWorkItems => self.get_work_items(&arguments).await,
            ToolName::GetWorkItemById => self.get_work_item_by_id(&arguments).await,
        };
        if let Err(err) = &result {
            error!(%tool, code = err.code(), %err, "Tool call failed");
        }
        result
    }

    async fn get_client_by_id(&self, arguments: &Value) -> Result<ToolResponse, ToolError> {
        let args = validation::get_client_args(arguments)
            .map_err(|reason| ToolError::invalid_arguments(ToolName::GetClientById, &reason))?;

        let request = query::client_lookup(&args);
        let client_data = self.fetch(&request, "get client").await?;
        respond(
            &ClientEnvelope {
                client_type: args.client_type,
                client_data,
            },
            "get client",
        )
    }

    async fn search_clients(&self, arguments: &Value) -> Result<ToolResponse, ToolError> {
        let args = validation::search_clients_args(arguments)
            .map_err(|reason| ToolError::invalid_arguments(ToolName::SearchClients, &reason))?;

        let plan = query::client_search(&args);
        let (contacts, organizations, client_groups) = futures::future::join3(
            self.search_collection(&plan.contacts),
            self.search_collection(&plan.organizations),
            self.search_collection(&plan.client_groups),
        )
        .await;

        respond(
            &ClientSearchEnvelope::new(args.search_term, contacts, organizations, client_groups),
            "search clients",
        )
    }

    async fn get_work_items(&self, arguments: &Value) -> Result<ToolResponse, ToolError> {
        let args = validation::get_work_items_args(arguments)
            .map_err(|reason| ToolError::invalid_arguments(ToolName::GetWorkItems, &reason))?;

        let request = query::work_item_listing(&args);
        let page = self.fetch(&request, "get work items").await?;
        let filters_applied = AppliedFilters {
            client_key: args.client_key,
            work_type: args.work_type,
            title_filter: args.title_filter,
        };
        respond(
            &WorkItemsEnvelope::from_page(filters_applied, page),
            "get work items",
        )
    }

    async fn get_work_item_by_id(&self, arguments: &Value) -> Result<ToolResponse, ToolError> {
        let args = validation::get_work_item_by_id_args(arguments)
            .map_err(|reason| ToolError::invalid_arguments(ToolName::GetWorkItemById, &reason))?;

        let request = query::work_item_lookup(&args);
        let work_item_data = self.fetch(&request, "get work item").await?;
        respond(
            &WorkItemEnvelope {
                work_item_key: args.work_item_key,
                work_item_data,
            },
            "get work item",
        )
    }

    async fn fetch(&self, request: &RemoteRequest, action: &str) -> Result<Value, ToolError> {
        self.transport
            .get(request)
            .await
            .map_err(|err| ToolError::from_transport(err, action))
    }

    /// One branch of the search fan-out. Never fails: any error becomes an
    /// empty result for this collection only.
    async fn search_collection(&self, request: &RemoteRequest) -> Vec<Value> {
        match self.transport.get(request).await {
            Ok(page) => collection_items(page),
            Err(err) => {
                log_swallowed(request, &err);
                Vec::new()
            }
        }
    }
}

fn log_swallowed(request: &RemoteRequest, err: &TransportError) {
    warn!(
        path = request.path.as_str(),
        status = err.status().map(|status| status.as_u16()),
        %err,
        "Client search branch failed; returning no results for it"
    );
}

fn respond<E: Serialize>(envelope: &E, action: &str) -> Result<ToolResponse, ToolError> {
    ToolResponse::json(envelope)
        .map_err(|err| ToolError::Internal(format!("Failed to {action}: {err}")))
}
