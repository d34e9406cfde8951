use crate::types::{ClientType, ToolName};
use serde::Serialize;
use serde_json::{Value, json};

/// Tool descriptor as advertised through `tools/list`.
#[derive(Debug, Clone, Serialize)]
pub struct ToolDefinition {
    pub name: &'static str,
    pub description: &'static str,
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

pub fn tool_definitions() -> Vec<ToolDefinition> {
    ToolName::ALL.into_iter().map(definition).collect()
}

pub fn definition(tool: ToolName) -> ToolDefinition {
    match tool {
        ToolName::GetClientById => ToolDefinition {
            name: tool.as_str(),
            description: "Get detailed information about a specific client by their ID",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "client_id": {
                        "type": "string",
                        "description": "The Karbon-generated client key/ID",
                    },
                    "client_type": {
                        "type": "string",
                        "enum": ClientType::ALL.map(ClientType::as_str),
                        "description": "The type of client to retrieve",
                    },
                },
                "required": ["client_id", "client_type"],
            }),
        },
        ToolName::SearchClients => ToolDefinition {
            name: tool.as_str(),
            description: "Search for clients across all types (Contacts, Organizations, Client Groups) by name, email, or other criteria",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "search_term": {
                        "type": "string",
                        "description": "Search term to find clients (name, email, etc.)",
                    },
                    "max_results": max_results_schema(50),
                },
                "required": ["search_term"],
            }),
        },
        ToolName::GetWorkItems => ToolDefinition {
            name: tool.as_str(),
            description: "Get work items with optional filtering by client, work type, or title",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "client_key": {
                        "type": "string",
                        "description": "Filter by specific client key (optional)",
                    },
                    "work_type": {
                        "type": "string",
                        "description": "Filter by work type (e.g., \"Payroll\", \"Tax\") (optional)",
                    },
                    "title_filter": {
                        "type": "string",
                        "description": "Filter by work item title (partial match) (optional)",
                    },
                    "max_results": max_results_schema(100),
                },
                "required": [],
            }),
        },
        ToolName::GetWorkItemById => ToolDefinition {
            name: tool.as_str(),
            description: "Get detailed information about a specific work item by its ID",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "work_item_key": {
                        "type": "string",
                        "description": "The Karbon-generated work item key/ID",
                    },
                },
                "required": ["work_item_key"],
            }),
        },
    }
}

fn max_results_schema(default: u32) -> Value {
    json!({
        "type": "number",
        "description": format!("Maximum number of results to return (default: {default})"),
        "minimum": 1,
        "maximum": 100,
    })
}
