use serde::{Deserialize, Serialize};
use std::fmt;

/// The four tools exposed to MCP hosts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolName {
    GetClientById,
    SearchClients,
    GetWorkItems,
    GetWorkItemById,
}

impl ToolName {
    pub const ALL: [ToolName; 4] = [
        ToolName::GetClientById,
        ToolName::SearchClients,
        ToolName::GetWorkItems,
        ToolName::GetWorkItemById,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ToolName::GetClientById => "get_client_by_id",
            ToolName::SearchClients => "search_clients",
            ToolName::GetWorkItems => "get_work_items",
            ToolName::GetWorkItemById => "get_work_item_by_id",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tool| tool.as_str() == value)
    }
}

impl fmt::Display for ToolName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of client record in Karbon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClientType {
    Contact,
    Organization,
    ClientGroup,
}

impl ClientType {
    pub const ALL: [ClientType; 3] = [
        ClientType::Contact,
        ClientType::Organization,
        ClientType::ClientGroup,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ClientType::Contact => "Contact",
            ClientType::Organization => "Organization",
            ClientType::ClientGroup => "ClientGroup",
        }
    }

    /// Exact, case-sensitive match.
    pub fn from_str(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == value)
    }

    /// Remote collection holding records of this type.
    pub fn collection(self) -> &'static str {
        match self {
            ClientType::Contact => "Contacts",
            ClientType::Organization => "Organizations",
            ClientType::ClientGroup => "ClientGroups",
        }
    }

    /// `$expand` clause used when fetching a single record.
    pub fn detail_expand(self) -> &'static str {
        match self {
            ClientType::Contact => "BusinessCards,ClientTeam",
            ClientType::Organization => "BusinessCards,ClientTeam,Contacts",
            ClientType::ClientGroup => "BusinessCard,ClientTeam",
        }
    }

    /// `$expand` clause used when searching the collection.
    pub fn search_expand(self) -> &'static str {
        match self {
            ClientType::Contact | ClientType::Organization => "BusinessCards",
            ClientType::ClientGroup => "BusinessCard",
        }
    }
}

impl fmt::Display for ClientType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GetClientArgs {
    pub client_id: String,
    pub client_type: ClientType,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchClientsArgs {
    pub search_term: String,
    pub max_results: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct GetWorkItemsArgs {
    pub client_key: Option<String>,
    pub work_type: Option<String>,
    pub title_filter: Option<String>,
    pub max_results: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GetWorkItemByIdArgs {
    pub work_item_key: String,
}
