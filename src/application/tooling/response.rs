use crate::types::ClientType;
use serde::Serialize;
use serde_json::Value;

/// Result of a successful `tools/call`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolResponse {
    pub content: Vec<ContentBlock>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ContentBlock {
    Text { text: String },
}

impl ToolResponse {
    /// Wraps an envelope as a single pretty-printed text block.
    pub fn json<T: Serialize>(envelope: &T) -> Result<Self, serde_json::Error> {
        let text = serde_json::to_string_pretty(envelope)?;
        Ok(Self {
            content: vec![ContentBlock::Text { text }],
        })
    }

    pub fn text(&self) -> Option<&str> {
        self.content.first().map(|block| match block {
            ContentBlock::Text { text } => text.as_str(),
        })
    }
}

#[derive(Debug, Serialize)]
pub struct ClientEnvelope {
    pub client_type: ClientType,
    pub client_data: Value,
}

#[derive(Debug, Serialize)]
pub struct ClientSearchEnvelope {
    pub search_term: String,
    pub total_results: usize,
    pub contacts: Vec<Value>,
    pub organizations: Vec<Value>,
    pub client_groups: Vec<Value>,
}

impl ClientSearchEnvelope {
    pub fn new(
        search_term: String,
        contacts: Vec<Value>,
        organizations: Vec<Value>,
        client_groups: Vec<Value>,
    ) -> Self {
        Self {
            search_term,
            total_results: contacts.len() + organizations.len() + client_groups.len(),
            contacts,
            organizations,
            client_groups,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct WorkItemsEnvelope {
    pub filters_applied: AppliedFilters,
    pub total_results: u64,
    pub work_items: Vec<Value>,
}

/// Echo of the filters the caller supplied; absent ones are left out.
#[derive(Debug, Serialize)]
pub struct AppliedFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub work_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title_filter: Option<String>,
}

impl WorkItemsEnvelope {
    /// Builds the envelope from a `/WorkItems` page. `@odata.count` wins when it
    /// is present and non-zero.
    pub fn from_page(filters_applied: AppliedFilters, page: Value) -> Self {
        let odata_count = page
            .get("@odata.count")
            .and_then(Value::as_u64)
            .filter(|count| *count > 0);
        let work_items = collection_items(page);
        Self {
            filters_applied,
            total_results: odata_count.unwrap_or(work_items.len() as u64),
            work_items,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct WorkItemEnvelope {
    pub work_item_key: String,
    pub work_item_data: Value,
}

/// Items of an OData collection page; anything without a `value` array is empty.
pub fn collection_items(page: Value) -> Vec<Value> {
    match page {
        Value::Object(mut fields) => match fields.remove("value") {
            Some(Value::Array(items)) => items,
            _ => Vec::new(),
        },
        _ => Vec::new(),
    }
}
