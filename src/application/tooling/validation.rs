//! Per-tool argument validation. Every validator either yields a fully typed
//! record or the first reason the payload was rejected; nothing is coerced.

use super::error::ArgumentError;
use crate::types::{
    ClientType, GetClientArgs, GetWorkItemByIdArgs, GetWorkItemsArgs, SearchClientsArgs,
};
use serde_json::{Map as JsonMap, Value};

type Fields = JsonMap<String, Value>;

pub fn get_client_args(arguments: &Value) -> Result<GetClientArgs, ArgumentError> {
    let fields = object(arguments)?;
    let client_id = required_non_empty(fields, "client_id")?;
    let raw_type = required_string(fields, "client_type")?;
    let client_type =
        ClientType::from_str(&raw_type).ok_or(ArgumentError::UnknownVariant {
            field: "client_type",
            value: raw_type,
        })?;
    Ok(GetClientArgs {
        client_id,
        client_type,
    })
}

pub fn search_clients_args(arguments: &Value) -> Result<SearchClientsArgs, ArgumentError> {
    let fields = object(arguments)?;
    Ok(SearchClientsArgs {
        search_term: required_string(fields, "search_term")?,
        max_results: optional_number(fields, "max_results")?,
    })
}

pub fn get_work_items_args(arguments: &Value) -> Result<GetWorkItemsArgs, ArgumentError> {
    let fields = object(arguments)?;
    Ok(GetWorkItemsArgs {
        client_key: optional_string(fields, "client_key")?,
        work_type: optional_string(fields, "work_type")?,
        title_filter: optional_string(fields, "title_filter")?,
        max_results: optional_number(fields, "max_results")?,
    })
}

pub fn get_work_item_by_id_args(arguments: &Value) -> Result<GetWorkItemByIdArgs, ArgumentError> {
    let fields = object(arguments)?;
    Ok(GetWorkItemByIdArgs {
        work_item_key: required_non_empty(fields, "work_item_key")?,
    })
}

fn object(arguments: &Value) -> Result<&Fields, ArgumentError> {
    arguments.as_object().ok_or(ArgumentError::NotAnObject)
}

fn required_string(fields: &Fields, field: &'static str) -> Result<String, ArgumentError> {
    optional_string(fields, field)?.ok_or(ArgumentError::Missing { field })
}

fn required_non_empty(fields: &Fields, field: &'static str) -> Result<String, ArgumentError> {
    let value = required_string(fields, field)?;
    if value.is_empty() {
        return Err(ArgumentError::Empty { field });
    }
    Ok(value)
}

/// Absent is fine; present must be a string (`null` included in "present").
fn optional_string(fields: &Fields, field: &'static str) -> Result<Option<String>, ArgumentError> {
    match fields.get(field) {
        None => Ok(None),
        Some(Value::String(value)) => Ok(Some(value.clone())),
        Some(_) => Err(ArgumentError::WrongType {
            field,
            expected: "string",
        }),
    }
}

fn optional_number(fields: &Fields, field: &'static str) -> Result<Option<f64>, ArgumentError> {
    match fields.get(field) {
        None => Ok(None),
        Some(value) => value
            .as_f64()
            .map(Some)
            .ok_or(ArgumentError::WrongType {
                field,
                expected: "number",
            }),
    }
}
