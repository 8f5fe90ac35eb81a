//! Typed helpers over the raw JSON verbs.

use inv_core::{EntityKind, Pk};
use serde_json::{Map, Value};
use tracing::debug;

use crate::InventoryApi;
use crate::error::ApiError;

/// One API record as a JSON object.
pub type Record = Map<String, Value>;

/// Collect records from a list response.
///
/// Accepts a plain array or a paginated `{ "results": [...] }` object;
/// non-object items are skipped.
///
/// # Errors
///
/// [`ApiError::Parse`] for any other shape.
pub fn records_from(value: Value) -> Result<Vec<Record>, ApiError> {
    let items = match value {
        Value::Array(items) => items,
        Value::Object(mut page) => match page.remove("results") {
            Some(Value::Array(items)) => items,
            _ => return Err(ApiError::Parse("object response without 'results'".into())),
        },
        Value::Null => Vec::new(),
        other => {
            return Err(ApiError::Parse(format!(
                "expected a list response, got {other}"
            )));
        }
    };
    Ok(items
        .into_iter()
        .filter_map(|item| match item {
            Value::Object(record) => Some(record),
            _ => None,
        })
        .collect())
}

/// Primary key of a record (`pk`, falling back to `id`).
#[must_use]
pub fn pk_of(record: &Record) -> Option<Pk> {
    ["pk", "id"]
        .iter()
        .filter_map(|field| record.get(*field))
        .find_map(|value| match value {
            Value::Number(n) => n.as_u64(),
            Value::String(s) => s.parse().ok(),
            _ => None,
        })
}

/// String field of a record, empty when absent or not a string.
#[must_use]
pub fn str_field<'a>(record: &'a Record, field: &str) -> &'a str {
    record.get(field).and_then(Value::as_str).unwrap_or_default()
}

/// List every record of `kind`, optionally filtered.
///
/// # Errors
///
/// Transport, status, or shape errors from the list request.
pub async fn list_entities(
    api: &dyn InventoryApi,
    kind: EntityKind,
    filters: &[(&str, String)],
) -> Result<Vec<Record>, ApiError> {
    let records = records_from(api.get(kind.endpoint(), filters).await?)?;
    debug!(%kind, count = records.len(), "listed entities");
    Ok(records)
}

/// Create a record of `kind` and return its primary key.
///
/// # Errors
///
/// Request errors, or [`ApiError::Parse`] when the response has no pk.
pub async fn create_entity(
    api: &dyn InventoryApi,
    kind: EntityKind,
    data: &Record,
) -> Result<Pk, ApiError> {
    let created = api.post(kind.endpoint(), &Value::Object(data.clone())).await?;
    created
        .as_object()
        .and_then(pk_of)
        .ok_or_else(|| ApiError::Parse(format!("{kind} create response without pk")))
}

/// Patch fields of one record.
///
/// # Errors
///
/// Request errors.
pub async fn patch_entity(
    api: &dyn InventoryApi,
    kind: EntityKind,
    pk: Pk,
    data: Value,
) -> Result<Value, ApiError> {
    api.patch(&kind.detail_path(pk), &data).await
}

/// Delete one record.
///
/// # Errors
///
/// Request errors.
pub async fn delete_entity(api: &dyn InventoryApi, kind: EntityKind, pk: Pk) -> Result<(), ApiError> {
    api.delete(&kind.detail_path(pk)).await
}
