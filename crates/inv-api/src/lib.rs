//! # inv-api
//!
//! Async client for the InvenTree REST API.
//!
//! [`InventoryApi`] exposes raw JSON verbs so catalog workflows can be driven
//! by the real [`InvenTreeClient`] or an in-memory fake. Paths without a
//! leading `/` are relative to the API root (`part/category/`); paths with a
//! leading `/` are relative to the site root, which is where plugin endpoints
//! such as `/plugin/<key>/api/category/` live.

mod client;
mod error;
mod http;
pub mod records;

pub use client::InvenTreeClient;
pub use error::ApiError;
pub use records::{
    Record, create_entity, delete_entity, list_entities, patch_entity, pk_of, records_from, str_field,
};

use async_trait::async_trait;
use serde_json::Value;

/// The REST surface used by invt.
#[async_trait]
pub trait InventoryApi: Send + Sync {
    /// `GET path?query`.
    async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<Value, ApiError>;

    async fn post(&self, path: &str, body: &Value) -> Result<Value, ApiError>;

    async fn patch(&self, path: &str, body: &Value) -> Result<Value, ApiError>;

    async fn put(&self, path: &str, body: &Value) -> Result<Value, ApiError>;

    async fn delete(&self, path: &str) -> Result<(), ApiError>;
}
