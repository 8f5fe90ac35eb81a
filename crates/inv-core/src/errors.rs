//! Cross-cutting error types for invt.
//!
//! Domain-specific errors (`ApiError`, `CatalogError`, `ComposeError`) live in
//! their respective crates and converge in `inv-cli`.

use thiserror::Error;

/// Errors raised by the core domain types.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// An entity type name did not match any known [`EntityKind`](crate::EntityKind).
    #[error("Entity type '{name}' not found. Available types: {available}")]
    UnknownEntityKind { name: String, available: String },

    /// A category path contained no usable levels.
    #[error("No valid category levels found in string: {0}")]
    EmptyCategoryPath(String),

    /// Data failed validation.
    #[error("Validation error: {0}")]
    Validation(String),
}
