//! Catalog error types.

use std::path::PathBuf;

use inv_api::ApiError;
use inv_core::{CoreError, EntityKind, ErrorCode};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("failed to read CSV {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("directory not found: {0}")]
    DirectoryNotFound(PathBuf),

    #[error("{file}: missing column '{column}'")]
    MissingColumn { file: String, column: String },

    #[error("invalid PARAMETER definition in row {row}: {reason}")]
    InvalidParameter { row: usize, reason: String },

    #[error("could not create {kind} {key}")]
    EntityCreation { kind: EntityKind, key: String },

    #[error("row {row}: part name is empty")]
    InvalidName { row: usize },

    #[error("row {row}: failed to resolve category '{path}': {reason}")]
    Category {
        row: usize,
        path: String,
        reason: String,
    },

    #[error("row {row}: failed to create part '{name}': {reason}")]
    PartCreation {
        row: usize,
        name: String,
        reason: String,
    },

    #[error("invalid assembly data: {0}")]
    InvalidAssembly(String),

    #[error("BOM processing failed: {0}")]
    Bom(String),
}

impl CatalogError {
    /// Numeric code used as the process exit status.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::Api(_) => ErrorCode::ApiError,
            Self::Core(CoreError::UnknownEntityKind { .. }) => ErrorCode::InvalidEntityType,
            Self::Core(CoreError::EmptyCategoryPath(_)) | Self::Category { .. } => {
                ErrorCode::CategoryError
            }
            Self::Core(CoreError::Validation(_)) | Self::MissingColumn { .. } => {
                ErrorCode::InvalidData
            }
            Self::Csv { .. } | Self::DirectoryNotFound(_) => ErrorCode::FileError,
            Self::InvalidParameter { .. } => ErrorCode::ParameterError,
            Self::EntityCreation { .. } => ErrorCode::EntityCreationFailed,
            Self::InvalidName { .. } => ErrorCode::InvalidName,
            Self::PartCreation { .. } => ErrorCode::PartCreationError,
            Self::InvalidAssembly(_) => ErrorCode::InvalidAssemblyData,
            Self::Bom(_) => ErrorCode::BomProcessingError,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_follow_failure_class() {
        let err = CatalogError::Category {
            row: 3,
            path: "A / B".into(),
            reason: "boom".into(),
        };
        assert_eq!(err.code(), ErrorCode::CategoryError);
        assert_eq!(
            CatalogError::DirectoryNotFound("x".into()).code().as_i32(),
            10
        );
        let unknown: CatalogError = "Widget".parse::<EntityKind>().unwrap_err().into();
        assert_eq!(unknown.code(), ErrorCode::InvalidEntityType);
    }
}
