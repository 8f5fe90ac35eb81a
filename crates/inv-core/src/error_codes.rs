//! Numeric error codes shared by every catalog workflow.
//!
//! Codes are grouped by decade (1–9 validation, 10–19 files, 20–29
//! configuration, ...). The CLI uses them as process exit codes so scripts
//! driving `invt` can branch on the failure class.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    Success,

    // Input/data validation
    InvalidPk,
    InvalidName,
    InvalidData,
    InvalidAssemblyData,

    // Files
    FileError,

    // Configuration
    ConfigurationError,

    // API and network
    ApiError,

    // Entity creation and resolution
    EntityCreationFailed,
    InvalidEntityType,

    // Parts
    ParameterError,
    NoRelations,
    PartNotFound,
    NoManufacturerParts,

    // Suppliers and manufacturers
    SupplierError,

    // Categories
    CategoryError,

    // BOM processing
    BomProcessingError,
    MpnLookupError,

    // Relations
    RelationCreationFailed,
    RelationsError,

    // Part creation composite
    PartCreationError,
}

impl ErrorCode {
    /// Numeric value of the code.
    #[must_use]
    pub const fn as_i32(self) -> i32 {
        match self {
            Self::Success => 0,
            Self::InvalidPk => 1,
            Self::InvalidName => 2,
            Self::InvalidData => 3,
            Self::InvalidAssemblyData => 4,
            Self::FileError => 10,
            Self::ConfigurationError => 20,
            Self::ApiError => 30,
            Self::EntityCreationFailed => 40,
            Self::InvalidEntityType => 41,
            Self::ParameterError => 50,
            Self::NoRelations => 51,
            Self::PartNotFound => 52,
            Self::NoManufacturerParts => 53,
            Self::SupplierError => 60,
            Self::CategoryError => 70,
            Self::BomProcessingError => 80,
            Self::MpnLookupError => 81,
            Self::RelationCreationFailed => 90,
            Self::RelationsError => 91,
            Self::PartCreationError => 100,
        }
    }

    /// Human-readable description.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Success => "Operation completed successfully",
            Self::InvalidPk => "Invalid primary key",
            Self::InvalidName => "Invalid name provided",
            Self::InvalidData => "Invalid data provided",
            Self::InvalidAssemblyData => "Invalid assembly data",
            Self::FileError => "File operation error",
            Self::ConfigurationError => "Configuration error",
            Self::ApiError => "API communication error",
            Self::EntityCreationFailed => "Failed to create entity",
            Self::InvalidEntityType => "Invalid entity type",
            Self::ParameterError => "Parameter operation error",
            Self::NoRelations => "Part has no relations",
            Self::PartNotFound => "Part not found",
            Self::NoManufacturerParts => "No manufacturer parts found",
            Self::SupplierError => "Supplier/manufacturer operation error",
            Self::CategoryError => "Category operation error",
            Self::BomProcessingError => "BOM processing error",
            Self::MpnLookupError => "MPN lookup error",
            Self::RelationCreationFailed => "Failed to create part relation",
            Self::RelationsError => "Part relations error",
            Self::PartCreationError => "Part creation error",
        }
    }

    #[must_use]
    pub const fn is_success(self) -> bool {
        matches!(self, Self::Success)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.description(), self.as_i32())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_keep_their_numeric_groups() {
        assert_eq!(ErrorCode::Success.as_i32(), 0);
        assert_eq!(ErrorCode::FileError.as_i32(), 10);
        assert_eq!(ErrorCode::ApiError.as_i32(), 30);
        assert_eq!(ErrorCode::CategoryError.as_i32(), 70);
        assert_eq!(ErrorCode::PartCreationError.as_i32(), 100);
    }

    #[test]
    fn display_includes_description_and_number() {
        assert_eq!(
            ErrorCode::BomProcessingError.to_string(),
            "BOM processing error (80)"
        );
        assert!(ErrorCode::Success.is_success());
        assert!(!ErrorCode::ApiError.is_success());
    }
}
