//! # inv-core
//!
//! Core domain types shared across all invt crates.
//!
//! This crate provides:
//! - Entity kinds of the InvenTree API with their endpoints and identifier fields
//! - Composite cache keys built from identifier fields
//! - The numeric error code table used as process exit codes
//! - Parameter value parsing and SI-prefixed formatting
//! - Category path parsing, part types, IPN and link formatting
//! - The default custom unit set

pub mod category;
pub mod entity;
pub mod error_codes;
pub mod errors;
pub mod part;
pub mod units;
pub mod value;

pub use entity::{CompositeKey, EntityKind, Pk, value_text};
pub use error_codes::ErrorCode;
pub use errors::CoreError;
pub use category::{CategoryLevel, CategoryPath};
pub use part::{PartType, format_ipn, part_link};
pub use units::{DEFAULT_UNITS, UnitDefinition};
pub use value::{ParsedValue, format_value_with_unit, parse_parameter_value};
