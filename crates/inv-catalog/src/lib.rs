//! # inv-catalog
//!
//! Catalog maintenance workflows driven through [`inv_api::InventoryApi`]:
//! CSV import of parameter templates and parts, KiCad plugin setup, default
//! units, bulk deletion, and BOM tooling.
//!
//! Every workflow resolves records through an [`EntityResolver`], which
//! finds existing records by their identifying fields before creating new
//! ones, so re-running an import is idempotent.

pub mod bom;
pub mod configuration;
pub mod database;
mod error;
pub mod import;
pub mod parameters;
pub mod parts;
pub mod plugin;
pub mod purge;
pub mod relations;
mod resolver;
pub mod stock;
pub mod suppliers;
pub mod table;
pub mod units;

#[cfg(test)]
mod test_support;

pub use error::CatalogError;
pub use import::{FileKind, FileReport, ImportOptions, ImportReport, import_directory};
pub use plugin::KicadPlugin;
pub use purge::{DeleteSummary, delete_all, delete_kind, entity_kind_names};
pub use resolver::EntityResolver;
pub use table::CsvTable;
pub use units::{UnitsReport, create_default_units};
