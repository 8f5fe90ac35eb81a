//! Database sheets: one part per row, with category, parameters and suppliers.

use inv_core::{CategoryPath, PartType, Pk};
use tracing::{info, warn};

use crate::error::CatalogError;
use crate::import::{FileKind, FileReport};
use crate::parameters::create_parameters;
use crate::parts::{NAME_COLUMN, TYPE_COLUMN, create_part};
use crate::plugin::KicadPlugin;
use crate::relations::PendingRelations;
use crate::resolver::EntityResolver;
use crate::suppliers::{InitialStock, create_suppliers};
use crate::table::{CsvTable, Row};

pub const CATEGORY_COLUMN: &str = "CATEGORY";

/// Per-file settings for [`process_database_table`].
#[derive(Debug, Clone, Copy)]
pub struct DatabaseOptions<'o> {
    pub site_url: &'o str,
    pub limit: Option<usize>,
    pub stock: Option<InitialStock>,
}

/// Import every row of a database sheet.
///
/// Relations are queued in `pending` rather than created, so they can
/// refer to parts from later rows or files.
///
/// # Errors
///
/// A row whose category or part cannot be resolved aborts the file with
/// [`CatalogError::Category`] or [`CatalogError::PartCreation`].
pub async fn process_database_table(
    resolver: &mut EntityResolver<'_>,
    plugin: &mut KicadPlugin,
    table: &CsvTable,
    options: DatabaseOptions<'_>,
    pending: &mut PendingRelations,
) -> Result<FileReport, CatalogError> {
    let mut report = FileReport::new(table.name(), FileKind::Database);
    let rows = options.limit.unwrap_or(usize::MAX);
    info!(file = table.name(), rows = table.len().min(rows), "processing database file");

    for row in table.rows().take(rows) {
        report.rows += 1;
        process_row(resolver, plugin, &row, options, pending, &mut report).await?;
        info!(row = row.index(), name = row.get(NAME_COLUMN).unwrap_or_default(), "row imported");
    }
    Ok(report)
}

async fn process_row(
    resolver: &mut EntityResolver<'_>,
    plugin: &mut KicadPlugin,
    row: &Row<'_>,
    options: DatabaseOptions<'_>,
    pending: &mut PendingRelations,
    report: &mut FileReport,
) -> Result<(), CatalogError> {
    let part_type = row.get(TYPE_COLUMN).unwrap_or_default();
    let category = resolve_category(resolver, row).await?;

    if PartType::classify(part_type).is_kicad_category() {
        if let Err(err) = plugin.add_category(resolver.api(), category).await {
            warn!(row = row.index(), category, %err, "failed to register category with plugin");
            report.warnings += 1;
        }
    }

    let part = create_part(resolver, row, category, options.site_url, pending)
        .await
        .map_err(|err| match err {
            CatalogError::InvalidName { .. } => err,
            other => CatalogError::PartCreation {
                row: row.index(),
                name: row.get(NAME_COLUMN).unwrap_or_default().to_string(),
                reason: other.to_string(),
            },
        })?;
    report.parts += 1;
    report.warnings += part.warnings;

    match create_parameters(resolver, row, part.pk).await {
        Ok(parameters) => {
            report.parameters += parameters.created;
            report.warnings += parameters.failed;
        }
        Err(err) => {
            warn!(row = row.index(), %err, "failed to create parameters");
            report.warnings += 1;
        }
    }

    let suppliers = create_suppliers(resolver, row, part.pk, options.stock).await;
    report.manufacturer_parts += suppliers.manufacturer_parts;
    report.supplier_parts += suppliers.supplier_parts;
    report.stock_items += suppliers.stock_items;
    report.warnings += suppliers.warnings;
    Ok(())
}

async fn resolve_category(resolver: &mut EntityResolver<'_>, row: &Row<'_>) -> Result<Pk, CatalogError> {
    let category = row.get(CATEGORY_COLUMN).unwrap_or_default();
    let part_type = row.get(TYPE_COLUMN).unwrap_or_default();
    let failed = |reason: String| CatalogError::Category {
        row: row.index(),
        path: format!("{category} / {part_type}"),
        reason,
    };
    let path = CategoryPath::from_columns(category, part_type).map_err(|e| failed(e.to_string()))?;
    resolver
        .resolve_category_path(&path)
        .await
        .map_err(|e| failed(e.to_string()))
}
