//! Append manufacturer part numbers of related parts to BOM rows.

use std::fmt;
use std::path::{Path, PathBuf};

use inv_api::{InventoryApi, Record, list_entities, records_from, str_field};
use inv_core::{EntityKind, Pk};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use super::{PK_COLUMN, VALUE_SEPARATOR, parse_pk};
use crate::error::CatalogError;
use crate::table::CsvTable;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BomResolveReport {
    pub rows: usize,
    pub resolved: usize,
    pub skipped: usize,
    pub failed: usize,
    /// `MPN<i>` cells written.
    pub alternatives: usize,
}

impl fmt::Display for BomResolveReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} rows: {} resolved, {} alternatives added, {} without PK, {} failed",
            self.rows, self.resolved, self.alternatives, self.skipped, self.failed
        )
    }
}

/// `<stem>_resolved.csv` next to the input.
#[must_use]
pub fn default_output(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map_or_else(|| "bom".to_string(), |s| s.to_string_lossy().into_owned());
    input.with_file_name(format!("{stem}_resolved.csv"))
}

/// Read `input`, resolve it, and write the augmented table to `output`.
///
/// # Errors
///
/// CSV read/write errors, or those of [`resolve_bom`].
pub async fn resolve_bom_file(
    api: &dyn InventoryApi,
    input: &Path,
    output: &Path,
) -> Result<BomResolveReport, CatalogError> {
    let mut table = CsvTable::read(input)?;
    let report = resolve_bom(api, &mut table).await?;
    table.write(output)?;
    info!(output = %output.display(), "wrote resolved BOM");
    Ok(report)
}

/// For every row with an `InvenTree PK`, write the first manufacturer part of
/// each related part into `MPN<i>`/`Manufacturer<i>`.
///
/// Existing cell values are kept and the new value is appended after `; `.
/// Lookup failures are logged per row.
///
/// # Errors
///
/// [`CatalogError::MissingColumn`] when the table has no pk column.
pub async fn resolve_bom(api: &dyn InventoryApi, table: &mut CsvTable) -> Result<BomResolveReport, CatalogError> {
    table.require_column(PK_COLUMN)?;
    let rows: Vec<(usize, Option<Pk>)> = table
        .rows()
        .map(|row| (row.index(), row.get(PK_COLUMN).and_then(parse_pk)))
        .collect();

    let mut report = BomResolveReport {
        rows: rows.len(),
        ..BomResolveReport::default()
    };
    for (index, pk) in rows {
        let Some(pk) = pk else {
            warn!(row = index, "row has no valid InvenTree PK, skipping");
            report.skipped += 1;
            continue;
        };
        match alternatives(api, pk).await {
            Ok(found) => {
                for (position, (mpn, manufacturer)) in found.iter().enumerate() {
                    let slot = position + 1;
                    append(table, index, &format!("MPN{slot}"), mpn);
                    append(table, index, &format!("Manufacturer{slot}"), manufacturer);
                    report.alternatives += 1;
                }
                report.resolved += 1;
            }
            Err(err) => {
                warn!(row = index, part = pk, %err, "failed to resolve related parts");
                report.failed += 1;
            }
        }
    }
    Ok(report)
}

/// `(MPN, manufacturer name)` of the first manufacturer part of each part
/// related to `pk`.
async fn alternatives(api: &dyn InventoryApi, pk: Pk) -> Result<Vec<(String, String)>, CatalogError> {
    let relations = list_entities(api, EntityKind::PartRelated, &[("part", pk.to_string())]).await?;
    let mut found = Vec::new();
    for relation in &relations {
        let Some(other) = other_part(relation, pk) else {
            continue;
        };
        let manufacturer_parts = records_from(
            api.get(
                EntityKind::ManufacturerPart.endpoint(),
                &[
                    ("part", other.to_string()),
                    ("manufacturer_detail", "true".to_string()),
                ],
            )
            .await?,
        )?;
        let Some(first) = manufacturer_parts.first() else {
            debug!(part = other, "related part has no manufacturer parts");
            continue;
        };
        let manufacturer = first
            .get("manufacturer_detail")
            .and_then(|detail| detail.get("name"))
            .and_then(Value::as_str)
            .unwrap_or("Unknown Manufacturer");
        let mpn = match str_field(first, "MPN") {
            "" => "Unknown MPN",
            mpn => mpn,
        };
        debug!(part = pk, related = other, mpn, manufacturer, "found alternative");
        found.push((mpn.to_string(), manufacturer.to_string()));
    }
    Ok(found)
}

/// The side of a relation that is not `pk`.
fn other_part(relation: &Record, pk: Pk) -> Option<Pk> {
    let side = |field: &str| relation.get(field).and_then(Value::as_u64);
    match (side("part_1"), side("part_2")) {
        (Some(a), Some(b)) if a == pk => Some(b),
        (Some(a), Some(b)) if b == pk => Some(a),
        _ => None,
    }
}

fn append(table: &mut CsvTable, row: usize, column: &str, value: &str) {
    let combined = match table.cell(row, column) {
        Some(existing) => format!("{existing}{VALUE_SEPARATOR}{value}"),
        None => value.to_string(),
    };
    table.set(row, column, combined);
}
