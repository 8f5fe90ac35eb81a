//! Manufacturer, supplier, and initial stock records for an imported part.

use inv_core::{EntityKind, Pk};
use serde_json::json;
use tracing::{debug, warn};

use crate::error::CatalogError;
use crate::resolver::EntityResolver;
use crate::stock::create_stock_item;
use crate::table::Row;

pub const MANUFACTURER_COLUMN: &str = "MANUFACTURER";
pub const MPN_COLUMN: &str = "MPN";
pub const SUPPLIER_PREFIX: &str = "SUPPLIER";
pub const SKU_PREFIX: &str = "SKU";

/// Where and how much stock to create per supplier part.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InitialStock {
    pub quantity: u32,
    pub location: Pk,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SupplierOutcome {
    pub manufacturer_parts: usize,
    pub supplier_parts: usize,
    pub stock_items: usize,
    pub warnings: usize,
}

/// Create the manufacturer part and every `SUPPLIER<n>`/`SKU<n>` supplier part.
///
/// Rows without a manufacturer are skipped entirely. Failures are logged as
/// warnings and never abort the row.
pub async fn create_suppliers(
    resolver: &mut EntityResolver<'_>,
    row: &Row<'_>,
    part: Pk,
    stock: Option<InitialStock>,
) -> SupplierOutcome {
    let mut outcome = SupplierOutcome::default();
    let Some(manufacturer) = row.get(MANUFACTURER_COLUMN) else {
        debug!(part, "no manufacturer, skipping suppliers");
        return outcome;
    };

    match manufacturer_part(resolver, manufacturer, row.get(MPN_COLUMN), part).await {
        Ok(true) => outcome.manufacturer_parts += 1,
        Ok(false) => {}
        Err(err) => {
            warn!(part, manufacturer, %err, "failed to create manufacturer part");
            outcome.warnings += 1;
        }
    }

    for (index, supplier) in row.numbered(SUPPLIER_PREFIX) {
        let Some(supplier) = supplier else {
            continue;
        };
        let Some(sku) = row.get(&format!("{SKU_PREFIX}{index}")) else {
            warn!(part, supplier, "supplier without SKU, skipping");
            outcome.warnings += 1;
            continue;
        };

        let supplier_part = match supplier_part(resolver, supplier, sku, part).await {
            Ok(pk) => pk,
            Err(err) => {
                warn!(part, supplier, sku, %err, "failed to create supplier part");
                outcome.warnings += 1;
                continue;
            }
        };
        outcome.supplier_parts += 1;

        if let Some(stock) = stock {
            match create_stock_item(resolver, part, supplier_part, stock.quantity, stock.location).await {
                Ok(_) => outcome.stock_items += 1,
                Err(err) => {
                    warn!(part, supplier_part, %err, "failed to create stock item");
                    outcome.warnings += 1;
                }
            }
        }
    }
    outcome
}

async fn manufacturer_part(
    resolver: &mut EntityResolver<'_>,
    manufacturer: &str,
    mpn: Option<&str>,
    part: Pk,
) -> Result<bool, CatalogError> {
    let company = resolver
        .resolve_value(
            EntityKind::Company,
            json!({ "name": manufacturer, "is_supplier": false, "is_manufacturer": true }),
        )
        .await?;
    let Some(mpn) = mpn else {
        return Ok(false);
    };
    resolver
        .resolve_value(
            EntityKind::ManufacturerPart,
            json!({ "part": part, "manufacturer": company, "MPN": mpn }),
        )
        .await?;
    Ok(true)
}

async fn supplier_part(
    resolver: &mut EntityResolver<'_>,
    supplier: &str,
    sku: &str,
    part: Pk,
) -> Result<Pk, CatalogError> {
    let company = resolver
        .resolve_value(
            EntityKind::Company,
            json!({ "name": supplier, "is_supplier": true, "is_manufacturer": false }),
        )
        .await?;
    resolver
        .resolve_value(
            EntityKind::SupplierPart,
            json!({ "part": part, "supplier": company, "SKU": sku }),
        )
        .await
}
