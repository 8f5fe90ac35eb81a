//! Custom physical units on the server.

use std::fmt;

use inv_api::{InventoryApi, records_from, str_field};
use inv_core::{DEFAULT_UNITS, UnitDefinition};
use serde::Serialize;
use serde_json::json;
use tracing::{info, warn};

use crate::error::CatalogError;

pub const UNITS_ENDPOINT: &str = "units/";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UnitsReport {
    pub created: Vec<String>,
    pub skipped: Vec<String>,
    pub failed: Vec<String>,
}

impl UnitsReport {
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

impl fmt::Display for UnitsReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let groups = [
            ("created", &self.created),
            ("already present", &self.skipped),
            ("failed", &self.failed),
        ];
        for (label, names) in groups {
            if !names.is_empty() {
                writeln!(f, "units {label}: {}", names.join(", "))?;
            }
        }
        Ok(())
    }
}

/// Create `units`, skipping names the server already defines.
///
/// # Errors
///
/// Only when the existing units cannot be listed; individual creation
/// failures are recorded in the report.
pub async fn create_units(api: &dyn InventoryApi, units: &[UnitDefinition]) -> Result<UnitsReport, CatalogError> {
    let existing: Vec<String> = records_from(api.get(UNITS_ENDPOINT, &[]).await?)?
        .iter()
        .map(|unit| str_field(unit, "name").to_string())
        .collect();

    let mut report = UnitsReport::default();
    for unit in units {
        if existing.iter().any(|name| name == unit.name) {
            report.skipped.push(unit.name.to_string());
            continue;
        }
        let body = json!({
            "name": unit.name,
            "definition": unit.definition,
            "symbol": unit.symbol,
        });
        match api.post(UNITS_ENDPOINT, &body).await {
            Ok(_) => {
                info!(unit = unit.name, symbol = unit.symbol, "created unit");
                report.created.push(unit.name.to_string());
            }
            Err(err) => {
                warn!(unit = unit.name, %err, "failed to create unit");
                report.failed.push(unit.name.to_string());
            }
        }
    }
    Ok(report)
}

/// Create [`DEFAULT_UNITS`].
///
/// # Errors
///
/// See [`create_units`].
pub async fn create_default_units(api: &dyn InventoryApi) -> Result<UnitsReport, CatalogError> {
    create_units(api, &DEFAULT_UNITS).await
}
