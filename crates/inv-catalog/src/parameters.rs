//! Part parameters from the columns between `DESCRIPTION` and `MANUFACTURER`.

use inv_core::{EntityKind, Pk, parse_parameter_value};
use serde_json::json;
use tracing::{debug, warn};

use crate::error::CatalogError;
use crate::parts::DESCRIPTION_COLUMN;
use crate::resolver::EntityResolver;
use crate::suppliers::MANUFACTURER_COLUMN;
use crate::table::Row;

/// Split a `NAME [unit]` header into name and unit.
#[must_use]
pub fn split_header(header: &str) -> (&str, &str) {
    match header.split_once('[') {
        Some((name, rest)) if rest.contains(']') => {
            let unit = rest.split(']').next().unwrap_or_default();
            (name.trim(), unit.trim())
        }
        _ => (header.trim(), ""),
    }
}

/// Counts for one row's parameters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParameterOutcome {
    pub created: usize,
    pub failed: usize,
}

/// Create a parameter (and its template) for every parameter column.
///
/// Empty cells are stored as `-`. Individual parameter failures are logged
/// and counted.
///
/// # Errors
///
/// [`CatalogError::MissingColumn`] when the sheet lacks either bound column.
pub async fn create_parameters(
    resolver: &mut EntityResolver<'_>,
    row: &Row<'_>,
    part: Pk,
) -> Result<ParameterOutcome, CatalogError> {
    let columns = row.between(DESCRIPTION_COLUMN, MANUFACTURER_COLUMN)?;
    let mut outcome = ParameterOutcome::default();
    if columns.is_empty() {
        warn!(part, "no parameter columns between DESCRIPTION and MANUFACTURER");
        return Ok(outcome);
    }

    for (header, raw) in columns {
        let (name, unit) = split_header(header);
        if name.is_empty() {
            warn!(header, "invalid parameter header, skipping");
            outcome.failed += 1;
            continue;
        }

        let result = async {
            let template = resolver
                .resolve_value(EntityKind::ParameterTemplate, json!({ "name": name }))
                .await?;
            let value = parse_parameter_value(raw, unit);
            resolver
                .resolve_value(
                    EntityKind::Parameter,
                    json!({
                        "part": part,
                        "template": template,
                        "data": value.display,
                        "data_numeric": value.numeric,
                    }),
                )
                .await
        }
        .await;

        match result {
            Ok(pk) => {
                debug!(part, parameter = name, pk, "parameter stored");
                outcome.created += 1;
            }
            Err(err) => {
                warn!(part, parameter = name, unit, %err, "failed to store parameter");
                outcome.failed += 1;
            }
        }
    }
    Ok(outcome)
}
