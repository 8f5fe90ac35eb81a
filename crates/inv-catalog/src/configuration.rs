//! `*Configuration.csv` files: parameter template definitions.
//!
//! Each non-empty `PARAMETER` cell holds a JSON object describing a
//! parameter template. Values may reference another column as `$COLUMN`;
//! for `choices` the reference expands to that column's distinct values.

use std::sync::LazyLock;

use inv_core::EntityKind;
use regex::Regex;
use serde_json::Value;
use tracing::{info, warn};

use crate::error::CatalogError;
use crate::import::{FileKind, FileReport};
use crate::resolver::EntityResolver;
use crate::table::CsvTable;

pub const PARAMETER_COLUMN: &str = "PARAMETER";

static COLUMN_REFERENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(:\s*)\$([A-Za-z0-9_]+)").expect("reference pattern is valid"));

/// Quote bare `$COLUMN` values so the cell parses as JSON.
#[must_use]
pub fn quote_column_refs(raw: &str) -> String {
    COLUMN_REFERENCE
        .replace_all(raw, r#"${1}"$$${2}""#)
        .into_owned()
}

/// Parse one `PARAMETER` cell into a template definition.
///
/// # Errors
///
/// [`CatalogError::InvalidParameter`] when the cell is not a JSON object.
pub fn parse_template(
    table: &CsvTable,
    row: usize,
    raw: &str,
) -> Result<serde_json::Map<String, Value>, CatalogError> {
    let quoted = quote_column_refs(raw);
    let value: Value = serde_json::from_str(&quoted).map_err(|e| CatalogError::InvalidParameter {
        row,
        reason: e.to_string(),
    })?;
    let Value::Object(mut template) = value else {
        return Err(CatalogError::InvalidParameter {
            row,
            reason: "expected a JSON object".into(),
        });
    };

    let column = template
        .get("choices")
        .and_then(Value::as_str)
        .and_then(|choices| choices.strip_prefix('$'))
        .map(str::to_string);
    if let Some(column) = column {
        let choices = table.distinct(&column).join(", ");
        template.insert("choices".into(), Value::String(choices));
    }
    Ok(template)
}

/// Create the parameter templates defined in a configuration sheet.
///
/// Rows that fail to parse or resolve are logged and skipped.
///
/// # Errors
///
/// Only when the table itself lacks a `PARAMETER` column.
pub async fn process_configuration_table(
    resolver: &mut EntityResolver<'_>,
    table: &CsvTable,
) -> Result<FileReport, CatalogError> {
    let mut report = FileReport::new(table.name(), FileKind::Configuration);
    let column = table.require_column(PARAMETER_COLUMN)?;
    info!(file = table.name(), rows = table.len(), "processing configuration file");

    for row in table.rows() {
        let Some(raw) = row.at(column) else {
            continue;
        };
        report.rows += 1;
        let result = match parse_template(table, row.index(), raw) {
            Ok(template) => resolver.resolve(EntityKind::ParameterTemplate, &template).await,
            Err(err) => Err(err),
        };
        match result {
            Ok(_) => report.templates += 1,
            Err(err) => {
                warn!(row = row.index(), parameter = raw, %err, "skipping parameter template");
                report.failed_rows += 1;
            }
        }
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::test_support::fake::FakeApi;

    const CONFIG: &str = r#"PARAMETER,PACKAGES
"{""name"": ""FOOTPRINT"", ""units"": """"}",0402
"{""name"": ""PACKAGE"", ""choices"": $PACKAGES}",0603
"{""name"": ""MOUNT"", ""choices"": $MISSING}",0402
not json,
,0805
"#;

    fn table() -> CsvTable {
        CsvTable::from_reader("ResistorConfiguration.csv", CONFIG.as_bytes()).unwrap()
    }

    #[test]
    fn bare_references_are_quoted() {
        assert_eq!(
            quote_column_refs(r#"{"choices": $PACKAGES, "x": "$KEEP"}"#),
            r#"{"choices": "$PACKAGES", "x": "$KEEP"}"#
        );
    }

    #[test]
    fn choices_expand_to_distinct_column_values() {
        let table = table();
        let template = parse_template(&table, 1, r#"{"name": "PACKAGE", "choices": $PACKAGES}"#).unwrap();
        assert_eq!(template["choices"], json!("0402, 0603, 0805"));
    }

    #[test]
    fn unknown_choice_column_expands_to_empty() {
        let table = table();
        let template = parse_template(&table, 2, r#"{"name": "MOUNT", "choices": $MISSING}"#).unwrap();
        assert_eq!(template["choices"], json!(""));
    }

    #[test]
    fn non_object_is_rejected() {
        let table = table();
        let err = parse_template(&table, 0, "[1, 2]").unwrap_err();
        assert!(matches!(err, CatalogError::InvalidParameter { row: 0, .. }));
    }

    #[tokio::test]
    async fn creates_templates_and_skips_bad_rows() {
        let api = FakeApi::new();
        let mut resolver = EntityResolver::new(&api);

        let report = process_configuration_table(&mut resolver, &table()).await.unwrap();

        assert_eq!(report.rows, 4);
        assert_eq!(report.templates, 3);
        assert_eq!(report.failed_rows, 1);
        let names: Vec<Value> = api
            .records("part/parameter/template/")
            .iter()
            .map(|t| t["name"].clone())
            .collect();
        assert_eq!(names, vec![json!("FOOTPRINT"), json!("PACKAGE"), json!("MOUNT")]);
    }

    #[tokio::test]
    async fn sheet_without_parameter_column_is_an_error() {
        let api = FakeApi::new();
        let mut resolver = EntityResolver::new(&api);
        let table = CsvTable::from_reader("XConfiguration.csv", "A,B\n1,2\n".as_bytes()).unwrap();
        let err = process_configuration_table(&mut resolver, &table).await.unwrap_err();
        assert!(matches!(err, CatalogError::MissingColumn { .. }));
    }
}
