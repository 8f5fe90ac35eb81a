//! Build an assembly part and its BOM from a resolved BOM export.

use std::collections::{HashMap, HashSet};
use std::fmt;

use inv_api::{InventoryApi, list_entities, pk_of, records_from, str_field};
use inv_core::{EntityKind, Pk};
use serde::Serialize;
use serde_json::{Value, json};
use tracing::{debug, info, warn};

use super::{
    MPN_PARAMETER, PK_COLUMN, QUANTITY_COLUMN, REFERENCE_COLUMN, SUBSTITUTE_COLUMNS, cell_values, parse_pk,
};
use crate::error::CatalogError;
use crate::resolver::EntityResolver;
use crate::table::CsvTable;

const SUBSTITUTE_ENDPOINT: &str = "bom/substitute/";
const ASSEMBLY_CATEGORY: &str = "PCBA";

/// Identity of the assembly part.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssemblySpec {
    pub name: String,
    pub ipn: Option<String>,
    pub revision: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AssemblyReport {
    pub assembly: Pk,
    pub bom_items: usize,
    pub skipped_rows: usize,
    pub substitutes_created: usize,
    pub substitutes_existing: usize,
    pub unknown_mpns: Vec<String>,
}

impl fmt::Display for AssemblyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "assembly part {}: {} BOM items", self.assembly, self.bom_items)?;
        writeln!(
            f,
            "substitutes: {} created, {} already present",
            self.substitutes_created, self.substitutes_existing
        )?;
        if self.skipped_rows > 0 {
            writeln!(f, "{} rows without InvenTree PK skipped", self.skipped_rows)?;
        }
        if !self.unknown_mpns.is_empty() {
            writeln!(f, "unknown MPNs: {}", self.unknown_mpns.join(", "))?;
        }
        Ok(())
    }
}

/// Part pk by the value of its `MPN` parameter.
#[derive(Debug, Clone, Default)]
pub struct MpnIndex {
    parts: HashMap<String, Pk>,
}

impl MpnIndex {
    /// Load every `MPN` parameter from the server.
    ///
    /// # Errors
    ///
    /// API errors from the template or parameter listing.
    pub async fn load(api: &dyn InventoryApi) -> Result<Self, CatalogError> {
        let templates = list_entities(
            api,
            EntityKind::ParameterTemplate,
            &[("name", MPN_PARAMETER.to_string())],
        )
        .await?;
        let Some(template) = templates
            .iter()
            .find(|t| str_field(t, "name") == MPN_PARAMETER)
            .and_then(pk_of)
        else {
            warn!("no MPN parameter template, substitutes cannot be matched");
            return Ok(Self::default());
        };

        let parameters = list_entities(api, EntityKind::Parameter, &[("template", template.to_string())]).await?;
        let parts = parameters
            .iter()
            .filter(|p| p.get("template").and_then(Value::as_u64) == Some(template))
            .filter_map(|p| {
                let part = p.get("part").and_then(Value::as_u64)?;
                Some((str_field(p, "data").to_string(), part))
            })
            .collect();
        Ok(Self { parts })
    }

    #[must_use]
    pub fn part_for(&self, mpn: &str) -> Option<Pk> {
        self.parts.get(mpn).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }
}

/// Create the assembly and its BOM, then mark the BOM validated.
///
/// Rows without an `InvenTree PK` are skipped. Substitutes are added for
/// `MPN1`..`MPN3` values that match a part's `MPN` parameter.
///
/// # Errors
///
/// [`CatalogError::InvalidAssembly`] for an empty name, missing columns, or
/// unparsable quantities; [`CatalogError::Bom`] when a BOM item cannot be
/// created; API errors from the assembly part or validation.
pub async fn assemble_bom(
    resolver: &mut EntityResolver<'_>,
    table: &CsvTable,
    spec: &AssemblySpec,
) -> Result<AssemblyReport, CatalogError> {
    if spec.name.trim().is_empty() {
        return Err(CatalogError::InvalidAssembly("assembly name is empty".into()));
    }
    for column in [PK_COLUMN, QUANTITY_COLUMN, REFERENCE_COLUMN] {
        if !table.has_column(column) {
            return Err(CatalogError::InvalidAssembly(format!(
                "{} has no '{column}' column",
                table.name()
            )));
        }
    }

    let api = resolver.api();
    let category = resolver
        .resolve_value(
            EntityKind::PartCategory,
            json!({ "name": ASSEMBLY_CATEGORY, "parent": null }),
        )
        .await?;
    let assembly = resolver
        .resolve_value(
            EntityKind::Part,
            json!({
                "name": spec.name,
                "category": category,
                "IPN": spec.ipn.as_deref().unwrap_or_default(),
                "revision": spec.revision.as_deref().unwrap_or_default(),
                "assembly": true,
                "component": false,
            }),
        )
        .await?;
    info!(assembly, name = %spec.name, "assembly part ready");

    let mut existing: HashSet<(Pk, Pk)> = records_from(api.get(SUBSTITUTE_ENDPOINT, &[]).await?)?
        .iter()
        .filter_map(|s| {
            let bom_item = s.get("bom_item").and_then(Value::as_u64)?;
            let part = s.get("part").and_then(Value::as_u64)?;
            Some((bom_item, part))
        })
        .collect();
    let mut index: Option<MpnIndex> = None;

    let mut report = AssemblyReport {
        assembly,
        ..AssemblyReport::default()
    };
    for row in table.rows() {
        let Some(sub_part) = row.get(PK_COLUMN).and_then(parse_pk) else {
            warn!(row = row.index(), reference = row.get(REFERENCE_COLUMN).unwrap_or_default(), "no InvenTree PK, skipping");
            report.skipped_rows += 1;
            continue;
        };
        let quantity = row
            .get(QUANTITY_COLUMN)
            .and_then(|q| q.parse::<f64>().ok())
            .ok_or_else(|| {
                CatalogError::InvalidAssembly(format!("row {}: invalid quantity", row.index()))
            })?;

        let bom_item = resolver
            .resolve_value(
                EntityKind::BomItem,
                json!({
                    "part": assembly,
                    "sub_part": sub_part,
                    "quantity": quantity,
                    "reference": row.get(REFERENCE_COLUMN).unwrap_or_default(),
                    "validated": true,
                }),
            )
            .await
            .map_err(|err| CatalogError::Bom(format!("row {}: {err}", row.index())))?;
        report.bom_items += 1;

        let mpns = SUBSTITUTE_COLUMNS
            .iter()
            .filter_map(|column| row.get(column))
            .flat_map(cell_values);
        for mpn in mpns {
            if index.is_none() {
                index = Some(MpnIndex::load(api).await?);
            }
            let Some(part) = index.as_ref().and_then(|i| i.part_for(mpn)) else {
                warn!(mpn, "MPN not found in any part");
                report.unknown_mpns.push(mpn.to_string());
                continue;
            };
            if !existing.insert((bom_item, part)) {
                debug!(bom_item, part, "substitute already exists");
                report.substitutes_existing += 1;
                continue;
            }
            api.post(SUBSTITUTE_ENDPOINT, &json!({ "bom_item": bom_item, "part": part }))
                .await?;
            debug!(bom_item, part, "created substitute");
            report.substitutes_created += 1;
        }
    }

    api.patch(&format!("part/{assembly}/bom-validate/"), &json!({ "valid": true }))
        .await?;
    info!(assembly, items = report.bom_items, "BOM validated");
    Ok(report)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::test_support::fake::FakeApi;

    const BOM: &str = "\
Reference,Quantity,InvenTree PK,MPN1,MPN2
\"R1,R2\",2,10,ERJ-2,NOPE
C1,1,11,,
J1,1,,,
";

    fn seeded() -> FakeApi {
        let api = FakeApi::new();
        api.seed("part/parameter/template/", vec![json!({"pk": 5, "name": "MPN"})]);
        api.seed(
            "part/parameter/",
            vec![json!({"pk": 1, "part": 30, "template": 5, "data": "ERJ-2"})],
        );
        api
    }

    fn spec() -> AssemblySpec {
        AssemblySpec {
            name: "led-flasher".into(),
            ipn: Some("PCBA-001".into()),
            revision: None,
        }
    }

    #[tokio::test]
    async fn builds_assembly_items_and_substitutes() {
        let api = seeded();
        let mut resolver = EntityResolver::new(&api);
        let table = CsvTable::from_reader("led-flasher.csv", BOM.as_bytes()).unwrap();

        let report = assemble_bom(&mut resolver, &table, &spec()).await.unwrap();

        assert_eq!(report.bom_items, 2);
        assert_eq!(report.skipped_rows, 1);
        assert_eq!(report.substitutes_created, 1);
        assert_eq!(report.unknown_mpns, vec!["NOPE"]);

        let category = api.records("part/category/")[0].clone();
        assert_eq!(category["name"], "PCBA");
        let assembly = api.records("part/")[0].clone();
        assert_eq!(assembly["assembly"], true);
        assert_eq!(assembly["IPN"], "PCBA-001");
        assert_eq!(assembly["category"], category["pk"]);

        let items = api.records("bom/");
        assert_eq!(items[0]["reference"], "R1,R2");
        assert_eq!(items[0]["quantity"], 2.0);
        assert_eq!(items[0]["validated"], true);

        let substitute = api.records("bom/substitute/")[0].clone();
        assert_eq!(substitute["part"], 30);
        assert_eq!(substitute["bom_item"], items[0]["pk"]);

        let validate = format!("part/{}/bom-validate/", report.assembly);
        assert_eq!(api.calls_to("PATCH", &validate)[0].body, json!({"valid": true}));
    }

    #[tokio::test]
    async fn existing_substitutes_are_not_duplicated() {
        let api = seeded();
        let mut resolver = EntityResolver::new(&api);
        let table = CsvTable::from_reader("led-flasher.csv", BOM.as_bytes()).unwrap();
        let first = assemble_bom(&mut resolver, &table, &spec()).await.unwrap();

        let mut resolver = EntityResolver::new(&api);
        let second = assemble_bom(&mut resolver, &table, &spec()).await.unwrap();

        assert_eq!(first.assembly, second.assembly);
        assert_eq!(second.substitutes_created, 0);
        assert_eq!(second.substitutes_existing, 1);
        assert_eq!(api.records("bom/substitute/").len(), 1);
        assert_eq!(api.records("bom/").len(), 2);
    }

    #[tokio::test]
    async fn missing_columns_and_names_are_rejected() {
        let api = FakeApi::new();
        let mut resolver = EntityResolver::new(&api);
        let table = CsvTable::from_reader("x.csv", "Reference,Quantity\nR1,1\n".as_bytes()).unwrap();

        let err = assemble_bom(&mut resolver, &table, &spec()).await.unwrap_err();
        assert!(matches!(err, CatalogError::InvalidAssembly(_)));

        let unnamed = AssemblySpec::default();
        let err = assemble_bom(&mut resolver, &table, &unnamed).await.unwrap_err();
        assert_eq!(err.code().as_i32(), 4);
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn bad_quantity_is_invalid_assembly_data() {
        let api = FakeApi::new();
        let mut resolver = EntityResolver::new(&api);
        let table = CsvTable::from_reader(
            "x.csv",
            "Reference,Quantity,InvenTree PK\nR1,two,10\n".as_bytes(),
        )
        .unwrap();

        let err = assemble_bom(&mut resolver, &table, &spec()).await.unwrap_err();
        assert!(matches!(err, CatalogError::InvalidAssembly(ref m) if m.contains("quantity")));
    }

    #[tokio::test]
    async fn mpn_index_maps_parameter_data_to_parts() {
        let api = seeded();
        let index = MpnIndex::load(&api).await.unwrap();
        assert_eq!(index.part_for("ERJ-2"), Some(30));
        assert_eq!(index.len(), 1);

        let empty = MpnIndex::load(&FakeApi::new()).await.unwrap();
        assert!(empty.is_empty());
    }
}
