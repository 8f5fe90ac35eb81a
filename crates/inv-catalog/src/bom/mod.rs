//! BOM tools for KiCad exports that carry an `InvenTree PK` column.

mod assemble;
mod resolve;

pub use assemble::{AssemblyReport, AssemblySpec, MpnIndex, assemble_bom};
pub use resolve::{BomResolveReport, default_output, resolve_bom, resolve_bom_file};

use inv_core::Pk;

pub const PK_COLUMN: &str = "InvenTree PK";
pub const QUANTITY_COLUMN: &str = "Quantity";
pub const REFERENCE_COLUMN: &str = "Reference";
pub const MPN_PARAMETER: &str = "MPN";

/// Alternative part columns, also used as substitute sources.
pub const SUBSTITUTE_COLUMNS: [&str; 3] = ["MPN1", "MPN2", "MPN3"];

/// Joins several values written into one `MPN<i>`/`Manufacturer<i>` cell.
pub const VALUE_SEPARATOR: &str = "; ";

/// Individual values of a cell written by [`resolve_bom`].
fn cell_values(cell: &str) -> impl Iterator<Item = &str> {
    cell.split(VALUE_SEPARATOR.trim())
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

/// Parse a pk cell; spreadsheet exports sometimes write `12.0`.
fn parse_pk(cell: &str) -> Option<Pk> {
    let cell = cell.trim();
    cell.parse::<Pk>().ok().or_else(|| {
        cell.strip_suffix(".0")
            .and_then(|whole| whole.parse::<Pk>().ok())
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::EntityResolver;
    use crate::table::CsvTable;
    use crate::test_support::fake::FakeApi;

    #[test]
    fn pk_cells_accept_float_notation() {
        assert_eq!(parse_pk("12"), Some(12));
        assert_eq!(parse_pk(" 12.0 "), Some(12));
        assert_eq!(parse_pk("12.5"), None);
        assert_eq!(parse_pk("abc"), None);
    }

    #[test]
    fn cells_split_into_values() {
        assert_eq!(cell_values("OLD; RC0402").collect::<Vec<_>>(), ["OLD", "RC0402"]);
        assert_eq!(cell_values("ERJ-2").collect::<Vec<_>>(), ["ERJ-2"]);
        assert_eq!(cell_values(" ; ").count(), 0);
    }

    #[tokio::test]
    async fn resolved_bom_feeds_assembly_substitutes() {
        let api = FakeApi::new();
        api.seed("part/related/", vec![json!({"pk": 1, "part_1": 10, "part_2": 20})]);
        api.seed(
            "company/part/manufacturer/",
            vec![json!({"pk": 7, "part": 20, "MPN": "RC0402", "manufacturer_detail": {"name": "Yageo"}})],
        );
        api.seed("part/parameter/template/", vec![json!({"pk": 5, "name": "MPN"})]);
        api.seed(
            "part/parameter/",
            vec![json!({"pk": 2, "part": 20, "template": 5, "data": "RC0402"})],
        );
        let mut table = CsvTable::from_reader(
            "flasher.csv",
            "Reference,Quantity,InvenTree PK,MPN1\nR1,1,10,OLD\n".as_bytes(),
        )
        .unwrap();

        resolve_bom(&api, &mut table).await.unwrap();
        assert_eq!(table.cell(0, "MPN1"), Some("OLD; RC0402"));

        let spec = AssemblySpec {
            name: "flasher".into(),
            ..AssemblySpec::default()
        };
        let mut resolver = EntityResolver::new(&api);
        let report = assemble_bom(&mut resolver, &table, &spec).await.unwrap();

        assert_eq!(report.substitutes_created, 1);
        assert_eq!(report.unknown_mpns, vec!["OLD"]);
        assert_eq!(api.records("bom/substitute/")[0].clone()["part"], 20);
    }
}
