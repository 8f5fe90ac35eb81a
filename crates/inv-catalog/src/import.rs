//! Directory import: configuration sheets first, then database sheets.

use std::fmt;
use std::path::{Path, PathBuf};

use inv_config::InvConfig;
use serde::Serialize;
use tracing::{info, warn};

use crate::configuration::process_configuration_table;
use crate::database::{DatabaseOptions, process_database_table};
use crate::error::CatalogError;
use crate::plugin::KicadPlugin;
use crate::relations::{PendingRelations, RelationSummary};
use crate::resolver::EntityResolver;
use crate::stock::default_location;
use crate::suppliers::InitialStock;
use crate::table::CsvTable;

const CONFIGURATION_SUFFIX: &str = "Configuration";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FileKind {
    Configuration,
    Database,
}

impl FileKind {
    /// `*Configuration.csv` files define parameter templates.
    #[must_use]
    pub fn of(path: &Path) -> Self {
        let is_configuration = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .is_some_and(|stem| stem.ends_with(CONFIGURATION_SUFFIX));
        if is_configuration {
            Self::Configuration
        } else {
            Self::Database
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Configuration => "configuration",
            Self::Database => "database",
        }
    }
}

/// Counts for one imported file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileReport {
    pub file: String,
    pub kind: FileKind,
    pub rows: usize,
    pub templates: usize,
    pub parts: usize,
    pub parameters: usize,
    pub manufacturer_parts: usize,
    pub supplier_parts: usize,
    pub stock_items: usize,
    pub warnings: usize,
    pub failed_rows: usize,
}

impl FileReport {
    #[must_use]
    pub fn new(file: &str, kind: FileKind) -> Self {
        Self {
            file: file.to_string(),
            kind,
            rows: 0,
            templates: 0,
            parts: 0,
            parameters: 0,
            manufacturer_parts: 0,
            supplier_parts: 0,
            stock_items: 0,
            warnings: 0,
            failed_rows: 0,
        }
    }
}

impl fmt::Display for FileReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): {} rows", self.file, self.kind.as_str(), self.rows)?;
        match self.kind {
            FileKind::Configuration => write!(f, ", {} templates", self.templates)?,
            FileKind::Database => write!(
                f,
                ", {} parts, {} parameters, {} manufacturer parts, {} supplier parts, {} stock items",
                self.parts, self.parameters, self.manufacturer_parts, self.supplier_parts, self.stock_items
            )?,
        }
        if self.warnings > 0 {
            write!(f, ", {} warnings", self.warnings)?;
        }
        if self.failed_rows > 0 {
            write!(f, ", {} failed rows", self.failed_rows)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportReport {
    pub files: Vec<FileReport>,
    pub relations: RelationSummary,
}

impl ImportReport {
    #[must_use]
    pub fn total_parts(&self) -> usize {
        self.files.iter().map(|f| f.parts).sum()
    }

    #[must_use]
    pub fn total_warnings(&self) -> usize {
        self.files.iter().map(|f| f.warnings + f.failed_rows).sum::<usize>() + self.relations.skipped + self.relations.failed
    }
}

impl fmt::Display for ImportReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for file in &self.files {
            writeln!(f, "{file}")?;
        }
        write!(
            f,
            "{} files, {} parts, {} relations created ({} skipped, {} failed)",
            self.files.len(),
            self.total_parts(),
            self.relations.created,
            self.relations.skipped,
            self.relations.failed
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportOptions {
    pub site_url: String,
    /// Maximum rows imported per database file.
    pub limit: Option<usize>,
    /// Quantity per supplier part; 0 creates no stock.
    pub initial_stock: u32,
    pub stock_location: String,
}

impl ImportOptions {
    #[must_use]
    pub fn from_config(config: &InvConfig) -> Self {
        Self {
            site_url: config.api.site_url.clone(),
            limit: None,
            initial_stock: config.import.initial_stock,
            stock_location: config.import.stock_location.clone(),
        }
    }

    #[must_use]
    pub const fn with_limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit;
        self
    }
}

/// CSV files of `dir` in import order: configuration files, then database
/// files, each group sorted by file name.
///
/// # Errors
///
/// [`CatalogError::DirectoryNotFound`] when `dir` is not a readable directory.
pub fn import_order(dir: &Path) -> Result<Vec<(FileKind, PathBuf)>, CatalogError> {
    let entries = std::fs::read_dir(dir).map_err(|_| CatalogError::DirectoryNotFound(dir.to_path_buf()))?;
    let mut files: Vec<(FileKind, PathBuf)> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_file()
                && path
                    .extension()
                    .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
        })
        .map(|path| (FileKind::of(&path), path))
        .collect();
    files.sort_by(|(a_kind, a), (b_kind, b)| {
        let rank = |kind: &FileKind| matches!(kind, FileKind::Database);
        rank(a_kind)
            .cmp(&rank(b_kind))
            .then_with(|| a.file_name().cmp(&b.file_name()))
    });
    Ok(files)
}

/// Import every CSV file in `dir`, then create the queued part relations.
///
/// # Errors
///
/// A missing directory, unreadable CSV, or a fatal row error in any file.
pub async fn import_directory(
    resolver: &mut EntityResolver<'_>,
    plugin: &mut KicadPlugin,
    dir: &Path,
    options: &ImportOptions,
) -> Result<ImportReport, CatalogError> {
    let files = import_order(dir)?;
    info!(dir = %dir.display(), files = files.len(), "importing directory");
    if files.is_empty() {
        warn!(dir = %dir.display(), "no CSV files found");
    }

    let stock = initial_stock(resolver, options).await;
    let mut pending = PendingRelations::default();
    let mut report = ImportReport::default();

    for (kind, path) in files {
        let table = CsvTable::read(&path)?;
        let file_report = match kind {
            FileKind::Configuration => process_configuration_table(resolver, &table).await?,
            FileKind::Database => {
                let db_options = DatabaseOptions {
                    site_url: &options.site_url,
                    limit: options.limit,
                    stock,
                };
                process_database_table(resolver, plugin, &table, db_options, &mut pending).await?
            }
        };
        info!(%file_report, "file imported");
        report.files.push(file_report);
    }

    report.relations = pending.resolve(resolver).await;
    Ok(report)
}

async fn initial_stock(resolver: &mut EntityResolver<'_>, options: &ImportOptions) -> Option<InitialStock> {
    if options.initial_stock == 0 {
        return None;
    }
    match default_location(resolver, &options.stock_location).await {
        Ok(location) => Some(InitialStock {
            quantity: options.initial_stock,
            location,
        }),
        Err(err) => {
            warn!(location = %options.stock_location, %err, "no stock location, skipping initial stock");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use inv_config::PluginConfig;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::test_support::fake::FakeApi;

    fn options() -> ImportOptions {
        ImportOptions {
            site_url: "http://inv.local".into(),
            limit: None,
            initial_stock: 0,
            stock_location: "Default".into(),
        }
    }

    fn write(dir: &Path, name: &str, contents: &str) {
        fs::write(dir.join(name), contents).unwrap();
    }

    #[test]
    fn configuration_files_sort_first() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "Resistors.csv", "");
        write(dir.path(), "Capacitors.csv", "");
        write(dir.path(), "ResistorConfiguration.csv", "");
        write(dir.path(), "AConfiguration.CSV", "");
        write(dir.path(), "notes.txt", "");

        let order: Vec<(FileKind, String)> = import_order(dir.path())
            .unwrap()
            .into_iter()
            .map(|(kind, path)| (kind, path.file_name().unwrap().to_string_lossy().into_owned()))
            .collect();
        assert_eq!(
            order,
            vec![
                (FileKind::Configuration, "AConfiguration.CSV".to_string()),
                (FileKind::Configuration, "ResistorConfiguration.csv".to_string()),
                (FileKind::Database, "Capacitors.csv".to_string()),
                (FileKind::Database, "Resistors.csv".to_string()),
            ]
        );
    }

    #[test]
    fn missing_directory_is_a_file_error() {
        let err = import_order(Path::new("/no/such/dir")).unwrap_err();
        assert!(matches!(err, CatalogError::DirectoryNotFound(_)));
        assert_eq!(err.code().as_i32(), 10);
    }

    #[tokio::test]
    async fn imports_directory_and_resolves_relations_across_files() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "ResistorConfiguration.csv",
            "PARAMETER\n\"{\"\"name\"\": \"\"RESISTANCE\"\", \"\"units\"\": \"\"Ω\"\"}\"\n",
        );
        write(
            dir.path(),
            "A_Generic.csv",
            "CATEGORY,TYPE,NAME,DESCRIPTION,MANUFACTURER,RELATEDPARTS\n\
             Resistor,generic,R_generic,any,,R_0402\n",
        );
        write(
            dir.path(),
            "B_Specific.csv",
            "CATEGORY,TYPE,NAME,DESCRIPTION,RESISTANCE [Ω],MANUFACTURER\n\
             Resistor,specific,R_0402,1k,1k,Yageo\n",
        );

        let api = FakeApi::new();
        let mut resolver = EntityResolver::new(&api);
        let mut plugin = KicadPlugin::new(PluginConfig::default());

        let report = import_directory(&mut resolver, &mut plugin, dir.path(), &options())
            .await
            .unwrap();

        assert_eq!(report.files.len(), 3);
        assert_eq!(report.files[0].kind, FileKind::Configuration);
        assert_eq!(report.files[0].templates, 1);
        assert_eq!(report.total_parts(), 2);
        assert_eq!(report.relations.created, 1);
        assert_eq!(api.records("part/related/").len(), 1);
        assert_eq!(api.records("part/parameter/template/").len(), 1);
        assert!(report.to_string().ends_with("3 files, 2 parts, 1 relations created (0 skipped, 0 failed)"));
    }

    #[tokio::test]
    async fn initial_stock_uses_the_configured_location() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "Parts.csv",
            "CATEGORY,TYPE,NAME,DESCRIPTION,MANUFACTURER,MPN,SUPPLIER1,SKU1\n\
             Resistor,specific,R1,d,Yageo,RC1,Digikey,311\n",
        );
        let api = FakeApi::new();
        let mut resolver = EntityResolver::new(&api);
        let mut plugin = KicadPlugin::new(PluginConfig::default());
        let mut options = options();
        options.initial_stock = 5;
        options.stock_location = "Shelf".into();

        let report = import_directory(&mut resolver, &mut plugin, dir.path(), &options)
            .await
            .unwrap();

        assert_eq!(report.files[0].stock_items, 1);
        let location = api.records("stock/location/")[0].clone();
        assert_eq!(location["name"], "Shelf");
        assert_eq!(api.records("stock/")[0]["location"], location["pk"]);
    }

    #[test]
    fn file_report_display_lists_counts() {
        let mut report = FileReport::new("Resistors.csv", FileKind::Database);
        report.rows = 2;
        report.parts = 2;
        report.warnings = 1;
        assert_eq!(
            report.to_string(),
            "Resistors.csv (database): 2 rows, 2 parts, 0 parameters, 0 manufacturer parts, \
             0 supplier parts, 0 stock items, 1 warnings"
        );
    }
}
