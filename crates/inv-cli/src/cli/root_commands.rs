use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::cli::subcommands::{BomCommands, DeleteCommands};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Erase all records in the InvenTree database.
    Reset(ResetArgs),
    /// Apply migrations and initialize the database schema.
    Setup(SetupArgs),
    /// Back up the database and media files.
    Backup,
    /// Restore the database and media files from the latest backup.
    Restore,
    /// Export database records to a file.
    ExportRecords(RecordFileArgs),
    /// Import database records from a file.
    ImportRecords(ImportRecordsArgs),
    /// Install the KiCad plugin, apply settings and create default units.
    Init,
    /// Import parameter templates and parts from a directory of CSV files.
    Import(ImportArgs),
    /// Bulk deletion of catalog records.
    Delete {
        #[command(subcommand)]
        action: DeleteCommands,
    },
    /// Create the default custom units.
    Units,
    /// BOM tools.
    Bom {
        #[command(subcommand)]
        action: BomCommands,
    },
    /// Print the effective configuration with secrets masked.
    Config,
    /// Parse a parameter value the way the importer does.
    Value(ValueArgs),
}

#[derive(Clone, Debug, Args)]
pub struct ResetArgs {
    /// Skip the confirmation prompt of the server task.
    #[arg(long)]
    pub force: bool,
}

#[derive(Clone, Debug, Args)]
pub struct SetupArgs {
    /// Erase all records before applying migrations.
    #[arg(long)]
    pub reset: bool,
    /// Skip the confirmation prompt when resetting.
    #[arg(long, requires = "reset")]
    pub force: bool,
}

#[derive(Clone, Debug, Args)]
pub struct RecordFileArgs {
    /// Records file, relative to the server's working directory.
    pub file: String,
}

#[derive(Clone, Debug, Args)]
pub struct ImportRecordsArgs {
    /// Records file, relative to the server's working directory.
    pub file: String,
    /// Clear existing records first.
    #[arg(long)]
    pub clear: bool,
}

#[derive(Clone, Debug, Args)]
pub struct ImportArgs {
    /// Directory containing the CSV files.
    pub directory: PathBuf,
    /// Maximum rows imported per database file.
    #[arg(long)]
    pub limit: Option<usize>,
    /// Stock quantity per supplier part (overrides configuration).
    #[arg(long)]
    pub initial_stock: Option<u32>,
}

#[derive(Clone, Debug, Args)]
pub struct ValueArgs {
    /// Raw cell text, e.g. "4.7 nF".
    pub raw: String,
    /// Unit from the column header; `str` keeps the text as is.
    #[arg(long, default_value = "")]
    pub unit: String,
}
