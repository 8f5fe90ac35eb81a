use std::path::PathBuf;

use clap::Subcommand;

/// `invt delete` actions.
#[derive(Clone, Debug, Subcommand)]
pub enum DeleteCommands {
    /// Delete every record of every kind, dependents first.
    All {
        /// Skip the confirmation prompt.
        #[arg(long)]
        yes: bool,
    },
    /// Delete every record of one kind.
    Kind {
        /// Entity kind, e.g. Part or ParameterTemplate.
        kind: String,
        /// Skip the confirmation prompt.
        #[arg(long)]
        yes: bool,
    },
    /// List the kinds that can be deleted.
    List,
}

/// `invt bom` actions.
#[derive(Clone, Debug, Subcommand)]
pub enum BomCommands {
    /// Append MPN/manufacturer columns from related parts.
    Resolve {
        /// BOM CSV with an `InvenTree PK` column.
        file: PathBuf,
        /// Output file (defaults to `<stem>_resolved.csv`).
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Create an assembly part with BOM items and substitutes.
    Assemble {
        /// Resolved BOM CSV.
        file: PathBuf,
        /// Assembly name (defaults to the file stem).
        #[arg(long)]
        name: Option<String>,
        /// Assembly IPN.
        #[arg(long)]
        ipn: Option<String>,
        /// Assembly revision.
        #[arg(long)]
        revision: Option<String>,
    },
}
