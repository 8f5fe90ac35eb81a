use anyhow::Context;
use inv_catalog::bom::{AssemblySpec, assemble_bom, default_output, resolve_bom_file};
use inv_catalog::{CsvTable, EntityResolver};
use inv_config::InvConfig;

use crate::bootstrap;
use crate::cli::GlobalFlags;
use crate::cli::subcommands::BomCommands;
use crate::output::output;
use crate::progress::with_spinner;

/// Handle `invt bom`.
pub async fn handle(action: &BomCommands, config: &InvConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        BomCommands::Resolve { file, output: target } => {
            let target = target.clone().unwrap_or_else(|| default_output(file));
            let api = bootstrap::connect(config).await?;
            let report = with_spinner("resolving BOM", "BOM resolved", async {
                Ok(resolve_bom_file(&api, file, &target).await?)
            })
            .await?;
            tracing::info!(output = %target.display(), "resolved BOM written");
            output(&report, flags.format)
        }
        BomCommands::Assemble {
            file,
            name,
            ipn,
            revision,
        } => {
            let table = CsvTable::read(file)?;
            let name = match name {
                Some(name) => name.clone(),
                None => file
                    .file_stem()
                    .map(|stem| stem.to_string_lossy().into_owned())
                    .context("cannot derive an assembly name from the file name; pass --name")?,
            };
            let spec = AssemblySpec {
                name,
                ipn: ipn.clone(),
                revision: revision.clone(),
            };

            let api = bootstrap::connect(config).await?;
            let mut resolver = EntityResolver::new(&api);
            let report = with_spinner("creating assembly", "assembly created", async {
                Ok(assemble_bom(&mut resolver, &table, &spec).await?)
            })
            .await?;
            output(&report, flags.format)
        }
    }
}
