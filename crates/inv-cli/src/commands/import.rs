use anyhow::Context;
use inv_catalog::{EntityResolver, ImportOptions, KicadPlugin, import_directory};
use inv_config::InvConfig;

use crate::bootstrap;
use crate::cli::GlobalFlags;
use crate::cli::root_commands::ImportArgs;
use crate::output::output;
use crate::progress::Progress;

/// Handle `invt import`.
pub async fn handle(args: &ImportArgs, config: &InvConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let mut options = ImportOptions::from_config(config).with_limit(args.limit);
    if let Some(quantity) = args.initial_stock {
        options.initial_stock = quantity;
    }

    let api = bootstrap::connect(config).await?;
    let mut resolver = EntityResolver::new(&api);
    let mut plugin = KicadPlugin::new(config.plugin.clone());

    let progress = Progress::spinner(&format!("importing {}", args.directory.display()));
    let report = match import_directory(&mut resolver, &mut plugin, &args.directory, &options).await {
        Ok(report) => report,
        Err(error) => {
            progress.finish_err("import failed");
            return Err(error).with_context(|| format!("failed to import {}", args.directory.display()));
        }
    };

    progress.set_message("updating plugin settings");
    plugin
        .update_settings(&mut resolver)
        .await
        .context("failed to update plugin settings")?;
    progress.finish_clear();

    if report.total_warnings() > 0 {
        tracing::warn!(warnings = report.total_warnings(), "import finished with warnings");
    }
    output(&report, flags.format)
}
