use anyhow::Context;
use inv_compose::{ComposeCommand, Procedure, SystemRunner};
use inv_config::InvConfig;

use crate::cli::GlobalFlags;
use crate::output::output;

/// Handle the compose-backed commands (`reset`, `setup`, `backup`, ...).
pub async fn handle(procedure: Procedure, config: &InvConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    for step in procedure.steps() {
        if let Some(effect) = step.destructive_effect() {
            tracing::warn!(
                procedure = procedure.name(),
                step = step.label(),
                service = %config.compose.service,
                "{effect}"
            );
        }
    }

    let compose = ComposeCommand::new(config.compose.clone());
    let report = tokio::task::spawn_blocking(move || procedure.run(&compose, &SystemRunner))
        .await
        .context("compose procedure panicked")??;

    output(&report, flags.format)
}
