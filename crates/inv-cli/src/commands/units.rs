use inv_catalog::create_default_units;
use inv_config::InvConfig;

use crate::bootstrap;
use crate::cli::GlobalFlags;
use crate::output::output;

/// Handle `invt units`.
pub async fn handle(config: &InvConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let api = bootstrap::connect(config).await?;
    let report = create_default_units(&api).await?;
    output(&report, flags.format)?;
    if !report.is_success() {
        anyhow::bail!("failed to create units: {}", report.failed.join(", "));
    }
    Ok(())
}
