use std::fmt;

use inv_catalog::{EntityResolver, KicadPlugin, UnitsReport, create_default_units};
use inv_config::InvConfig;
use serde::Serialize;

use crate::bootstrap;
use crate::cli::GlobalFlags;
use crate::output::output;
use crate::progress::with_spinner;

#[derive(Debug, Serialize)]
struct InitResponse {
    plugin: String,
    plugin_installed: bool,
    units: UnitsReport,
}

impl fmt::Display for InitResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.plugin_installed {
            writeln!(f, "installed and activated plugin {}", self.plugin)?;
        } else {
            writeln!(f, "plugin {} already installed, activated", self.plugin)?;
        }
        writeln!(f, "global and plugin settings updated")?;
        write!(f, "{}", self.units)
    }
}

/// Handle `invt init`.
pub async fn handle(config: &InvConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let api = bootstrap::connect(config).await?;
    let plugin = KicadPlugin::new(config.plugin.clone());

    let response = with_spinner("configuring InvenTree", "configured", async {
        let plugin_installed = plugin.install(&api).await?;
        plugin.configure_global_settings(&api).await?;
        let mut resolver = EntityResolver::new(&api);
        plugin.update_settings(&mut resolver).await?;
        let units = create_default_units(&api).await?;
        Ok(InitResponse {
            plugin: plugin.key().to_string(),
            plugin_installed,
            units,
        })
    })
    .await?;

    output(&response, flags.format)
}
