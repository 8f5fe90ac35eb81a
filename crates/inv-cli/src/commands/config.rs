use std::fmt;

use inv_config::InvConfig;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::output::output;

#[derive(Debug, Serialize)]
#[serde(transparent)]
struct ConfigView(InvConfig);

impl fmt::Display for ConfigView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let config = &self.0;
        writeln!(f, "[api]")?;
        writeln!(f, "url = {}", config.api.url)?;
        writeln!(f, "site_url = {}", config.api.site_url)?;
        writeln!(f, "username = {}", config.api.username)?;
        writeln!(f, "password = {}", config.api.password)?;
        writeln!(f, "token = {}", config.api.token)?;
        writeln!(f, "timeout_secs = {}", config.api.timeout_secs)?;
        writeln!(f)?;
        writeln!(f, "[compose]")?;
        writeln!(
            f,
            "command = {} {}",
            config.compose.program,
            config.compose.program_args.join(" ")
        )?;
        if let Some(file) = &config.compose.file {
            writeln!(f, "file = {file}")?;
        }
        writeln!(f, "service = {}", config.compose.service)?;
        writeln!(f, "confirm_text = {:?}", config.compose.confirm_text)?;
        writeln!(f)?;
        writeln!(f, "[plugin]")?;
        writeln!(f, "key = {}", config.plugin.key)?;
        writeln!(f, "repository = {}", config.plugin.repository)?;
        writeln!(f)?;
        writeln!(f, "[import]")?;
        writeln!(f, "initial_stock = {}", config.import.initial_stock)?;
        writeln!(f, "stock_location = {}", config.import.stock_location)?;
        writeln!(f)?;
        writeln!(f, "[general]")?;
        writeln!(f, "log_level = {}", config.general.log_level)?;

        let missing = config.missing_api_settings();
        if !missing.is_empty() {
            writeln!(f)?;
            writeln!(f, "missing for API commands: {}", missing.join(", "))?;
        }
        Ok(())
    }
}

/// Handle `invt config`.
pub fn handle(config: &InvConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    output(&ConfigView(config.redacted()), flags.format)
}
