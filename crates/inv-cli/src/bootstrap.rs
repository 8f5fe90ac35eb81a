use anyhow::Context;
use inv_api::InvenTreeClient;
use inv_config::InvConfig;

use crate::cli::GlobalFlags;

/// Load `.env` (walking up from the working directory) and the layered config.
pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<InvConfig> {
    InvConfig::load_with_dotenv(flags.config.as_deref()).context("failed to load configuration")
}

/// Connect to the API, failing early with the list of missing settings.
pub async fn connect(config: &InvConfig) -> anyhow::Result<InvenTreeClient> {
    let api = config.require_api()?;
    tracing::debug!(url = %api.url, "connecting to InvenTree");
    InvenTreeClient::connect(api)
        .await
        .with_context(|| format!("failed to connect to {}", api.url))
}
