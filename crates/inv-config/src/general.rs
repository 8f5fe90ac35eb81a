//! General application configuration.

use serde::{Deserialize, Serialize};

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Tracing filter used when neither `INVT_LOG` nor `--quiet`/`--verbose`
    /// is given.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl GeneralConfig {
    /// The level as a lowercase tracing directive (`INFO` -> `info`).
    #[must_use]
    pub fn filter_directive(&self) -> String {
        self.log_level.trim().to_ascii_lowercase()
    }
}
