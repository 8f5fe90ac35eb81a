//! KiCad library plugin settings.

use serde::{Deserialize, Serialize};

fn default_key() -> String {
    "kicad-library-plugin".to_string()
}

fn default_repository() -> String {
    "git+https://github.com/afkiwers/inventree_kicad".to_string()
}

fn default_package_name() -> String {
    "inventree-kicad-plugin".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PluginConfig {
    /// Plugin slug used in `plugins/{key}/...` and `/plugin/{key}/api/`.
    #[serde(default = "default_key")]
    pub key: String,

    /// Install source passed to `plugins/install/`.
    #[serde(default = "default_repository")]
    pub repository: String,

    #[serde(default = "default_package_name")]
    pub package_name: String,
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            key: default_key(),
            repository: default_repository(),
            package_name: default_package_name(),
        }
    }
}
