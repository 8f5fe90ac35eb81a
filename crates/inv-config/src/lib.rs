//! # inv-config
//!
//! Layered configuration loading for invt using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`INVT_*` prefix, `__` as separator)
//! 2. Legacy environment names (`INVENTREE_API_URL`, `KICAD_PLUGIN_PK`, ...)
//! 3. Project-level `./invt.toml`, or the file passed with `--config`
//! 4. User-level `~/.config/invt/config.toml`
//! 5. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `INVT_API__URL` -> `api.url`, `INVT_COMPOSE__SERVICE` ->
//! `compose.service`, etc. The `__` (double underscore) separates nested
//! config sections.
//!
//! # Usage
//!
//! ```no_run
//! use inv_config::InvConfig;
//!
//! let config = InvConfig::load_with_dotenv(None).expect("config");
//! if config.api.is_configured() {
//!     println!("API: {}", config.api.url);
//! }
//! ```

mod api;
mod compose;
mod error;
mod general;
mod import;
mod plugin;

pub use api::ApiConfig;
pub use compose::ComposeConfig;
pub use error::ConfigError;
pub use general::GeneralConfig;
pub use import::ImportConfig;
pub use plugin::PluginConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Project-local config file name, looked up in the working directory.
pub const PROJECT_CONFIG_FILE: &str = "invt.toml";

/// Environment names used by the older shell and Python tooling, mapped onto
/// config keys.
pub const LEGACY_ENV: [(&str, &str); 9] = [
    ("INVENTREE_API_URL", "api.url"),
    ("INVENTREE_SITE_URL", "api.site_url"),
    ("INVENTREE_ADMIN_USER", "api.username"),
    ("INVENTREE_ADMIN_PASSWORD", "api.password"),
    ("INVENTREE_USERNAME", "api.username"),
    ("INVENTREE_PASSWORD", "api.password"),
    ("INVENTREE_API_TOKEN", "api.token"),
    ("KICAD_PLUGIN_PK", "plugin.key"),
    ("LOG_LEVEL", "general.log_level"),
];

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct InvConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub compose: ComposeConfig,
    #[serde(default)]
    pub plugin: PluginConfig,
    #[serde(default)]
    pub import: ImportConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl InvConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy`; use [`InvConfig::load_with_dotenv`] for `.env`
    /// support. `project_file` replaces `./invt.toml` when given.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::FileNotFound`] for a missing explicit file and
    /// [`ConfigError::Figment`] when a source fails to parse.
    pub fn load(project_file: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = project_file {
            if !path.exists() {
                return Err(ConfigError::FileNotFound {
                    path: path.display().to_string(),
                });
            }
        }
        Self::figment(project_file)
            .extract()
            .map_err(ConfigError::from)
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    ///
    /// Same as [`InvConfig::load`].
    pub fn load_with_dotenv(project_file: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_dotenv();
        Self::load(project_file)
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment directly or add providers on top.
    #[must_use]
    pub fn figment(project_file: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path =
            project_file.map_or_else(|| PathBuf::from(PROJECT_CONFIG_FILE), Path::to_path_buf);
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Legacy environment names
        figment = figment.merge(Self::legacy_env());

        // Layer 4: Prefixed environment variables (highest priority)
        figment.merge(Env::prefixed("INVT_").split("__"))
    }

    fn legacy_env() -> Env {
        let names = LEGACY_ENV.map(|(name, _)| name);
        Env::raw().only(&names).map(|key| {
            LEGACY_ENV
                .iter()
                .find(|(name, _)| key.as_str().eq_ignore_ascii_case(name))
                .map_or_else(|| key.as_str().to_string(), |(_, path)| (*path).to_string())
                .into()
        })
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("invt").join("config.toml"))
    }

    /// Load the nearest `.env`, walking up from the working directory.
    /// Silently does nothing if none is found.
    fn load_dotenv() {
        let Ok(mut dir) = std::env::current_dir() else {
            return;
        };
        loop {
            let env_path = dir.join(".env");
            if env_path.exists() {
                let _ = dotenvy::from_path(&env_path);
                return;
            }
            if !dir.pop() {
                break;
            }
        }
    }

    /// Variables that must be set before talking to the API.
    #[must_use]
    pub fn missing_api_settings(&self) -> Vec<String> {
        let mut missing = Vec::new();
        if self.api.url.is_empty() {
            missing.push("INVENTREE_API_URL".to_string());
        }
        if !self.api.has_token() {
            if self.api.username.is_empty() {
                missing.push("INVENTREE_ADMIN_USER".to_string());
            }
            if self.api.password.is_empty() {
                missing.push("INVENTREE_ADMIN_PASSWORD".to_string());
            }
        }
        missing
    }

    /// Fail with [`ConfigError::Missing`] unless the API is configured.
    ///
    /// # Errors
    ///
    /// Lists every missing variable.
    pub fn require_api(&self) -> Result<&ApiConfig, ConfigError> {
        let missing = self.missing_api_settings();
        if missing.is_empty() {
            Ok(&self.api)
        } else {
            Err(ConfigError::Missing { missing })
        }
    }

    /// Copy with secrets replaced by `*` of equal length, for display.
    #[must_use]
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        copy.api.password = mask(&copy.api.password);
        copy.api.token = mask(&copy.api.token);
        copy
    }
}

fn mask(secret: &str) -> String {
    "*".repeat(secret.chars().count())
}
