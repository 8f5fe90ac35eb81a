//! KiCad library plugin: installation, settings, and category registration.

use std::collections::HashSet;

use inv_api::{InventoryApi, Record, records_from};
use inv_config::PluginConfig;
use inv_core::{EntityKind, Pk};
use serde_json::{Value, json};
use tracing::{debug, info, warn};

use crate::error::CatalogError;
use crate::resolver::EntityResolver;

/// Global server settings the plugin workflow depends on.
pub const GLOBAL_SETTINGS: [(&str, bool); 3] = [
    ("ENABLE_PLUGINS_URL", true),
    ("ENABLE_PLUGINS_APP", true),
    ("PART_PARAMETER_ENFORCE_UNITS", false),
];

/// Plugin setting → parameter template feeding it.
pub const PARAMETER_SETTINGS: [(&str, &str); 5] = [
    ("KICAD_FOOTPRINT_PARAMETER", "FOOTPRINT"),
    ("KICAD_SYMBOL_PARAMETER", "SYMBOL"),
    ("KICAD_REFERENCE_PARAMETER", "DESIGNATOR"),
    ("KICAD_VALUE_PARAMETER", "VALUE"),
    ("KICAD_FIELD_VISIBILITY_PARAMETER", "KICAD_VISIBILITY"),
];

pub struct KicadPlugin {
    config: PluginConfig,
    categories: HashSet<Pk>,
    categories_fetched: bool,
}

impl KicadPlugin {
    #[must_use]
    pub fn new(config: PluginConfig) -> Self {
        Self {
            config,
            categories: HashSet::new(),
            categories_fetched: false,
        }
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.config.key
    }

    fn category_endpoint(&self) -> String {
        format!("/plugin/{}/api/category/", self.config.key)
    }

    /// # Errors
    ///
    /// The first failing settings request.
    pub async fn configure_global_settings(&self, api: &dyn InventoryApi) -> Result<(), CatalogError> {
        for (setting, value) in GLOBAL_SETTINGS {
            api.patch(&format!("settings/global/{setting}/"), &json!({ "value": value }))
                .await?;
            info!(setting, value, "set global setting");
        }
        Ok(())
    }

    /// Install the plugin unless present, then activate it.
    ///
    /// Returns whether an install request was sent.
    ///
    /// # Errors
    ///
    /// Listing, install, or activation failures.
    pub async fn install(&self, api: &dyn InventoryApi) -> Result<bool, CatalogError> {
        let plugins = records_from(api.get("plugins/", &[]).await?)?;
        let installed = plugins.iter().any(|plugin| {
            ["key", "pk"]
                .iter()
                .any(|field| plugin.get(*field).and_then(Value::as_str) == Some(self.key()))
        });

        if installed {
            info!(plugin = self.key(), "plugin already installed, activating");
        } else {
            api.post(
                "plugins/install/",
                &json!({
                    "url": self.config.repository,
                    "packagename": self.config.package_name,
                    "confirm": true,
                }),
            )
            .await?;
            info!(plugin = self.key(), "installed plugin");
        }

        api.patch(
            &format!("plugins/{}/activate/", self.key()),
            &json!({ "active": true }),
        )
        .await?;
        info!(plugin = self.key(), "plugin is active");
        Ok(!installed)
    }

    /// Point the plugin's field settings at their parameter templates,
    /// creating templates that do not exist yet.
    ///
    /// # Errors
    ///
    /// Template resolution or settings update failures.
    pub async fn update_settings(&self, resolver: &mut EntityResolver<'_>) -> Result<(), CatalogError> {
        for (setting, template) in PARAMETER_SETTINGS {
            let pk = resolver
                .resolve_value(EntityKind::ParameterTemplate, json!({ "name": template }))
                .await?;
            resolver
                .api()
                .patch(
                    &format!("plugins/{}/settings/{setting}/", self.key()),
                    &json!({ "value": pk }),
                )
                .await?;
            debug!(setting, pk, "updated plugin setting");
        }
        Ok(())
    }

    async fn list_categories(&self, api: &dyn InventoryApi) -> Result<Vec<Record>, CatalogError> {
        Ok(records_from(api.get(&self.category_endpoint(), &[]).await?)?)
    }

    async fn fetch_categories(&mut self, api: &dyn InventoryApi) {
        self.categories_fetched = true;
        match self.list_categories(api).await {
            Ok(entries) => {
                self.categories.extend(entries.iter().filter_map(|entry| {
                    entry
                        .get("category")
                        .and_then(|c| c.get("id").or_else(|| c.get("pk")))
                        .and_then(Value::as_u64)
                }));
                debug!(count = self.categories.len(), "fetched plugin categories");
            }
            Err(err) => warn!(%err, "failed to fetch plugin categories"),
        }
    }

    /// Register a part category with the plugin unless already known.
    ///
    /// Returns whether a registration request was sent.
    ///
    /// # Errors
    ///
    /// The registration request failing.
    pub async fn add_category(&mut self, api: &dyn InventoryApi, category: Pk) -> Result<bool, CatalogError> {
        if !self.categories_fetched {
            self.fetch_categories(api).await;
        }
        if self.categories.contains(&category) {
            return Ok(false);
        }
        api.post(&self.category_endpoint(), &json!({ "category": category }))
            .await?;
        self.categories.insert(category);
        debug!(category, "registered category with plugin");
        Ok(true)
    }
}
