//! CSV import behaviour.

use serde::{Deserialize, Serialize};

fn default_stock_location() -> String {
    "Default".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ImportConfig {
    /// Quantity of the stock item created per supplier part; 0 disables stock.
    #[serde(default)]
    pub initial_stock: u32,

    /// Stock location receiving initial stock.
    #[serde(default = "default_stock_location")]
    pub stock_location: String,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            initial_stock: 0,
            stock_location: default_stock_location(),
        }
    }
}

impl ImportConfig {
    #[must_use]
    pub const fn creates_stock(&self) -> bool {
        self.initial_stock > 0
    }
}
