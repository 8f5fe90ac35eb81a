//! InvenTree REST API connection settings.

use serde::{Deserialize, Serialize};

fn default_url() -> String {
    "http://inventree.localhost/api".to_string()
}

fn default_site_url() -> String {
    "http://inventree.localhost".to_string()
}

const fn default_timeout_secs() -> u64 {
    30
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    /// API root, e.g. `http://inventree.localhost/api`.
    #[serde(default = "default_url")]
    pub url: String,

    /// Web UI root used for part links and plugin endpoints.
    #[serde(default = "default_site_url")]
    pub site_url: String,

    #[serde(default)]
    pub username: String,

    #[serde(default)]
    pub password: String,

    /// Pre-issued API token. When empty a token is requested with
    /// username and password.
    #[serde(default)]
    pub token: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            site_url: default_site_url(),
            username: String::new(),
            password: String::new(),
            token: String::new(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ApiConfig {
    #[must_use]
    pub fn has_token(&self) -> bool {
        !self.token.is_empty()
    }

    #[must_use]
    pub fn has_credentials(&self) -> bool {
        !self.username.is_empty() && !self.password.is_empty()
    }

    /// Whether a client can authenticate with these settings.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.url.is_empty() && (self.has_token() || self.has_credentials())
    }
}
