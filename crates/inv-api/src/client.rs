//! Token-authenticated reqwest client.

use std::time::Duration;

use async_trait::async_trait;
use inv_config::ApiConfig;
use reqwest::{Method, RequestBuilder};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::InventoryApi;
use crate::error::ApiError;
use crate::http::{check_response, json_body};

#[derive(Deserialize)]
struct TokenResponse {
    token: String,
}

/// HTTP client for one InvenTree server.
pub struct InvenTreeClient {
    http: reqwest::Client,
    api_url: String,
    site_url: String,
    token: String,
}

impl InvenTreeClient {
    /// Build a client and authenticate.
    ///
    /// Uses the configured token when present, otherwise requests one from
    /// `user/token/` with HTTP basic auth.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Auth`] when neither a token nor credentials are
    /// configured, and transport/status errors from the token request.
    pub async fn connect(config: &ApiConfig) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("invt/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        let api_url = config.url.trim_end_matches('/').to_string();
        let site_url = config.site_url.trim_end_matches('/').to_string();

        let token = if config.has_token() {
            config.token.clone()
        } else if config.has_credentials() {
            Self::request_token(&http, &api_url, config).await?
        } else {
            return Err(ApiError::Auth(
                "no API token and no username/password configured".into(),
            ));
        };

        debug!(api_url = %api_url, "connected to InvenTree");
        Ok(Self {
            http,
            api_url,
            site_url,
            token,
        })
    }

    async fn request_token(
        http: &reqwest::Client,
        api_url: &str,
        config: &ApiConfig,
    ) -> Result<String, ApiError> {
        let resp = http
            .get(format!("{api_url}/user/token/"))
            .basic_auth(&config.username, Some(&config.password))
            .send()
            .await?;
        let resp = check_response(resp).await.map_err(|e| match e {
            ApiError::Api { status, message } if status == 401 || status == 403 => {
                ApiError::Auth(format!("token request rejected ({status}): {message}"))
            }
            other => other,
        })?;
        let body: TokenResponse = resp
            .json()
            .await
            .map_err(|e| ApiError::Parse(format!("token response: {e}")))?;
        Ok(body.token)
    }

    /// API root without trailing slash.
    #[must_use]
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Web UI root without trailing slash.
    #[must_use]
    pub fn site_url(&self) -> &str {
        &self.site_url
    }

    /// Resolve a path: leading `/` is site-relative, anything else is
    /// relative to the API root.
    #[must_use]
    pub fn url_for(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else if path.starts_with('/') {
            format!("{}{path}", self.site_url)
        } else {
            format!("{}/{path}", self.api_url)
        }
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = self.url_for(path);
        debug!(%method, %url, "request");
        self.http
            .request(method, url)
            .header(reqwest::header::AUTHORIZATION, format!("Token {}", self.token))
            .header(reqwest::header::ACCEPT, "application/json")
    }

    async fn send(&self, request: RequestBuilder) -> Result<Value, ApiError> {
        let resp = check_response(request.send().await?).await?;
        json_body(resp).await
    }
}

#[async_trait]
impl InventoryApi for InvenTreeClient {
    async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<Value, ApiError> {
        self.send(self.request(Method::GET, path).query(query)).await
    }

    async fn post(&self, path: &str, body: &Value) -> Result<Value, ApiError> {
        self.send(self.request(Method::POST, path).json(body)).await
    }

    async fn patch(&self, path: &str, body: &Value) -> Result<Value, ApiError> {
        self.send(self.request(Method::PATCH, path).json(body)).await
    }

    async fn put(&self, path: &str, body: &Value) -> Result<Value, ApiError> {
        self.send(self.request(Method::PUT, path).json(body)).await
    }

    async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.send(self.request(Method::DELETE, path)).await.map(|_| ())
    }
}
