//! Configuration types for catalog client construction.

use std::collections::BTreeMap;
use std::fmt::Debug;
use std::time::Duration;

pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(15);
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Configuration for catalog client construction.
#[derive(Clone)]
pub struct CatalogClientConfig {
    /// Endpoint all actions are posted to.
    pub catalog_url: String,
    /// Shared secret the daily `X-Auth` credential is derived from.
    pub secret: String,
    /// Additional headers to include in requests.
    pub extra_headers: BTreeMap<String, String>,
    pub user_agent: Option<String>,
    pub connect_timeout: Duration,
    /// Upper bound for a whole request, including reading the body.
    pub request_timeout: Duration,
}

impl CatalogClientConfig {
    pub fn new(catalog_url: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            catalog_url: catalog_url.into(),
            secret: secret.into(),
            extra_headers: BTreeMap::new(),
            user_agent: None,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

impl Debug for CatalogClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogClientConfig")
            .field("catalog_url", &self.catalog_url)
            .field("secret", &"<redacted>")
            .field("extra_headers", &self.extra_headers)
            .field("user_agent", &self.user_agent)
            .field("connect_timeout", &self.connect_timeout)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}
