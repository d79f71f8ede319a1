use std::env;
use std::num::NonZeroU32;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use config::{Config as HierarchicalConfig, Environment};
use product_catalog::{DEFAULT_CONNECT_TIMEOUT, DEFAULT_PAGE_SIZE, DEFAULT_REQUEST_TIMEOUT};
use serde::Deserialize;
use tracing::debug;

/// Name of the directory holding the config file
const CONFIG_DIR_NAME: &str = "product-list";
const CONFIG_DIR_VAR: &str = "PRODUCT_LIST_CONFIG_DIR";
const ENV_PREFIX: &str = "PRODUCT_LIST";
pub const CONFIG_FILE: &str = "product-list.toml";

pub const DEFAULT_CATALOG_URL: &str = "http://api.valantis.store:40000/";

/// Describes the configuration of the product list
#[derive(Clone, Debug, Deserialize)]
pub struct Config {
    /// Endpoint of the catalog API
    pub catalog_url: String,

    /// Shared secret the daily `X-Auth` credential is derived from
    #[serde(default)]
    pub secret: String,

    /// How many products a page shows by default
    pub page_size: NonZeroU32,

    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,

    /// Serve products from this JSON file instead of the catalog
    pub mock_products: Option<PathBuf>,
}

impl Config {
    /// Creates a [Config] from defaults, the config file and the environment
    ///
    /// Later sources override earlier ones:
    /// 1. built-in defaults
    /// 2. `product-list.toml` in `$PRODUCT_LIST_CONFIG_DIR`, or in the user
    ///    config directory
    /// 3. `PRODUCT_LIST_*` environment variables, e.g. `PRODUCT_LIST_SECRET`
    pub fn parse() -> Result<Config> {
        let config_dir = match env::var(CONFIG_DIR_VAR) {
            Ok(v) => {
                debug!("`${CONFIG_DIR_VAR}` set: {v}");
                PathBuf::from(v)
            },
            Err(_) => {
                let config_dir = dirs::config_dir()
                    .context("Could not determine the user config directory")?
                    .join(CONFIG_DIR_NAME);
                debug!("`${CONFIG_DIR_VAR}` not set, using {config_dir:?}");
                config_dir
            },
        };

        let final_config = HierarchicalConfig::builder()
            .set_default("catalog_url", DEFAULT_CATALOG_URL)?
            .set_default("page_size", i64::from(DEFAULT_PAGE_SIZE.get()))?
            .set_default("connect_timeout_secs", DEFAULT_CONNECT_TIMEOUT.as_secs() as i64)?
            .set_default("request_timeout_secs", DEFAULT_REQUEST_TIMEOUT.as_secs() as i64)?
            .add_source(
                config::File::from(config_dir.join(CONFIG_FILE))
                    .format(config::FileFormat::Toml)
                    .required(false),
            )
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?;

        let config: Config = final_config
            .try_deserialize()
            .context("Could not parse config")?;
        Ok(config)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
