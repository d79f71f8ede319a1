use anyhow::{Result, bail};
use product_catalog::{CatalogClient, CatalogClientConfig, Client, MockClient};
use tracing::debug;

use crate::config::Config;

/// Initialize the catalog client
///
/// - Use a mock client serving the products of `mock_products` if set
/// - Use the catalog at `catalog_url` otherwise, which requires a secret
pub fn init_catalog_client(config: &Config) -> Result<Client> {
    if let Some(path) = &config.mock_products {
        if !path.exists() {
            bail!("path to mock products doesn't exist: {}", path.display());
        }
        debug!(mock_products = %path.display(), "using mock catalog client");
        return Ok(MockClient::from_file(path)?.into());
    }

    if config.secret.is_empty() {
        bail!(
            "No catalog secret configured. Set 'secret' in the config file or $PRODUCT_LIST_SECRET."
        );
    }

    let mut client_config = CatalogClientConfig::new(&config.catalog_url, &config.secret);
    client_config.user_agent = Some(format!("product-list/{}", env!("CARGO_PKG_VERSION")));
    client_config.connect_timeout = config.connect_timeout();
    client_config.request_timeout = config.request_timeout();

    debug!("using catalog client with url: {}", config.catalog_url);
    Ok(CatalogClient::new(client_config)?.into())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use product_catalog::DEFAULT_PAGE_SIZE;

    use super::*;

    fn config() -> Config {
        Config {
            catalog_url: "http://localhost:40000/".to_string(),
            secret: String::new(),
            page_size: DEFAULT_PAGE_SIZE,
            connect_timeout_secs: 1,
            request_timeout_secs: 1,
            mock_products: None,
        }
    }

    #[test]
    fn missing_secret_is_an_error() {
        let err = init_catalog_client(&config()).unwrap_err();
        assert!(err.to_string().contains("No catalog secret configured"));
    }

    #[test]
    fn secret_selects_catalog_client() {
        let config = Config {
            secret: "password".to_string(),
            ..config()
        };
        assert!(matches!(init_catalog_client(&config), Ok(Client::Catalog(_))));
    }

    #[test]
    fn mock_products_select_mock_client() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("products.json");
        std::fs::write(&path, "[]").unwrap();

        let config = Config {
            mock_products: Some(path),
            ..config()
        };
        assert!(matches!(init_catalog_client(&config), Ok(Client::Mock(_))));
    }

    #[test]
    fn missing_mock_file_is_an_error() {
        let config = Config {
            mock_products: Some(PathBuf::from("/does/not/exist.json")),
            ..config()
        };
        assert!(init_catalog_client(&config).is_err());
    }
}
