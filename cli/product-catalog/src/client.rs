//! Catalog client and the catalog trait.

use std::collections::{HashMap, HashSet};
use std::fmt::Debug;
use std::num::NonZeroU32;
use std::str::FromStr;

use chrono::Utc;
use enum_dispatch::enum_dispatch;
use reqwest::header::{self, HeaderMap};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};
use url::Url;

use crate::config::CatalogClientConfig;
use crate::error::CatalogClientError;
use crate::mock::MockClient;
use crate::request::{Action, ActionResponse};
use crate::token::derive_credential;
use crate::types::{FilterCriteria, PageNumber, PageRequest, Product, ProductId, page_count};

/// Header carrying the daily credential.
pub const X_AUTH_HEADER: &str = "X-Auth";

// ---------------------------------------------------------------------------
// Catalog trait
// ---------------------------------------------------------------------------

/// The catalog interface used by the product list.
///
/// Implementations:
/// - **HTTP**: the catalog API via [`CatalogClient`]
/// - **Mock**: canned responses or an in-memory product set via [`MockClient`]
#[enum_dispatch]
#[allow(async_fn_in_trait)]
pub trait ClientTrait {
    /// List product ids.
    ///
    /// A filter with at least one non-blank field selects all matching ids
    /// and `page` is ignored. Otherwise all ids are listed, windowed by
    /// `page` if given.
    async fn list_ids(
        &self,
        filter: Option<&FilterCriteria>,
        page: Option<PageRequest>,
    ) -> Result<Vec<ProductId>, CatalogClientError>;

    /// Resolve ids into products.
    ///
    /// No request is made for an empty list of ids.
    async fn get_items(&self, ids: &[ProductId]) -> Result<Vec<Product>, CatalogClientError>;

    /// Products shown on `page` for the given filter.
    ///
    /// Lists the ids of the page, then resolves them. Filter results are not
    /// windowed by the catalog, so the page window is applied here.
    async fn query_page(
        &self,
        filter: &FilterCriteria,
        page: PageNumber,
        page_size: NonZeroU32,
    ) -> Result<Vec<Product>, CatalogClientError> {
        let window = PageRequest::for_page(page, page_size);
        let mut ids = self.list_ids(Some(filter), Some(window)).await?;
        if !filter.is_unconstrained() {
            ids = window.apply(ids);
        }
        let items = self.get_items(&ids).await?;
        Ok(reconcile_items(&ids, items))
    }

    /// Number of pages of the unfiltered listing, at least one.
    ///
    /// The catalog has no count-only response, so this lists every id.
    async fn count_total_pages(&self, page_size: NonZeroU32) -> Result<u32, CatalogClientError> {
        let ids = self.list_ids(None, None).await?;
        debug!(n_ids = ids.len(), "counted catalog ids");
        Ok(page_count(ids.len(), page_size))
    }
}

/// Either a client for the actual catalog service,
/// or a mock client for testing.
#[derive(Debug)]
#[enum_dispatch(ClientTrait)]
pub enum Client {
    Catalog(CatalogClient),
    Mock(MockClient),
}

/// Order `items` like `ids` and drop repeated products.
///
/// The first record per id wins. Records for ids that were not asked for
/// are kept at the end in the order they arrived.
pub(crate) fn reconcile_items(ids: &[ProductId], items: Vec<Product>) -> Vec<Product> {
    let mut position: HashMap<&ProductId, usize> = HashMap::with_capacity(ids.len());
    for (index, id) in ids.iter().enumerate() {
        position.entry(id).or_insert(index);
    }

    let n_received = items.len();
    let mut seen = HashSet::with_capacity(n_received);
    let mut items = items
        .into_iter()
        .filter(|item| seen.insert(item.id.clone()))
        .collect::<Vec<_>>();
    items.sort_by_key(|item| position.get(&item.id).copied().unwrap_or(usize::MAX));

    if items.len() != n_received {
        debug!(
            n_received,
            n_unique = items.len(),
            "dropped duplicate products"
        );
    }
    items
}

// ---------------------------------------------------------------------------
// HTTP client
// ---------------------------------------------------------------------------

/// A client for the catalog service.
///
/// Handles:
/// - HTTP client configuration with timeouts
/// - The `X-Auth` credential, derived again for every request
/// - Decoding the `result` of each action
pub struct CatalogClient {
    http: reqwest::Client,
    endpoint: Url,
    config: CatalogClientConfig,
}

impl Debug for CatalogClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogClient")
            .field("catalog_url", &self.config.catalog_url)
            .finish_non_exhaustive()
    }
}

impl CatalogClient {
    /// Create a new catalog client from configuration.
    pub fn new(config: CatalogClientConfig) -> Result<Self, CatalogClientError> {
        let endpoint = Url::parse(&config.catalog_url).map_err(|e| {
            CatalogClientError::InvalidConfig(format!(
                "catalog url '{}' is invalid: {e}",
                config.catalog_url
            ))
        })?;
        let http = build_http_client(&config)?;

        Ok(Self {
            http,
            endpoint,
            config,
        })
    }

    /// Get the configured catalog URL.
    pub fn catalog_url(&self) -> &str {
        &self.config.catalog_url
    }

    /// Update the client configuration and recreate the client.
    pub fn update_config(
        &mut self,
        update: impl FnOnce(&mut CatalogClientConfig),
    ) -> Result<(), CatalogClientError> {
        let mut modified_config = self.config.clone();
        update(&mut modified_config);
        *self = Self::new(modified_config)?;
        Ok(())
    }

    /// Post `action` and decode the `result` of the response.
    async fn send<T: DeserializeOwned>(&self, action: &Action<'_>) -> Result<T, CatalogClientError> {
        let credential = derive_credential(&self.config.secret, Utc::now());

        debug!(action = action.name(), "sending catalog request");
        let response = self
            .http
            .post(self.endpoint.clone())
            .header(X_AUTH_HEADER, credential.as_str())
            .json(action)
            .send()
            .await
            .map_err(CatalogClientError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            // The body is only used for the error message
            let body = response.text().await.unwrap_or_default();
            return Err(CatalogClientError::Status { status, body });
        }

        let body = response
            .bytes()
            .await
            .map_err(CatalogClientError::Transport)?;
        let response: ActionResponse<T> =
            serde_json::from_slice(&body).map_err(CatalogClientError::InvalidResponse)?;

        response.result.ok_or(CatalogClientError::MissingResult)
    }
}

impl ClientTrait for CatalogClient {
    #[instrument(skip_all, fields(
        filtered = filter.is_some_and(|f| !f.is_unconstrained()),
        offset = page.map(|p| p.offset),
        limit = page.map(|p| p.limit.get())))]
    async fn list_ids(
        &self,
        filter: Option<&FilterCriteria>,
        page: Option<PageRequest>,
    ) -> Result<Vec<ProductId>, CatalogClientError> {
        let action = Action::list(filter, page);
        let ids: Vec<ProductId> = self.send(&action).await?;
        debug!(n_ids = ids.len(), "received product ids");
        Ok(ids)
    }

    #[instrument(skip_all, fields(n_ids = ids.len()))]
    async fn get_items(&self, ids: &[ProductId]) -> Result<Vec<Product>, CatalogClientError> {
        if ids.is_empty() {
            debug!("no ids to resolve, skipping request");
            return Ok(Vec::new());
        }
        let items: Vec<Product> = self.send(&Action::GetItems { ids }).await?;
        debug!(n_items = items.len(), "received products");
        Ok(items)
    }
}

// ---------------------------------------------------------------------------
// HTTP client builder
// ---------------------------------------------------------------------------

/// Build the HTTP client shared by all requests.
///
/// The credential is not part of the default headers since it expires at
/// midnight UTC.
fn build_http_client(config: &CatalogClientConfig) -> Result<reqwest::Client, CatalogClientError> {
    let mut headers = HeaderMap::new();

    for (key, value) in &config.extra_headers {
        headers.insert(
            header::HeaderName::from_str(key).map_err(
                |e: header::InvalidHeaderName| CatalogClientError::InvalidConfig(e.to_string()),
            )?,
            header::HeaderValue::from_str(value).map_err(
                |e: header::InvalidHeaderValue| CatalogClientError::InvalidConfig(e.to_string()),
            )?,
        );
    }

    debug!(
        catalog_url = %config.catalog_url,
        extra_headers = config.extra_headers.len(),
        request_timeout = ?config.request_timeout,
        "building catalog HTTP client"
    );

    let client_builder = reqwest::Client::builder()
        .default_headers(headers)
        .connect_timeout(config.connect_timeout)
        .timeout(config.request_timeout);

    let client_builder = if let Some(ref user_agent) = config.user_agent {
        client_builder.user_agent(user_agent)
    } else {
        client_builder
    };

    client_builder
        .build()
        .map_err(|e| CatalogClientError::InvalidConfig(e.to_string()))
}
