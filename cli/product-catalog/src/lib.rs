//! HTTP client for the product catalog API.
//!
//! This crate provides:
//! - Per-day `X-Auth` credential derivation
//! - A [`ClientTrait`] with the two remote actions (list ids, fetch items)
//!   and the paged/filtered query built on top of them
//! - An in-memory [`MockClient`] for tests and offline runs
//! - The page/filter state of the product list view
//!
//! ## Usage
//!
//! ```ignore
//! use product_catalog::{CatalogClient, CatalogClientConfig, ClientTrait, FilterCriteria};
//!
//! let config = CatalogClientConfig::new("http://api.example.com:40000/", secret);
//! let client = CatalogClient::new(config)?;
//! let products = client
//!     .query_page(&FilterCriteria::default(), FIRST_PAGE, DEFAULT_PAGE_SIZE)
//!     .await?;
//! ```

mod client;
mod config;
mod error;
mod mock;
mod request;
mod state;
mod token;
mod types;

pub use client::{CatalogClient, Client, ClientTrait, X_AUTH_HEADER};
pub use config::{CatalogClientConfig, DEFAULT_CONNECT_TIMEOUT, DEFAULT_REQUEST_TIMEOUT};
pub use error::{CatalogClientError, CollapseErrorExt};
pub use mock::{MockCall, MockClient, MockDataError, MockErrorResponse, MockResponse};
pub use state::ProductListState;
pub use token::{Credential, derive_credential};
pub use types::{
    DEFAULT_PAGE_SIZE,
    FIRST_PAGE,
    FilterCriteria,
    FilterField,
    PageNumber,
    PageRequest,
    Product,
    ProductId,
    page_count,
};
