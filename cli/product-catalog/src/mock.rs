//! Mock catalog client.
//!
//! Answers from a queue of canned responses first and falls back to an
//! in-memory product set. Every call that would reach the catalog is
//! recorded, so tests can check which requests were (not) made.

use std::collections::VecDeque;
use std::path::Path;
use std::sync::{Arc, Mutex};

use reqwest::StatusCode;
use thiserror::Error;
use tracing::debug;

use crate::client::ClientTrait;
use crate::error::CatalogClientError;
use crate::types::{FilterCriteria, PageRequest, Product, ProductId};

// Arc allows you to push things into the client from outside the client if necessary
// Mutex allows you to share across threads (necessary because of tokio)
type MockField<T> = Arc<Mutex<T>>;

#[derive(Debug, Clone)]
pub struct MockErrorResponse {
    pub status: u16,
    pub body: String,
}

/// A canned response, consumed by the next call.
#[derive(Debug, Clone)]
pub enum MockResponse {
    Ids(Vec<ProductId>),
    Items(Vec<Product>),
    Error(MockErrorResponse),
}

/// A call that would have been sent to the catalog.
#[derive(Debug, Clone, PartialEq)]
pub enum MockCall {
    ListIds {
        filter: Option<FilterCriteria>,
        page: Option<PageRequest>,
    },
    GetItems(Vec<ProductId>),
}

#[derive(Debug, Error)]
pub enum MockDataError {
    /// Failed to read the product file
    #[error("failed to read mock product file")]
    ReadMockFile(#[source] std::io::Error),
    /// Failed to parse the contents of the product file as JSON
    #[error("failed to parse mock products as JSON")]
    ParseJson(#[source] serde_json::Error),
}

/// A catalog client that can be seeded with mock responses
#[derive(Debug, Default, Clone)]
pub struct MockClient {
    pub mock_responses: MockField<VecDeque<MockResponse>>,
    products: MockField<Vec<Product>>,
    calls: MockField<Vec<MockCall>>,
}

impl MockClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// A mock client answering from `products` when no response is queued.
    pub fn with_products(products: Vec<Product>) -> Self {
        Self {
            products: Arc::new(Mutex::new(products)),
            ..Self::default()
        }
    }

    /// Read the product set from a JSON array of products.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, MockDataError> {
        let contents = std::fs::read_to_string(path).map_err(MockDataError::ReadMockFile)?;
        let products: Vec<Product> =
            serde_json::from_str(&contents).map_err(MockDataError::ParseJson)?;
        debug!(n_products = products.len(), "loaded mock products");
        Ok(Self::with_products(products))
    }

    /// Push a new response into the list of mock responses
    pub fn push_ids_response(&self, ids: Vec<ProductId>) {
        self.push(MockResponse::Ids(ids));
    }

    /// Push a new response into the list of mock responses
    pub fn push_items_response(&self, items: Vec<Product>) {
        self.push(MockResponse::Items(items));
    }

    /// Push an unsuccessful HTTP status into the list of mock responses
    pub fn push_error_response(&self, status: u16) {
        self.push(MockResponse::Error(MockErrorResponse {
            status,
            body: String::new(),
        }));
    }

    /// Calls made so far, oldest first.
    pub fn calls(&self) -> Vec<MockCall> {
        self.calls.lock().expect("couldn't acquire mock lock").clone()
    }

    fn push(&self, response: MockResponse) {
        self.mock_responses
            .lock()
            .expect("couldn't acquire mock lock")
            .push_back(response);
    }

    fn record(&self, call: MockCall) {
        self.calls
            .lock()
            .expect("couldn't acquire mock lock")
            .push(call);
    }

    fn next_response(&self) -> Option<MockResponse> {
        self.mock_responses
            .lock()
            .expect("couldn't acquire mock lock")
            .pop_front()
    }

    fn lookup_ids(
        &self,
        filter: Option<&FilterCriteria>,
        page: Option<PageRequest>,
    ) -> Vec<ProductId> {
        let products = self.products.lock().expect("couldn't acquire mock lock");
        match filter.filter(|filter| !filter.is_unconstrained()) {
            Some(filter) => products
                .iter()
                .filter(|product| matches_filter(product, filter))
                .map(|product| product.id.clone())
                .collect(),
            None => {
                let ids = products.iter().map(|product| product.id.clone()).collect();
                match page {
                    Some(page) => page.apply(ids),
                    None => ids,
                }
            },
        }
    }

    fn lookup_items(&self, ids: &[ProductId]) -> Vec<Product> {
        let products = self.products.lock().expect("couldn't acquire mock lock");
        ids.iter()
            .filter_map(|id| products.iter().find(|product| &product.id == id))
            .cloned()
            .collect()
    }
}

/// Exact match on every non-blank field, like the catalog does.
fn matches_filter(product: &Product, filter: &FilterCriteria) -> bool {
    let product_matches = filter.product().is_none_or(|name| product.product == name);
    let price_matches = filter
        .price()
        .is_none_or(|price| price.trim().parse::<f64>().is_ok_and(|price| product.price == price));
    let brand_matches = filter
        .brand()
        .is_none_or(|brand| product.brand.as_deref() == Some(brand));
    product_matches && price_matches && brand_matches
}

fn error_response(response: MockErrorResponse) -> CatalogClientError {
    match StatusCode::from_u16(response.status) {
        Ok(status) => CatalogClientError::Status {
            status,
            body: response.body,
        },
        Err(_) => CatalogClientError::Other(format!(
            "invalid mocked status code: {}",
            response.status
        )),
    }
}

impl ClientTrait for MockClient {
    async fn list_ids(
        &self,
        filter: Option<&FilterCriteria>,
        page: Option<PageRequest>,
    ) -> Result<Vec<ProductId>, CatalogClientError> {
        self.record(MockCall::ListIds {
            filter: filter.cloned(),
            page,
        });
        match self.next_response() {
            Some(MockResponse::Ids(ids)) => Ok(ids),
            // An empty response fits either call
            Some(MockResponse::Items(items)) if items.is_empty() => Ok(Vec::new()),
            Some(MockResponse::Items(_)) => Err(CatalogClientError::Other(
                "expected an ids response, found items".to_string(),
            )),
            Some(MockResponse::Error(response)) => Err(error_response(response)),
            None => Ok(self.lookup_ids(filter, page)),
        }
    }

    async fn get_items(&self, ids: &[ProductId]) -> Result<Vec<Product>, CatalogClientError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        self.record(MockCall::GetItems(ids.to_vec()));
        match self.next_response() {
            Some(MockResponse::Items(items)) => Ok(items),
            Some(MockResponse::Ids(other)) if other.is_empty() => Ok(Vec::new()),
            Some(MockResponse::Ids(_)) => Err(CatalogClientError::Other(
                "expected an items response, found ids".to_string(),
            )),
            Some(MockResponse::Error(response)) => Err(error_response(response)),
            None => Ok(self.lookup_items(ids)),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroU32;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::types::{DEFAULT_PAGE_SIZE, FIRST_PAGE};

    fn nz(n: u32) -> NonZeroU32 {
        NonZeroU32::new(n).unwrap()
    }

    fn id(n: i64) -> ProductId {
        ProductId::from(n)
    }

    fn product(id: i64, brand: Option<&str>) -> Product {
        Product {
            id: ProductId::from(id),
            product: format!("product {id}"),
            price: id as f64 * 100.0,
            brand: brand.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn get_items_with_no_ids_makes_no_call() {
        let client = MockClient::new();
        let items = client.get_items(&[]).await.unwrap();
        assert!(items.is_empty());
        assert_eq!(client.calls(), vec![]);
    }

    #[tokio::test]
    async fn query_page_keeps_id_order() {
        let client = MockClient::new();
        client.push_ids_response(vec![id(1), id(2), id(3)]);
        client.push_items_response(vec![product(1, None), product(2, None), product(3, None)]);

        let products = client
            .query_page(&FilterCriteria::default(), FIRST_PAGE, DEFAULT_PAGE_SIZE)
            .await
            .unwrap();

        assert_eq!(products, vec![product(1, None), product(2, None), product(3, None)]);
        assert_eq!(client.calls(), vec![
            MockCall::ListIds {
                filter: Some(FilterCriteria::default()),
                page: Some(PageRequest {
                    offset: 0,
                    limit: DEFAULT_PAGE_SIZE
                }),
            },
            MockCall::GetItems(vec![id(1), id(2), id(3)]),
        ]);
    }

    #[tokio::test]
    async fn count_total_pages_from_listing() {
        let client = MockClient::new();
        client.push_ids_response((0..123).map(id).collect());
        assert_eq!(client.count_total_pages(nz(50)).await.unwrap(), 3);

        client.push_ids_response(vec![]);
        assert_eq!(client.count_total_pages(nz(50)).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn failed_listing_skips_details() {
        let client = MockClient::new();
        client.push_error_response(500);

        let result = client
            .query_page(&FilterCriteria::default(), FIRST_PAGE, DEFAULT_PAGE_SIZE)
            .await;
        assert!(matches!(result, Err(CatalogClientError::Status { .. })));
        assert_eq!(client.calls().len(), 1);
    }

    #[tokio::test]
    async fn failed_details_is_an_error() {
        let client = MockClient::new();
        client.push_ids_response(vec![id(1)]);
        client.push_error_response(502);

        let result = client
            .query_page(&FilterCriteria::default(), FIRST_PAGE, DEFAULT_PAGE_SIZE)
            .await;
        assert!(matches!(
            result,
            Err(CatalogClientError::Status { status, .. }) if status == StatusCode::BAD_GATEWAY
        ));
    }

    #[tokio::test]
    async fn product_set_answers_pages_and_filters() {
        let products = (1..=5)
            .map(|id| product(id, (id % 2 == 0).then_some("Piaget")))
            .collect::<Vec<_>>();
        let client = MockClient::with_products(products);

        let second_page = client
            .query_page(&FilterCriteria::default(), nz(2), nz(2))
            .await
            .unwrap();
        assert_eq!(second_page, vec![product(3, None), product(4, Some("Piaget"))]);

        let filter = FilterCriteria {
            brand: "Piaget".to_string(),
            ..Default::default()
        };
        let filtered = client.query_page(&filter, FIRST_PAGE, nz(50)).await.unwrap();
        assert_eq!(filtered, vec![product(2, Some("Piaget")), product(4, Some("Piaget"))]);

        assert_eq!(client.count_total_pages(nz(2)).await.unwrap(), 3);
    }

    #[test]
    fn reads_products_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("products.json");
        std::fs::write(
            &path,
            r#"[{"id": "a", "product": "Кольцо", "price": 1.5, "brand": null}]"#,
        )
        .unwrap();

        let client = MockClient::from_file(&path).unwrap();
        let ids = client.lookup_ids(None, None);
        assert_eq!(ids, vec![ProductId::from("a")]);
    }

    #[test]
    fn missing_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let result = MockClient::from_file(dir.path().join("missing.json"));
        assert!(matches!(result, Err(MockDataError::ReadMockFile(_))));
    }
}
