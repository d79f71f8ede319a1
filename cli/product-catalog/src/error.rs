//! Error handling for catalog operations.

use reqwest::StatusCode;
use thiserror::Error;

/// Error type for catalog operations.
///
/// A failed call is never reported as an empty result by the client itself,
/// see [`CollapseErrorExt`] for the place where that happens.
#[derive(Debug, Error)]
pub enum CatalogClientError {
    #[error("invalid catalog client configuration: {0}")]
    InvalidConfig(String),
    /// Connection failures and timeouts
    #[error("request to catalog failed: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("{}", fmt_status(*.status, .body))]
    Status { status: StatusCode, body: String },
    #[error("could not parse catalog response: {0}")]
    InvalidResponse(#[source] serde_json::Error),
    #[error("catalog response is missing the 'result' field")]
    MissingResult,
    #[error("{0}")]
    Other(String),
}

fn fmt_status(status: StatusCode, body: &str) -> String {
    let body = body.trim();
    if body.is_empty() {
        format!("catalog responded with {status}")
    } else {
        format!("catalog responded with {status}: {body}")
    }
}

/// Extension trait to turn a failed listing into an empty one.
///
/// Meant for the display boundary only: the error is logged and the caller
/// can no longer tell it apart from a query without matches.
pub trait CollapseErrorExt<T> {
    fn or_empty(self, operation: &str) -> Vec<T>;
}

impl<T> CollapseErrorExt<T> for Result<Vec<T>, CatalogClientError> {
    fn or_empty(self, operation: &str) -> Vec<T> {
        self.unwrap_or_else(|err| {
            tracing::warn!(operation, error = %err, "catalog call failed, showing no results");
            Vec::new()
        })
    }
}
