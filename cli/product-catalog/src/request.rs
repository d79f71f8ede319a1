//! Wire format of catalog requests and responses.
//!
//! Every request is a `POST` of `{"action": ..., "params": {...}}` and every
//! successful response carries its payload in a `result` field.

use std::num::NonZeroU32;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::types::{FilterCriteria, PageRequest, ProductId};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "action", content = "params", rename_all = "snake_case")]
pub(crate) enum Action<'a> {
    /// List product ids, optionally windowed.
    GetIds(IdsParams),
    /// List ids of products matching every given field.
    Filter(FilterParams),
    /// Resolve ids into products.
    GetItems { ids: &'a [ProductId] },
}

impl<'a> Action<'a> {
    /// Choose between filtering and listing.
    ///
    /// A filter with at least one non-blank field wins and the page is not
    /// sent, the catalog does not window filter results.
    pub(crate) fn list(filter: Option<&FilterCriteria>, page: Option<PageRequest>) -> Self {
        match filter.and_then(FilterParams::from_criteria) {
            Some(params) => Action::Filter(params),
            None => Action::GetIds(IdsParams::from(page)),
        }
    }

    pub(crate) fn name(&self) -> &'static str {
        match self {
            Action::GetIds(_) => "get_ids",
            Action::Filter(_) => "filter",
            Action::GetItems { .. } => "get_items",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub(crate) struct IdsParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    offset: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    limit: Option<NonZeroU32>,
}

impl From<Option<PageRequest>> for IdsParams {
    fn from(page: Option<PageRequest>) -> Self {
        match page {
            Some(PageRequest { offset, limit }) => IdsParams {
                offset: Some(offset),
                limit: Some(limit),
            },
            None => IdsParams::default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub(crate) struct FilterParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    product: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    price: Option<PriceParam>,
    #[serde(skip_serializing_if = "Option::is_none")]
    brand: Option<String>,
}

impl FilterParams {
    /// Only the non-blank fields, or `None` if there are none.
    fn from_criteria(criteria: &FilterCriteria) -> Option<Self> {
        if criteria.is_unconstrained() {
            return None;
        }
        Some(FilterParams {
            product: criteria.product().map(str::to_string),
            price: criteria.price().map(PriceParam::from_input),
            brand: criteria.brand().map(str::to_string),
        })
    }
}

/// Price as typed into the filter.
///
/// Sent as a JSON number when the text (ignoring surrounding whitespace) is
/// one, otherwise passed through verbatim and left to the catalog to match
/// (or reject).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub(crate) enum PriceParam {
    Number(serde_json::Number),
    Text(String),
}

impl PriceParam {
    fn from_input(input: &str) -> Self {
        match serde_json::Number::from_str(input.trim()) {
            Ok(number) => PriceParam::Number(number),
            Err(_) => PriceParam::Text(input.to_string()),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ActionResponse<T> {
    pub(crate) result: Option<T>,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::types::{FIRST_PAGE, FilterField};

    fn filter(product: &str, price: &str, brand: &str) -> FilterCriteria {
        FilterCriteria {
            product: product.to_string(),
            price: price.to_string(),
            brand: brand.to_string(),
        }
    }

    #[test]
    fn unpaged_listing_has_empty_params() {
        let action = Action::list(None, None);
        assert_eq!(
            serde_json::to_value(&action).unwrap(),
            json!({"action": "get_ids", "params": {}})
        );
    }

    #[test]
    fn paged_listing_sends_window() {
        let page = PageRequest::for_page(
            NonZeroU32::new(3).unwrap(),
            NonZeroU32::new(50).unwrap(),
        );
        let action = Action::list(Some(&FilterCriteria::default()), Some(page));
        assert_eq!(
            serde_json::to_value(&action).unwrap(),
            json!({"action": "get_ids", "params": {"offset": 100, "limit": 50}})
        );
    }

    #[test]
    fn filter_omits_blank_fields_and_page() {
        let page = PageRequest::for_page(FIRST_PAGE, NonZeroU32::new(50).unwrap());
        let action = Action::list(Some(&filter("x", "", "")), Some(page));
        assert_eq!(
            serde_json::to_value(&action).unwrap(),
            json!({"action": "filter", "params": {"product": "x"}})
        );
    }

    #[test]
    fn numeric_price_is_sent_as_number() {
        let mut criteria = FilterCriteria::default();
        criteria.set(FilterField::Price, " 17500.0");
        let action = Action::list(Some(&criteria), None);
        assert_eq!(
            serde_json::to_value(&action).unwrap(),
            json!({"action": "filter", "params": {"price": 17500.0}})
        );
    }

    #[test]
    fn text_fields_are_sent_as_typed() {
        let action = Action::list(Some(&filter(" Кольцо", "", "Piaget ")), None);
        assert_eq!(
            serde_json::to_value(&action).unwrap(),
            json!({"action": "filter", "params": {"product": " Кольцо", "brand": "Piaget "}})
        );
    }

    #[test]
    fn non_numeric_price_is_sent_verbatim() {
        let action = Action::list(Some(&filter("", "cheap", "")), None);
        assert_eq!(
            serde_json::to_value(&action).unwrap(),
            json!({"action": "filter", "params": {"price": "cheap"}})
        );
    }

    #[test]
    fn item_request_carries_ids() {
        let ids = [ProductId::from("a"), ProductId::from(7_i64)];
        let action = Action::GetItems { ids: &ids };
        assert_eq!(action.name(), "get_items");
        assert_eq!(
            serde_json::to_value(&action).unwrap(),
            json!({"action": "get_items", "params": {"ids": ["a", 7]}})
        );
    }

    #[test]
    fn response_without_result() {
        let response: ActionResponse<Vec<ProductId>> =
            serde_json::from_value(json!({"error": "nope"})).unwrap();
        assert!(response.result.is_none());
    }
}
