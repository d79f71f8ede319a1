//! Catalog domain types.
//!
//! Products and their identifiers as returned by the catalog,
//! and the filter and page inputs of a query.

use std::fmt::Display;
use std::num::NonZeroU32;

use derive_more::From;
use serde::{Deserialize, Serialize};

/// 1-based page number.
pub type PageNumber = NonZeroU32;

pub const FIRST_PAGE: PageNumber = NonZeroU32::new(1).unwrap();
pub const DEFAULT_PAGE_SIZE: NonZeroU32 = NonZeroU32::new(50).unwrap();

// ---------------------------------------------------------------------------
// Products
// ---------------------------------------------------------------------------

/// Identifier of a product.
///
/// The catalog decides the representation, so both numbers and strings are
/// accepted and sent back exactly as received. Numbers keep their JSON form,
/// floats and integers beyond `i64` included.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, From)]
#[serde(untagged)]
pub enum ProductId {
    Number(serde_json::Number),
    Text(String),
}

impl From<i64> for ProductId {
    fn from(value: i64) -> Self {
        ProductId::Number(value.into())
    }
}

impl From<&str> for ProductId {
    fn from(value: &str) -> Self {
        ProductId::Text(value.to_string())
    }
}

impl Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProductId::Number(n) => write!(f, "{n}"),
            ProductId::Text(s) => write!(f, "{s}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    /// Product name
    pub product: String,
    pub price: f64,
    #[serde(default)]
    pub brand: Option<String>,
}

// ---------------------------------------------------------------------------
// Filtering
// ---------------------------------------------------------------------------

/// Filter inputs of the product list.
///
/// Every field holds the raw text of its input and is sent as typed.
/// An empty (or blank) field does not constrain the result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterCriteria {
    pub product: String,
    pub price: String,
    pub brand: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterField {
    Product,
    Price,
    Brand,
}

impl FilterCriteria {
    /// True if no field constrains the result.
    pub fn is_unconstrained(&self) -> bool {
        self.product().is_none() && self.price().is_none() && self.brand().is_none()
    }

    pub fn set(&mut self, field: FilterField, value: impl Into<String>) {
        let slot = match field {
            FilterField::Product => &mut self.product,
            FilterField::Price => &mut self.price,
            FilterField::Brand => &mut self.brand,
        };
        *slot = value.into();
    }

    pub(crate) fn product(&self) -> Option<&str> {
        non_blank(&self.product)
    }

    pub(crate) fn price(&self) -> Option<&str> {
        non_blank(&self.price)
    }

    pub(crate) fn brand(&self) -> Option<&str> {
        non_blank(&self.brand)
    }
}

fn non_blank(value: &str) -> Option<&str> {
    (!value.trim().is_empty()).then_some(value)
}

// ---------------------------------------------------------------------------
// Pagination
// ---------------------------------------------------------------------------

/// Offset/limit window into the full identifier listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub offset: u64,
    pub limit: NonZeroU32,
}

impl PageRequest {
    /// The window showing `page` when every page holds `page_size` items.
    pub fn for_page(page: PageNumber, page_size: NonZeroU32) -> Self {
        Self {
            offset: u64::from(page.get() - 1) * u64::from(page_size.get()),
            limit: page_size,
        }
    }

    /// Apply the window to an already complete listing.
    pub fn apply<T>(&self, items: Vec<T>) -> Vec<T> {
        let offset = usize::try_from(self.offset).unwrap_or(usize::MAX);
        items
            .into_iter()
            .skip(offset)
            .take(self.limit.get() as usize)
            .collect()
    }
}

/// Number of pages needed to show `total` items, at least one.
pub fn page_count(total: usize, page_size: NonZeroU32) -> u32 {
    let pages = total.div_ceil(page_size.get() as usize).max(1);
    u32::try_from(pages).unwrap_or(u32::MAX)
}
