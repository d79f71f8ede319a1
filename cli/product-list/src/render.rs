use std::fmt::{self, Display};

use anyhow::Result;
use product_catalog::{Product, ProductListState};
use serde::Serialize;

/// One page of the product list, ready to print.
#[derive(Debug, Serialize)]
pub struct PageView<'a> {
    pub page: u32,
    pub total_pages: u32,
    pub products: &'a [Product],
    #[serde(skip)]
    has_prev: bool,
    #[serde(skip)]
    has_next: bool,
}

impl<'a> PageView<'a> {
    pub fn new(state: &ProductListState, products: &'a [Product]) -> Self {
        Self {
            page: state.page().get(),
            total_pages: state.total_pages(),
            products,
            has_prev: state.has_prev(),
            has_next: state.has_next(),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// The page as text: a header, one line per product, then navigation hints.
impl Display for PageView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Page {} of {}", self.page, self.total_pages)?;
        if self.products.is_empty() {
            writeln!(f, "No products found.")?;
        }
        for product in self.products {
            writeln!(
                f,
                "ID: {}, Название: {}, Цена: {}, Бренд: {}",
                product.id,
                product.product,
                product.price,
                product.brand.as_deref().unwrap_or_default()
            )?;
        }
        if self.has_prev {
            writeln!(f, "Предыдущая страница: --page {}", self.page - 1)?;
        }
        if self.has_next {
            writeln!(f, "Следующая страница: --page {}", self.page + 1)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroU32;

    use pretty_assertions::assert_eq;
    use product_catalog::{FilterCriteria, ProductId};

    use super::*;

    fn products() -> Vec<Product> {
        vec![
            Product {
                id: ProductId::from("1789ecf3-f81c-4f49-ada2-83804dcc74b0"),
                product: "Золотое кольцо".to_string(),
                price: 16700.0,
                brand: Some("Piaget".to_string()),
            },
            Product {
                id: ProductId::from(7_i64),
                product: "Серьги".to_string(),
                price: 1250.5,
                brand: None,
            },
        ]
    }

    #[test]
    fn text_lists_products_and_navigation() {
        let mut state =
            ProductListState::new(NonZeroU32::new(2).unwrap(), FilterCriteria::default());
        state.set_total_pages(3);
        let products = products();

        let text = PageView::new(&state, &products).to_string();
        assert_eq!(text, [
            "Page 2 of 3",
            "ID: 1789ecf3-f81c-4f49-ada2-83804dcc74b0, Название: Золотое кольцо, Цена: 16700, Бренд: Piaget",
            "ID: 7, Название: Серьги, Цена: 1250.5, Бренд: ",
            "Предыдущая страница: --page 1",
            "Следующая страница: --page 3",
            "",
        ]
        .join("\n"));
    }

    #[test]
    fn empty_page() {
        let state = ProductListState::default();
        let text = PageView::new(&state, &[]).to_string();
        assert_eq!(text, "Page 1 of 1\nNo products found.\n");
    }

    #[test]
    fn json_has_page_and_products() {
        let state = ProductListState::default();
        let products = products();
        let json: serde_json::Value =
            serde_json::from_str(&PageView::new(&state, &products).to_json().unwrap()).unwrap();
        assert_eq!(json["page"], 1);
        assert_eq!(json["total_pages"], 1);
        assert_eq!(json["products"][1]["id"], 7);
        assert_eq!(json["products"][1]["brand"], serde_json::Value::Null);
        assert!(json.get("has_next").is_none());
    }
}
