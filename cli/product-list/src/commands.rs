use std::num::NonZeroU32;

use bpaf::Bpaf;
use product_catalog::{FIRST_PAGE, FilterCriteria, PageNumber};

static DESCRIPTION: &str = "List products of the catalog, one page at a time.";

fn vec_len<T>(x: Vec<T>) -> usize {
    Vec::len(&x)
}

#[derive(Bpaf, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verbosity {
    Verbose(
        /// Increase logging verbosity
        ///
        /// Invoke multiple times for increasing detail.
        #[bpaf(short('v'), long("verbose"), req_flag(()), many, map(vec_len))]
        usize,
    ),

    /// Silence logs except for errors
    #[bpaf(short, long)]
    Quiet,
}

impl Default for Verbosity {
    fn default() -> Self {
        Verbosity::Verbose(0)
    }
}

#[derive(Bpaf, Clone, Debug)]
#[bpaf(options, version, descr(DESCRIPTION))]
pub struct ProductListArgs {
    #[bpaf(external, fallback(Default::default()))]
    pub verbosity: Verbosity,

    /// Page to show, starting at 1
    #[bpaf(long, argument("PAGE"), fallback(FIRST_PAGE))]
    pub page: PageNumber,

    /// Products per page (defaults to the configured page size)
    #[bpaf(long("page-size"), argument("SIZE"))]
    pub page_size: Option<NonZeroU32>,

    /// Only products with exactly this name
    #[bpaf(long, argument("NAME"))]
    pub product: Option<String>,

    /// Only products with exactly this price
    #[bpaf(long, argument("PRICE"))]
    pub price: Option<String>,

    /// Only products of this brand
    #[bpaf(long, argument("BRAND"))]
    pub brand: Option<String>,

    /// Print the page as JSON
    #[bpaf(long)]
    pub json: bool,
}

impl ProductListArgs {
    pub fn filter(&self) -> FilterCriteria {
        FilterCriteria {
            product: self.product.clone().unwrap_or_default(),
            price: self.price.clone().unwrap_or_default(),
            brand: self.brand.clone().unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn parse(args: &[&str]) -> ProductListArgs {
        product_list_args().run_inner(args).unwrap()
    }

    #[test]
    fn defaults_to_first_unfiltered_page() {
        let args = parse(&[]);
        assert_eq!(args.page, FIRST_PAGE);
        assert_eq!(args.page_size, None);
        assert_eq!(args.verbosity, Verbosity::Verbose(0));
        assert!(args.filter().is_unconstrained());
        assert!(!args.json);
    }

    #[test]
    fn parses_filter_and_page() {
        let args = parse(&[
            "--page", "3", "--brand", "Piaget", "--price", "17500", "-vv", "--json",
        ]);
        assert_eq!(args.page.get(), 3);
        assert_eq!(args.verbosity, Verbosity::Verbose(2));
        assert_eq!(args.filter(), FilterCriteria {
            product: String::new(),
            price: "17500".to_string(),
            brand: "Piaget".to_string(),
        });
        assert!(args.json);
    }

    #[test]
    fn page_zero_is_rejected() {
        assert!(product_list_args().run_inner(&["--page", "0"]).is_err());
    }
}
