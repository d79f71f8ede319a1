use std::num::NonZeroU32;
use std::process::ExitCode;

use anyhow::Result;
use commands::ProductListArgs;
use product_catalog::{ClientTrait, CollapseErrorExt, Product, ProductListState};
use tracing::{debug, instrument, warn};

use crate::catalog_client::init_catalog_client;
use crate::logger::init_logger;
use crate::render::PageView;

mod catalog_client;
mod commands;
mod config;
mod logger;
mod render;

/// Count the pages, then fetch the current page of `state`.
///
/// Catalog failures only show in the logs. A failed count keeps the
/// requested page as the last known one, a failed query yields an empty page.
async fn load_page(
    client: &impl ClientTrait,
    state: &mut ProductListState,
    page_size: NonZeroU32,
) -> Vec<Product> {
    match client.count_total_pages(page_size).await {
        Ok(total_pages) => state.set_total_pages(total_pages),
        Err(err) => {
            warn!(error = %err, "counting pages failed, keeping the requested page");
            state.set_total_pages(state.page().get());
        },
    }

    let products = client
        .query_page(state.filter(), state.page(), page_size)
        .await
        .or_empty("query page");
    debug!(n_products = products.len(), "showing products");
    products
}

/// Show one page of the product list.
#[instrument(skip_all, fields(page = args.page.get(), json = args.json))]
async fn run(args: ProductListArgs) -> Result<()> {
    let config = config::Config::parse()?;
    let client = init_catalog_client(&config)?;
    let page_size = args.page_size.unwrap_or(config.page_size);

    let mut state = ProductListState::new(args.page, args.filter());
    let products = load_page(&client, &mut state, page_size).await;

    let view = PageView::new(&state, &products);
    if args.json {
        println!("{}", view.to_json()?);
    } else {
        print!("{view}");
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = commands::product_list_args().run();
    init_logger(args.verbosity);

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("❌ ERROR: could not start runtime: {e}");
            return ExitCode::from(1);
        },
    };

    match runtime.block_on(run(args)) {
        Ok(()) => ExitCode::from(0),
        Err(e) => {
            debug!("{:#}", e);
            let err_str = e
                .chain()
                .skip(1)
                .fold(e.to_string(), |acc, cause| format!("{}: {}", acc, cause));
            eprintln!("❌ ERROR: {err_str}");
            ExitCode::from(1)
        },
    }
}
