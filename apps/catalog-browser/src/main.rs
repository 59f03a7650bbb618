//! Catalog Browser
//!
//! Lists the product catalog and shows refreshed product details from the
//! command line, driving the same screen controllers a UI would.

use clap::{Parser, Subcommand};
use core_config::tracing::{init_tracing, install_color_eyre};
use domain_products::{catalog_service, Product, ProductUsecase};
use eyre::{bail, eyre, Result};
use fetch_coordinator::FetchState;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

use catalog_browser::config::{Config, Overrides};
use catalog_browser::navigation::{NavigationStack, Route};
use catalog_browser::screens::{CatalogScreen, DetailScreen};

#[derive(Parser)]
#[command(name = "catalog-browser")]
#[command(about = "Browse the product catalog")]
struct Cli {
    /// Catalog JSON file to serve instead of the bundled one
    #[arg(long, global = true)]
    fixture: Option<PathBuf>,

    /// Simulated provider latency in milliseconds
    #[arg(long, global = true)]
    latency_ms: Option<u64>,

    /// Fail on unknown ids instead of falling back to the first product
    #[arg(long, global = true)]
    strict: bool,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every product in the catalog
    List,

    /// Open a product and refresh it; unknown ids follow the lookup policy
    Show {
        /// Product id
        id: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    install_color_eyre();

    let cli = Cli::parse();
    let config = Config::from_env()?.with_overrides(Overrides {
        fixture: cli.fixture.clone(),
        latency_ms: cli.latency_ms,
        strict: cli.strict,
    });
    init_tracing(&config.environment);

    info!(
        policy = %config.lookup_policy(),
        fixture = ?config.catalog.fixture_path,
        "starting catalog browser"
    );

    let usecase: Arc<dyn ProductUsecase> =
        Arc::new(catalog_service(config.provider(), config.lookup_policy()));

    let catalog = CatalogScreen::new(Arc::clone(&usecase));
    catalog.on_appear();
    settle(catalog.settled().await)?;

    match cli.command {
        Commands::List => {
            let products = catalog.products();
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&products)?);
            } else {
                for product in &products {
                    println!("{}", summary(product));
                }
            }
        }

        Commands::Show { id } => {
            let selected = catalog
                .open(&id)
                .ok_or_else(|| eyre!("The catalog is empty, nothing to show for {}", id))?;

            let mut stack = NavigationStack::new();
            stack.navigate(Route::Detail(selected));

            let Route::Detail(product) = stack.current() else {
                bail!("Navigation did not reach the detail screen");
            };

            let detail = DetailScreen::new(usecase, product.clone());
            detail.on_appear();
            settle(detail.settled().await)?;

            let product = detail.product();
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&product)?);
            } else {
                print_detail(&product);
            }
        }
    }

    Ok(())
}

fn settle(state: FetchState) -> Result<()> {
    match state {
        FetchState::Normal => Ok(()),
        FetchState::Error(message) => bail!(message),
        other => bail!("Fetch ended in unexpected state: {}", other),
    }
}

fn summary(product: &Product) -> String {
    if product.is_discounted() {
        format!(
            "{}  {}  {} ({}% off {})",
            product.id, product.name, product.discount_price, product.discount_rate, product.price
        )
    } else {
        format!("{}  {}  {}", product.id, product.name, product.price)
    }
}

fn print_detail(product: &Product) {
    println!("{}", summary(product));
    println!("  brand:    {}", product.brand);
    println!(
        "  rating:   {:.1} ({} reviews)",
        product.rating, product.review_count
    );
    if !product.tags.is_empty() {
        println!("  tags:     {}", product.tags.join(", "));
    }
    for benefit in &product.benefits {
        println!("  benefit:  {}", benefit);
    }
    println!("  link:     {}", product.link);
}
