//! Açaí storefront command line.
//!
//! ```text
//! acai-storefront menu
//! acai-storefront order <product> <size> [topping...]
//! acai-storefront stats
//! ```
//!
//! Names are matched case-insensitively. Configuration comes from the
//! `ACAI_*` environment variables (see [`ShopConfig`]).

use std::env;
use std::process;

use tracing::info;

use acai_core::CatalogLoader;
use acai_db::Database;
use acai_storefront::commands::{menu, order};
use acai_storefront::{init_tracing, ApiError, ShopConfig};

const USAGE: &str = "\
Usage: acai-storefront <command>

Commands:
  menu                                 Print the menu as JSON
  order <product> <size> [topping...]  Price an order and print the WhatsApp link
  stats                                Print catalog row counts

Environment:
  ACAI_DB_PATH, ACAI_WHATSAPP_NUMBER, ACAI_SHOP_NAME, ACAI_GREETING,
  ACAI_DB_MAX_CONNECTIONS, RUST_LOG";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let args: Vec<String> = env::args().skip(1).collect();
    let Some(command) = args.first().map(String::as_str) else {
        eprintln!("{}", USAGE);
        process::exit(2);
    };

    if matches!(command, "-h" | "--help" | "help") {
        println!("{}", USAGE);
        return Ok(());
    }

    let config = ShopConfig::load()?;
    info!(db_path = %config.db_path.display(), shop = %config.shop_name, "Starting storefront");

    let db = Database::new(config.db_config()).await?;
    let loader = CatalogLoader::new(db.clone());

    let result = match command {
        "menu" => {
            let response = menu::load_menu(&loader, &config).await;
            println!("{}", serde_json::to_string_pretty(&response)?);
            Ok(())
        }
        "stats" => {
            let stats = menu::catalog_stats(&db).await?;
            println!("{}", serde_json::to_string_pretty(&stats)?);
            Ok(())
        }
        "order" => run_order(&loader, &config, &args[1..]).await,
        other => {
            eprintln!("Unknown command: {}\n\n{}", other, USAGE);
            db.close().await;
            process::exit(2);
        }
    };

    db.close().await;
    result.map_err(Into::into)
}

async fn run_order(
    loader: &CatalogLoader<Database>,
    config: &ShopConfig,
    args: &[String],
) -> Result<(), ApiError> {
    let (product_name, size_name, topping_names) = match args {
        [product, size, toppings @ ..] => (product, size, toppings),
        _ => return Err(ApiError::validation("order needs a product and a size")),
    };

    let products = loader.load_products().await?;
    let product = order::find_by_name(&products, product_name, |p| p.name.as_str())
        .ok_or_else(|| ApiError::not_found("Product", product_name))?;

    let mut session = order::open_session(loader, &product.id).await?;
    if let Some(blocker) = session.submission_blocker() {
        return Err(blocker);
    }

    let sizes = session.sizes().items().unwrap_or(&[]);
    let size_id = order::find_by_name(sizes, size_name, |s| s.name.as_str())
        .map(|s| s.id.clone())
        .ok_or_else(|| ApiError::not_found("Size", size_name))?;
    session.choose_size(&size_id)?;

    for name in topping_names {
        let toppings = session.toppings().items().unwrap_or(&[]);
        let topping_id = order::find_by_name(toppings, name, |t| t.name.as_str())
            .map(|t| t.id.clone())
            .ok_or_else(|| ApiError::not_found("Topping", name))?;
        session.toggle_topping(&topping_id)?;
    }

    let response = order::price_order(&session, config)?;
    println!("{}\n\n{}", response.summary, response.whatsapp_link);
    Ok(())
}
