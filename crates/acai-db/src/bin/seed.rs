//! # Seed Data Generator
//!
//! Populates the database with the shop's starting menu.
//!
//! ## Usage
//! ```bash
//! # Seed ./acai_dev.db
//! cargo run -p acai-db --bin seed
//!
//! # Specify database path
//! cargo run -p acai-db --bin seed -- --db ./data/acai.db
//! ```
//!
//! ## Seeded Catalog
//! - 3 sizes: 300ml, 500ml, 700ml
//! - 8 toppings, grouped into categories
//! - 6 products
//! - 3 combos
//!
//! Running it twice is harmless: a database that already has sizes is left
//! untouched.

use std::env;

use acai_core::{Combo, ComboIcon, Money, Product, Size, Topping};
use acai_db::{generate_id, Database, DbConfig};

/// (name, price in centavos)
const SIZES: &[(&str, i64)] = &[("300ml", 1200), ("500ml", 1800), ("700ml", 2400)];

/// (name, price in centavos, category)
const TOPPINGS: &[(&str, i64, &str)] = &[
    ("Granola", 200, "Cereais"),
    ("Leite em Pó", 200, "Cremes"),
    ("Leite Condensado", 300, "Caldas"),
    ("Paçoca", 200, "Doces"),
    ("Banana", 250, "Frutas"),
    ("Morango", 300, "Frutas"),
    ("Nutella", 500, "Cremes"),
    ("Mel", 200, "Caldas"),
];

/// (name, description, base price in centavos, badge)
const PRODUCTS: &[(&str, &str, i64, Option<&str>)] = &[
    (
        "Açaí Tradicional",
        "Açaí puro e cremoso, batido na hora. O sabor original da Amazônia.",
        1200,
        Some("Mais Pedido"),
    ),
    (
        "Açaí com Banana",
        "Açaí cremoso batido com banana fresca. Combinação perfeita!",
        1400,
        None,
    ),
    (
        "Açaí com Morango",
        "Açaí batido com morangos frescos. Sabor irresistível!",
        1500,
        None,
    ),
    (
        "Açaí Tropical",
        "Mix de açaí com frutas tropicais. Refrescante e nutritivo.",
        1600,
        Some("Novidade"),
    ),
    (
        "Açaí Power",
        "Açaí turbinado com whey protein e pasta de amendoim.",
        1800,
        None,
    ),
    (
        "Açaí Zero",
        "Açaí sem adição de açúcar. Ideal para dietas low carb.",
        1400,
        None,
    ),
];

/// (name, description, original price, price, badge, icon)
const COMBOS: &[(&str, &str, i64, i64, &str, ComboIcon)] = &[
    (
        "Combo Família",
        "2 açaís 700ml + 2 açaís 500ml com 4 adicionais cada. Perfeito para compartilhar!",
        8400,
        6990,
        "Mais Pedido",
        ComboIcon::Star,
    ),
    (
        "Combo Casal",
        "2 açaís 500ml com 3 adicionais cada + 2 garrafas de água.",
        4200,
        3490,
        "Promoção",
        ComboIcon::Flame,
    ),
    (
        "Combo Fitness",
        "Açaí 500ml + whey protein + banana + granola + pasta de amendoim.",
        3200,
        2690,
        "Novidade",
        ComboIcon::Star,
    ),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./acai_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Açaí Storefront Seed Data");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./acai_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Açaí Storefront Seed Data");
    println!("============================");
    println!("Database: {}", db_path);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let existing = db.sizes().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} sizes", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    for (order, (name, cents)) in (0..).zip(SIZES) {
        db.sizes()
            .insert(&Size::new(generate_id(), *name, Money::from_cents(*cents), order))
            .await?;
    }
    println!("✓ {} sizes", SIZES.len());

    for (order, (name, cents, category)) in (0..).zip(TOPPINGS) {
        let topping = Topping::new(generate_id(), *name, Money::from_cents(*cents), order)
            .with_category(*category);
        db.toppings().insert(&topping).await?;
    }
    println!("✓ {} toppings", TOPPINGS.len());

    for (order, (name, description, cents, badge)) in (0..).zip(PRODUCTS) {
        let mut product = Product::new(generate_id(), *name, Money::from_cents(*cents));
        product.description = Some(description.to_string());
        product.badge = badge.map(str::to_string);
        product.display_order = order;
        db.products().insert(&product).await?;
    }
    println!("✓ {} products", PRODUCTS.len());

    for (order, (name, description, original, price, badge, icon)) in (0..).zip(COMBOS) {
        let mut combo = Combo::new(generate_id(), *name, Money::from_cents(*price));
        combo.description = Some(description.to_string());
        combo.original_price = Some(Money::from_cents(*original));
        combo.badge = Some(badge.to_string());
        combo.icon = *icon;
        combo.display_order = order;
        db.combos().insert(&combo).await?;
    }
    println!("✓ {} combos", COMBOS.len());

    let stats = db.stats().await?;
    println!();
    println!(
        "✓ Seed complete! ({} products, {} sizes, {} toppings, {} combos)",
        stats.products, stats.sizes, stats.toppings, stats.combos
    );

    db.close().await;
    Ok(())
}
