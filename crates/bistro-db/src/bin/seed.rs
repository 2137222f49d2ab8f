//! # Seed Data Generator
//!
//! Populates the database with a demo menu for development.
//!
//! ## Usage
//! ```bash
//! # Seed ./bistro_dev.db with the demo menu and 12 tables
//! cargo run -p bistro-db --bin seed
//!
//! # Custom table count
//! cargo run -p bistro-db --bin seed -- --tables 20
//!
//! # Specify database path
//! cargo run -p bistro-db --bin seed -- --db ./data/bistro.db
//! ```
//!
//! ## Generated Data
//! - Four categories (Starters, Mains, Desserts, Drinks)
//! - A handful of dishes per category, some with size variants
//! - One inventory row per dish with a random-ish stock level
//! - Tables numbered 1..N with capacities of 2, 4 or 6

use bistro_core::{Category, DiningTable, InventoryItem, MenuItem, MenuVariant, TableStatus};
use bistro_db::{generate_id, Database, DbConfig};
use chrono::Utc;
use std::env;

/// Demo menu: (category, [(dish, base price in cents)])
const MENU: &[(&str, &[(&str, i64)])] = &[
    (
        "Starters",
        &[
            ("Tomato Bruschetta", 650),
            ("Garlic Bread", 450),
            ("Soup of the Day", 550),
            ("Calamari", 850),
        ],
    ),
    (
        "Mains",
        &[
            ("Classic Burger", 1200),
            ("Margherita Pizza", 1100),
            ("Grilled Salmon", 1850),
            ("Mushroom Risotto", 1400),
            ("Chicken Curry", 1300),
        ],
    ),
    (
        "Desserts",
        &[
            ("Tiramisu", 700),
            ("Chocolate Fondant", 750),
            ("Lemon Tart", 650),
        ],
    ),
    (
        "Drinks",
        &[
            ("Espresso", 250),
            ("Fresh Orange Juice", 400),
            ("Sparkling Water", 300),
            ("House Red Wine", 650),
        ],
    ),
];

/// Size variants offered on pizzas and drinks: (name, surcharge in cents)
const SIZES: &[(&str, i64)] = &[("Small", 0), ("Large", 300)];

/// Dishes that get the size variants.
const SIZED: &[&str] = &["Margherita Pizza", "Fresh Orange Juice", "House Red Wine"];

const TABLE_CAPACITIES: &[i64] = &[2, 4, 4, 6];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut tables: i64 = 12;
    let mut db_path = String::from("./bistro_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--tables" | "-t" => {
                if i + 1 < args.len() {
                    tables = args[i + 1].parse().unwrap_or(12);
                    i += 1;
                }
            }
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Bistro POS Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -t, --tables <N>   Number of dining tables (default: 12)");
                println!("  -d, --db <PATH>    Database file path (default: ./bistro_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Bistro POS Seed Data Generator");
    println!("=================================");
    println!("Database: {}", db_path);
    println!("Tables:   {}", tables);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let existing = db.categories().list().await?;
    if !existing.is_empty() {
        println!("⚠ Database already has {} categories", existing.len());
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    let start = std::time::Instant::now();
    let mut dishes = 0;

    for (sort_order, (category_name, items)) in MENU.iter().enumerate() {
        let category = new_category(category_name, sort_order as i64);
        db.categories().insert(&category).await?;

        for (name, price_cents) in items.iter() {
            let item = new_menu_item(&category, name, *price_cents);
            db.menu().insert_item(&item).await?;

            if SIZED.contains(name) {
                for (size, surcharge) in SIZES {
                    db.menu().insert_variant(&new_variant(&item, size, *surcharge)).await?;
                }
            }

            db.inventory().insert(&new_stock(&item, dishes)).await?;
            dishes += 1;
        }
    }
    println!("✓ Inserted {} dishes in {} categories", dishes, MENU.len());

    for number in 1..=tables {
        let capacity = TABLE_CAPACITIES[(number as usize) % TABLE_CAPACITIES.len()];
        if let Err(e) = db.tables().insert(&new_table(number, capacity)).await {
            eprintln!("Failed to insert table {}: {}", number, e);
        }
    }
    println!("✓ Inserted {} tables", tables);

    println!();
    println!("✓ Seed complete in {:?}", start.elapsed());

    Ok(())
}

fn new_category(name: &str, sort_order: i64) -> Category {
    let now = Utc::now();
    Category {
        id: generate_id(),
        name: name.to_string(),
        description: None,
        sort_order,
        is_active: true,
        created_at: now,
        updated_at: now,
    }
}

fn new_menu_item(category: &Category, name: &str, base_price_cents: i64) -> MenuItem {
    let now = Utc::now();
    MenuItem {
        id: generate_id(),
        name: name.to_string(),
        description: None,
        base_price_cents,
        category_id: category.id.clone(),
        image_url: None,
        is_available: true,
        is_active: true,
        created_at: now,
        updated_at: now,
    }
}

fn new_variant(item: &MenuItem, name: &str, price_add_cents: i64) -> MenuVariant {
    let now = Utc::now();
    MenuVariant {
        id: generate_id(),
        menu_item_id: item.id.clone(),
        name: name.to_string(),
        description: None,
        price_add_cents,
        is_active: true,
        created_at: now,
        updated_at: now,
    }
}

/// Stock between 0 and 60 so a few rows start below the threshold.
fn new_stock(item: &MenuItem, seed: usize) -> InventoryItem {
    let now = Utc::now();
    InventoryItem {
        id: generate_id(),
        menu_item_id: item.id.clone(),
        current_stock: ((seed * 17) % 61) as i64,
        min_stock: 10,
        max_stock: Some(100),
        unit: "portions".to_string(),
        is_active: true,
        created_at: now,
        updated_at: now,
    }
}

fn new_table(number: i64, capacity: i64) -> DiningTable {
    let now = Utc::now();
    DiningTable {
        id: generate_id(),
        table_number: number,
        capacity,
        location: None,
        status: TableStatus::Available,
        created_by: None,
        created_at: now,
        updated_at: now,
    }
}
