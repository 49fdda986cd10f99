//! First-run catalog seed data
//!
//! The shopfront ships with the business's stock catalog so a fresh install
//! renders a browsable site before the back office is ever opened. Seeding
//! only touches an empty products table; it never overwrites admin edits.

use crate::Result;
use sqlx::SqlitePool;
use tracing::info;

/// (name, category, description, image_url, unit)
const STOCK_PRODUCTS: &[(&str, &str, &str, &str, &str)] = &[
    (
        "Kota Blue Slab",
        "Slabs",
        "Hand-split limestone slab with a natural riven face.",
        "/images/products/kota-blue-slab.jpg",
        "SFT",
    ),
    (
        "Jaisalmer Yellow Tile",
        "Tiles",
        "Honed golden limestone tile for interior flooring.",
        "/images/products/jaisalmer-yellow-tile.jpg",
        "SFT",
    ),
    (
        "Sandstone Cobble",
        "Paving",
        "Tumbled cobbles for driveways and garden paths.",
        "/images/products/sandstone-cobble.jpg",
        "SFT",
    ),
    (
        "Granite Window Sill",
        "Mouldings",
        "Polished granite sill cut to standard profiles.",
        "/images/products/granite-window-sill.jpg",
        "SFT",
    ),
    (
        "Carved Stone Planter",
        "Garden",
        "Hand-carved sandstone planter, frost resistant.",
        "/images/products/carved-stone-planter.jpg",
        "Each Piece",
    ),
    (
        "Marble Garden Fountain",
        "Garden",
        "Three-tier white marble fountain with basin.",
        "/images/products/marble-garden-fountain.jpg",
        "Each Piece",
    ),
];

/// Insert the stock catalog into an empty products table
pub async fn seed_products(pool: &SqlitePool) -> Result<()> {
    let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM products")
        .fetch_one(pool)
        .await?;

    if count.0 > 0 {
        return Ok(());
    }

    for (name, category, description, image_url, unit) in STOCK_PRODUCTS {
        sqlx::query(
            "INSERT INTO products (name, category, description, image_url, unit) \
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(name)
        .bind(category)
        .bind(description)
        .bind(image_url)
        .bind(unit)
        .execute(pool)
        .await?;
    }

    info!("Seeded catalog with {} stock products", STOCK_PRODUCTS.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init::init_test_database;

    #[tokio::test]
    async fn seed_fills_empty_table_once() {
        let pool = init_test_database().await.unwrap();

        seed_products(&pool).await.unwrap();
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM products")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count.0 as usize, STOCK_PRODUCTS.len());

        // Second run is a no-op
        seed_products(&pool).await.unwrap();
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM products")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count.0 as usize, STOCK_PRODUCTS.len());
    }

    #[tokio::test]
    async fn seed_respects_existing_rows() {
        let pool = init_test_database().await.unwrap();
        sqlx::query("INSERT INTO products (name, category, unit) VALUES ('Custom', 'Slabs', 'SFT')")
            .execute(&pool)
            .await
            .unwrap();

        seed_products(&pool).await.unwrap();
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM products")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count.0, 1);
    }
}
