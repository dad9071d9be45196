//! Table definitions
//!
//! Nested document parts (attributes, months, colors, vote tallies) are kept
//! as JSON text. Listing order is `rowid`, i.e. insertion order.

use crate::Result;
use sqlx::SqlitePool;
use tracing::debug;

/// Create all tables (idempotent - safe to call multiple times)
pub(crate) async fn create_tables(pool: &SqlitePool) -> Result<()> {
    create_mushrooms_table(pool).await?;
    create_reports_table(pool).await?;
    debug!("Database tables initialized (mushrooms, reports)");
    Ok(())
}

async fn create_mushrooms_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS mushrooms (
            id TEXT PRIMARY KEY,
            common_name TEXT NOT NULL,
            latin_name TEXT NOT NULL,
            order_name TEXT NOT NULL,
            genus TEXT NOT NULL,
            attributes TEXT NOT NULL DEFAULT '{}',
            habitat TEXT NOT NULL,
            months TEXT NOT NULL DEFAULT '[]',
            colors TEXT NOT NULL DEFAULT '[]',
            toxic INTEGER NOT NULL,
            average_height REAL NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    // commonName lookups are exact and case-sensitive (BINARY collation)
    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_mushrooms_common_name ON mushrooms(common_name)",
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_reports_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS reports (
            id TEXT PRIMARY KEY,
            version INTEGER NOT NULL DEFAULT 0,
            lat REAL NOT NULL,
            long REAL NOT NULL,
            img_url TEXT NOT NULL,
            username TEXT NOT NULL,
            time_stamp TEXT NOT NULL,
            notes TEXT,
            species TEXT NOT NULL,
            alternate_species TEXT NOT NULL DEFAULT '[]',
            credibility INTEGER NOT NULL,
            prevalence REAL
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}
