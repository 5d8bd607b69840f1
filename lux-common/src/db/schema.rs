//! Collection schema
//!
//! The server only ever reads these tables. Creating them is for building
//! fixture databases in tests and for tooling that seeds an empty store.

use crate::Result;
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use std::path::Path;
use tracing::info;

/// Create a writable database at `db_path` with every collection table
pub async fn init_collection_database(db_path: &Path) -> Result<SqlitePool> {
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect(&db_url)
        .await?;

    create_collection_tables(&pool).await?;
    info!("Initialized collection database: {}", db_path.display());

    Ok(pool)
}

/// Create all collection tables (idempotent)
pub async fn create_collection_tables(pool: &SqlitePool) -> Result<()> {
    create_objects_table(pool).await?;
    create_agents_table(pool).await?;
    create_nationalities_table(pool).await?;
    create_classifiers_table(pool).await?;

    // Linking tables
    create_productions_table(pool).await?;
    create_agents_nationalities_table(pool).await?;
    create_objects_classifiers_table(pool).await?;

    Ok(())
}

async fn create_objects_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS objects (
            id INTEGER PRIMARY KEY,
            label TEXT,
            date TEXT
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_agents_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS agents (
            id INTEGER PRIMARY KEY,
            name TEXT,
            begin_date TEXT,
            end_date TEXT
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_nationalities_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS nationalities (
            id INTEGER PRIMARY KEY,
            descriptor TEXT
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_classifiers_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS classifiers (
            id INTEGER PRIMARY KEY,
            name TEXT
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Object x Agent, with the agent's role in `part`
async fn create_productions_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS productions (
            obj_id INTEGER NOT NULL REFERENCES objects(id),
            agt_id INTEGER NOT NULL REFERENCES agents(id),
            part TEXT
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_agents_nationalities_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS agents_nationalities (
            agt_id INTEGER NOT NULL REFERENCES agents(id),
            nat_id INTEGER NOT NULL REFERENCES nationalities(id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_objects_classifiers_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS objects_classifiers (
            obj_id INTEGER NOT NULL REFERENCES objects(id),
            cls_id INTEGER NOT NULL REFERENCES classifiers(id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}
