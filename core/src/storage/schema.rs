//! SQLite schema and its migrations.
//!
//! Versions are recorded in `schema_version`, one row per applied migration.
//! Version 1 stores a single combined `duration`; version 2 splits it into
//! preparation and cooking minutes and adds category and image columns.

use anyhow::{Context, bail};
use rusqlite::{Connection, OptionalExtension};
use tracing::{debug, info};

pub const SCHEMA_VERSION: i32 = 2;

fn init_schema_version(conn: &Connection) -> anyhow::Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        )",
        [],
    )?;
    Ok(())
}

pub fn schema_version(conn: &Connection) -> anyhow::Result<i32> {
    init_schema_version(conn)?;

    let version = conn
        .query_row(
            "SELECT version FROM schema_version ORDER BY version DESC LIMIT 1",
            [],
            |row| row.get(0),
        )
        .optional()?
        .unwrap_or(0);

    Ok(version)
}

/// Brings the database up to [`SCHEMA_VERSION`]. Each step runs in its own
/// transaction together with its version row.
pub fn migrate(conn: &mut Connection) -> anyhow::Result<()> {
    let current = schema_version(conn)?;
    debug!("recipe store at schema version {current}");

    if current > SCHEMA_VERSION {
        bail!("database schema version {current} is newer than supported version {SCHEMA_VERSION}");
    }

    for version in (current + 1)..=SCHEMA_VERSION {
        let tx = conn.transaction()?;
        apply_migration(&tx, version).with_context(|| format!("migration to version {version}"))?;
        tx.execute("INSERT INTO schema_version (version) VALUES (?1)", [version])?;
        tx.commit()?;
        info!("applied recipe store migration {version}");
    }

    Ok(())
}

fn apply_migration(conn: &Connection, version: i32) -> anyhow::Result<()> {
    match version {
        1 => migrate_v1(conn),
        2 => migrate_v2(conn),
        _ => bail!("unknown schema version {version}"),
    }
}

fn migrate_v1(conn: &Connection) -> anyhow::Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE recipes (
            id TEXT PRIMARY KEY,
            title TEXT NOT NULL CHECK(length(title) <= 200),
            description TEXT CHECK(description IS NULL OR length(description) <= 4000),
            duration INTEGER NOT NULL DEFAULT 0,
            difficulty INTEGER NOT NULL DEFAULT 0,
            servings INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );

        CREATE TABLE ingredients (
            id TEXT PRIMARY KEY,
            recipe_id TEXT NOT NULL,
            name TEXT NOT NULL CHECK(length(name) <= 200),
            quantity REAL NOT NULL,
            unit TEXT NOT NULL CHECK(length(unit) <= 32),
            FOREIGN KEY (recipe_id) REFERENCES recipes(id) ON DELETE CASCADE
        );

        CREATE TABLE instruction_steps (
            id TEXT PRIMARY KEY,
            recipe_id TEXT NOT NULL,
            step_number INTEGER NOT NULL,
            text TEXT NOT NULL CHECK(length(text) <= 4000),
            FOREIGN KEY (recipe_id) REFERENCES recipes(id) ON DELETE CASCADE
        );

        CREATE INDEX idx_ingredients_recipe ON ingredients(recipe_id);
        CREATE INDEX idx_instruction_steps_recipe ON instruction_steps(recipe_id);
        ",
    )?;
    Ok(())
}

fn migrate_v2(conn: &Connection) -> anyhow::Result<()> {
    conn.execute_batch(
        "
        ALTER TABLE recipes RENAME COLUMN duration TO preparation_minutes;
        ALTER TABLE recipes ADD COLUMN category INTEGER NOT NULL DEFAULT 0;
        ALTER TABLE recipes ADD COLUMN cooking_minutes INTEGER NOT NULL DEFAULT 0;
        ALTER TABLE recipes ADD COLUMN image_url TEXT
            CHECK(image_url IS NULL OR length(image_url) <= 2000);
        CREATE INDEX idx_recipes_category ON recipes(category);
        ",
    )?;
    Ok(())
}
