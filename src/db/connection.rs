use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use rusqlite::Connection;

use crate::rating::MAX_STAR_COUNT;

/// Ensure the database file exists, run lazy migrations, and return a live
/// connection.
pub fn ensure_schema(db_path: &Path) -> Result<Connection> {
    if let Some(parent) = db_path.parent() {
        fs::create_dir_all(parent).context("failed to create data directory")?;
    }

    let conn = Connection::open(db_path).context("failed to open SQLite database")?;
    create_tables(&conn)?;
    log::info!("Database ready at {}", db_path.display());
    Ok(conn)
}

/// Open a throwaway database with the same schema. Used by tests and by
/// callers that want a scratch catalog.
pub fn open_in_memory() -> Result<Connection> {
    let conn = Connection::open_in_memory().context("failed to open in-memory database")?;
    create_tables(&conn)?;
    Ok(conn)
}

fn create_tables(conn: &Connection) -> Result<()> {
    conn.execute(
        &format!(
            "CREATE TABLE IF NOT EXISTS places (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL CHECK (trim(name) <> ''),
                location TEXT,
                category TEXT,
                image BLOB,
                rating INTEGER NOT NULL DEFAULT 0 CHECK (rating BETWEEN 0 AND {MAX_STAR_COUNT}),
                created_at TEXT NOT NULL
            )"
        ),
        [],
    )
    .context("failed to create places table")?;

    Ok(())
}
