use rusqlite::Connection;

use crate::error::{Error, Result};

/// Columns this tool reads or writes, per table. The rest of the schema belongs to Shotwell.
pub const REQUIRED_COLUMNS: &[(&str, &[&str])] = &[
    ("PhotoTable", &["id", "filename", "develop_camera_id"]),
    ("BackingPhotoTable", &["id", "filepath"]),
];

/// Create the subset of the Shotwell schema this tool touches.
/// Only used to build fixture catalogs; real catalogs already have it.
pub fn initialize(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS PhotoTable (
            id                  INTEGER PRIMARY KEY,
            filename            TEXT UNIQUE NOT NULL,
            width               INTEGER,
            height              INTEGER,
            filesize            INTEGER,
            timestamp           INTEGER,
            file_format         INTEGER DEFAULT 0,
            editable_id         INTEGER DEFAULT -1,
            developer           TEXT,
            develop_shotwell_id INTEGER DEFAULT -1,
            develop_camera_id   INTEGER DEFAULT -1,
            develop_embedded_id INTEGER DEFAULT -1
        );

        CREATE TABLE IF NOT EXISTS BackingPhotoTable (
            id                   INTEGER PRIMARY KEY,
            filepath             TEXT UNIQUE NOT NULL,
            timestamp            INTEGER,
            filesize             INTEGER,
            width                INTEGER,
            height               INTEGER,
            original_orientation INTEGER,
            file_format          INTEGER,
            time_created         INTEGER
        );
        ",
    )?;
    Ok(())
}

/// Check that every required table and column is present.
pub fn verify(conn: &Connection) -> Result<()> {
    for (table, columns) in REQUIRED_COLUMNS {
        let existing = table_columns(conn, table)?;
        for column in *columns {
            if !existing.iter().any(|c| c == column) {
                return Err(Error::SchemaMismatch {
                    table: table.to_string(),
                    column: column.to_string(),
                });
            }
        }
    }
    Ok(())
}

fn table_columns(conn: &Connection, table: &str) -> Result<Vec<String>> {
    // table_info yields no rows for an unknown table
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table})"))?;
    let columns = stmt
        .query_map([], |row| row.get::<_, String>(1))?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(columns)
}
