use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("catalog does not exist: {}", .0.display())]
    CatalogNotFound(PathBuf),

    #[error("catalog schema mismatch: {table}.{column} is missing")]
    SchemaMismatch { table: String, column: String },

    #[error("stale reference: no row in {table} with id {id}")]
    StaleReference { table: &'static str, id: i64 },

    #[error("no path prefixes given")]
    NoPrefixes,
}

pub type Result<T> = std::result::Result<T, Error>;
