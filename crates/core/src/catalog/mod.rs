pub mod schema;

use std::path::{Path, PathBuf};

use rusqlite::{
    params, Connection, OpenFlags, OptionalExtension, Transaction, TransactionBehavior,
};

use crate::domain::*;
use crate::error::{Error, Result};

/// Value Shotwell stores in `develop_camera_id` when a photo has no backing file.
pub const NO_BACKING: i64 = -1;

/// The catalog operations reconciliation is built on.
///
/// Implementations never commit: the caller owning the unit of work decides
/// once, at the end of a run, whether the changes are kept.
pub trait CatalogStore {
    /// Photo rows whose primary path matches a SQL `LIKE` pattern, in store order.
    fn photos_like(&self, pattern: &str) -> Result<Vec<PhotoRecord>>;

    /// Backing rows carrying the given reference, in store order.
    fn backings_for(&self, backing_id: i64) -> Result<Vec<BackingRecord>>;

    /// Point a photo at `backing_path` and clear its develop linkage.
    fn promote_backing(&mut self, photo_id: i64, backing_path: &Path) -> Result<()>;

    /// Delete every backing row carrying the reference. Returns how many went.
    fn retire_backing(&mut self, backing_id: i64) -> Result<usize>;
}

/// SQLite connection to a Shotwell photo catalog.
pub struct Catalog {
    conn: Connection,
}

impl Catalog {
    /// Open an existing catalog. Never creates one.
    pub fn open(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(Error::CatalogNotFound(path.to_path_buf()));
        }
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        Self::from_connection(conn)
    }

    /// Create a new catalog file holding the tables this tool uses (for testing).
    pub fn create(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path)?;
        schema::initialize(&conn)?;
        Self::from_connection(conn)
    }

    /// Open an in-memory catalog (for testing).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        schema::initialize(&conn)?;
        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        // LIKE folds ASCII case by default; extension matching must not.
        conn.pragma_update(None, "case_sensitive_like", true)?;
        schema::verify(&conn)?;
        Ok(Self { conn })
    }

    /// Start the single deferred transaction a run works in.
    pub fn begin(&mut self) -> Result<UnitOfWork<'_>> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Deferred)?;
        Ok(UnitOfWork { tx })
    }

    // ── Fixtures and inspection ──────────────────────────────────────

    pub fn insert_photo(&self, path: &Path, backing_id: Option<i64>) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO PhotoTable (filename, develop_camera_id) VALUES (?1, ?2)",
            params![
                path.to_string_lossy().as_ref(),
                backing_id.unwrap_or(NO_BACKING)
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn insert_backing(&self, path: &Path) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO BackingPhotoTable (filepath) VALUES (?1)",
            params![path.to_string_lossy().as_ref()],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn get_photo(&self, id: i64) -> Result<Option<PhotoRecord>> {
        let photo = self
            .conn
            .query_row(
                "SELECT id, develop_camera_id, filename FROM PhotoTable WHERE id = ?1",
                params![id],
                photo_from_row,
            )
            .optional()?;
        Ok(photo)
    }

    pub fn get_backing(&self, id: i64) -> Result<Option<BackingRecord>> {
        let backing = self
            .conn
            .query_row(
                "SELECT id, filepath FROM BackingPhotoTable WHERE id = ?1",
                params![id],
                backing_from_row,
            )
            .optional()?;
        Ok(backing)
    }

    /// Raw `develop_camera_id` column, sentinel included.
    pub fn develop_camera_id(&self, photo_id: i64) -> Result<Option<i64>> {
        let value = self
            .conn
            .query_row(
                "SELECT develop_camera_id FROM PhotoTable WHERE id = ?1",
                params![photo_id],
                |row| row.get::<_, Option<i64>>(0),
            )
            .optional()?;
        Ok(value.flatten())
    }

    pub fn count_backings(&self) -> Result<usize> {
        let count: i64 =
            self.conn
                .query_row("SELECT COUNT(*) FROM BackingPhotoTable", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}

/// The transaction of one run.
///
/// Dropping it without calling [`UnitOfWork::finish`] rolls everything back.
pub struct UnitOfWork<'c> {
    tx: Transaction<'c>,
}

impl UnitOfWork<'_> {
    /// Commit or discard everything done in this unit of work.
    pub fn finish(self, mode: RunMode) -> Result<()> {
        match mode {
            RunMode::Persist => self.tx.commit()?,
            RunMode::Simulate => self.tx.rollback()?,
        }
        Ok(())
    }
}

impl CatalogStore for UnitOfWork<'_> {
    fn photos_like(&self, pattern: &str) -> Result<Vec<PhotoRecord>> {
        let mut stmt = self.tx.prepare(
            "SELECT id, develop_camera_id, filename FROM PhotoTable WHERE filename LIKE ?1",
        )?;
        let photos = stmt
            .query_map(params![pattern], photo_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(photos)
    }

    fn backings_for(&self, backing_id: i64) -> Result<Vec<BackingRecord>> {
        let mut stmt = self
            .tx
            .prepare("SELECT id, filepath FROM BackingPhotoTable WHERE id = ?1")?;
        let backings = stmt
            .query_map(params![backing_id], backing_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(backings)
    }

    fn promote_backing(&mut self, photo_id: i64, backing_path: &Path) -> Result<()> {
        let changed = self.tx.execute(
            "UPDATE PhotoTable SET filename = ?1, develop_camera_id = ?2 WHERE id = ?3",
            params![backing_path.to_string_lossy().as_ref(), NO_BACKING, photo_id],
        )?;
        if changed == 0 {
            return Err(Error::StaleReference {
                table: "PhotoTable",
                id: photo_id,
            });
        }
        Ok(())
    }

    fn retire_backing(&mut self, backing_id: i64) -> Result<usize> {
        let removed = self.tx.execute(
            "DELETE FROM BackingPhotoTable WHERE id = ?1",
            params![backing_id],
        )?;
        if removed == 0 {
            return Err(Error::StaleReference {
                table: "BackingPhotoTable",
                id: backing_id,
            });
        }
        Ok(removed)
    }
}

fn photo_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<PhotoRecord> {
    Ok(PhotoRecord {
        id: row.get(0)?,
        backing_id: backing_ref(row.get(1)?),
        path: PathBuf::from(row.get::<_, String>(2)?),
    })
}

fn backing_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<BackingRecord> {
    Ok(BackingRecord {
        id: row.get(0)?,
        path: PathBuf::from(row.get::<_, String>(1)?),
    })
}

/// NULL and the sentinel both mean "no backing file".
fn backing_ref(column: Option<i64>) -> Option<i64> {
    column.filter(|id| *id != NO_BACKING)
}
