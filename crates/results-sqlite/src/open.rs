use crate::error::{ExportError, ExportResult};
use crate::schema::{CREATE_SCHEMA, RECORD_VERSION, SCHEMA_VERSION};
use rusqlite::{params, Connection};
use std::path::Path;
use tracing::{debug, info, warn};

pub struct Db {
    pub conn: Connection,
}

impl Db {
    /// Open (or create) the store at `path`. `file:` URIs are accepted.
    pub fn open(path: impl AsRef<Path>) -> ExportResult<Self> {
        let path = path.as_ref();
        let conn = Connection::open(path).map_err(ExportError::Connection)?;
        apply_pragmas(&conn, true).map_err(ExportError::Connection)?;
        debug!(path = %path.display(), "results database opened");
        Ok(Db { conn })
    }

    pub fn open_in_memory() -> ExportResult<Self> {
        let conn = Connection::open_in_memory().map_err(ExportError::Connection)?;
        apply_pragmas(&conn, false).map_err(ExportError::Connection)?;
        Ok(Db { conn })
    }

    /// Create the schema if any expected table is missing.
    /// Returns whether the creation script ran.
    pub fn ensure_schema(&self) -> ExportResult<bool> {
        let missing = self.missing_tables()?;
        if missing.is_empty() {
            return Ok(false);
        }
        debug!(?missing, "schema incomplete");
        let tx = self.conn.unchecked_transaction().map_err(ExportError::Schema)?;
        let created = tx
            .execute_batch(CREATE_SCHEMA)
            .and_then(|_| tx.execute(RECORD_VERSION, params![SCHEMA_VERSION]));
        if let Err(e) = created {
            if let Err(rb) = tx.rollback() {
                warn!(error = %rb, "schema rollback failed");
            }
            return Err(ExportError::Schema(e));
        }
        tx.commit().map_err(ExportError::Schema)?;
        info!("results schema created");
        Ok(true)
    }
}

fn apply_pragmas(conn: &Connection, on_disk: bool) -> rusqlite::Result<()> {
    conn.pragma_update(None, "foreign_keys", "ON")?;
    conn.pragma_update(None, "synchronous", "NORMAL")?;
    if on_disk {
        let mode: String =
            conn.pragma_update_and_check(None, "journal_mode", "WAL", |r| r.get(0))?;
        debug!(%mode, "journal mode set");
    }
    Ok(())
}
