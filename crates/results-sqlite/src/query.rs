use crate::error::{ExportError, ExportResult};
use crate::schema::EXPECTED_TABLES;
use crate::Db;
use rusqlite::OptionalExtension;

impl Db {
    pub fn table_exists(&self, name: &str) -> ExportResult<bool> {
        let cnt: i64 = self
            .conn
            .query_row(
                "SELECT COUNT(1) FROM sqlite_master WHERE type='table' AND name=?",
                [name],
                |r| r.get(0),
            )
            .map_err(ExportError::Schema)?;
        Ok(cnt > 0)
    }

    /// Expected tables not present in the store, in creation order.
    pub fn missing_tables(&self) -> ExportResult<Vec<&'static str>> {
        let mut missing = Vec::new();
        for &name in EXPECTED_TABLES {
            if !self.table_exists(name)? {
                missing.push(name);
            }
        }
        Ok(missing)
    }

    pub fn schema_version(&self) -> ExportResult<Option<String>> {
        if !self.table_exists("nf_schema")? {
            return Ok(None);
        }
        self.conn
            .query_row("SELECT version FROM nf_schema LIMIT 1", [], |r| r.get(0))
            .optional()
            .map_err(ExportError::Schema)
    }
}
