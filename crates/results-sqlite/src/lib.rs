//! SQLite sink for parsed scan results.
//!
//! [`Db::export`] writes a scan document into the `nf_`-prefixed schema,
//! creating the tables on first use, inside one transaction per scan.

mod error;
mod export;
mod insert;
mod models;
mod open;
mod query;
mod schema;

#[cfg(test)]
mod fixtures;

pub use error::{ExportError, ExportResult, Stage};
pub use models::*;
pub use open::Db;
pub use schema::{EXPECTED_TABLES, SCHEMA_VERSION};
