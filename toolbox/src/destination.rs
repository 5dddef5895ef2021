//! Where the exported database ends up.

use anyhow::{Context, Result};
use results_sqlite::{Db, ExportOptions, ExportReport};
use scanstore_core::NmapRun;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    /// Write into this database file in place.
    File(PathBuf),
    /// Write through a DSN (path or `file:` URI).
    Dsn(String),
    /// Build a scratch database and stream its bytes to stdout.
    Stdout,
}

impl Destination {
    /// An output file wins over a DSN; with neither, the database is streamed.
    pub fn resolve(output_file: Option<PathBuf>, dsn: Option<String>) -> Self {
        match (output_file, dsn) {
            (Some(p), _) => Destination::File(p),
            (None, Some(d)) => Destination::Dsn(d),
            (None, None) => Destination::Stdout,
        }
    }

    pub fn is_stdout(&self) -> bool {
        matches!(self, Destination::Stdout)
    }
}

/// Export `run` to `dest`. For [`Destination::Stdout`] the database bytes are
/// written to `out` once the export has committed.
pub fn export_to<W: Write>(
    dest: &Destination,
    run: &NmapRun,
    opts: &ExportOptions,
    out: &mut W,
) -> Result<ExportReport> {
    match dest {
        Destination::File(path) => export_at(path, run, opts),
        Destination::Dsn(dsn) => export_at(Path::new(dsn), run, opts),
        Destination::Stdout => {
            let scratch = scratch_dir()?;
            let path = scratch.path().join(SCRATCH_DB);
            let report = export_at(&path, run, opts)?;
            let bytes = fs::read(&path)
                .with_context(|| format!("reading scratch database {}", path.display()))?;
            out.write_all(&bytes)?;
            out.flush()?;
            Ok(report)
        }
    }
}

pub fn init_at(path: &Path) -> Result<bool> {
    let db = Db::open(path)?;
    Ok(db.ensure_schema()?)
}

fn export_at(path: &Path, run: &NmapRun, opts: &ExportOptions) -> Result<ExportReport> {
    let mut db = Db::open(path).with_context(|| format!("opening {}", path.display()))?;
    let report = db.export(run, opts)?;
    Ok(report)
}

const SCRATCH_DB: &str = "scan.sqlite";

/// Holds the streamed database and its journal files; removed on drop.
fn scratch_dir() -> Result<TempDir> {
    let dir = tempfile::Builder::new()
        .prefix("scanstore-")
        .tempdir()
        .context("creating scratch directory")?;
    debug!(path = %dir.path().display(), "scratch directory created");
    Ok(dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use scanstore_core::{Host, Port};

    fn sample_run() -> NmapRun {
        NmapRun {
            scanner: "nmap".into(),
            hosts: vec![Host {
                ports: vec![Port { protocol: "tcp".into(), port_id: 22, ..Default::default() }],
                ..Default::default()
            }],
            ..Default::default()
        }
    }

    #[test]
    fn output_file_wins_over_dsn() {
        let d = Destination::resolve(Some("a.sqlite".into()), Some("b.sqlite".into()));
        assert_eq!(d, Destination::File("a.sqlite".into()));
        let d = Destination::resolve(None, Some("b.sqlite".into()));
        assert_eq!(d, Destination::Dsn("b.sqlite".into()));
        assert!(Destination::resolve(None, None).is_stdout());
    }

    #[test]
    fn file_destination_writes_in_place() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scans.sqlite");
        let dest = Destination::File(path.clone());
        let mut sink = Vec::new();

        let report = export_to(&dest, &sample_run(), &ExportOptions::default(), &mut sink).unwrap();
        assert!(report.schema_created);
        assert_eq!(report.ports, 1);
        assert!(sink.is_empty());

        let again = export_to(&dest, &sample_run(), &ExportOptions::default(), &mut sink).unwrap();
        assert!(!again.schema_created);
        assert_ne!(report.scan_id, again.scan_id);
    }

    #[test]
    fn stdout_destination_streams_a_database() {
        let mut sink = Vec::new();
        let report = export_to(&Destination::Stdout, &sample_run(), &ExportOptions::default(), &mut sink).unwrap();
        assert_eq!(report.hosts, 1);
        assert!(sink.starts_with(b"SQLite format 3\0"));

        let dir = tempfile::tempdir().unwrap();
        let copy = dir.path().join("streamed.sqlite");
        fs::write(&copy, &sink).unwrap();
        let db = Db::open(&copy).unwrap();
        let hosts: i64 = db.conn.query_row("SELECT COUNT(*) FROM nf_host", [], |r| r.get(0)).unwrap();
        assert_eq!(hosts, 1);
    }

    #[test]
    fn scratch_dir_takes_journal_files_with_it() {
        let scratch = scratch_dir().unwrap();
        let root = scratch.path().to_path_buf();
        let path = root.join(SCRATCH_DB);
        let db = Db::open(&path).unwrap();
        db.ensure_schema().unwrap();
        // WAL mode keeps -wal/-shm next to the open database
        assert!(fs::read_dir(&root).unwrap().count() > 1);
        drop(db);
        drop(scratch);
        assert!(!root.exists());
    }

    #[test]
    fn init_creates_schema_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scans.sqlite");
        assert!(init_at(&path).unwrap());
        assert!(!init_at(&path).unwrap());
    }
}
