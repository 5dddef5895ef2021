use std::fmt;
use thiserror::Error;

/// Stage of the export at which an insert failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Scan,
    Host,
    TraceHop,
    Address,
    Hostname,
    Os,
    OsPortUsed,
    OsMatch,
    OsClass,
    Port,
    Script,
}

impl Stage {
    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Scan => "scan",
            Stage::Host => "host",
            Stage::TraceHop => "trace hop",
            Stage::Address => "host address",
            Stage::Hostname => "hostname",
            Stage::Os => "os record",
            Stage::OsPortUsed => "os port used",
            Stage::OsMatch => "os match",
            Stage::OsClass => "os class",
            Stage::Port => "port",
            Stage::Script => "port script",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("could not open database connection: {0}")]
    Connection(#[source] rusqlite::Error),

    #[error("could not generate schema: {0}")]
    Schema(#[source] rusqlite::Error),

    #[error("could not insert {stage}: {source}")]
    Insert {
        stage: Stage,
        #[source]
        source: rusqlite::Error,
    },

    #[error("could not commit scan: {0}")]
    Commit(#[source] rusqlite::Error),
}

impl ExportError {
    /// Stage that failed, for insert errors.
    pub fn stage(&self) -> Option<Stage> {
        match self {
            ExportError::Insert { stage, .. } => Some(*stage),
            _ => None,
        }
    }
}

pub type ExportResult<T> = Result<T, ExportError>;

/// Tags a rusqlite result with the insert stage it came from.
pub(crate) trait InsertContext<T> {
    fn stage(self, stage: Stage) -> ExportResult<T>;
}

impl<T> InsertContext<T> for Result<T, rusqlite::Error> {
    fn stage(self, stage: Stage) -> ExportResult<T> {
        self.map_err(|source| ExportError::Insert { stage, source })
    }
}
