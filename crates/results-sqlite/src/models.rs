use serde::{Deserialize, Serialize};

pub type ScanId = i64;
pub type HostId = i64;
pub type PortId = i64;
pub type OsId = i64;
pub type OsMatchId = i64;

/// Separator for list-valued fields (CPE identifiers) stored in one column.
pub const CPE_DELIMITER: &str = "\n";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExportOptions {
    /// Free-form label stored on the scan row so users can tell scans apart.
    pub identifier: Option<String>,
}

/// What a successful export wrote.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportReport {
    pub scan_id: ScanId,
    pub schema_created: bool,
    pub hosts: usize,
    pub ports: usize,
    pub scripts: usize,
}

pub fn join_cpe(cpe: &[String]) -> String {
    cpe.join(CPE_DELIMITER)
}

/// Inverse of [`join_cpe`]. An empty column means an empty list.
pub fn split_cpe(stored: &str) -> Vec<String> {
    if stored.is_empty() {
        return Vec::new();
    }
    stored.split(CPE_DELIMITER).map(str::to_string).collect()
}
