use crate::error::{ExportError, ExportResult};
use crate::insert;
use crate::models::{ExportOptions, ExportReport, ScanId};
use crate::Db;
use rusqlite::Connection;
use scanstore_core::{Host, NmapRun};
use time::OffsetDateTime;
use tracing::{info, warn};

impl Db {
    /// Write one scan document and its whole subtree in a single transaction.
    ///
    /// Each call appends a new scan row; nothing is deduplicated. The schema is
    /// created first if any table is missing. On error the transaction is
    /// rolled back and nothing from this call is left in the store.
    pub fn export(&mut self, run: &NmapRun, opts: &ExportOptions) -> ExportResult<ExportReport> {
        let schema_created = self.ensure_schema()?;

        let tx = self.conn.transaction().map_err(ExportError::Connection)?;
        let created_at = OffsetDateTime::now_utc().unix_timestamp();

        match write_scan(&tx, run, opts, created_at) {
            Ok(mut report) => {
                tx.commit().map_err(ExportError::Commit)?;
                report.schema_created = schema_created;
                info!(scan_id = report.scan_id, hosts = report.hosts, ports = report.ports, "scan committed");
                Ok(report)
            }
            Err(err) => {
                if let Err(rb) = tx.rollback() {
                    warn!(error = %rb, "rollback failed");
                }
                warn!(error = %err, "export rolled back");
                Err(err)
            }
        }
    }
}

fn write_scan(
    conn: &Connection,
    run: &NmapRun,
    opts: &ExportOptions,
    created_at: i64,
) -> ExportResult<ExportReport> {
    let scan_id = insert::insert_scan(conn, run, opts, created_at)?;
    info!(scan_id, "new scan inserted");

    let mut report = ExportReport { scan_id, ..Default::default() };
    for host in &run.hosts {
        write_host(conn, scan_id, host, &mut report)?;
    }
    Ok(report)
}

fn write_host(conn: &Connection, scan_id: ScanId, host: &Host, report: &mut ExportReport) -> ExportResult<()> {
    let host_id = insert::insert_host(conn, scan_id, host)?;
    info!(host_id, scan_id, "new host inserted");

    insert::insert_trace_hops(conn, host_id, &host.trace.hops)?;
    info!(host_id, hops = host.trace.hops.len(), "trace hops inserted");

    insert::insert_addresses(conn, host_id, &host.addresses)?;
    info!(host_id, addresses = host.addresses.len(), "host addresses inserted");

    insert::insert_hostnames(conn, host_id, &host.hostnames)?;
    info!(host_id, hostnames = host.hostnames.len(), "host names inserted");

    if let Some(os) = &host.os {
        let os_id = insert::insert_os(conn, host_id, os)?;
        insert::insert_os_ports_used(conn, os_id, &os.ports_used)?;
        insert::insert_os_matches(conn, os_id, &os.matches)?;
        info!(host_id, os_id, matches = os.matches.len(), "os record inserted");
    }

    for port in &host.ports {
        let port_id = insert::insert_port(conn, host_id, port)?;
        insert::insert_scripts(conn, port_id, &port.scripts)?;
        report.scripts += port.scripts.len();
    }
    info!(host_id, ports = host.ports.len(), "ports inserted");

    report.hosts += 1;
    report.ports += host.ports.len();
    Ok(())
}
