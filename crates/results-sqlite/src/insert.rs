//! Row writers for each table. Every function takes the connection the
//! export transaction was opened on and tags failures with its stage.

use crate::error::{ExportResult, InsertContext, Stage};
use crate::models::{join_cpe, ExportOptions, HostId, OsId, OsMatchId, PortId, ScanId};
use rusqlite::{params, Connection};
use scanstore_core::{Host, HostAddress, HostName, Hop, NmapRun, Os, OsClass, OsMatch, OsPortUsed, Port, Script};

pub(crate) fn insert_scan(
    conn: &Connection,
    run: &NmapRun,
    opts: &ExportOptions,
    created_at: i64,
) -> ExportResult<ScanId> {
    let mut stmt = conn
        .prepare_cached(
            "INSERT INTO nf_scan(identifier,created_at,scanner,args,start,start_str,version,
               scan_info_type,scan_info_protocol,scan_info_num_services,scan_info_services,
               verbose,debugging,finished_time,finished_time_str,finished_elapsed,finished_summary,
               finished_exit,hosts_up,hosts_down,hosts_total)
             VALUES (?,?,?,?,?,?,?,?,?,?,?,?,?,?,?,?,?,?,?,?,?)",
        )
        .stage(Stage::Scan)?;
    let fin = &run.run_stats.finished;
    let stats = &run.run_stats.hosts;
    stmt.insert(params![
        opts.identifier,
        created_at,
        run.scanner,
        run.args,
        run.start,
        run.start_str,
        run.version,
        run.scan_info.scan_type,
        run.scan_info.protocol,
        run.scan_info.num_services,
        run.scan_info.services,
        run.verbose,
        run.debugging,
        fin.time,
        fin.time_str,
        fin.elapsed,
        fin.summary,
        fin.exit,
        stats.up,
        stats.down,
        stats.total,
    ])
    .stage(Stage::Scan)
}

pub(crate) fn insert_host(conn: &Connection, scan_id: ScanId, host: &Host) -> ExportResult<HostId> {
    let mut stmt = conn
        .prepare_cached(
            "INSERT INTO nf_host(scan_id,start_time,end_time,status_state,status_reason,status_reason_ttl,
               uptime_seconds,uptime_last_boot,distance,tcp_sequence_index,tcp_sequence_difficulty,
               tcp_sequence_values,ip_id_sequence_class,ip_id_sequence_values,tcp_ts_sequence_class,
               tcp_ts_sequence_values,trace_port,trace_protocol)
             VALUES (?,?,?,?,?,?,?,?,?,?,?,?,?,?,?,?,?,?)",
        )
        .stage(Stage::Host)?;
    stmt.insert(params![
        scan_id,
        host.start_time,
        host.end_time,
        host.status.state,
        host.status.reason,
        host.status.reason_ttl,
        host.uptime.seconds,
        host.uptime.last_boot,
        host.distance.value,
        host.tcp_sequence.index,
        host.tcp_sequence.difficulty,
        host.tcp_sequence.values,
        host.ip_id_sequence.class,
        host.ip_id_sequence.values,
        host.tcp_ts_sequence.class,
        host.tcp_ts_sequence.values,
        host.trace.port,
        host.trace.protocol,
    ])
    .stage(Stage::Host)
}

/// Hops keep their document position in `hop_index`.
pub(crate) fn insert_trace_hops(conn: &Connection, host_id: HostId, hops: &[Hop]) -> ExportResult<()> {
    let mut stmt = conn
        .prepare_cached(
            "INSERT INTO nf_host_trace_hop(host_id,hop_index,ttl,ip_addr,rtt,host) VALUES (?,?,?,?,?,?)",
        )
        .stage(Stage::TraceHop)?;
    for (index, hop) in hops.iter().enumerate() {
        stmt.execute(params![host_id, index as i64, hop.ttl, hop.ip_addr, hop.rtt, hop.host])
            .stage(Stage::TraceHop)?;
    }
    Ok(())
}

pub(crate) fn insert_addresses(conn: &Connection, host_id: HostId, addrs: &[HostAddress]) -> ExportResult<()> {
    let mut stmt = conn
        .prepare_cached("INSERT INTO nf_host_address(host_id,address,address_type,vendor) VALUES (?,?,?,?)")
        .stage(Stage::Address)?;
    for a in addrs {
        stmt.execute(params![host_id, a.addr, a.addr_type, a.vendor])
            .stage(Stage::Address)?;
    }
    Ok(())
}

pub(crate) fn insert_hostnames(conn: &Connection, host_id: HostId, names: &[HostName]) -> ExportResult<()> {
    let mut stmt = conn
        .prepare_cached("INSERT INTO nf_host_name(host_id,name,name_type) VALUES (?,?,?)")
        .stage(Stage::Hostname)?;
    for n in names {
        stmt.execute(params![host_id, n.name, n.name_type])
            .stage(Stage::Hostname)?;
    }
    Ok(())
}

pub(crate) fn insert_os(conn: &Connection, host_id: HostId, os: &Os) -> ExportResult<OsId> {
    conn.prepare_cached("INSERT INTO nf_os(host_id,fingerprint) VALUES (?,?)")
        .and_then(|mut stmt| stmt.insert(params![host_id, os.fingerprint]))
        .stage(Stage::Os)
}

pub(crate) fn insert_os_ports_used(conn: &Connection, os_id: OsId, used: &[OsPortUsed]) -> ExportResult<()> {
    let mut stmt = conn
        .prepare_cached("INSERT INTO nf_os_port_used(os_id,state,protocol,port_id) VALUES (?,?,?,?)")
        .stage(Stage::OsPortUsed)?;
    for u in used {
        stmt.execute(params![os_id, u.state, u.protocol, u.port_id])
            .stage(Stage::OsPortUsed)?;
    }
    Ok(())
}

pub(crate) fn insert_os_matches(conn: &Connection, os_id: OsId, matches: &[OsMatch]) -> ExportResult<()> {
    let mut stmt = conn
        .prepare_cached("INSERT INTO nf_os_match(os_id,name,accuracy,line) VALUES (?,?,?,?)")
        .stage(Stage::OsMatch)?;
    for m in matches {
        let match_id: OsMatchId = stmt
            .insert(params![os_id, m.name, m.accuracy, m.line])
            .stage(Stage::OsMatch)?;
        insert_os_classes(conn, match_id, &m.classes)?;
    }
    Ok(())
}

fn insert_os_classes(conn: &Connection, match_id: OsMatchId, classes: &[OsClass]) -> ExportResult<()> {
    let mut stmt = conn
        .prepare_cached(
            "INSERT INTO nf_os_match_class(os_match_id,os_type,vendor,family,generation,accuracy,cpe) VALUES (?,?,?,?,?,?,?)",
        )
        .stage(Stage::OsClass)?;
    for c in classes {
        stmt.execute(params![match_id, c.os_type, c.vendor, c.family, c.generation, c.accuracy, join_cpe(&c.cpe)])
            .stage(Stage::OsClass)?;
    }
    Ok(())
}

pub(crate) fn insert_port(conn: &Connection, host_id: HostId, port: &Port) -> ExportResult<PortId> {
    let mut stmt = conn
        .prepare_cached(
            "INSERT INTO nf_port(host_id,protocol,port_id,state,reason,reason_ttl,service_name,service_product,
               service_version,service_extra_info,service_method,service_conf,service_cpe)
             VALUES (?,?,?,?,?,?,?,?,?,?,?,?,?)",
        )
        .stage(Stage::Port)?;
    let svc = &port.service;
    stmt.insert(params![
        host_id,
        port.protocol,
        port.port_id,
        port.state.state,
        port.state.reason,
        port.state.reason_ttl,
        svc.name,
        svc.product,
        svc.version,
        svc.extra_info,
        svc.method,
        svc.conf,
        join_cpe(&svc.cpe),
    ])
    .stage(Stage::Port)
}

pub(crate) fn insert_scripts(conn: &Connection, port_id: PortId, scripts: &[Script]) -> ExportResult<()> {
    let mut stmt = conn
        .prepare_cached("INSERT INTO nf_port_script(port_id,script_id,output) VALUES (?,?,?)")
        .stage(Stage::Script)?;
    for s in scripts {
        stmt.execute(params![port_id, s.id, s.output])
            .stage(Stage::Script)?;
    }
    Ok(())
}
