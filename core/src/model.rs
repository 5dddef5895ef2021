//! Scan-result document as produced by the report parser.
//!
//! Every struct defaults its missing fields, so a partially populated
//! report (a host without OS detection, a port without service probing)
//! still deserializes.

use serde::{Deserialize, Serialize};

/// One run of the scanner.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NmapRun {
    pub scanner: String,
    pub args: String,
    /// Start time, unix seconds.
    pub start: i64,
    pub start_str: String,
    pub version: String,
    pub scan_info: ScanInfo,
    pub verbose: i64,
    pub debugging: i64,
    pub run_stats: RunStats,
    pub hosts: Vec<Host>,
}

impl NmapRun {
    pub fn port_count(&self) -> usize {
        self.hosts.iter().map(|h| h.ports.len()).sum()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanInfo {
    pub scan_type: String,
    pub protocol: String,
    pub num_services: i64,
    pub services: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunStats {
    pub finished: Finished,
    pub hosts: HostStats,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Finished {
    pub time: i64,
    pub time_str: String,
    pub elapsed: f64,
    pub summary: String,
    pub exit: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostStats {
    pub up: i64,
    pub down: i64,
    pub total: i64,
}

/// One scanned endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Host {
    pub start_time: i64,
    pub end_time: i64,
    pub status: HostStatus,
    pub addresses: Vec<HostAddress>,
    pub hostnames: Vec<HostName>,
    pub ports: Vec<Port>,
    /// Absent when OS detection was not requested or produced nothing.
    pub os: Option<Os>,
    pub uptime: Uptime,
    pub distance: Distance,
    pub tcp_sequence: TcpSequence,
    pub ip_id_sequence: IpIdSequence,
    pub tcp_ts_sequence: TcpTsSequence,
    pub trace: Trace,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostStatus {
    pub state: String,
    pub reason: String,
    pub reason_ttl: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostAddress {
    pub addr: String,
    /// `ipv4`, `ipv6` or `mac`.
    pub addr_type: String,
    pub vendor: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostName {
    pub name: String,
    /// `user` or `PTR`.
    pub name_type: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Uptime {
    pub seconds: i64,
    pub last_boot: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Distance {
    pub value: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TcpSequence {
    pub index: i64,
    pub difficulty: String,
    pub values: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IpIdSequence {
    pub class: String,
    pub values: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TcpTsSequence {
    pub class: String,
    pub values: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Trace {
    pub port: u16,
    pub protocol: String,
    pub hops: Vec<Hop>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Hop {
    pub ttl: i64,
    pub ip_addr: String,
    /// Round-trip time in milliseconds.
    pub rtt: f64,
    pub host: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Port {
    /// `tcp`, `udp` or `sctp`.
    pub protocol: String,
    pub port_id: u16,
    pub state: PortState,
    pub service: Service,
    pub scripts: Vec<Script>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PortState {
    pub state: String,
    pub reason: String,
    pub reason_ttl: i64,
}

/// Service detection result for a port.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Service {
    pub name: String,
    pub product: String,
    pub version: String,
    pub extra_info: String,
    /// `table` or `probed`.
    pub method: String,
    /// Detection confidence, 0 to 10.
    pub conf: i64,
    pub cpe: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Script {
    pub id: String,
    pub output: String,
}

/// OS detection result for a host.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Os {
    pub ports_used: Vec<OsPortUsed>,
    pub matches: Vec<OsMatch>,
    pub fingerprint: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OsPortUsed {
    pub state: String,
    pub protocol: String,
    pub port_id: u16,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OsMatch {
    pub name: String,
    pub accuracy: i64,
    pub line: i64,
    pub classes: Vec<OsClass>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OsClass {
    pub os_type: String,
    pub vendor: String,
    pub family: String,
    pub generation: String,
    pub accuracy: i64,
    pub cpe: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_document_fills_defaults() {
        let run: NmapRun = serde_json::from_str(
            r#"{
                "scanner": "nmap",
                "start": 1700000000,
                "hosts": [
                    {"status": {"state": "up"}, "ports": [{"port_id": 22, "service": {"name": "ssh"}}]},
                    {"status": {"state": "down"}}
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(run.scanner, "nmap");
        assert_eq!(run.hosts.len(), 2);
        assert_eq!(run.port_count(), 1);
        assert!(run.hosts[0].os.is_none());
        assert_eq!(run.hosts[0].ports[0].service.name, "ssh");
        assert!(run.hosts[0].ports[0].service.cpe.is_empty());
        assert_eq!(run.hosts[1].trace, Trace::default());
    }

    #[test]
    fn os_block_is_optional_but_kept_when_empty() {
        let host: Host = serde_json::from_str(r#"{"os": {}}"#).unwrap();
        let os = host.os.unwrap();
        assert!(os.matches.is_empty());
        assert!(os.ports_used.is_empty());
    }

    #[test]
    fn port_id_out_of_range_is_rejected() {
        let res: Result<Port, _> = serde_json::from_str(r#"{"port_id": 70000}"#);
        assert!(res.is_err());
    }
}
