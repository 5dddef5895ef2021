use crate::Db;
use scanstore_core::*;

pub fn count(db: &Db, table: &str) -> i64 {
    db.conn
        .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |r| r.get(0))
        .unwrap()
}

pub fn port(port_id: u16, name: &str, cpe: &[&str], scripts: &[(&str, &str)]) -> Port {
    Port {
        protocol: "tcp".into(),
        port_id,
        state: PortState { state: "open".into(), reason: "syn-ack".into(), reason_ttl: 64 },
        service: Service {
            name: name.into(),
            product: format!("{name}d"),
            version: "1.0".into(),
            method: "probed".into(),
            conf: 10,
            cpe: cpe.iter().map(|c| c.to_string()).collect(),
            ..Default::default()
        },
        scripts: scripts
            .iter()
            .map(|(id, output)| Script { id: id.to_string(), output: output.to_string() })
            .collect(),
    }
}

pub fn host(ip: &str, ports: Vec<Port>) -> Host {
    Host {
        start_time: 1_700_000_000,
        end_time: 1_700_000_030,
        status: HostStatus { state: "up".into(), reason: "echo-reply".into(), reason_ttl: 63 },
        addresses: vec![
            HostAddress { addr: ip.into(), addr_type: "ipv4".into(), vendor: String::new() },
            HostAddress { addr: "00:11:22:33:44:55".into(), addr_type: "mac".into(), vendor: "Acme".into() },
        ],
        hostnames: vec![HostName { name: format!("{ip}.example.test"), name_type: "PTR".into() }],
        ports,
        os: Some(Os {
            ports_used: vec![OsPortUsed { state: "open".into(), protocol: "tcp".into(), port_id: 22 }],
            matches: vec![OsMatch {
                name: "Linux 5.4".into(),
                accuracy: 98,
                line: 1234,
                classes: vec![OsClass {
                    os_type: "general purpose".into(),
                    vendor: "Linux".into(),
                    family: "Linux".into(),
                    generation: "5.X".into(),
                    accuracy: 98,
                    cpe: vec!["cpe:/o:linux:linux_kernel:5".into()],
                }],
            }],
            fingerprint: "OS:SCAN(V=7.94)".into(),
        }),
        uptime: Uptime { seconds: 3600, last_boot: "Mon Nov 13 10:00:00 2023".into() },
        distance: Distance { value: 2 },
        tcp_sequence: TcpSequence { index: 260, difficulty: "Good luck!".into(), values: "A,B,C".into() },
        ip_id_sequence: IpIdSequence { class: "All zeros".into(), values: "0,0".into() },
        tcp_ts_sequence: TcpTsSequence { class: "1000HZ".into(), values: "1,2".into() },
        trace: Trace {
            port: 80,
            protocol: "tcp".into(),
            hops: vec![
                Hop { ttl: 1, ip_addr: "10.0.0.1".into(), rtt: 0.5, host: "gw".into() },
                Hop { ttl: 2, ip_addr: ip.into(), rtt: 1.25, host: String::new() },
            ],
        },
    }
}

/// Three hosts with two ports each; the second host's first port carries scripts.
pub fn three_host_run() -> NmapRun {
    NmapRun {
        scanner: "nmap".into(),
        args: "nmap -sV -O 10.0.0.0/29".into(),
        start: 1_700_000_000,
        start_str: "Tue Nov 14 22:13:20 2023".into(),
        version: "7.94".into(),
        scan_info: ScanInfo {
            scan_type: "syn".into(),
            protocol: "tcp".into(),
            num_services: 1000,
            services: "1-1000".into(),
        },
        verbose: 0,
        debugging: 0,
        run_stats: RunStats {
            finished: Finished {
                time: 1_700_000_060,
                time_str: "Tue Nov 14 22:14:20 2023".into(),
                elapsed: 60.0,
                summary: "3 hosts up".into(),
                exit: "success".into(),
            },
            hosts: HostStats { up: 3, down: 5, total: 8 },
        },
        hosts: vec![
            host("10.0.0.2", vec![port(22, "ssh", &["cpe:/a:openbsd:openssh:8.9p1"], &[]), port(80, "http", &[], &[])]),
            host(
                "10.0.0.3",
                vec![
                    port(443, "https", &["cpe:/a:nginx:nginx:1.24", "cpe:/o:linux:linux_kernel"], &[("ssl-cert", "CN=a"), ("http-title", "Home")]),
                    port(8080, "http-proxy", &[], &[]),
                ],
            ),
            host("10.0.0.4", vec![port(53, "domain", &[], &[("dns-nsid", "bind")]), port(3306, "mysql", &[], &[])]),
        ],
    }
}
