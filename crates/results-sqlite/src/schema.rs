/// Version written to `nf_schema` when the tables are created.
pub const SCHEMA_VERSION: &str = "1";

/// Tables the exporter writes to. If any is absent the schema script runs.
pub const EXPECTED_TABLES: &[&str] = &[
    "nf_schema",
    "nf_scan",
    "nf_host",
    "nf_host_address",
    "nf_host_name",
    "nf_host_trace_hop",
    "nf_os",
    "nf_os_port_used",
    "nf_os_match",
    "nf_os_match_class",
    "nf_port",
    "nf_port_script",
];

// Runs inside the transaction opened by `Db::ensure_schema`.
// nf_ prefix keeps these apart from unrelated tables sharing the same file.
pub const CREATE_SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS nf_schema (
  version         TEXT NOT NULL,
  created_at      INTEGER NOT NULL DEFAULT (strftime('%s','now'))
);

CREATE TABLE IF NOT EXISTS nf_scan (
  id                      INTEGER PRIMARY KEY AUTOINCREMENT,
  identifier              TEXT,
  created_at              INTEGER NOT NULL,
  scanner                 TEXT,
  args                    TEXT,
  start                   INTEGER,
  start_str               TEXT,
  version                 TEXT,
  scan_info_type          TEXT,
  scan_info_protocol      TEXT,
  scan_info_num_services  INTEGER,
  scan_info_services      TEXT,
  verbose                 INTEGER,
  debugging               INTEGER,
  finished_time           INTEGER,
  finished_time_str       TEXT,
  finished_elapsed        REAL,
  finished_summary        TEXT,
  finished_exit           TEXT,
  hosts_up                INTEGER,
  hosts_down              INTEGER,
  hosts_total             INTEGER
);

CREATE TABLE IF NOT EXISTS nf_host (
  id                      INTEGER PRIMARY KEY AUTOINCREMENT,
  scan_id                 INTEGER NOT NULL REFERENCES nf_scan(id) ON DELETE CASCADE,
  start_time              INTEGER,
  end_time                INTEGER,
  status_state            TEXT,
  status_reason           TEXT,
  status_reason_ttl       INTEGER,
  uptime_seconds          INTEGER,
  uptime_last_boot        TEXT,
  distance                INTEGER,
  tcp_sequence_index      INTEGER,
  tcp_sequence_difficulty TEXT,
  tcp_sequence_values     TEXT,
  ip_id_sequence_class    TEXT,
  ip_id_sequence_values   TEXT,
  tcp_ts_sequence_class   TEXT,
  tcp_ts_sequence_values  TEXT,
  trace_port              INTEGER,
  trace_protocol          TEXT
);

CREATE TABLE IF NOT EXISTS nf_host_address (
  id              INTEGER PRIMARY KEY AUTOINCREMENT,
  host_id         INTEGER NOT NULL REFERENCES nf_host(id) ON DELETE CASCADE,
  address         TEXT NOT NULL,
  address_type    TEXT,
  vendor          TEXT
);

CREATE TABLE IF NOT EXISTS nf_host_name (
  id              INTEGER PRIMARY KEY AUTOINCREMENT,
  host_id         INTEGER NOT NULL REFERENCES nf_host(id) ON DELETE CASCADE,
  name            TEXT NOT NULL,
  name_type       TEXT
);

CREATE TABLE IF NOT EXISTS nf_host_trace_hop (
  id              INTEGER PRIMARY KEY AUTOINCREMENT,
  host_id         INTEGER NOT NULL REFERENCES nf_host(id) ON DELETE CASCADE,
  hop_index       INTEGER NOT NULL,
  ttl             INTEGER,
  ip_addr         TEXT,
  rtt             REAL,
  host            TEXT,
  UNIQUE (host_id, hop_index)
);

CREATE TABLE IF NOT EXISTS nf_os (
  id              INTEGER PRIMARY KEY AUTOINCREMENT,
  host_id         INTEGER NOT NULL UNIQUE REFERENCES nf_host(id) ON DELETE CASCADE,
  fingerprint     TEXT
);

CREATE TABLE IF NOT EXISTS nf_os_port_used (
  id              INTEGER PRIMARY KEY AUTOINCREMENT,
  os_id           INTEGER NOT NULL REFERENCES nf_os(id) ON DELETE CASCADE,
  state           TEXT,
  protocol        TEXT,
  port_id         INTEGER
);

CREATE TABLE IF NOT EXISTS nf_os_match (
  id              INTEGER PRIMARY KEY AUTOINCREMENT,
  os_id           INTEGER NOT NULL REFERENCES nf_os(id) ON DELETE CASCADE,
  name            TEXT,
  accuracy        INTEGER,
  line            INTEGER
);

CREATE TABLE IF NOT EXISTS nf_os_match_class (
  id              INTEGER PRIMARY KEY AUTOINCREMENT,
  os_match_id     INTEGER NOT NULL REFERENCES nf_os_match(id) ON DELETE CASCADE,
  os_type         TEXT,
  vendor          TEXT,
  family          TEXT,
  generation      TEXT,
  accuracy        INTEGER,
  cpe             TEXT
);

CREATE TABLE IF NOT EXISTS nf_port (
  id                  INTEGER PRIMARY KEY AUTOINCREMENT,
  host_id             INTEGER NOT NULL REFERENCES nf_host(id) ON DELETE CASCADE,
  protocol            TEXT,
  port_id             INTEGER NOT NULL CHECK (port_id BETWEEN 0 AND 65535),
  state               TEXT,
  reason              TEXT,
  reason_ttl          INTEGER,
  service_name        TEXT,
  service_product     TEXT,
  service_version     TEXT,
  service_extra_info  TEXT,
  service_method      TEXT,
  service_conf        INTEGER,
  service_cpe         TEXT
);

CREATE TABLE IF NOT EXISTS nf_port_script (
  id              INTEGER PRIMARY KEY AUTOINCREMENT,
  port_id         INTEGER NOT NULL REFERENCES nf_port(id) ON DELETE CASCADE,
  script_id       TEXT NOT NULL,
  output          TEXT
);

CREATE INDEX IF NOT EXISTS idx_nf_host_scan ON nf_host(scan_id);
CREATE INDEX IF NOT EXISTS idx_nf_host_address_host ON nf_host_address(host_id);
CREATE INDEX IF NOT EXISTS idx_nf_host_name_host ON nf_host_name(host_id);
CREATE INDEX IF NOT EXISTS idx_nf_os_port_used_os ON nf_os_port_used(os_id);
CREATE INDEX IF NOT EXISTS idx_nf_os_match_os ON nf_os_match(os_id);
CREATE INDEX IF NOT EXISTS idx_nf_os_match_class_match ON nf_os_match_class(os_match_id);
CREATE INDEX IF NOT EXISTS idx_nf_port_host ON nf_port(host_id);
CREATE INDEX IF NOT EXISTS idx_nf_port_lookup ON nf_port(protocol, port_id, state);
CREATE INDEX IF NOT EXISTS idx_nf_port_script_port ON nf_port_script(port_id);

"#
;

pub const RECORD_VERSION: &str =
    "INSERT INTO nf_schema(version) SELECT ?1 WHERE NOT EXISTS (SELECT 1 FROM nf_schema)";
