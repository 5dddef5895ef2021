use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use results_sqlite::ExportOptions;
use scanstore_core::NmapRun;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;
mod destination;

use destination::Destination;

#[derive(Debug, Parser)]
#[command(name = "scanstore", version, about = "Export parsed scan results into a SQLite database")]
struct Cli {
    /// Optional config file (YAML). If omitted, loads ./scanstore.yaml if present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print version information
    Version,
    /// Export a parsed scan document (JSON) into the results database
    Export {
        /// Scan document; `-` reads stdin
        #[arg(long, short, value_name = "FILE", default_value = "-")]
        input: PathBuf,
        /// SQLite path or file: URI
        #[arg(long)]
        dsn: Option<String>,
        /// Database file to write in place (takes precedence over --dsn).
        /// With neither, the database is written to stdout.
        #[arg(long, value_name = "FILE")]
        output_file: Option<PathBuf>,
        /// Label stored with the scan row
        #[arg(long)]
        identifier: Option<String>,
    },
    /// Create the results schema without exporting anything
    Init {
        #[arg(long)]
        dsn: Option<String>,
        #[arg(long, value_name = "FILE")]
        output_file: Option<PathBuf>,
    },
}

fn init_tracing() {
    // stderr only: stdout may carry the database itself
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn read_document(input: &Path) -> Result<NmapRun> {
    let raw = if input == Path::new("-") {
        let mut s = String::new();
        std::io::stdin().read_to_string(&mut s).context("reading scan document from stdin")?;
        s
    } else {
        std::fs::read_to_string(input)
            .with_context(|| format!("reading scan document {}", input.display()))?
    };
    serde_json::from_str(&raw).context("parsing scan document")
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();
    let cfg = config::load_config(cli.config.as_deref())?.unwrap_or_default();
    let out_cfg = cfg.output();

    match cli.command {
        Commands::Version => {
            println!("scanstore {} (core {})", env!("CARGO_PKG_VERSION"), scanstore_core::version());
        }
        Commands::Export { input, dsn, output_file, identifier } => {
            let run = read_document(&input)?;
            let dest = Destination::resolve(output_file.or(out_cfg.file), dsn.or(out_cfg.dsn));
            let opts = ExportOptions { identifier: identifier.or(out_cfg.identifier) };
            info!(hosts = run.hosts.len(), ports = run.port_count(), ?dest, "exporting scan");

            let mut stdout = std::io::stdout().lock();
            let report = destination::export_to(&dest, &run, &opts, &mut stdout)?;
            if dest.is_stdout() {
                info!(scan_id = report.scan_id, hosts = report.hosts, "database written to stdout");
            } else {
                println!("{}", serde_json::to_string(&report)?);
            }
        }
        Commands::Init { dsn, output_file } => {
            let path = match Destination::resolve(output_file.or(out_cfg.file), dsn.or(out_cfg.dsn)) {
                Destination::File(p) => p,
                Destination::Dsn(d) => PathBuf::from(d),
                Destination::Stdout => bail!("init needs --dsn or --output-file"),
            };
            let created = destination::init_at(&path)?;
            info!(path = %path.display(), created, "schema checked");
        }
    }
    Ok(())
}
