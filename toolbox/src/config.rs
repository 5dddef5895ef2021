use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG: &str = "scanstore.yaml";

#[derive(Debug, Default, Deserialize, Clone, PartialEq)]
pub struct OutputConfig {
    /// SQLite path or `file:` URI.
    pub dsn: Option<String>,
    /// Takes precedence over `dsn` when both are set.
    pub file: Option<PathBuf>,
    pub identifier: Option<String>,
}

#[derive(Debug, Default, Deserialize, Clone, PartialEq)]
pub struct Config {
    pub output: Option<OutputConfig>,
}

impl Config {
    pub fn output(&self) -> OutputConfig {
        self.output.clone().unwrap_or_default()
    }
}

/// Load an explicit config file, or `./scanstore.yaml` if it exists.
/// A missing default file is not an error; a missing explicit one is.
pub fn load_config(path: Option<&Path>) -> Result<Option<Config>> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => {
            let p = Path::new(DEFAULT_CONFIG);
            if p.exists() { p.to_path_buf() } else { return Ok(None); }
        }
    };
    let s = fs::read_to_string(&path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let cfg = serde_yaml::from_str(&s)
        .with_context(|| format!("parsing config {}", path.display()))?;
    Ok(Some(cfg))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_output_section() {
        let cfg: Config = serde_yaml::from_str(
            "output:\n  dsn: /var/lib/scans.sqlite\n  identifier: nightly\n",
        )
        .unwrap();
        let out = cfg.output();
        assert_eq!(out.dsn.as_deref(), Some("/var/lib/scans.sqlite"));
        assert_eq!(out.identifier.as_deref(), Some("nightly"));
        assert!(out.file.is_none());
    }

    #[test]
    fn empty_config_has_default_output() {
        let cfg: Config = serde_yaml::from_str("{}").unwrap();
        assert_eq!(cfg.output(), OutputConfig::default());
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_config(Some(&dir.path().join("nope.yaml"))).is_err());
    }

    #[test]
    fn explicit_file_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cfg.yaml");
        fs::write(&path, "output:\n  file: out.sqlite\n").unwrap();
        let cfg = load_config(Some(&path)).unwrap().unwrap();
        assert_eq!(cfg.output().file, Some(PathBuf::from("out.sqlite")));
    }
}
