//! `neo.toml`: where the dataset lives, how to read it, and how to print.
//!
//! ```toml
//! [data]
//! path = "data/neos.csv"
//! has_header = true
//! skip_rows = 0
//! on_error = "abort"   # or "skip"
//!
//! [output]
//! format = "table"     # table | text | json | csv
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use neo_io::LoaderConfig;

use crate::output::OutputFormat;

#[derive(Deserialize, Default, Clone, Debug)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Deserialize, Clone, Debug)]
pub struct DataConfig {
    #[serde(default = "default_data_path")]
    pub path: PathBuf,
    #[serde(flatten)]
    pub loader: LoaderConfig,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            path: default_data_path(),
            loader: LoaderConfig::default(),
        }
    }
}

#[derive(Deserialize, Default, Clone, Debug)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
}

fn default_data_path() -> PathBuf {
    PathBuf::from("data/neos.csv")
}

impl Config {
    /// Read `path` if it exists; a missing file means defaults.
    pub fn load(path: &Path) -> Result<Self, String> {
        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
        toml::from_str(&content).map_err(|e| format!("Invalid config {}: {}", path.display(), e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use neo_io::OnError;
    use std::io::Write;

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(&dir.path().join("neo.toml")).unwrap();
        assert_eq!(config.data.path, PathBuf::from("data/neos.csv"));
        assert!(config.data.loader.has_header);
        assert_eq!(config.output.format, OutputFormat::Table);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[data]\npath = \"neos.csv\"\non_error = \"skip\"").unwrap();
        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.data.path, PathBuf::from("neos.csv"));
        assert_eq!(config.data.loader.on_error, OnError::Skip);
        assert_eq!(config.data.loader.skip_rows, 0);
        assert_eq!(config.output.format, OutputFormat::Table);
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[output]\nformat = \"xml\"").unwrap();
        assert!(Config::load(file.path()).is_err());
    }
}
