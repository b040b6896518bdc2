use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use crate::source::DataSourceKind;

pub const DEFAULT_GATEWAY_URL: &str = "http://localhost:5004";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Dashboard client configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// gateway_url = "http://localhost:5004"
/// data_source = "live"
/// request_timeout_secs = 10
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    /// Base URL of the gateway serving `/api/weather` and `/api/news`.
    pub gateway_url: Option<String>,

    /// Data source name, "live" or "fixture". Unset means live.
    pub data_source: Option<String>,

    /// Bound on each gateway request.
    pub request_timeout_secs: Option<u64>,
}

impl Config {
    /// Return the configured data source as a strongly-typed kind.
    pub fn data_source_kind(&self) -> Result<DataSourceKind> {
        match self.data_source.as_deref() {
            None => Ok(DataSourceKind::default()),
            Some(s) => DataSourceKind::try_from(s).map_err(|e| {
                anyhow!("{e}\nHint: run `weathernow configure` to pick a data source.")
            }),
        }
    }

    pub fn set_data_source(&mut self, kind: DataSourceKind) {
        self.data_source = Some(kind.as_str().to_string());
    }

    pub fn gateway_url(&self) -> &str {
        self.gateway_url.as_deref().unwrap_or(DEFAULT_GATEWAY_URL)
    }

    pub fn set_gateway_url(&mut self, url: &str) {
        let url = url.trim();
        self.gateway_url = (!url.is_empty()).then(|| url.to_string());
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS))
    }

    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_file_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weathernow", "weathernow")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn scratch_dir() -> TempDir {
        TempDir::new().expect("temp dir should be created")
    }

    #[test]
    fn defaults_to_live_source_and_local_gateway() {
        let cfg = Config::default();

        assert_eq!(cfg.data_source_kind().unwrap(), DataSourceKind::Live);
        assert_eq!(cfg.gateway_url(), DEFAULT_GATEWAY_URL);
        assert_eq!(cfg.request_timeout(), Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS));
    }

    #[test]
    fn unknown_data_source_carries_hint() {
        let cfg = Config { data_source: Some("mock".into()), ..Config::default() };
        let err = cfg.data_source_kind().unwrap_err();

        let msg = err.to_string();
        assert!(msg.contains("Unknown data source"));
        assert!(msg.contains("Hint: run `weathernow configure`"));
    }

    #[test]
    fn set_data_source_overrides_default() {
        let mut cfg = Config::default();
        cfg.set_data_source(DataSourceKind::Fixture);

        assert_eq!(cfg.data_source.as_deref(), Some("fixture"));
        assert_eq!(cfg.data_source_kind().unwrap(), DataSourceKind::Fixture);
    }

    #[test]
    fn blank_gateway_url_falls_back_to_default() {
        let mut cfg = Config::default();
        cfg.set_gateway_url("   ");
        assert_eq!(cfg.gateway_url(), DEFAULT_GATEWAY_URL);

        cfg.set_gateway_url(" https://weather.example ");
        assert_eq!(cfg.gateway_url(), "https://weather.example");
    }

    #[test]
    fn missing_file_loads_default() {
        let dir = scratch_dir();
        let cfg = Config::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn save_then_load() {
        let dir = scratch_dir();
        let path = dir.path().join("nested").join("config.toml");
        let mut cfg = Config::default();
        cfg.set_data_source(DataSourceKind::Fixture);
        cfg.set_gateway_url("http://127.0.0.1:9000");
        cfg.request_timeout_secs = Some(3);

        cfg.save_to(&path).unwrap();
        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, cfg);
    }

    #[test]
    fn invalid_toml_is_reported_with_path() {
        let dir = scratch_dir();
        let path = dir.path().join("config.toml");
        fs::write(&path, "gateway_url = [").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }
}
