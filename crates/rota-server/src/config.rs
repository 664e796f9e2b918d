//! Server configuration: TOML file with per-field defaults.

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// SQLite URL for the settings store.
    pub database_url: String,
    /// When set, settings live in this JSON file instead of SQLite.
    pub settings_file: Option<PathBuf>,
    /// Directory served for every path outside `/api`.
    pub public_dir: PathBuf,
    /// Reminder poll period in seconds.
    pub tick_secs: u64,
    /// Timeout for calls to the messaging API, in seconds.
    pub http_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 3000,
            database_url: "sqlite://rota.db?mode=rwc".into(),
            settings_file: None,
            public_dir: PathBuf::from("public"),
            tick_secs: 60,
            http_timeout_secs: 10,
        }
    }
}

impl ServerConfig {
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("invalid config {}", path.display()))?;
        config.check()?;
        Ok(config)
    }

    pub fn check(&self) -> anyhow::Result<()> {
        anyhow::ensure!(self.tick_secs > 0, "tick_secs must be positive");
        anyhow::ensure!(
            self.http_timeout_secs > 0,
            "http_timeout_secs must be positive"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let config: ServerConfig = toml::from_str("port = 8080\ntick_secs = 30\n").unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.tick_secs, 30);
        assert_eq!(config.http_timeout_secs, 10);
        assert_eq!(config.public_dir, PathBuf::from("public"));
        assert!(config.settings_file.is_none());
    }

    #[test]
    fn load_from_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rota.toml");
        std::fs::write(&path, "settings_file = \"data/settings.json\"\n").unwrap();

        let config = ServerConfig::load_from(&path).unwrap();

        assert_eq!(
            config.settings_file,
            Some(PathBuf::from("data/settings.json"))
        );
    }

    #[test]
    fn zero_tick_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rota.toml");
        std::fs::write(&path, "tick_secs = 0\n").unwrap();

        assert!(ServerConfig::load_from(&path).is_err());
    }
}
