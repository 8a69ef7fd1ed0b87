use std::path::{Path, PathBuf};
use std::time::Duration;

use config::{Config, ConfigError, Environment, File, FileFormat, Map};
use serde::Deserialize;

/// Looked up in the working directory unless `--config` says otherwise.
pub const CONFIG_FILE: &str = "staykonnect.toml";

/// Prefix of environment overrides, e.g. `STAYKONNECT_API__BASE_URL`.
pub const ENV_PREFIX: &str = "STAYKONNECT";

#[derive(Debug, Deserialize)]
pub struct Api {
    pub base_url: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize)]
pub struct Notifications {
    pub poll_interval_secs: u64,
}

#[derive(Debug, Deserialize, Default)]
pub struct Storage {
    /// Session storage directory; the platform data directory when unset.
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
pub struct Log {
    /// `tracing_subscriber::EnvFilter` directives, overridden by `RUST_LOG`.
    pub filter: String,
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub api: Api,
    pub notifications: Notifications,
    #[serde(default)]
    pub storage: Storage,
    pub log: Log,
}

impl Settings {
    pub fn new(file: &Path) -> Result<Self, ConfigError> {
        Self::load(file, None)
    }

    /// `env` replaces the process environment when given.
    fn load(file: &Path, env: Option<Map<String, String>>) -> Result<Self, ConfigError> {
        let config = Config::builder()
            .set_default("api.base_url", api::DEFAULT_BASE_URL)?
            .set_default("api.timeout_secs", 30_i64)?
            .set_default("notifications.poll_interval_secs", 30_i64)?
            .set_default("log.filter", "info")?
            .add_source(File::from(file).format(FileFormat::Toml).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .source(env),
            )
            .build()?;

        config.try_deserialize()
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.api.timeout_secs)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.notifications.poll_interval_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_env() -> Option<Map<String, String>> {
        Some(Map::new())
    }

    #[test]
    fn test_defaults_without_file() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load(&dir.path().join(CONFIG_FILE), no_env()).unwrap();
        assert_eq!(settings.api.base_url, api::DEFAULT_BASE_URL);
        assert_eq!(settings.timeout(), Duration::from_secs(30));
        assert_eq!(settings.poll_interval(), Duration::from_secs(30));
        assert_eq!(settings.storage.dir, None);
        assert_eq!(settings.log.filter, "info");
    }

    #[test]
    fn test_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(
            &path,
            r#"
[api]
base_url = "https://staykonnect.example/api/"

[notifications]
poll_interval_secs = 10

[storage]
dir = "/var/lib/staykonnect"
"#,
        )
        .unwrap();

        let settings = Settings::load(&path, no_env()).unwrap();
        assert_eq!(settings.api.base_url, "https://staykonnect.example/api/");
        assert_eq!(settings.api.timeout_secs, 30);
        assert_eq!(settings.poll_interval(), Duration::from_secs(10));
        assert_eq!(settings.storage.dir, Some(PathBuf::from("/var/lib/staykonnect")));
    }

    #[test]
    fn test_env_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "[notifications]\npoll_interval_secs = 10\n").unwrap();

        let env = Map::from([
            (
                "STAYKONNECT_NOTIFICATIONS__POLL_INTERVAL_SECS".to_string(),
                "5".to_string(),
            ),
            ("STAYKONNECT_LOG__FILTER".to_string(), "debug".to_string()),
        ]);
        let settings = Settings::load(&path, Some(env)).unwrap();
        assert_eq!(settings.poll_interval(), Duration::from_secs(5));
        assert_eq!(settings.log.filter, "debug");
    }
}
