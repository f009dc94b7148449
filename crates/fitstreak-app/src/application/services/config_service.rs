use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{info, warn};

const APP_DIR_NAME: &str = "fitstreak";
const CONFIG_FILE_NAME: &str = "config.json";
const DB_FILE_NAME: &str = "fitstreak.db";

/// Log level configuration
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "error" => Ok(LogLevel::Error),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "info" => Ok(LogLevel::Info),
            "debug" => Ok(LogLevel::Debug),
            "trace" => Ok(LogLevel::Trace),
            other => Err(format!("Unknown log level: {}", other)),
        }
    }
}

/// Remote platform holding the authoritative streak counters
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ProfileServiceConfig {
    pub base_url: Option<String>,
    pub api_token: Option<String>,
    pub max_retries: u32,
}

impl Default for ProfileServiceConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            api_token: None,
            max_retries: 3,
        }
    }
}

/// `keep_days = None` keeps check-in keys forever
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RetentionConfig {
    pub keep_days: Option<u32>,
}

/// Persistent configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AppConfig {
    pub log_level: LogLevel,
    pub database_path: PathBuf,
    pub profile_service: ProfileServiceConfig,
    pub retention: RetentionConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: LogLevel::Info,
            database_path: default_database_path(),
            profile_service: ProfileServiceConfig::default(),
            retention: RetentionConfig::default(),
        }
    }
}

/// Application configuration service
pub struct ConfigService {
    config: AppConfig,
    config_path: Option<PathBuf>,
    load_error: Option<String>,
}

impl ConfigService {
    /// Load from `path`, or from the platform config dir when `None`.
    ///
    /// A missing or unreadable file yields the defaults. Load runs before
    /// logging is up, so a read failure is kept for [`Self::load_error`].
    pub fn load(path: Option<PathBuf>) -> Self {
        let config_path = path.or_else(default_config_path);

        let mut load_error = None;
        let config = match &config_path {
            Some(path) if path.exists() => read_config(path).unwrap_or_else(|e| {
                load_error = Some(format!("{}: {:#}", path.display(), e));
                AppConfig::default()
            }),
            _ => AppConfig::default(),
        };

        Self {
            config,
            config_path,
            load_error,
        }
    }

    /// Why the config file was ignored, if it was
    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    /// Log a deferred load failure once a subscriber is installed
    pub fn report_load_error(&self) {
        if let Some(e) = &self.load_error {
            warn!("Ignoring unreadable config {}", e);
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    pub fn log_level(&self) -> LogLevel {
        self.config.log_level
    }

    /// Write the current configuration back to its file
    pub fn save(&self) -> Result<()> {
        let path = self
            .config_path
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("No config path available on this platform"))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(&self.config)?;
        std::fs::write(path, content)?;

        info!("Config saved to: {:?}", path);
        Ok(())
    }
}

fn read_config(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    let config = serde_json::from_str::<AppConfig>(&content)?;
    info!("Config loaded from: {:?}", path);
    Ok(config)
}

pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
}

pub fn default_log_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR_NAME)
        .join("logs")
}

fn default_database_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR_NAME)
        .join(DB_FILE_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let service = ConfigService::load(Some(dir.path().join("absent.json")));

        assert_eq!(service.log_level(), LogLevel::Info);
        assert_eq!(service.config().retention.keep_days, None);
        assert_eq!(service.config().profile_service.max_retries, 3);
        assert!(service.config().database_path.ends_with("fitstreak.db"));
        assert_eq!(service.load_error(), None);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(
            &path,
            r#"{
                "log_level": "debug",
                "profile_service": { "base_url": "https://api.example.com/v1" },
                "retention": { "keep_days": 90 }
            }"#,
        )
        .unwrap();

        let service = ConfigService::load(Some(path));
        let config = service.config();

        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(
            config.profile_service.base_url.as_deref(),
            Some("https://api.example.com/v1")
        );
        assert_eq!(config.profile_service.api_token, None);
        assert_eq!(config.profile_service.max_retries, 3);
        assert_eq!(config.retention.keep_days, Some(90));
    }

    #[test]
    fn test_malformed_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();

        let service = ConfigService::load(Some(path));
        assert_eq!(service.config(), &AppConfig::default());
        assert!(service
            .load_error()
            .is_some_and(|e| e.contains("config.json")));
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let mut service = ConfigService::load(Some(path.clone()));
        service.config.retention.keep_days = Some(30);
        service.config.log_level = LogLevel::Warn;
        service.save().unwrap();

        let reloaded = ConfigService::load(Some(path));
        assert_eq!(reloaded.config().retention.keep_days, Some(30));
        assert_eq!(reloaded.log_level(), LogLevel::Warn);
    }

    #[test]
    fn test_log_level_parse() {
        assert_eq!("WARN".parse::<LogLevel>(), Ok(LogLevel::Warn));
        assert_eq!("trace".parse::<LogLevel>(), Ok(LogLevel::Trace));
        assert!("verbose".parse::<LogLevel>().is_err());
    }
}
