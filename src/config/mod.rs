use crate::errors::{AppError, AppResult};
use crate::models::roster::{RosterEntry, WorkShift};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database: String,
    pub source: SourceConfig,
    #[serde(default)]
    pub sync: SyncConfig,
    #[serde(default)]
    pub overrides: OverrideConfig,
    /// Users shown in the reports, in display order.
    pub roster: Vec<RosterEntry>,
}

/// Connection to the ticketing system reporting endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    pub base_url: String,
    #[serde(default)]
    pub api_token: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    #[serde(default = "default_interval_minutes")]
    pub interval_minutes: u64,
    #[serde(default = "default_backfill_days")]
    pub backfill_days: u32,
    #[serde(default = "default_retry_initial_secs")]
    pub retry_initial_secs: u64,
    #[serde(default = "default_retry_max_secs")]
    pub retry_max_secs: u64,
    #[serde(default = "default_retry_attempts")]
    pub retry_attempts: u32,
    #[serde(default = "default_true")]
    pub finalize_daily: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverrideConfig {
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,
    #[serde(default = "default_send_timeout_secs")]
    pub send_timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    30
}
fn default_interval_minutes() -> u64 {
    15
}
fn default_backfill_days() -> u32 {
    20
}
fn default_retry_initial_secs() -> u64 {
    30
}
fn default_retry_max_secs() -> u64 {
    300
}
fn default_retry_attempts() -> u32 {
    5
}
fn default_true() -> bool {
    true
}
fn default_queue_capacity() -> usize {
    100
}
fn default_send_timeout_secs() -> u64 {
    5
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            interval_minutes: default_interval_minutes(),
            backfill_days: default_backfill_days(),
            retry_initial_secs: default_retry_initial_secs(),
            retry_max_secs: default_retry_max_secs(),
            retry_attempts: default_retry_attempts(),
            finalize_daily: true,
        }
    }
}

impl Default for OverrideConfig {
    fn default() -> Self {
        Self {
            queue_capacity: default_queue_capacity(),
            send_timeout_secs: default_send_timeout_secs(),
        }
    }
}

impl SyncConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_minutes * 60)
    }
}

impl OverrideConfig {
    pub fn send_timeout(&self) -> Duration {
        Duration::from_secs(self.send_timeout_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        let db_path = Self::database_file();
        Self {
            database: db_path.to_string_lossy().to_string(),
            source: SourceConfig {
                base_url: "http://localhost:8080/otrs-report".to_string(),
                api_token: None,
                timeout_secs: default_timeout_secs(),
            },
            sync: SyncConfig::default(),
            overrides: OverrideConfig::default(),
            roster: vec![
                RosterEntry::new("Smith", WorkShift::Morning, false),
                RosterEntry::new("Jones", WorkShift::Evening, true),
            ],
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = std::env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("rtimeledger")
        } else {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".rtimeledger")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("rtimeledger.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("rtimeledger.sqlite")
    }

    /// Load and validate the configuration. A missing or broken file is an
    /// error: the service never runs on guessed settings.
    pub fn load(path: &Path) -> AppResult<Self> {
        let content =
            fs::read_to_string(path).map_err(|_| AppError::ConfigLoad(path.display().to_string()))?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> AppResult<Self> {
        let cfg: Config =
            serde_yaml::from_str(content).map_err(|e| AppError::Config(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.database.trim().is_empty() {
            return Err(AppError::Config("database path is empty".into()));
        }
        if self.source.base_url.trim().is_empty() {
            return Err(AppError::Config("source.base_url is empty".into()));
        }
        if self.roster.is_empty() {
            return Err(AppError::Config("roster must contain at least one user".into()));
        }

        let mut seen = HashSet::new();
        for user in &self.roster {
            if user.last_name.trim().is_empty() {
                return Err(AppError::Config("roster entry with empty last_name".into()));
            }
            if !seen.insert(user.last_name.as_str()) {
                return Err(AppError::Config(format!(
                    "duplicate roster entry '{}'",
                    user.last_name
                )));
            }
        }

        if self.sync.interval_minutes == 0 {
            return Err(AppError::Config("sync.interval_minutes must be > 0".into()));
        }
        if self.sync.retry_attempts == 0 {
            return Err(AppError::Config("sync.retry_attempts must be > 0".into()));
        }
        if self.sync.retry_initial_secs > self.sync.retry_max_secs {
            return Err(AppError::Config(
                "sync.retry_initial_secs must not exceed sync.retry_max_secs".into(),
            ));
        }
        if self.overrides.queue_capacity == 0 {
            return Err(AppError::Config("overrides.queue_capacity must be > 0".into()));
        }

        Ok(())
    }

    /// Write a default configuration to `config_path` and create the
    /// database file. An existing config file is left untouched.
    pub fn init_all(config_path: &Path, custom_db: Option<String>) -> AppResult<Config> {
        let mut config = Config::default();
        if let Some(db) = custom_db {
            config.database = db;
        }

        if let Some(dir) = config_path.parent() {
            fs::create_dir_all(dir)?;
        }

        if config_path.exists() {
            println!("ℹ️  Config file already exists: {:?}", config_path);
            config = Self::load(config_path)?;
        } else {
            let yaml = serde_yaml::to_string(&config).map_err(|_| AppError::ConfigSave)?;
            let mut file = fs::File::create(config_path)?;
            file.write_all(yaml.as_bytes())?;
            println!("✅ Config file: {:?}", config_path);
        }

        let db_path = crate::utils::path::expand_tilde(&config.database);
        if let Some(dir) = db_path.parent() {
            fs::create_dir_all(dir)?;
        }

        Ok(config)
    }
}
