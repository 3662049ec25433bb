use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::info;

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct PileConfig {
    pub log_level: String,
    pub storage: StorageConfig,
    pub service: ServiceConfig,
    pub capture: CaptureConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct StorageConfig {
    pub db_path: String,
}

/// Remote completion service settings. Read at orchestration time, never
/// cached beyond a single operation's lifetime.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServiceConfig {
    /// API credential. Enrichment is unavailable until this is set.
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct CaptureConfig {
    pub speech_to_text: bool,
    pub auto_tagging: bool,
}

impl Default for PileConfig {
    fn default() -> Self {
        Self {
            log_level: "info".into(),
            storage: StorageConfig::default(),
            service: ServiceConfig::default(),
            capture: CaptureConfig::default(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        let db_path = default_pile_dir()
            .join("ideas.db")
            .to_string_lossy()
            .into_owned();
        Self { db_path }
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://api.openai.com".into(),
            model: "gpt-4o-mini".into(),
            max_tokens: 500,
            temperature: 0.7,
            timeout_secs: 30,
        }
    }
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            speech_to_text: true,
            auto_tagging: false,
        }
    }
}

/// Returns `~/.ideapile/`
pub fn default_pile_dir() -> PathBuf {
    dirs::home_dir()
        .expect("home directory must exist")
        .join(".ideapile")
}

/// Returns the default config file path: `~/.ideapile/config.toml`
pub fn default_config_path() -> PathBuf {
    default_pile_dir().join("config.toml")
}

impl PileConfig {
    /// Load config from TOML file (if it exists) then apply env var overrides.
    pub fn load() -> Result<Self> {
        Self::load_from(default_config_path())
    }

    /// Load from a specific path, then apply env var overrides.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut config = if path.exists() {
            let contents =
                std::fs::read_to_string(path).context("failed to read config file")?;
            toml::from_str(&contents).context("failed to parse config TOML")?
        } else {
            info!("no config file at {}, using defaults", path.display());
            PileConfig::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment variable overrides (IDEAPILE_DB, IDEAPILE_API_KEY,
    /// IDEAPILE_MODEL, IDEAPILE_LOG_LEVEL).
    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("IDEAPILE_DB") {
            self.storage.db_path = val;
        }
        if let Ok(val) = std::env::var("IDEAPILE_API_KEY") {
            self.service.api_key = Some(val);
        }
        if let Ok(val) = std::env::var("IDEAPILE_MODEL") {
            self.service.model = val;
        }
        if let Ok(val) = std::env::var("IDEAPILE_LOG_LEVEL") {
            self.log_level = val;
        }
    }

    /// Resolve the database path, expanding `~` if needed.
    pub fn resolved_db_path(&self) -> PathBuf {
        expand_tilde(&self.storage.db_path)
    }
}

pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        dirs::home_dir()
            .expect("home directory must exist")
            .join(rest)
    } else {
        PathBuf::from(path)
    }
}
