use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::progress::{CatalogError, Orientation, Stage, StageCatalog};
use crate::types::Cents;

/// Project-local config file, picked up from the working directory
pub const LOCAL_CONFIG_FILE: &str = "grubtrack.toml";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub ui: UiConfig,
    pub cart: CartConfig,
    #[serde(default)]
    pub tracking: TrackingConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    pub paths: PathsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Event poll interval; also drives spinner animation
    pub refresh_rate_ms: u64,
    /// Carousel autoplay delay
    #[serde(default = "default_carousel_delay")]
    pub carousel_delay_ms: u64,
    /// How long a toast stays on screen
    #[serde(default = "default_toast_secs")]
    pub toast_secs: u64,
}

fn default_carousel_delay() -> u64 {
    4000
}

fn default_toast_secs() -> u64 {
    3
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartConfig {
    /// Flat fee charged when the cart is not empty
    pub delivery_fee: Cents,
    pub promo_code: String,
    /// Percent of the subtotal taken off by the promo code
    pub promo_percent: u64,
    /// Exact length a promo code must have
    #[serde(default = "default_promo_length")]
    pub promo_length: usize,
}

fn default_promo_length() -> usize {
    6
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackingConfig {
    #[serde(default)]
    pub orientation: Orientation,
    /// Seconds between simulated courier updates (0 disables)
    #[serde(default = "default_simulate_interval")]
    pub simulate_interval_secs: u64,
    /// Custom stage list; empty means the built-in delivery flow
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub stages: Vec<Stage>,
}

fn default_simulate_interval() -> u64 {
    20
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            orientation: Orientation::default(),
            simulate_interval_secs: default_simulate_interval(),
            stages: Vec::new(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Whether to log to file in TUI mode (false = stderr for debugging)
    #[serde(default = "default_log_to_file")]
    pub to_file: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_to_file() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            to_file: default_log_to_file(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Where log files go
    pub state: String,
}

impl Config {
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let user_config = dirs::config_dir().map(|dir| dir.join("grubtrack").join("config.toml"));
        Self::load_layers(config_path, Path::new(LOCAL_CONFIG_FILE), user_config.as_deref())
    }

    fn load_layers(
        config_path: Option<&str>,
        local_config: &Path,
        user_config: Option<&Path>,
    ) -> Result<Self> {
        // Start with embedded defaults so grubtrack works without config files
        let defaults = Config::default();
        let defaults_json =
            serde_json::to_string(&defaults).context("Failed to serialize default config")?;

        let mut builder = config::Config::builder().add_source(config::File::from_str(
            &defaults_json,
            config::FileFormat::Json,
        ));

        // Project config in the working directory
        if local_config.exists() {
            builder = builder.add_source(config::File::from(local_config.to_path_buf()));
        }

        // User config in ~/.config/grubtrack/ (optional global overrides)
        if let Some(user_config) = user_config.filter(|p| p.exists()) {
            builder = builder.add_source(config::File::from(user_config.to_path_buf()));
        }

        // Explicit config file (CLI override)
        if let Some(path) = config_path {
            builder = builder.add_source(config::File::with_name(path));
        }

        // Environment variables with GRUBTRACK_ prefix
        builder = builder.add_source(
            config::Environment::with_prefix("GRUBTRACK")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build().context("Failed to load configuration")?;
        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }

    /// Write this config as TOML
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .context("Failed to create config directory")?;
            }
        }

        let toml_str =
            toml::to_string_pretty(self).context("Failed to serialize config to TOML")?;

        std::fs::write(path, toml_str).context("Failed to write config file")?;

        Ok(())
    }

    /// The stage catalog orders move through, validated once at startup
    pub fn stage_catalog(&self) -> Result<StageCatalog, CatalogError> {
        if self.tracking.stages.is_empty() {
            Ok(StageCatalog::delivery())
        } else {
            StageCatalog::new(self.tracking.stages.clone())
        }
    }

    /// Get absolute path to state directory
    pub fn state_path(&self) -> PathBuf {
        let path = PathBuf::from(&self.paths.state);
        if path.is_absolute() {
            path
        } else {
            std::env::current_dir().unwrap_or_default().join(path)
        }
    }

    /// Get absolute path to logs directory
    pub fn logs_path(&self) -> PathBuf {
        self.state_path().join("logs")
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ui: UiConfig {
                refresh_rate_ms: 250,
                carousel_delay_ms: default_carousel_delay(),
                toast_secs: default_toast_secs(),
            },
            cart: CartConfig {
                delivery_fee: 299,
                promo_code: "SAVE10".to_string(),
                promo_percent: 10,
                promo_length: default_promo_length(),
            },
            tracking: TrackingConfig::default(),
            logging: LoggingConfig::default(),
            paths: PathsConfig {
                state: ".grubtrack".to_string(),
            },
        }
    }
}
