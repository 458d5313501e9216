use std::{
    env,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::{
    errors::{BalanceError, Result},
    schedule::{DEFAULT_HORIZON_DAYS, DEFAULT_UPCOMING_LIMIT},
    utils::persistence::{ensure_dir, load_json_optional, save_json_atomic},
};

const DEFAULT_DIR_NAME: &str = ".balance_core";
const CONFIG_FILE: &str = "config.json";
const RULES_FILE: &str = "rules.json";
pub const HOME_ENV_VAR: &str = "BALANCE_CORE_HOME";

/// Returns the application data directory, defaulting to `~/.balance_core`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os(HOME_ENV_VAR) {
        return PathBuf::from(custom);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    pub locale: String,
    pub currency: String,
    #[serde(default = "Config::default_horizon_days")]
    pub upcoming_horizon_days: u32,
    #[serde(default = "Config::default_upcoming_limit")]
    pub upcoming_limit: usize,
    #[serde(default = "Config::default_ui_color_enabled")]
    pub ui_color_enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Optional rules snapshot location. Defaults to `rules.json` in the data directory.
    pub rules_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: "en-US".into(),
            currency: "USD".into(),
            upcoming_horizon_days: Self::default_horizon_days(),
            upcoming_limit: Self::default_upcoming_limit(),
            ui_color_enabled: Self::default_ui_color_enabled(),
            rules_file: None,
        }
    }
}

impl Config {
    pub fn default_horizon_days() -> u32 {
        DEFAULT_HORIZON_DAYS
    }

    pub fn default_upcoming_limit() -> usize {
        DEFAULT_UPCOMING_LIMIT
    }

    pub fn default_ui_color_enabled() -> bool {
        true
    }

    pub fn validate(&self) -> Result<()> {
        if self.upcoming_limit == 0 {
            return Err(BalanceError::Config(
                "upcoming_limit must be at least 1".into(),
            ));
        }
        if self.currency.trim().is_empty() {
            return Err(BalanceError::Config("currency must not be empty".into()));
        }
        Ok(())
    }
}

/// Loads and persists [`Config`] inside an application data directory.
pub struct ConfigManager {
    base: PathBuf,
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self> {
        Self::with_base_dir(app_data_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self> {
        ensure_dir(&base)?;
        Ok(Self {
            path: base.join(CONFIG_FILE),
            base,
        })
    }

    /// Reads the stored configuration, falling back to defaults when none exists.
    pub fn load(&self) -> Result<Config> {
        let config = load_json_optional::<Config>(&self.path)?.unwrap_or_default();
        config.validate()?;
        tracing::debug!(path = %self.path.display(), "configuration loaded");
        Ok(config)
    }

    pub fn save(&self, config: &Config) -> Result<()> {
        config.validate()?;
        save_json_atomic(config, &self.path)?;
        tracing::info!(path = %self.path.display(), "configuration saved");
        Ok(())
    }

    /// Location of the rules snapshot for `config`.
    pub fn rules_path(&self, config: &Config) -> PathBuf {
        config
            .rules_file
            .clone()
            .unwrap_or_else(|| self.base.join(RULES_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
