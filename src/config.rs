use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Optional JSON file read from the working directory.
pub const CONFIG_FILE: &str = "olympics_dashboard.json";

/// Environment variable that overrides `data_path`.
pub const DATA_PATH_ENV: &str = "OLYMPICS_DATA_PATH";

// ---------------------------------------------------------------------------
// Dashboard configuration
// ---------------------------------------------------------------------------

/// Where the results table lives and how the standings chart is sized.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DashboardConfig {
    pub data_path: PathBuf,
    /// Countries shown in the standings chart on start-up.
    pub default_country_count: usize,
    /// Upper bound of the "Number of Countries" slider.
    pub max_country_count: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("data/athlete_events.csv"),
            default_country_count: 10,
            max_country_count: 40,
        }
    }
}

impl DashboardConfig {
    /// Read [`CONFIG_FILE`] if present, then apply [`DATA_PATH_ENV`].
    pub fn load() -> Result<Self> {
        let env_path = std::env::var_os(DATA_PATH_ENV).map(PathBuf::from);
        Self::load_from(Path::new(CONFIG_FILE), env_path)
    }

    /// Build the config from an optional file plus an optional path override.
    pub fn load_from(file: &Path, data_path_override: Option<PathBuf>) -> Result<Self> {
        let mut config = if file.is_file() {
            let text = std::fs::read_to_string(file)
                .with_context(|| format!("reading config file {}", file.display()))?;
            serde_json::from_str::<DashboardConfig>(&text)
                .with_context(|| format!("parsing config file {}", file.display()))?
        } else {
            log::debug!("No config file at {}, using defaults", file.display());
            DashboardConfig::default()
        };

        if let Some(path) = data_path_override {
            log::info!("Data path overridden by {DATA_PATH_ENV}: {}", path.display());
            config.data_path = path;
        }

        Ok(config.normalized())
    }

    fn normalized(mut self) -> Self {
        if self.max_country_count == 0 {
            log::warn!("max_country_count must be at least 1, using 1");
            self.max_country_count = 1;
        }
        let clamped = self.default_country_count.clamp(1, self.max_country_count);
        if clamped != self.default_country_count {
            log::warn!(
                "default_country_count {} outside 1..={}, using {clamped}",
                self.default_country_count,
                self.max_country_count
            );
            self.default_country_count = clamped;
        }
        self
    }
}
