// ABOUTME: Application configuration with defaults and file loading
// Supports TOML configuration files and environment variables

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::export::render::ValueFormat;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Watch-mode poll interval in milliseconds
    pub poll_interval_ms: u64,
    /// How column value lists are rendered
    pub value_format: ValueFormat,
    /// Whether folder titles are emitted as header lines
    pub include_folders: bool,
    /// Candidate snapshot directories for the default lookup,
    /// checked in order; `~` expands to the home directory
    #[serde(default)]
    pub state_dirs: Vec<String>,
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
    #[serde(skip)]
    pub debug: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 2000,
            value_format: ValueFormat::Plain,
            include_folders: true,
            state_dirs: vec![],
            config_path: None,
            debug: false,
        }
    }
}

impl AppConfig {
    pub fn load() -> Self {
        let mut config = Self::default();

        // Try to load from default location
        if let Some(proj_dirs) = ProjectDirs::from("com", "desmos-tables", "desmos-tables") {
            let config_path = proj_dirs.config_dir().join("config.toml");
            if config_path.exists() {
                if let Ok(contents) = std::fs::read_to_string(&config_path) {
                    if let Ok(file_config) = toml::from_str::<Self>(&contents) {
                        config = file_config;
                        config.config_path = Some(config_path);
                    }
                }
            }
        }

        config.apply_env_overrides();
        config
    }

    /// Load from an explicit config file path
    pub fn load_from(path: &std::path::Path) -> crate::utils::error::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&contents)
            .map_err(|e| crate::utils::error::ExportError::Config(format!(
                "Invalid config file {}: {}",
                path.display(),
                e
            )))?;
        config.config_path = Some(path.to_path_buf());
        config.apply_env_overrides();
        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(interval) = std::env::var("DESMOS_TABLES_POLL_INTERVAL_MS") {
            if let Ok(parsed) = interval.parse() {
                self.poll_interval_ms = parsed;
            }
        }

        if let Ok(format) = std::env::var("DESMOS_TABLES_FORMAT") {
            if let Some(parsed) = ValueFormat::from_str(&format) {
                self.value_format = parsed;
            }
        }
    }

    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(proj_dirs) = ProjectDirs::from("com", "desmos-tables", "desmos-tables") {
            let config_dir = proj_dirs.config_dir();
            std::fs::create_dir_all(config_dir)?;

            let config_path = config_dir.join("config.toml");
            let contents = toml::to_string_pretty(self)?;
            std::fs::write(config_path, contents)?;
        }

        Ok(())
    }
}
