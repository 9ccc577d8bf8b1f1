// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Configuration management for the analysis engine

pub mod engine_config;

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::logging::AppLogger;

pub use engine_config::{
    CadenceConfig, ConfigError, EfficiencyThresholds, EngineConfig, OvertrainingConfig,
    StabilityThresholds, TrendConfig, ZoneThresholds,
};

/// Config file looked up in the working directory
pub const LOCAL_CONFIG_FILE: &str = "stride_insights.toml";

fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("stride-insights/engine.toml"))
}

impl EngineConfig {
    /// Load engine configuration from file or use defaults
    ///
    /// Lookup order: explicit path, `stride_insights.toml` in the working
    /// directory, the user config directory, then built-in defaults.
    pub fn load(path: Option<String>) -> Result<Self> {
        if let Some(config_path) = path {
            return Self::load_from_file(&config_path);
        }

        if Path::new(LOCAL_CONFIG_FILE).exists() {
            return Self::load_from_file(LOCAL_CONFIG_FILE);
        }

        if let Some(user_path) = user_config_path().filter(|p| p.exists()) {
            return Self::load_from_file(&user_path.to_string_lossy());
        }

        debug!("No engine config file found, using defaults");
        Ok(Self::default())
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read engine config file: {}", path))?;

        let config: EngineConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse engine config file: {}", path))?;

        config
            .validate()
            .with_context(|| format!("Invalid engine config file: {}", path))?;

        AppLogger::log_config_loaded(path);
        Ok(config)
    }

    /// Write the configuration as pretty TOML
    pub fn save(&self, path: Option<String>) -> Result<()> {
        let config_path = match path {
            Some(p) => PathBuf::from(p),
            None => user_config_path().unwrap_or_else(|| LOCAL_CONFIG_FILE.into()),
        };

        if let Some(parent) = config_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {}", parent.display()))?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(&config_path, content)
            .with_context(|| format!("Failed to write engine config: {}", config_path.display()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    /// Helper function to create a temporary config file
    fn create_temp_config_file(content: &str) -> (TempDir, String) {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let config_path = temp_dir.path().join("engine.toml");
        fs::write(&config_path, content).expect("Failed to write temp config");
        (temp_dir, config_path.to_string_lossy().to_string())
    }

    #[test]
    fn test_load_explicit_path() {
        let (_dir, path) = create_temp_config_file(
            r#"
[efficiency]
trend_epsilon = 0.002

[trends]
recovery_bucket_edges = [1.5, 2.5, 3.5, 6.0]
"#,
        );

        let config = EngineConfig::load(Some(path)).unwrap();
        assert_eq!(config.efficiency.trend_epsilon, 0.002);
        assert_eq!(config.trends.recovery_bucket_edges, [1.5, 2.5, 3.5, 6.0]);
        assert_eq!(config.stability, StabilityThresholds::default());
    }

    #[test]
    fn test_load_missing_file_fails() {
        let result = EngineConfig::load_from_file("/nonexistent/stride_insights.toml");
        assert!(result.is_err());
    }

    #[test]
    fn test_load_rejects_invalid_thresholds() {
        let (_dir, path) = create_temp_config_file(
            r#"
[stability]
stable_cv_max = 30.0
unstable_cv_min = 10.0
"#,
        );

        let err = EngineConfig::load_from_file(&path).unwrap_err();
        assert!(err.to_string().contains("Invalid engine config file"));
    }

    #[test]
    fn test_save_and_reload() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested/engine.toml");
        let path_str = path.to_string_lossy().to_string();

        let mut config = EngineConfig::default();
        config.overtraining.volume_spike_ratio = 1.5;
        config.save(Some(path_str.clone())).unwrap();

        let reloaded = EngineConfig::load_from_file(&path_str).unwrap();
        assert_eq!(reloaded, config);
    }
}
