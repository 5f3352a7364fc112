use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::hotkey::GLOBAL_HOTKEY;
use crate::core::search::{SearchOptions, DEFAULT_MAX_RESULTS};
use crate::error::{ExpatError, ExpatResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub search: SearchConfig,
    pub appearance: AppearanceConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub max_results: u32,
    pub use_global_hotkey: bool,
    pub hotkey: char,
    pub blur_delay_ms: u64,
    pub focus_delay_ms: u64,
    pub placeholder: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppearanceConfig {
    pub theme: String,
    pub window_width: i32,
}

#[allow(clippy::derivable_impls)]
impl Default for Config {
    fn default() -> Self {
        Self {
            search: SearchConfig::default(),
            appearance: AppearanceConfig::default(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_results: DEFAULT_MAX_RESULTS as u32,
            use_global_hotkey: false,
            hotkey: GLOBAL_HOTKEY,
            blur_delay_ms: 100,
            focus_delay_ms: 100,
            placeholder: "Search...".to_string(),
        }
    }
}

impl Default for AppearanceConfig {
    fn default() -> Self {
        Self {
            theme: "light".to_string(),
            window_width: 600,
        }
    }
}

impl SearchConfig {
    /// Search options for a widget matching on `match_keys` and keyed by `key_by`.
    pub fn to_options<S: Into<String>>(
        &self,
        match_keys: impl IntoIterator<Item = S>,
        key_by: &str,
    ) -> SearchOptions {
        SearchOptions {
            max_results: self.max_results as usize,
            use_global_hotkey: self.use_global_hotkey,
            hotkey: self.hotkey,
            blur_delay: Duration::from_millis(self.blur_delay_ms),
            focus_delay: Duration::from_millis(self.focus_delay_ms),
            ..SearchOptions::new(match_keys, key_by)
        }
    }
}

impl Config {
    /// Get the config file path
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| {
                dirs::home_dir()
                    .map(|h| h.join(".config"))
                    .unwrap_or_else(|| PathBuf::from("/tmp"))
            })
            .join("expat-tax")
            .join("config.toml")
    }

    /// Load config from the default path, or return defaults if it is
    /// missing or broken
    pub fn load() -> Self {
        let path = Self::config_path();

        if !path.exists() {
            return Self::default();
        }

        match Self::load_from(&path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(path = %path.display(), "Failed to load config, using defaults: {}", e);
                Self::default()
            }
        }
    }

    /// Load and validate config from `path`
    pub fn load_from(path: &Path) -> ExpatResult<Self> {
        let content = fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;
        config.validate();
        Ok(config)
    }

    /// Validate and clamp config values to acceptable ranges
    fn validate(&mut self) {
        // Clamp max_results to reasonable range (1 - 20)
        self.search.max_results = self.search.max_results.clamp(1, 20);

        // Delays longer than a second make the dropdown feel stuck
        self.search.blur_delay_ms = self.search.blur_delay_ms.min(1000);
        self.search.focus_delay_ms = self.search.focus_delay_ms.min(1000);

        // Clamp window_width to reasonable range (400 - 1200)
        self.appearance.window_width = self.appearance.window_width.clamp(400, 1200);
    }

    /// Save config to the default path
    pub fn save(&self) -> ExpatResult<()> {
        self.save_to(&Self::config_path())
    }

    /// Save config to `path`, creating parent directories
    pub fn save_to(&self, path: &Path) -> ExpatResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                ExpatError::Config(format!("Failed to create config directory: {}", e))
            })?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.search.max_results, 5);
        assert_eq!(config.search.hotkey, '/');
        assert!(!config.search.use_global_hotkey);
        assert_eq!(config.search.blur_delay_ms, 100);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: Config = toml::from_str("[search]\nuse_global_hotkey = true\n").unwrap();
        assert!(config.search.use_global_hotkey);
        assert_eq!(config.search.max_results, 5);
        assert_eq!(config.appearance.theme, "light");
    }

    #[test]
    fn test_load_clamps_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "[search]\nmax_results = 500\nblur_delay_ms = 9000\n[appearance]\nwindow_width = 10\n",
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.search.max_results, 20);
        assert_eq!(config.search.blur_delay_ms, 1000);
        assert_eq!(config.appearance.window_width, 400);
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.search.hotkey = 'k';
        config.search.use_global_hotkey = true;
        config.save_to(&path).unwrap();

        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_broken_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[search\nmax_results = ").unwrap();

        assert!(matches!(
            Config::load_from(&path),
            Err(ExpatError::TomlParse(_))
        ));
    }

    #[test]
    fn test_to_options() {
        let mut config = Config::default();
        config.search.blur_delay_ms = 250;

        let options = config.search.to_options(["country_name", "iso"], "country_name");
        assert_eq!(options.match_keys, vec!["country_name", "iso"]);
        assert_eq!(options.key_by, "country_name");
        assert_eq!(options.max_results, 5);
        assert_eq!(options.blur_delay, Duration::from_millis(250));
    }
}
