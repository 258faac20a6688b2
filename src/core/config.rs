//! Application configuration management

use std::path::{Path, PathBuf};

use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use super::source::DEFAULT_DATA_SOURCE;
use super::view::Placeholders;

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Catalog document: a path or an http(s) URL
    pub data_source: String,
    /// Location opened at startup
    pub start_location: String,
    /// UI settings
    pub ui: UiConfig,
}

/// UI settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Initial window size
    pub window_width: f32,
    pub window_height: f32,
    /// Width of a grid card in points
    pub card_width: f32,
    /// Scroll distance after which the scroll-to-top control appears
    pub scroll_top_threshold: f32,
    /// Fallback image for grid cards
    pub card_placeholder: String,
    /// Fallback image for the detail view
    pub detail_placeholder: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_source: DEFAULT_DATA_SOURCE.to_string(),
            start_location: String::new(),
            ui: UiConfig::default(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        let placeholders = Placeholders::default();
        Self {
            window_width: 1280.0,
            window_height: 800.0,
            card_width: 300.0,
            scroll_top_threshold: 300.0,
            card_placeholder: placeholders.card,
            detail_placeholder: placeholders.detail,
        }
    }
}

impl UiConfig {
    pub fn placeholders(&self) -> Placeholders {
        Placeholders {
            card: self.card_placeholder.clone(),
            detail: self.detail_placeholder.clone(),
        }
    }
}

impl AppConfig {
    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "article-browser", "ArticleBrowser")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from `path`; a missing file yields defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to `path`
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure config directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;

        tracing::info!("Saved config to: {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_from(&dir.path().join("config.json")).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.data_source, "data.json");
        assert_eq!(config.ui.scroll_top_threshold, 300.0);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"data_source": "https://example.com/data.json", "ui": {"card_width": 240.0}}"#)
            .unwrap();

        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.data_source, "https://example.com/data.json");
        assert_eq!(config.ui.card_width, 240.0);
        assert_eq!(config.ui.card_placeholder, "https://via.placeholder.com/300");
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sub").join("config.json");
        let mut config = AppConfig::default();
        config.start_location = "?id=3".to_string();

        config.save_to(&path).unwrap();
        assert_eq!(AppConfig::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_malformed_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{").unwrap();
        assert!(AppConfig::load_from(&path).is_err());
    }
}
