//! Light/dark theme preference and its persistence

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::Result;
use directories::ProjectDirs;

/// Storage key for the selected theme
pub const THEME_KEY: &str = "theme";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Glyph for the toggle control: the theme you would switch to
    pub fn icon(self) -> &'static str {
        match self {
            Theme::Light => "\u{1F319}",
            Theme::Dark => "\u{2600}\u{FE0F}",
        }
    }
}

/// Persistent string key-value storage
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// Preferences kept in a JSON object on disk, written on every change
#[derive(Debug)]
pub struct JsonPreferenceStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl JsonPreferenceStore {
    /// Default location in the platform data directory
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "article-browser", "ArticleBrowser")
            .map(|dirs| dirs.data_dir().join("prefs.json"))
    }

    /// Open the store at `path`. A missing or unreadable file starts empty.
    pub fn open(path: PathBuf) -> Self {
        let values = std::fs::read_to_string(&path)
            .ok()
            .and_then(|content| match serde_json::from_str(&content) {
                Ok(values) => Some(values),
                Err(e) => {
                    tracing::warn!("Ignoring malformed preferences {}: {}", path.display(), e);
                    None
                }
            })
            .unwrap_or_default();

        Self { path, values }
    }
}

impl PreferenceStore for JsonPreferenceStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(&self.values)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }
}

/// Non-persistent store, used when no data directory is available
#[derive(Debug, Default)]
pub struct MemoryPreferenceStore {
    values: BTreeMap<String, String>,
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Current theme, backed by a preference store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeToggle {
    theme: Theme,
}

impl ThemeToggle {
    /// Read the stored theme, defaulting to light
    pub fn load(store: &dyn PreferenceStore) -> Self {
        let theme = store
            .get(THEME_KEY)
            .and_then(|value| Theme::parse(&value))
            .unwrap_or_default();
        Self { theme }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn icon(&self) -> &'static str {
        self.theme.icon()
    }

    /// Switch theme and persist the new choice. The in-memory theme changes
    /// even if persisting fails.
    pub fn toggle(&mut self, store: &mut dyn PreferenceStore) -> Result<Theme> {
        self.theme = self.theme.toggled();
        store.set(THEME_KEY, self.theme.as_str())?;
        Ok(self.theme)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_light_without_preference() {
        let store = MemoryPreferenceStore::default();
        assert_eq!(ThemeToggle::load(&store).theme(), Theme::Light);
    }

    #[test]
    fn test_unknown_stored_value_falls_back_to_light() {
        let mut store = MemoryPreferenceStore::default();
        store.set(THEME_KEY, "sepia").unwrap();
        assert_eq!(ThemeToggle::load(&store).theme(), Theme::Light);
    }

    #[test]
    fn test_toggle_twice_returns_and_persists_each_change() {
        let mut store = MemoryPreferenceStore::default();
        let mut toggle = ThemeToggle::load(&store);

        assert_eq!(toggle.toggle(&mut store).unwrap(), Theme::Dark);
        assert_eq!(store.get(THEME_KEY).as_deref(), Some("dark"));

        assert_eq!(toggle.toggle(&mut store).unwrap(), Theme::Light);
        assert_eq!(store.get(THEME_KEY).as_deref(), Some("light"));
    }

    #[test]
    fn test_icon_follows_theme() {
        assert_eq!(Theme::Light.icon(), "\u{1F319}");
        assert_eq!(Theme::Dark.icon(), "\u{2600}\u{FE0F}");
    }

    #[test]
    fn test_json_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("prefs.json");

        let mut store = JsonPreferenceStore::open(path.clone());
        let mut toggle = ThemeToggle::load(&store);
        toggle.toggle(&mut store).unwrap();

        let reopened = JsonPreferenceStore::open(path);
        assert_eq!(ThemeToggle::load(&reopened).theme(), Theme::Dark);
    }

    #[test]
    fn test_json_store_ignores_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        std::fs::write(&path, "not json").unwrap();

        let store = JsonPreferenceStore::open(path);
        assert_eq!(store.get(THEME_KEY), None);
    }
}
