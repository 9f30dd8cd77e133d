//! Application configuration management

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

/// Data root used when nothing is configured
pub const DEFAULT_DATA_DIR: &str = "data";

/// Environment variable that overrides the configured data root
pub const DATA_DIR_ENV: &str = "WORLDBOOK_DATA_DIR";

const MAX_RECENT: usize = 10;

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Data root holding one folder per category
    pub data_dir: Option<PathBuf>,
    /// Recently opened data roots, most recent first
    pub recent_data_dirs: Vec<PathBuf>,
    /// Editor settings
    pub editor: EditorConfig,
    /// UI settings
    pub ui: UiConfig,
}

/// Editor-specific settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Font size in pixels
    pub font_size: f32,
    /// Visible rows in the raw YAML editor
    pub raw_editor_rows: usize,
}

/// UI settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Theme (light/dark)
    pub theme: String,
    /// Sidebar width
    pub sidebar_width: f32,
    /// Extra font loaded at startup, e.g. one with CJK glyphs
    pub font_path: Option<PathBuf>,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            font_size: 14.0,
            raw_editor_rows: 20,
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            theme: "dark".to_string(),
            sidebar_width: 220.0,
            font_path: None,
        }
    }
}

impl AppConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "worldbook", "Worldbook")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from disk
    pub fn load() -> Result<Self> {
        let path = Self::config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        Self::load_from(&path)
    }

    /// Load configuration from a specific file, defaulting when absent
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config: {}", path.display()))?;
        Ok(config)
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        self.save_to(&path)
    }

    /// Save configuration to a specific file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure config directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config: {}", path.display()))?;

        tracing::info!("Saved config to: {}", path.display());
        Ok(())
    }

    /// Resolve the data root: environment, then config, then the default
    pub fn resolve_data_dir(&self) -> PathBuf {
        self.resolve_data_dir_with(std::env::var_os(DATA_DIR_ENV).map(PathBuf::from))
    }

    fn resolve_data_dir_with(&self, env_override: Option<PathBuf>) -> PathBuf {
        env_override
            .filter(|p| !p.as_os_str().is_empty())
            .or_else(|| self.data_dir.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR))
    }

    /// Switch to a data root and remember it
    pub fn set_data_dir(&mut self, path: PathBuf) {
        self.data_dir = Some(path.clone());
        self.add_recent_data_dir(path);
    }

    /// Add a data root to the recent list
    pub fn add_recent_data_dir(&mut self, path: PathBuf) {
        // Remove if already exists
        self.recent_data_dirs.retain(|p| p != &path);
        // Add to front
        self.recent_data_dirs.insert(0, path);
        self.recent_data_dirs.truncate(MAX_RECENT);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let config = AppConfig::load_from(&dir.path().join("config.json")).unwrap();
        assert!(config.data_dir.is_none());
        assert_eq!(config.ui.theme, "dark");
        assert_eq!(config.editor.raw_editor_rows, 20);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let mut config = AppConfig::default();
        config.set_data_dir(PathBuf::from("/tmp/world"));
        config.ui.font_path = Some(PathBuf::from("/fonts/NotoSansJP.otf"));
        config.save_to(&path).unwrap();

        let loaded = AppConfig::load_from(&path).unwrap();
        assert_eq!(loaded.data_dir, Some(PathBuf::from("/tmp/world")));
        assert_eq!(loaded.recent_data_dirs, vec![PathBuf::from("/tmp/world")]);
        assert_eq!(loaded.ui.font_path, config.ui.font_path);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"ui": {"theme": "light"}}"#).unwrap();

        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.ui.theme, "light");
        assert_eq!(config.ui.sidebar_width, 220.0);
        assert_eq!(config.editor.font_size, 14.0);
    }

    #[test]
    fn test_invalid_config_is_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "not json").unwrap();
        assert!(AppConfig::load_from(&path).is_err());
    }

    #[test]
    fn test_recent_data_dirs() {
        let mut config = AppConfig::default();
        for i in 0..12 {
            config.add_recent_data_dir(PathBuf::from(format!("/w/{}", i)));
        }
        config.add_recent_data_dir(PathBuf::from("/w/5"));

        assert_eq!(config.recent_data_dirs.len(), MAX_RECENT);
        assert_eq!(config.recent_data_dirs[0], PathBuf::from("/w/5"));
        assert_eq!(
            config.recent_data_dirs.iter().filter(|p| **p == PathBuf::from("/w/5")).count(),
            1
        );
    }

    #[test]
    fn test_data_dir_resolution() {
        let mut config = AppConfig::default();
        assert_eq!(config.resolve_data_dir_with(None), PathBuf::from(DEFAULT_DATA_DIR));

        config.data_dir = Some(PathBuf::from("/cfg"));
        assert_eq!(config.resolve_data_dir_with(None), PathBuf::from("/cfg"));
        assert_eq!(
            config.resolve_data_dir_with(Some(PathBuf::from("/env"))),
            PathBuf::from("/env")
        );
        assert_eq!(
            config.resolve_data_dir_with(Some(PathBuf::new())),
            PathBuf::from("/cfg")
        );
    }
}
