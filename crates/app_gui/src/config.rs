//! Persisted application settings.

use crate::i18n::LanguagePreference;
use anyhow::{Context, Result};
use directories_next::ProjectDirs;
use parts_core::Capabilities;
use serde::{Deserialize, Serialize};
use std::fs;
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};
use std::time::Duration;

const SETTINGS_FILE: &str = "settings.json";

/// Bounds of the recent analyses strip; also the settings window range.
pub const RECENT_COUNT_RANGE: RangeInclusive<usize> = 1..=12;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub language: LanguagePreference,
    /// Shows the part transfer visualization tab.
    pub compare_tab: bool,
    pub analysis_delay_ms: u64,
    /// Number of records in the "recent analyses" strip.
    pub recent_count: usize,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            language: LanguagePreference::System,
            compare_tab: true,
            analysis_delay_ms: 2000,
            recent_count: 3,
        }
    }
}

impl AppSettings {
    pub fn capabilities(&self) -> Capabilities {
        Capabilities {
            has_compare_tab: self.compare_tab,
        }
    }

    pub fn analysis_delay(&self) -> Duration {
        Duration::from_millis(self.analysis_delay_ms)
    }

    /// Loads settings from the platform config directory, falling back to
    /// defaults when the file is missing or unreadable.
    pub fn load_or_default() -> Self {
        let Some(path) = settings_path() else {
            return Self::default();
        };
        match Self::load_from(&path) {
            Ok(Some(settings)) => settings,
            Ok(None) => Self::default(),
            Err(e) => {
                tracing::warn!("Settings not loaded from {}: {e:#}", path.display());
                Self::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }
        let raw = fs::read_to_string(path)
            .with_context(|| format!("cannot read {}", path.display()))?;
        let mut settings: Self = serde_json::from_str(&raw).context("invalid settings file")?;
        settings.recent_count = settings
            .recent_count
            .clamp(*RECENT_COUNT_RANGE.start(), *RECENT_COUNT_RANGE.end());
        Ok(Some(settings))
    }

    pub fn save(&self) -> Result<PathBuf> {
        let path = settings_path().context("no configuration directory available")?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)
                .with_context(|| format!("cannot create {}", dir.display()))?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).with_context(|| format!("cannot write {}", path.display()))?;
        Ok(())
    }
}

fn settings_path() -> Option<PathBuf> {
    ProjectDirs::from("ru", "AutoParts", "AutoParts")
        .map(|dirs| dirs.config_dir().join(SETTINGS_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use tempfile::tempdir;

    #[test]
    fn missing_file_means_no_settings() -> Result<()> {
        let dir = tempdir()?;
        assert_eq!(AppSettings::load_from(&dir.path().join("none.json"))?, None);
        Ok(())
    }

    #[test]
    fn saved_settings_load_back() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("nested").join(SETTINGS_FILE);
        let settings = AppSettings {
            language: LanguagePreference::English,
            compare_tab: false,
            analysis_delay_ms: 500,
            recent_count: 6,
        };
        settings.save_to(&path)?;
        assert_eq!(AppSettings::load_from(&path)?, Some(settings));
        Ok(())
    }

    #[test]
    fn partial_file_fills_in_defaults() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join(SETTINGS_FILE);
        fs::write(&path, r#"{ "compare_tab": false }"#)?;
        let loaded = AppSettings::load_from(&path)?.unwrap();
        assert!(!loaded.capabilities().has_compare_tab);
        assert_eq!(loaded.analysis_delay(), Duration::from_millis(2000));
        assert_eq!(loaded.recent_count, 3);
        Ok(())
    }

    #[rstest]
    #[case(0, 1)]
    #[case(5, 5)]
    #[case(100, 12)]
    fn hand_edited_recent_count_is_kept_in_range(
        #[case] stored: usize,
        #[case] expected: usize,
    ) -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join(SETTINGS_FILE);
        fs::write(&path, format!(r#"{{ "recent_count": {stored} }}"#))?;
        let loaded = AppSettings::load_from(&path)?.unwrap();
        assert_eq!(loaded.recent_count, expected);
        Ok(())
    }

    #[test]
    fn garbage_is_an_error() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join(SETTINGS_FILE);
        fs::write(&path, "not json")?;
        assert!(AppSettings::load_from(&path).is_err());
        Ok(())
    }
}
