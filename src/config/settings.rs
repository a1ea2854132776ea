//! User settings for Monthbook
//!
//! Manages user preferences: currency symbol, month name language,
//! the default user namespace and chart width.

use serde::{Deserialize, Serialize};

use super::paths::MonthbookPaths;
use crate::error::MonthbookError;
use crate::models::{Month, UserId};

/// Language used when printing month names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MonthNames {
    /// Canonical names (Januar, Februar, März, ...)
    #[default]
    German,
    /// January, February, March, ...
    English,
}

impl MonthNames {
    /// Display name of a month in this language
    pub fn name(self, month: Month) -> &'static str {
        match self {
            MonthNames::German => month.name(),
            MonthNames::English => month.english_name(),
        }
    }
}

/// User settings for Monthbook
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol used in output
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Month name language used in output
    #[serde(default)]
    pub month_names: MonthNames,

    /// User namespace used when `--user` is not given
    #[serde(default = "default_user")]
    pub default_user: String,

    /// Width of the bars in the yearly chart
    #[serde(default = "default_chart_width")]
    pub chart_width: usize,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "€".to_string()
}

fn default_user() -> String {
    "default".to_string()
}

fn default_chart_width() -> usize {
    40
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            month_names: MonthNames::default(),
            default_user: default_user(),
            chart_width: default_chart_width(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &MonthbookPaths) -> Result<Self, MonthbookError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                MonthbookError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                MonthbookError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &MonthbookPaths) -> Result<(), MonthbookError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            MonthbookError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| MonthbookError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    /// Resolve the user namespace: explicit choice first, then the default
    pub fn resolve_user(&self, explicit: Option<&str>) -> Result<UserId, MonthbookError> {
        let raw = explicit.unwrap_or(&self.default_user);
        UserId::new(raw).map_err(|e| MonthbookError::Validation(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.currency_symbol, "€");
        assert_eq!(settings.month_names, MonthNames::German);
        assert_eq!(settings.default_user, "default");
        assert_eq!(settings.chart_width, 40);
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = MonthbookPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.month_names = MonthNames::English;
        settings.default_user = "user123".into();

        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.month_names, MonthNames::English);
        assert_eq!(loaded.default_user, "user123");
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"month_names":"english"}"#).unwrap();
        assert_eq!(settings.month_names, MonthNames::English);
        assert_eq!(settings.currency_symbol, "€");
    }

    #[test]
    fn test_resolve_user() {
        let settings = Settings::default();
        assert_eq!(settings.resolve_user(None).unwrap().as_str(), "default");
        assert_eq!(settings.resolve_user(Some("bob")).unwrap().as_str(), "bob");
        assert!(settings.resolve_user(Some(" ")).unwrap_err().is_validation());
    }

    #[test]
    fn test_month_names() {
        assert_eq!(MonthNames::German.name(Month::March), "März");
        assert_eq!(MonthNames::English.name(Month::March), "March");
    }
}
