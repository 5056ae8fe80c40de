//! Trainer configuration loading.
//!
//! Values come from an optional TOML file, then command-line overrides are
//! layered on top. Every key has a default, so an empty file is valid.

use std::fs;
use std::path::Path;
use std::str::FromStr;

use log::LevelFilter;
use serde::Deserialize;

use crate::error::TrainerError;
use crate::variant::TrainerVariant;

pub const DEFAULT_CONFIG_FILE: &str = "ct-trainer.toml";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeChoice {
    #[default]
    Dark,
    Light,
}

impl FromStr for ThemeChoice {
    type Err = TrainerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dark" => Ok(ThemeChoice::Dark),
            "light" => Ok(ThemeChoice::Light),
            _ => Err(TrainerError::UnknownTheme(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        WindowConfig {
            width: 800,
            height: 520,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct TrainerConfig {
    pub variant: TrainerVariant,
    pub theme: ThemeChoice,
    pub log_level: String,
    pub window: WindowConfig,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        TrainerConfig {
            variant: TrainerVariant::default(),
            theme: ThemeChoice::default(),
            log_level: "info".to_string(),
            window: WindowConfig::default(),
        }
    }
}

impl TrainerConfig {
    /// Loads `path`, or [`DEFAULT_CONFIG_FILE`] when no path is given.
    ///
    /// A missing default file yields the defaults; a missing explicit file
    /// is an error.
    pub fn load(path: Option<&Path>) -> Result<Self, TrainerError> {
        let path = match path {
            Some(path) => path,
            None => {
                let default = Path::new(DEFAULT_CONFIG_FILE);
                if !default.exists() {
                    log::debug!("no {DEFAULT_CONFIG_FILE} found, using defaults");
                    return Ok(TrainerConfig::default());
                }
                default
            }
        };

        let text = fs::read_to_string(path).map_err(|source| TrainerError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::parse(&text).map_err(|source| TrainerError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;
        config.log_level_filter()?;
        log::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn parse(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Applies command-line overrides; `None` keeps the file value.
    pub fn with_overrides(
        mut self,
        variant: Option<TrainerVariant>,
        theme: Option<ThemeChoice>,
        log_level: Option<&str>,
    ) -> Result<Self, TrainerError> {
        if let Some(variant) = variant {
            self.variant = variant;
        }
        if let Some(theme) = theme {
            self.theme = theme;
        }
        if let Some(level) = log_level {
            self.log_level = level.to_string();
            self.log_level_filter()?;
        }
        Ok(self)
    }

    pub fn log_level_filter(&self) -> Result<LevelFilter, TrainerError> {
        LevelFilter::from_str(self.log_level.trim())
            .map_err(|_| TrainerError::InvalidLogLevel(self.log_level.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_file_gives_defaults() {
        let config = TrainerConfig::parse("").unwrap();
        assert_eq!(config, TrainerConfig::default());
        assert_eq!(config.variant, TrainerVariant::Click);
        assert_eq!(config.theme, ThemeChoice::Dark);
        assert_eq!(config.log_level_filter().unwrap(), LevelFilter::Info);
    }

    #[test]
    fn parses_all_keys() {
        let config = TrainerConfig::parse(
            r#"
variant = "select"
theme = "light"
log_level = "debug"

[window]
width = 1024
"#,
        )
        .unwrap();
        assert_eq!(config.variant, TrainerVariant::Select);
        assert_eq!(config.theme, ThemeChoice::Light);
        assert_eq!(config.log_level_filter().unwrap(), LevelFilter::Debug);
        assert_eq!(config.window.width, 1024);
        assert_eq!(config.window.height, 520);
    }

    #[test]
    fn rejects_unknown_keys_and_values() {
        assert!(TrainerConfig::parse("colour = \"red\"").is_err());
        assert!(TrainerConfig::parse("variant = \"drag\"").is_err());
    }

    #[test]
    fn loads_explicit_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "variant = \"select\"").unwrap();
        let config = TrainerConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.variant, TrainerVariant::Select);
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.toml");
        assert!(matches!(
            TrainerConfig::load(Some(&missing)),
            Err(TrainerError::ConfigRead { .. })
        ));
    }

    #[test]
    fn invalid_log_level_in_file_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "log_level = \"chatty\"").unwrap();
        assert!(matches!(
            TrainerConfig::load(Some(file.path())),
            Err(TrainerError::InvalidLogLevel(level)) if level == "chatty"
        ));
    }

    #[test]
    fn overrides_win_over_file_values() {
        let config = TrainerConfig::parse("variant = \"select\"\nlog_level = \"warn\"")
            .unwrap()
            .with_overrides(Some(TrainerVariant::Click), Some(ThemeChoice::Light), Some("trace"))
            .unwrap();
        assert_eq!(config.variant, TrainerVariant::Click);
        assert_eq!(config.theme, ThemeChoice::Light);
        assert_eq!(config.log_level_filter().unwrap(), LevelFilter::Trace);

        let kept = TrainerConfig::default().with_overrides(None, None, None).unwrap();
        assert_eq!(kept, TrainerConfig::default());

        assert!(TrainerConfig::default().with_overrides(None, None, Some("loud")).is_err());
    }

    #[test]
    fn theme_from_str() {
        assert_eq!("Light".parse::<ThemeChoice>().unwrap(), ThemeChoice::Light);
        assert!(matches!(
            "neon".parse::<ThemeChoice>(),
            Err(TrainerError::UnknownTheme(_))
        ));
    }
}
