use std::path::Path;

use tracing::Level;

use crate::error::{PrefsError, Result};
use crate::platform::Platform;
use crate::preferences_map::PreferencesMap;

/// Settings for `shrmpl-prefs-cli`, read from a `KEY=value` file.
///
/// The file goes through [`PreferencesMap`] like any other preferences file,
/// so `LOG_LEVEL.windows=DEBUG` style overrides work here too.
#[derive(Clone, Debug, PartialEq)]
pub struct CliConfig {
    pub log_level: Level,
    pub indent: String,
    pub platform: Option<Platform>,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            log_level: Level::INFO,
            indent: String::new(),
            platform: None,
        }
    }
}

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<CliConfig> {
    let prefs = PreferencesMap::from_path(path, Platform::current())?;
    CliConfig::from_prefs(&prefs)
}

impl CliConfig {
    pub fn from_prefs(prefs: &PreferencesMap) -> Result<Self> {
        let mut config = Self::default();
        if let Some(level) = prefs.get("LOG_LEVEL") {
            config.log_level = parse_log_level(level)?;
        }
        if let Some(indent) = prefs.get("INDENT") {
            config.indent = indent.to_string();
        }
        if let Some(platform) = prefs.get("PLATFORM") {
            config.platform = Some(platform.parse()?);
        }
        Ok(config)
    }
}

pub fn parse_log_level(level: &str) -> Result<Level> {
    match level.to_uppercase().as_str() {
        "DEBUG" => Ok(Level::DEBUG),
        "INFO" => Ok(Level::INFO),
        "WARN" => Ok(Level::WARN),
        "ERROR" => Ok(Level::ERROR),
        _ => Err(PrefsError::InvalidSetting {
            key: "LOG_LEVEL".to_string(),
            value: level.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_empty() {
        let config = CliConfig::from_prefs(&PreferencesMap::new()).unwrap();
        assert_eq!(config, CliConfig::default());
    }

    #[test]
    fn reads_all_settings() {
        let prefs = PreferencesMap::from_iter([
            ("LOG_LEVEL", "debug"),
            ("INDENT", "--"),
            ("PLATFORM", "windows"),
        ]);
        let config = CliConfig::from_prefs(&prefs).unwrap();
        assert_eq!(config.log_level, Level::DEBUG);
        assert_eq!(config.indent, "--");
        assert_eq!(config.platform, Some(Platform::Windows));
    }

    #[test]
    fn rejects_unknown_log_level() {
        let prefs = PreferencesMap::from_iter([("LOG_LEVEL", "LOUD")]);
        assert!(matches!(
            CliConfig::from_prefs(&prefs),
            Err(PrefsError::InvalidSetting { key, .. }) if key == "LOG_LEVEL"
        ));
    }

    #[test]
    fn rejects_unknown_platform() {
        let prefs = PreferencesMap::from_iter([("PLATFORM", "plan9")]);
        assert!(matches!(
            CliConfig::from_prefs(&prefs),
            Err(PrefsError::UnknownPlatform(_))
        ));
    }
}
