use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const DEFAULT_INPUT_PORT: &str = "MPKmini2";
pub const DEFAULT_OUTPUT_PORT: &str = "IAC Driver Bus 1";
pub const DEFAULT_CLIENT_NAME: &str = "trackswitch";

/// Runtime settings for the remapper.
///
/// Every field has a default, so a partial file only overrides what it names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Substring of the controller's input port name.
    pub input_port: String,
    /// Substring of the virtual bus output port name.
    pub output_port: String,
    /// MIDI channel used for every outbound action (0-15).
    pub send_channel: u8,
    /// Value sent with every outbound action (1-127).
    pub send_value: u8,
    /// Client name registered with the MIDI driver.
    pub client_name: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            input_port: DEFAULT_INPUT_PORT.to_string(),
            output_port: DEFAULT_OUTPUT_PORT.to_string(),
            send_channel: 0,
            send_value: 127,
            client_name: DEFAULT_CLIENT_NAME.to_string(),
        }
    }
}

impl Settings {
    /// Check every field, reporting all problems together.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if self.input_port.trim().is_empty() {
            errors.push("input_port must not be empty".to_string());
        }
        if self.output_port.trim().is_empty() {
            errors.push("output_port must not be empty".to_string());
        }
        if self.send_channel > 15 {
            errors.push(format!(
                "send_channel must be between 0 and 15, got {}",
                self.send_channel
            ));
        }
        if !(1..=127).contains(&self.send_value) {
            errors.push(format!(
                "send_value must be between 1 and 127, got {}",
                self.send_value
            ));
        }
        if self.client_name.trim().is_empty() {
            errors.push("client_name must not be empty".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }
}

/// Loads and saves [`Settings`] as JSON.
pub struct ConfigManager {
    config_path: PathBuf,
    settings: Settings,
}

impl ConfigManager {
    /// Create a new configuration manager.
    /// If no path is provided, defaults to 'trackswitch.json' in the current working directory
    pub fn new(config_path: Option<PathBuf>) -> Self {
        let config_path = config_path.unwrap_or_else(|| PathBuf::from("trackswitch.json"));

        Self {
            config_path,
            settings: Settings::default(),
        }
    }

    /// Load settings from the configuration file.
    /// A missing file yields the defaults and is not created.
    pub fn load(&mut self) -> Result<Settings, ConfigError> {
        if !self.config_path.exists() {
            log::debug!(
                "No config file at {}, using defaults",
                self.config_path.display()
            );
            return Ok(self.settings.clone());
        }

        let content =
            fs::read_to_string(&self.config_path).map_err(|e| ConfigError::Read(e.to_string()))?;

        let settings: Settings =
            serde_json::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        settings.validate()?;

        log::info!("Loaded config from {}", self.config_path.display());
        self.settings = settings;
        Ok(self.settings.clone())
    }

    /// Save current settings to the configuration file.
    pub fn save(&self) -> Result<(), ConfigError> {
        if let Some(parent) = self.config_path.parent() {
            if parent != Path::new("") && parent != Path::new(".") {
                fs::create_dir_all(parent).map_err(|e| ConfigError::Write(e.to_string()))?;
            }
        }

        let content = serde_json::to_string_pretty(&self.settings)
            .map_err(|e| ConfigError::Serialize(e.to_string()))?;

        fs::write(&self.config_path, content).map_err(|e| ConfigError::Write(e.to_string()))?;

        Ok(())
    }

    /// Validate, replace and save settings.
    pub fn update_settings(&mut self, settings: Settings) -> Result<(), ConfigError> {
        settings.validate()?;
        self.settings = settings;
        self.save()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_config_manager_new() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("test_config.json");

        let manager = ConfigManager::new(Some(config_path.clone()));
        assert_eq!(manager.config_path(), config_path);
        assert_eq!(manager.settings(), &Settings::default());
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("missing.json");

        let mut manager = ConfigManager::new(Some(config_path.clone()));
        let settings = manager.load().unwrap();

        assert_eq!(settings.input_port, "MPKmini2");
        assert_eq!(settings.output_port, "IAC Driver Bus 1");
        assert_eq!(settings.send_channel, 0);
        assert_eq!(settings.send_value, 127);
        assert!(!config_path.exists());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("nested").join("config.json");

        let mut manager = ConfigManager::new(Some(config_path.clone()));
        let settings = Settings {
            input_port: "Launchkey".to_string(),
            send_channel: 3,
            ..Settings::default()
        };
        manager.update_settings(settings.clone()).unwrap();
        assert!(config_path.exists());

        let mut reloaded = ConfigManager::new(Some(config_path));
        assert_eq!(reloaded.load().unwrap(), settings);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("partial.json");
        fs::write(&config_path, r#"{ "output_port": "loopMIDI" }"#).unwrap();

        let mut manager = ConfigManager::new(Some(config_path));
        let settings = manager.load().unwrap();

        assert_eq!(settings.output_port, "loopMIDI");
        assert_eq!(settings.input_port, DEFAULT_INPUT_PORT);
        assert_eq!(settings.send_value, 127);
    }

    #[test]
    fn test_invalid_json() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("broken.json");
        fs::write(&config_path, "{ not json").unwrap();

        let mut manager = ConfigManager::new(Some(config_path));
        assert!(matches!(manager.load(), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_validation_reports_every_problem() {
        let settings = Settings {
            input_port: " ".to_string(),
            send_channel: 16,
            send_value: 0,
            ..Settings::default()
        };

        match settings.validate() {
            Err(ConfigError::Validation(errors)) => assert_eq!(errors.len(), 3),
            other => panic!("expected validation errors, got {:?}", other),
        }
    }

    #[test]
    fn test_out_of_range_file_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("range.json");
        fs::write(&config_path, r#"{ "send_channel": 20 }"#).unwrap();

        let mut manager = ConfigManager::new(Some(config_path));
        assert!(matches!(manager.load(), Err(ConfigError::Validation(_))));
        assert_eq!(manager.settings(), &Settings::default());
    }
}
