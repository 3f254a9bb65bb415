use color_eyre::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub sheet: SheetConfig,
    #[serde(default)]
    pub discard_prompt: DiscardPromptConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Text field sheet defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetConfig {
    pub placeholder: String,
    pub confirm_label: String,
    /// Ask before discarding edited text
    pub discard_guard: bool,
    pub animation_ms: u64,
}

impl SheetConfig {
    pub fn animation(&self) -> Duration {
        Duration::from_millis(self.animation_ms)
    }
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            placeholder: "New task".to_string(),
            confirm_label: "Save".to_string(),
            discard_guard: true,
            animation_ms: 220,
        }
    }
}

/// Wording of the discard confirmation prompt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscardPromptConfig {
    pub title: String,
    pub message: String,
    pub cancel_label: String,
    pub discard_label: String,
}

impl Default for DiscardPromptConfig {
    fn default() -> Self {
        Self {
            title: "Discard current task?".to_string(),
            message: "Do you want to discard your current draft?".to_string(),
            cancel_label: "Cancel".to_string(),
            discard_label: "Discard".to_string(),
        }
    }
}

/// Log output settings. `RUST_LOG` takes precedence over `filter`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}

impl Config {
    /// Loads configuration from disk or creates default if not found
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            // Create default config file
            let config = Config::default();
            config.save()?;
            return Ok(config);
        }

        let contents = fs::read_to_string(&config_path)?;
        Self::parse(&contents)
    }

    pub fn parse(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Saves configuration to disk
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&config_path, toml::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Returns the path to the configuration file
    pub fn config_path() -> Result<PathBuf> {
        Ok(project_dirs()?.config_dir().join("config.toml"))
    }

    /// Directory the log file is written to
    pub fn log_dir() -> Result<PathBuf> {
        Ok(project_dirs()?.data_local_dir().join("logs"))
    }
}

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("", "", "textfield-sheet")
        .ok_or_else(|| color_eyre::eyre::eyre!("Could not determine config directory"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() -> Result<()> {
        assert_eq!(Config::parse("")?, Config::default());
        Ok(())
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() -> Result<()> {
        let config = Config::parse(
            r#"
            [sheet]
            confirm_label = "Add"
            discard_guard = false
            "#,
        )?;
        assert_eq!(config.sheet.confirm_label, "Add");
        assert!(!config.sheet.discard_guard);
        assert_eq!(config.sheet.placeholder, "New task");
        assert_eq!(config.discard_prompt, DiscardPromptConfig::default());
        Ok(())
    }

    #[test]
    fn test_pretty_output_parses_back() -> Result<()> {
        let mut config = Config::default();
        config.logging.filter = "textfield_sheet=debug".to_string();
        let written = toml::to_string_pretty(&config)?;
        assert_eq!(Config::parse(&written)?, config);
        Ok(())
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        assert!(Config::parse("[sheet").is_err());
    }
}
