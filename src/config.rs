//! Configuration management
//!
//! Chat session settings, stored as TOML in the platform config directory.

use anyhow::{Result, Context};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Chat session settings
    #[serde(default)]
    pub chat: ChatConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Name printed before the chatbot's replies
    #[serde(default = "default_bot_name")]
    pub bot_name: String,
    /// Name shown in the input prompt
    #[serde(default = "default_user_name")]
    pub user_name: String,
    /// Maximum reply length in characters
    #[serde(default = "default_response_capacity")]
    pub response_capacity: usize,
    /// Knowledge file loaded when a session starts
    #[serde(default)]
    pub startup_file: Option<PathBuf>,
    /// Keep line-editor history between sessions
    #[serde(default = "default_true")]
    pub history: bool,
}

fn default_bot_name() -> String {
    "Chatbot".to_string()
}

fn default_user_name() -> String {
    "User".to_string()
}

fn default_response_capacity() -> usize {
    crate::agent::response::DEFAULT_CAPACITY
}

fn default_true() -> bool {
    true
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            bot_name: default_bot_name(),
            user_name: default_user_name(),
            response_capacity: default_response_capacity(),
            startup_file: None,
            history: true,
        }
    }
}

impl Config {
    /// Load configuration from file, writing the defaults on first use
    pub fn load() -> Result<Self> {
        let config_path = config_path()?;

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            let config = Config::default();
            config.save()?;
            Ok(config)
        }
    }

    /// Load configuration from a specific file
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .context("Failed to read config file")?;
        let config: Config = toml::from_str(&contents)
            .context("Failed to parse config file")?;
        if config.chat.response_capacity == 0 {
            anyhow::bail!("chat.response_capacity must be greater than zero");
        }
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        self.save_to(&config_path()?)
    }

    /// Save configuration to a specific file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let parent = path.parent()
            .context("Config path has no parent")?;

        std::fs::create_dir_all(parent)
            .context("Failed to create config directory")?;

        let contents = toml::to_string_pretty(self)
            .context("Failed to serialize config")?;

        std::fs::write(path, contents)
            .context("Failed to write config file")?;

        Ok(())
    }
}

fn project_dirs() -> Result<directories::ProjectDirs> {
    directories::ProjectDirs::from("com", "kb-chat", "kb-chat")
        .context("Failed to get project directories")
}

/// Get the configuration file path
pub fn config_path() -> Result<PathBuf> {
    Ok(project_dirs()?.config_dir().join("config.toml"))
}

/// Get the data directory path
pub fn data_dir() -> Result<PathBuf> {
    Ok(project_dirs()?.data_dir().to_path_buf())
}

/// Show current configuration
pub fn show_config() -> Result<()> {
    let config = Config::load()?;

    println!("Configuration ({})", config_path()?.display());
    println!("  bot_name:          {}", config.chat.bot_name);
    println!("  user_name:         {}", config.chat.user_name);
    println!("  response_capacity: {}", config.chat.response_capacity);
    println!(
        "  startup_file:      {}",
        config.chat.startup_file.as_ref().map(|p| p.display().to_string()).unwrap_or_else(|| "(none)".to_string())
    );
    println!("  history:           {}", if config.chat.history { "enabled" } else { "disabled" });

    Ok(())
}

/// Reset configuration to defaults
pub fn reset_config() -> Result<()> {
    let config = Config::default();
    config.save()?;
    println!("Configuration reset to defaults.");
    Ok(())
}

/// Get default configuration as TOML string
pub fn default_config_toml() -> String {
    let config = Config::default();
    toml::to_string_pretty(&config).unwrap_or_else(|_| "# Default configuration\n".to_string())
}
