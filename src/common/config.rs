use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::platform::paths_equal;

/// Global junkscout configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Extra directories treated as program-install roots besides the
    /// platform "Program Files" pair. Set before the first discovery query
    /// and left alone afterwards.
    #[serde(default)]
    pub custom_program_roots: Vec<String>,

    /// Run unattended uninstalls without showing their windows.
    /// Passed through to the execution layer; discovery ignores it.
    #[serde(default)]
    pub quiet_automation: bool,

    /// Allow quiet automation to kill uninstallers that stop responding.
    /// Passed through like `quiet_automation`.
    #[serde(default)]
    pub quiet_automation_kill_stuck: bool,

    /// Output format preference
    #[serde(default)]
    pub output_format: OutputFormat,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Human,
    Json,
    Quiet,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            custom_program_roots: Vec::new(),
            quiet_automation: false,
            quiet_automation_kill_stuck: false,
            output_format: OutputFormat::Human,
        }
    }
}

impl Config {
    /// Get the junkscout data directory (~/.junkscout)
    pub fn data_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join(".junkscout")
    }

    /// Get the config file path
    pub fn config_path() -> PathBuf {
        Self::data_dir().join("config.toml")
    }

    /// Load config from file, or create default if not exists
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        if path.exists() {
            let contents = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config: {}", path.display()))?;
            let config: Config = toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config: {}", path.display()))?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path();
        let dir = path.parent().unwrap();
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create config dir: {}", dir.display()))?;
        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(&path, contents)
            .with_context(|| format!("Failed to write config: {}", path.display()))?;
        Ok(())
    }

    /// Custom program roots as paths, in configured order
    pub fn custom_roots(&self) -> Vec<PathBuf> {
        self.custom_program_roots.iter().map(PathBuf::from).collect()
    }

    /// Add a custom program root unless an equal path is already present
    pub fn add_custom_root(&mut self, root: &str) -> bool {
        let candidate = Path::new(root);
        if self
            .custom_program_roots
            .iter()
            .any(|existing| paths_equal(Path::new(existing), candidate))
        {
            return false;
        }
        self.custom_program_roots.push(root.to_string());
        true
    }

    /// Remove every custom root equal to the given path
    pub fn remove_custom_root(&mut self, root: &str) -> bool {
        let candidate = Path::new(root);
        let before = self.custom_program_roots.len();
        self.custom_program_roots
            .retain(|existing| !paths_equal(Path::new(existing), candidate));
        self.custom_program_roots.len() != before
    }
}
