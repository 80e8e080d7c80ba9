use std::fs;
use std::path::Path;

use anyhow::Context;
use cmdproc::ProcessorConfig;
use serde::Deserialize;
use tracing::debug;

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct ConsoleConfig {
    #[serde(default)]
    pub processor: ProcessorConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LoggingConfig {
    /// Default filter directive; `RUST_LOG` takes precedence.
    #[serde(default = "default_level")]
    pub level: String,

    #[serde(default)]
    pub show_target: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            show_target: false,
        }
    }
}

fn default_level() -> String {
    "warn".to_string()
}

impl ConsoleConfig {
    /// Loads the YAML file at `path`, falling back to defaults when it does
    /// not exist.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            debug!(
                log_type = "config",
                "No configuration at {}, using defaults",
                path.display()
            );
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_yaml(&content)
            .with_context(|| format!("Invalid configuration in {}", path.display()))
    }

    pub fn from_yaml(content: &str) -> anyhow::Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }
}
