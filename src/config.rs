//! Configuration management for the ATS analyzer

use crate::error::{AtsError, Result};
use crate::processing::analyzer::{DEFAULT_FOUND_KEYWORDS_LIMIT, DEFAULT_MISSING_KEYWORDS_LIMIT};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Config {
    pub analysis: AnalysisConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    pub missing_keywords_limit: usize,
    pub found_keywords_limit: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_target_role: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub detailed: bool,
    pub color_output: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
    Html,
}

impl std::str::FromStr for OutputFormat {
    type Err = AtsError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "console" => Ok(OutputFormat::Console),
            "json" => Ok(OutputFormat::Json),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            "html" => Ok(OutputFormat::Html),
            _ => Err(AtsError::InvalidInput(format!(
                "Invalid output format: {}. Supported: console, json, markdown, html",
                s
            ))),
        }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            missing_keywords_limit: DEFAULT_MISSING_KEYWORDS_LIMIT,
            found_keywords_limit: DEFAULT_FOUND_KEYWORDS_LIMIT,
            default_target_role: None,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Console,
            detailed: false,
            color_output: true,
        }
    }
}

impl Config {
    /// Load from `path`, writing defaults there on first use.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            debug!("Loading configuration from {}", path.display());
            let content = std::fs::read_to_string(path)?;
            let config: Config = toml::from_str(&content)
                .map_err(|e| AtsError::Configuration(format!("Failed to parse config: {}", e)))?;
            Ok(config)
        } else {
            info!("No configuration at {}, writing defaults", path.display());
            let config = Self::default();
            config.save_to(path)?;
            Ok(config)
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| AtsError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("ats-analyzer")
            .join("config.toml")
    }

    /// Set a value by dotted key, e.g. `analysis.found_keywords_limit`.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "analysis.missing_keywords_limit" => {
                self.analysis.missing_keywords_limit = parse_value(key, value)?;
            }
            "analysis.found_keywords_limit" => {
                self.analysis.found_keywords_limit = parse_value(key, value)?;
            }
            "analysis.default_target_role" => {
                let role = value.trim();
                self.analysis.default_target_role = (!role.is_empty()).then(|| role.to_string());
            }
            "output.format" => self.output.format = value.parse()?,
            "output.detailed" => self.output.detailed = parse_value(key, value)?,
            "output.color_output" => self.output.color_output = parse_value(key, value)?,
            _ => {
                return Err(AtsError::Configuration(format!("Unknown configuration key: {}", key)));
            }
        }
        Ok(())
    }
}

fn parse_value<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| AtsError::Configuration(format!("Invalid value for {}: {}", key, value)))
}
