use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::issues::ExportOptions;
use crate::providers::DEFAULT_PAGE_SIZE;

/// Configuration file structure for issuelens.
///
/// Holds the saved Jira connection settings and the export defaults so a
/// recurring report can be rerun without retyping anything.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    /// Saved Jira connection settings
    #[serde(default)]
    pub jira: JiraConfig,

    /// Export options (fields, filters, pivots, schema)
    #[serde(default)]
    pub export: ExportOptions,

    /// Output format preferences
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct JiraConfig {
    /// Jira server URL (e.g., <https://yourcompany.atlassian.net>)
    pub server: Option<String>,

    /// Account e-mail or user name
    pub user: Option<String>,

    /// API token
    pub api_token: Option<String>,

    /// JQL query selecting the issues to export
    pub jql: Option<String>,

    /// Issues requested per search page
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct OutputConfig {
    /// Default output format
    #[serde(default)]
    pub format: OutputFormat,

    /// Pretty-print JSON output
    #[serde(default)]
    pub pretty: bool,

    /// Directory for timestamped export files when no output path is given
    pub directory: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Summary,
    Json,
    Csv,
    Html,
    Xlsx,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Summary => "txt",
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Html => "html",
            OutputFormat::Xlsx => "xlsx",
        }
    }

    /// Formats that cannot be written to a terminal.
    pub fn is_binary(self) -> bool {
        matches!(self, OutputFormat::Xlsx)
    }
}

impl Default for JiraConfig {
    fn default() -> Self {
        Self {
            server: None,
            user: None,
            api_token: None,
            jql: None,
            page_size: default_page_size(),
        }
    }
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

const CANDIDATES: [&str; 4] = [
    "issuelens.toml",
    "issuelens.json",
    "issuelens.yaml",
    "issuelens.yml",
];

impl Config {
    /// Load configuration from a file.
    ///
    /// Searches for configuration files in this order:
    /// 1. Specified path
    /// 2. ./issuelens.toml, ./issuelens.json, ./issuelens.yaml, ./issuelens.yml
    /// 3. `issuelens/config.toml` in the platform config directory
    ///
    /// Returns default configuration if no file is found. An explicit path
    /// must exist.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::load_from_path(path);
        }

        for candidate in &CANDIDATES {
            let path = Path::new(candidate);
            if path.exists() {
                return Self::load_from_path(path);
            }
        }

        if let Some(path) = Self::user_config_path().filter(|p| p.exists()) {
            return Self::load_from_path(&path);
        }

        Ok(Self::default())
    }

    /// Like [`Config::load`], but a missing explicit path yields defaults
    /// because the caller is about to write it.
    pub fn load_for_update(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) if !path.exists() => Ok(Self::default()),
            _ => Self::load(path),
        }
    }

    /// Where credentials are saved when no config path was given.
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("issuelens").join("config.toml"))
    }

    /// Load configuration from a specific file path.
    fn load_from_path(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let extension = path.extension().and_then(|ext| ext.to_str()).unwrap_or("");

        match extension {
            "toml" => toml::from_str(&contents)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display())),
            "json" => serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display())),
            "yaml" | "yml" => serde_yaml::from_str(&contents)
                .with_context(|| format!("Failed to parse YAML config: {}", path.display())),
            _ => toml::from_str(&contents)
                .or_else(|_| serde_json::from_str(&contents))
                .or_else(|_| serde_yaml::from_str(&contents))
                .with_context(|| format!("Failed to parse config file: {}", path.display())),
        }
    }

    /// Save configuration to a file, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> Result<()> {
        let contents = match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => serde_json::to_string_pretty(self)?,
            Some("yaml" | "yml") => serde_yaml::to_string(self)?,
            _ => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {}", parent.display()))?;
        }

        std::fs::write(path, contents)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }
}
