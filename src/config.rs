use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Name of the optional config file looked up in the current directory.
pub const CONFIG_FILE: &str = ".biome-triage.toml";

/// Top-level configuration loaded from .biome-triage.toml.
/// All fields are optional — the tool works with zero config.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Where the diagnostics are read from and the documents written to
    #[serde(default)]
    pub paths: PathsConfig,

    /// Issue report settings
    #[serde(default)]
    pub report: ReportConfig,

    /// Remediation plan settings
    #[serde(default)]
    pub plan: PlanConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    pub input: PathBuf,
    pub report: PathBuf,
    pub plan: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("biome-diagnostics.json"),
            report: PathBuf::from("biome-issues-report.md"),
            plan: PathBuf::from("biome-remediation-plan.md"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Entries in the "Most Problematic Files" section
    pub top_files: usize,
    /// Entries in the "Most Common Rules" section
    pub top_rules: usize,
    /// Affected files listed per rule before collapsing into "and N more"
    pub files_shown: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            top_files: 10,
            top_rules: 15,
            files_shown: 3,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlanConfig {
    /// Command prefix used in suggested fixes
    pub command: String,
    /// A rule touching more files than this gets a directory-wide command
    pub explicit_file_limit: usize,
    /// Directories targeted by the directory-wide command
    pub fallback_dirs: Vec<String>,
}

impl Default for PlanConfig {
    fn default() -> Self {
        Self {
            command: "npx biome".to_string(),
            explicit_file_limit: 5,
            fallback_dirs: vec![
                "app/".to_string(),
                "components/".to_string(),
                "lib/".to_string(),
            ],
        }
    }
}

impl Config {
    /// Load configuration from .biome-triage.toml in the current directory.
    /// Returns default config if the file doesn't exist.
    pub fn load() -> Result<Config, ConfigError> {
        let path = Path::new(CONFIG_FILE);
        if path.exists() {
            Self::load_from(path)
        } else {
            Ok(Config::default())
        }
    }

    /// Load from a specific path.
    pub fn load_from(path: &Path) -> Result<Config, ConfigError> {
        let contents = fs::read_to_string(path)?;
        let config = toml::from_str(&contents)?;
        Ok(config)
    }
}
