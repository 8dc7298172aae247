//! Configuration for the spec validator
//!
//! Supports loading configuration from:
//! - Default values
//! - Config file (spec-validator.toml)
//! - Environment variables (SPEC_VALIDATOR__*)
//!
//! ## Example config file (spec-validator.toml):
//! ```toml
//! [rules]
//! type_key = true
//! ranges = true
//! ref_position = true
//! ref_siblings = false
//!
//! [output]
//! format = "text"
//! include_warnings = true
//! extensions = ["json", "yaml", "yml"]
//! ```

use config_crate::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Main configuration for the validator
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidatorConfig {
    /// Which semantic rules run
    #[serde(default)]
    pub rules: RuleConfig,

    /// How results are reported
    #[serde(default)]
    pub output: OutputConfig,
}

/// Rule toggles
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleConfig {
    /// `type` on a schema must be a string
    #[serde(default = "default_true")]
    pub type_key: bool,

    /// Lower bounds must not exceed upper bounds
    #[serde(default = "default_true")]
    pub ranges: bool,

    /// `$ref` namespace must match its position
    #[serde(default = "default_true")]
    pub ref_position: bool,

    /// Warn about keys next to a schema `$ref`
    #[serde(default)]
    pub ref_siblings: bool,
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Output format (text or json)
    #[serde(default)]
    pub format: OutputFormat,

    /// Print warnings as well as errors
    #[serde(default = "default_true")]
    pub include_warnings: bool,

    /// File extensions picked up when validating a directory
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
}

/// Output format for reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

// Default value functions
fn default_true() -> bool {
    true
}

fn default_extensions() -> Vec<String> {
    vec!["json".to_string(), "yaml".to_string(), "yml".to_string()]
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            type_key: true,
            ranges: true,
            ref_position: true,
            ref_siblings: false,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
            include_warnings: true,
            extensions: default_extensions(),
        }
    }
}

impl ValidatorConfig {
    /// Load configuration from default locations
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration, layering an explicit file over the defaults
    pub fn load_from(config_path: Option<&str>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_locations = [
            "spec-validator.toml",
            ".spec-validator.toml",
            "config/spec-validator.toml",
        ];

        for location in config_locations {
            builder = builder.add_source(File::with_name(location).required(false));
        }

        // Load from XDG config directory
        if let Some(config_dir) = directories::ProjectDirs::from("dev", "familiar", "spec-validator") {
            let xdg_config = config_dir.config_dir().join("spec-validator.toml");
            if xdg_config.exists() {
                builder = builder.add_source(File::from(xdg_config).required(false));
            }
        }

        if let Some(path) = config_path {
            builder = builder.add_source(File::with_name(path).required(true));
        }

        // SPEC_VALIDATOR__RULES__REF_SIBLINGS=true
        builder = builder.add_source(
            Environment::with_prefix("SPEC_VALIDATOR")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        Ok(config.try_deserialize()?)
    }

    /// Save configuration to a file
    pub fn save(&self, path: &str) -> std::io::Result<()> {
        std::fs::write(path, self.to_toml()?)
    }

    /// Render the configuration as TOML
    pub fn to_toml(&self) -> std::io::Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    }
}
