//! Document loading
//!
//! Reads JSON or YAML spec files into an order-preserving
//! [`serde_json::Value`] and runs the walker over single files or whole
//! directory trees. Key order matters: diagnostics follow document order.

use serde::Serialize;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::error::{Result, ValidatorError};
use crate::walker::{Diagnostics, SpecValidator};

/// Text encoding of a spec document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
}

impl DocumentFormat {
    /// Guess the format from a file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()?.to_ascii_lowercase().as_str() {
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            _ => None,
        }
    }
}

/// Parse document text
pub fn parse_document(text: &str, format: DocumentFormat) -> Result<Value> {
    Ok(match format {
        DocumentFormat::Json => serde_json::from_str(text)?,
        DocumentFormat::Yaml => serde_yaml::from_str(text)?,
    })
}

/// Load a spec document from disk
pub fn load_document(path: &Path) -> Result<Value> {
    let format = DocumentFormat::from_path(path)
        .ok_or_else(|| ValidatorError::UnsupportedFormat(path.to_path_buf()))?;
    let text = std::fs::read_to_string(path).map_err(|e| ValidatorError::from(e).at(path))?;
    parse_document(&text, format).map_err(|e| e.at(path))
}

/// Diagnostics for one file, or why it could not be validated
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub path: PathBuf,
    pub diagnostics: Diagnostics,
    /// Set when the file could not be read or parsed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<String>,
}

impl FileReport {
    /// Report for a file that never reached the walker
    pub fn failed(path: &Path, error: &ValidatorError) -> Self {
        Self {
            path: path.to_path_buf(),
            diagnostics: Diagnostics::new(),
            failure: Some(error.to_string()),
        }
    }

    pub fn is_failed(&self) -> bool {
        self.failure.is_some()
    }

    /// Loaded, and no error-level diagnostics
    pub fn is_clean(&self) -> bool {
        !self.is_failed() && !self.diagnostics.has_errors()
    }
}

/// Load and validate one file
pub fn validate_file(path: &Path, validator: &SpecValidator) -> Result<FileReport> {
    let document = load_document(path)?;
    let diagnostics = validator.validate(&document);
    debug!(path = %path.display(), found = diagnostics.len(), "validated file");
    Ok(FileReport {
        path: path.to_path_buf(),
        diagnostics,
        failure: None,
    })
}

/// Validate every spec file under `dir` whose extension is in `extensions`.
///
/// Files that cannot be read or parsed come back as failed reports. The
/// reports are sorted by path.
pub fn validate_directory(
    dir: &Path,
    extensions: &[String],
    validator: &SpecValidator,
) -> Vec<FileReport> {
    let mut reports = Vec::new();

    for entry in WalkDir::new(dir)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| {
            e.path()
                .extension()
                .and_then(|x| x.to_str())
                .map(|x| extensions.iter().any(|ext| ext.eq_ignore_ascii_case(x)))
                .unwrap_or(false)
        })
    {
        let report = validate_file(entry.path(), validator).unwrap_or_else(|e| {
            warn!(path = %entry.path().display(), error = %e, "could not load spec");
            FileReport::failed(entry.path(), &e)
        });
        reports.push(report);
    }

    reports
}
