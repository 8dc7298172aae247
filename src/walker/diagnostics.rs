//! Diagnostics
//!
//! Collects the violations found while walking a document. Items are kept in
//! the order the walker produced them and are never deduplicated or sorted.

use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

use super::path::SpecPath;

// =============================================================================
// Diagnostic Codes
// =============================================================================

/// Which rule a diagnostic came from; written out as its short code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticCode {
    /// A type declarator's value is not a string
    TypeKeyViolation,
    /// A minimum bound exceeds its paired maximum
    RangeViolation,
    /// A `$ref` points into a namespace not allowed at its position
    RefPositionViolation,
    /// A descriptive key sits next to a `$ref` and will be ignored
    RefSiblingViolation,
}

impl DiagnosticCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TypeKeyViolation => "E001",
            Self::RangeViolation => "E002",
            Self::RefPositionViolation => "E003",
            Self::RefSiblingViolation => "W001",
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            Self::TypeKeyViolation | Self::RangeViolation | Self::RefPositionViolation => {
                Severity::Error
            }
            Self::RefSiblingViolation => Severity::Warning,
        }
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for DiagnosticCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

// =============================================================================
// Severity
// =============================================================================

/// Diagnostic severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

// =============================================================================
// Diagnostic
// =============================================================================

/// A single reported violation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostic {
    /// Location of the offending node
    pub path: SpecPath,
    /// Human-readable message
    pub message: String,
    /// Severity, derived from the code
    pub level: Severity,
    pub code: DiagnosticCode,
}

impl Diagnostic {
    pub fn new(path: SpecPath, code: DiagnosticCode, message: impl Into<String>) -> Self {
        Self {
            path,
            message: message.into(),
            level: code.severity(),
            code,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {} ({})", self.code, self.level, self.message, self.path)
    }
}

// =============================================================================
// Diagnostics Collection
// =============================================================================

/// Ordered collection of diagnostics from one validation run
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a diagnostic item
    pub fn push(&mut self, item: Diagnostic) {
        self.items.push(item);
    }

    /// Get all items, in traversal order
    pub fn all(&self) -> &[Diagnostic] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.items.iter()
    }

    /// Items with the given severity, in traversal order
    pub fn filter(&self, level: Severity) -> impl Iterator<Item = &Diagnostic> {
        self.items.iter().filter(move |i| i.level == level)
    }

    /// Get all errors
    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.filter(Severity::Error)
    }

    /// Get all warnings
    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.filter(Severity::Warning)
    }

    /// Check if there are any errors
    pub fn has_errors(&self) -> bool {
        self.errors().next().is_some()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn error_count(&self) -> usize {
        self.errors().count()
    }

    pub fn warning_count(&self) -> usize {
        self.warnings().count()
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.items
    }
}

impl Extend<Diagnostic> for Diagnostics {
    fn extend<I: IntoIterator<Item = Diagnostic>>(&mut self, iter: I) {
        self.items.extend(iter);
    }
}

impl IntoIterator for Diagnostics {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
