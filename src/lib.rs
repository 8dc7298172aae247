//! Swagger Semantics
//!
//! A semantic validator for Swagger/OpenAPI documents. It walks an already
//! deserialized document and reports path-addressed diagnostics for problems
//! a structural (schema-only) validator cannot see.
//!
//! ## Features
//!
//! - **Position-aware walking**: every node is classified by the keys used to
//!   reach it, so a property or model literally named `type` is never
//!   mistaken for a type declarator
//! - **Range checks**: `minimum`/`maximum`, `minLength`/`maxLength`,
//!   `minProperties`/`maxProperties`, `minItems`/`maxItems`, numeric strings
//!   accepted
//! - **`$ref` placement**: responses may only reference `#/responses`,
//!   schemas `#/definitions`, parameters `#/parameters`
//! - **Ordered output**: diagnostics come back in document order
//!
//! ## Example
//!
//! ```
//! use serde_json::json;
//! use swagger_semantics::{validate, spec_path};
//!
//! let spec = json!({
//!     "definitions": {
//!         "MyNumber": { "minimum": 5, "maximum": 2 }
//!     }
//! });
//!
//! let found = validate(&spec);
//! assert_eq!(found.len(), 1);
//! assert_eq!(found[0].path, spec_path!["definitions", "MyNumber", "minimum"]);
//! ```

pub mod config;
pub mod error;
pub mod loader;
pub mod walker;

pub use config::{OutputFormat, RuleConfig, ValidatorConfig};
pub use error::{Result, ValidatorError};
pub use loader::{load_document, parse_document, validate_directory, validate_file, DocumentFormat, FileReport};
pub use walker::{
    validate, Diagnostic, DiagnosticCode, Diagnostics, PathSegment, Rule, RuleSet, Severity, SpecPath,
    SpecValidator, StructuralKind,
};
