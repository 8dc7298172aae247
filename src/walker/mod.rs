//! Spec Walker
//!
//! Depth-first, pre-order traversal of a deserialized Swagger/OpenAPI
//! document. At every node the walker:
//!
//! 1. derives the node's [`StructuralKind`] from its parent kind and the
//!    key (or index) used to reach it,
//! 2. runs every rule in the [`RuleSet`] that applies to that kind,
//! 3. appends what they report to a per-call [`Diagnostics`],
//! 4. recurses into children in document order.
//!
//! The walk never stops early and never mutates the document, so one pass
//! reports every violation. A [`SpecValidator`] only holds its rule set;
//! calls on different threads share nothing mutable.

pub mod diagnostics;
pub mod path;
pub mod position;
pub mod refs;
pub mod rules;

pub use diagnostics::{Diagnostic, DiagnosticCode, Diagnostics, Severity};
pub use path::{PathSegment, SpecPath};
pub use position::StructuralKind;
pub use refs::{allowed_namespaces, misplaced_ref, LocalRef};
pub use rules::{
    NodeContext, RangeRule, RefPositionRule, RefSiblingRule, Rule, RuleSet, TypeKeyRule,
};

use serde_json::Value;
use tracing::{debug, trace};

use crate::config::RuleConfig;

/// Validate `document` with the default rules
pub fn validate(document: &Value) -> Vec<Diagnostic> {
    SpecValidator::new().validate(document).into_vec()
}

/// The semantic validator
#[derive(Debug, Default)]
pub struct SpecValidator {
    rules: RuleSet,
}

impl SpecValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validator running the rules enabled in `config`
    pub fn with_config(config: &RuleConfig) -> Self {
        Self::with_rules(RuleSet::from_config(config))
    }

    pub fn with_rules(rules: RuleSet) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Walk `document` and collect every diagnostic, in traversal order
    pub fn validate(&self, document: &Value) -> Diagnostics {
        debug!(rules = ?self.rules.names(), "validating document");

        let mut diagnostics = Diagnostics::new();
        let mut path = SpecPath::root();
        self.walk(document, &mut path, StructuralKind::Root, &mut diagnostics);

        debug!(
            errors = diagnostics.error_count(),
            warnings = diagnostics.warning_count(),
            "validation finished"
        );
        diagnostics
    }

    fn walk(
        &self,
        value: &Value,
        path: &mut SpecPath,
        kind: StructuralKind,
        diagnostics: &mut Diagnostics,
    ) {
        let node = NodeContext { value, path, kind };
        for rule in self.rules.applicable(kind) {
            let found = rule.check(&node);
            if !found.is_empty() {
                trace!(rule = rule.name(), path = %node.path, count = found.len(), "rule reported");
            }
            diagnostics.extend(found);
        }

        match value {
            Value::Object(obj) => {
                for (key, child) in obj {
                    self.descend(child, PathSegment::Key(key.clone()), path, kind, diagnostics);
                }
            }
            Value::Array(items) => {
                for (i, child) in items.iter().enumerate() {
                    self.descend(child, PathSegment::Index(i), path, kind, diagnostics);
                }
            }
            _ => {}
        }
    }

    fn descend(
        &self,
        child: &Value,
        segment: PathSegment,
        path: &mut SpecPath,
        kind: StructuralKind,
        diagnostics: &mut Diagnostics,
    ) {
        let child_kind = kind.child(&segment);
        path.push(segment);
        self.walk(child, path, child_kind, diagnostics);
        path.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec_path;
    use serde_json::json;

    #[test]
    fn test_validator_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SpecValidator>();
    }

    #[test]
    fn test_nested_type_array() {
        let doc = json!({
            "definitions": {
                "Outer": {
                    "properties": {
                        "inner": {
                            "items": {
                                "properties": {
                                    "leaf": { "type": ["string", "null"] }
                                }
                            }
                        }
                    }
                }
            }
        });
        let found = validate(&doc);
        assert_eq!(found.len(), 1);
        assert_eq!(
            found[0].path,
            spec_path!["definitions", "Outer", "properties", "inner", "items", "properties", "leaf", "type"]
        );
    }

    #[test]
    fn test_traversal_order() {
        let doc = json!({
            "definitions": {
                "B": { "minimum": 3, "maximum": 1, "properties": { "x": { "type": [] } } },
                "A": { "minLength": 3, "maxLength": 1 }
            }
        });
        let paths: Vec<String> = validate(&doc).iter().map(|d| d.path.to_string()).collect();
        assert_eq!(
            paths,
            vec![
                "definitions.B.minimum",
                "definitions.B.properties.x.type",
                "definitions.A.minLength",
            ]
        );
    }

    #[test]
    fn test_every_path_resolves() {
        let doc = json!({
            "paths": {
                "/a": {
                    "parameters": [{ "$ref": "#/definitions/P" }],
                    "get": { "responses": { "200": { "$ref": "#/parameters/R" } } }
                }
            },
            "definitions": { "M": { "type": ["a"], "minItems": 2, "maxItems": 1 } }
        });
        let found = validate(&doc);
        assert_eq!(found.len(), 4);
        for diagnostic in &found {
            assert!(diagnostic.path.resolve(&doc).is_some(), "{}", diagnostic.path);
        }
    }

    #[test]
    fn test_scalar_document() {
        assert!(validate(&json!("just a string")).is_empty());
        assert!(validate(&Value::Null).is_empty());
    }

    #[test]
    fn test_empty_rule_set_reports_nothing() {
        let doc = json!({ "definitions": { "M": { "type": ["a"] } } });
        let validator = SpecValidator::with_rules(RuleSet::empty());
        assert!(validator.validate(&doc).is_empty());
    }
}
