//! Semantic Rules
//!
//! Each rule is a stateless check bound to a set of structural kinds. The
//! walker asks the [`RuleSet`] which rules apply at a node's kind and runs
//! them in registration order.
//!
//! ## Rules
//! 1. **Type key**: a type declarator must be a string
//! 2. **Ranges**: `minimum <= maximum` and friends, numeric strings accepted
//! 3. **Ref position**: `$ref` must target the namespace allowed at its position
//! 4. **Ref siblings** (opt-in): keys next to a schema `$ref` are ignored by
//!    resolvers and get a warning

use serde_json::{Map, Value};

use super::diagnostics::{Diagnostic, DiagnosticCode};
use super::path::SpecPath;
use super::position::{is_extension, StructuralKind};
use super::refs::{allowed_namespaces, misplaced_ref};
use crate::config::RuleConfig;

/// Everything a rule may look at for one node
#[derive(Debug, Clone, Copy)]
pub struct NodeContext<'a> {
    pub value: &'a Value,
    pub path: &'a SpecPath,
    pub kind: StructuralKind,
}

impl<'a> NodeContext<'a> {
    pub fn object(&self) -> Option<&'a Map<String, Value>> {
        self.value.as_object()
    }

    /// Path of a field of this node
    pub fn field_path(&self, key: &str) -> SpecPath {
        self.path.child(key)
    }
}

/// A semantic check
pub trait Rule: Send + Sync {
    /// Stable identifier used in logs and config
    fn name(&self) -> &'static str;

    fn code(&self) -> DiagnosticCode;

    /// Whether the rule runs at nodes of `kind`
    fn applies_to(&self, kind: StructuralKind) -> bool;

    fn check(&self, node: &NodeContext<'_>) -> Vec<Diagnostic>;
}

// =============================================================================
// Type Key
// =============================================================================

/// `type` on a schema must be a single type name, not a list
#[derive(Debug, Clone, Copy, Default)]
pub struct TypeKeyRule;

impl Rule for TypeKeyRule {
    fn name(&self) -> &'static str {
        "type_key"
    }

    fn code(&self) -> DiagnosticCode {
        DiagnosticCode::TypeKeyViolation
    }

    fn applies_to(&self, kind: StructuralKind) -> bool {
        kind.is_schema_like()
    }

    fn check(&self, node: &NodeContext<'_>) -> Vec<Diagnostic> {
        match node.object().and_then(|obj| obj.get("type")) {
            Some(Value::String(_)) | None => Vec::new(),
            Some(_) => vec![Diagnostic::new(
                node.field_path("type"),
                self.code(),
                "\"type\" should be a string",
            )],
        }
    }
}

// =============================================================================
// Ranges
// =============================================================================

/// Paired lower/upper bound keywords
pub const BOUND_PAIRS: [(&str, &str); 4] = [
    ("minimum", "maximum"),
    ("minProperties", "maxProperties"),
    ("minLength", "maxLength"),
    ("minItems", "maxItems"),
];

/// Lower bounds must not exceed their upper bounds
#[derive(Debug, Clone, Copy, Default)]
pub struct RangeRule;

impl RangeRule {
    /// Numeric value of a bound; JSON numbers and numeric strings both count
    pub fn coerce(value: &Value) -> Option<f64> {
        let number = match value {
            Value::Number(n) => n.as_f64()?,
            Value::String(s) => s.trim().parse::<f64>().ok()?,
            _ => return None,
        };
        number.is_finite().then_some(number)
    }
}

impl Rule for RangeRule {
    fn name(&self) -> &'static str {
        "ranges"
    }

    fn code(&self) -> DiagnosticCode {
        DiagnosticCode::RangeViolation
    }

    fn applies_to(&self, kind: StructuralKind) -> bool {
        kind.carries_bounds()
    }

    fn check(&self, node: &NodeContext<'_>) -> Vec<Diagnostic> {
        let Some(obj) = node.object() else { return Vec::new() };

        BOUND_PAIRS
            .iter()
            .filter_map(|&(min_key, max_key)| {
                let min = Self::coerce(obj.get(min_key)?)?;
                let max = Self::coerce(obj.get(max_key)?)?;
                (min > max).then(|| {
                    Diagnostic::new(
                        node.field_path(min_key),
                        self.code(),
                        format!("\"{}\" should be lower than or equal to \"{}\"", min_key, max_key),
                    )
                })
            })
            .collect()
    }
}

// =============================================================================
// Ref Position
// =============================================================================

/// `$ref` must point into the namespace allowed at its position
#[derive(Debug, Clone, Copy, Default)]
pub struct RefPositionRule;

fn position_label(kind: StructuralKind) -> &'static str {
    match kind {
        StructuralKind::Response => "Response",
        StructuralKind::Parameter => "Parameter",
        _ => "Schema",
    }
}

impl Rule for RefPositionRule {
    fn name(&self) -> &'static str {
        "ref_position"
    }

    fn code(&self) -> DiagnosticCode {
        DiagnosticCode::RefPositionViolation
    }

    fn applies_to(&self, kind: StructuralKind) -> bool {
        allowed_namespaces(kind).is_some()
    }

    fn check(&self, node: &NodeContext<'_>) -> Vec<Diagnostic> {
        let Some(pointer) = node.object().and_then(|obj| obj.get("$ref")).and_then(Value::as_str) else {
            return Vec::new();
        };
        let Some(allowed) = misplaced_ref(node.kind, pointer) else {
            return Vec::new();
        };

        let expected = allowed
            .iter()
            .map(|ns| format!("#/{}", ns))
            .collect::<Vec<_>>()
            .join(" or ");
        vec![Diagnostic::new(
            node.field_path("$ref"),
            self.code(),
            format!(
                "{} $refs must reference {}, found \"{}\"",
                position_label(node.kind),
                expected,
                pointer
            ),
        )]
    }
}

// =============================================================================
// Ref Siblings
// =============================================================================

/// Keys next to a schema `$ref` are ignored by resolvers
#[derive(Debug, Clone, Copy, Default)]
pub struct RefSiblingRule;

impl Rule for RefSiblingRule {
    fn name(&self) -> &'static str {
        "ref_siblings"
    }

    fn code(&self) -> DiagnosticCode {
        DiagnosticCode::RefSiblingViolation
    }

    fn applies_to(&self, kind: StructuralKind) -> bool {
        kind.is_schema_like()
    }

    fn check(&self, node: &NodeContext<'_>) -> Vec<Diagnostic> {
        let Some(obj) = node.object() else { return Vec::new() };
        if !obj.get("$ref").is_some_and(Value::is_string) {
            return Vec::new();
        }

        obj.keys()
            .filter(|key| key.as_str() != "$ref" && !is_extension(key))
            .map(|key| {
                Diagnostic::new(
                    node.field_path(key),
                    self.code(),
                    format!("\"{}\" is a sibling of $ref and will be ignored", key),
                )
            })
            .collect()
    }
}

// =============================================================================
// Rule Set
// =============================================================================

/// The rules enabled for a validation run
pub struct RuleSet {
    rules: Vec<Box<dyn Rule>>,
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::from_config(&RuleConfig::default())
    }
}

impl RuleSet {
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// Build the rule set selected by `config`
    pub fn from_config(config: &RuleConfig) -> Self {
        let mut set = Self::empty();
        if config.type_key {
            set.register(TypeKeyRule);
        }
        if config.ranges {
            set.register(RangeRule);
        }
        if config.ref_position {
            set.register(RefPositionRule);
        }
        if config.ref_siblings {
            set.register(RefSiblingRule);
        }
        set
    }

    pub fn register(&mut self, rule: impl Rule + 'static) {
        self.rules.push(Box::new(rule));
    }

    /// Rules to run at a node of `kind`, in registration order
    pub fn applicable(&self, kind: StructuralKind) -> impl Iterator<Item = &(dyn Rule + 'static)> {
        self.rules
            .iter()
            .map(|rule| rule.as_ref())
            .filter(move |rule| rule.applies_to(kind))
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|rule| rule.name()).collect()
    }

}

impl std::fmt::Debug for RuleSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}
