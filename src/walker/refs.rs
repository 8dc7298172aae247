//! `$ref` namespace restrictions
//!
//! A local pointer such as `#/definitions/Pet` targets the `definitions`
//! namespace. Each structural position only accepts references into some
//! namespaces: a response may only point at `#/responses/...`, a schema at
//! `#/definitions/...`, a parameter at `#/parameters/...`. Only the first
//! pointer segment is inspected; whether the target exists is not.

use regex::Regex;
use std::sync::OnceLock;

use super::position::StructuralKind;

/// Namespace of model definitions
pub const DEFINITIONS: &str = "definitions";
/// Namespace of reusable responses
pub const RESPONSES: &str = "responses";
/// Namespace of reusable parameters
pub const PARAMETERS: &str = "parameters";

const RESPONSE_REFS: &[&str] = &[RESPONSES];
const SCHEMA_REFS: &[&str] = &[DEFINITIONS];
const PARAMETER_REFS: &[&str] = &[PARAMETERS];

fn local_ref_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^#/(?P<namespace>[^/]+)(?:/.*)?$").expect("valid local ref pattern")
    })
}

/// A parsed document-local pointer (`#/<namespace>/...`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalRef<'a> {
    pub namespace: &'a str,
}

impl<'a> LocalRef<'a> {
    /// Parse a `$ref` value; `None` for external or malformed pointers
    pub fn parse(pointer: &'a str) -> Option<Self> {
        let caps = local_ref_pattern().captures(pointer)?;
        Some(Self {
            namespace: caps.name("namespace")?.as_str(),
        })
    }
}

/// Namespaces a `$ref` may target at a given position.
///
/// `None` means the position is unrestricted.
pub fn allowed_namespaces(kind: StructuralKind) -> Option<&'static [&'static str]> {
    use StructuralKind::*;

    match kind {
        Response => Some(RESPONSE_REFS),
        Schema | PropertySchema | DefinitionModel => Some(SCHEMA_REFS),
        Parameter => Some(PARAMETER_REFS),
        Root | Paths | PathItem | Operation | Responses | SchemaList | PropertiesMap
        | Definitions | Parameters | Other => None,
    }
}

/// The namespaces `pointer` should have targeted, if it is misplaced at a
/// node of `kind`.
///
/// `None` when the position is unrestricted, the pointer is not
/// document-local, or its namespace is allowed.
pub fn misplaced_ref(kind: StructuralKind, pointer: &str) -> Option<&'static [&'static str]> {
    let allowed = allowed_namespaces(kind)?;
    let local = LocalRef::parse(pointer)?;
    (!allowed.contains(&local.namespace)).then_some(allowed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_misplaced(kind: StructuralKind, pointer: &str) -> bool {
        misplaced_ref(kind, pointer).is_some()
    }

    #[test]
    fn test_parse_local_ref() {
        assert_eq!(LocalRef::parse("#/definitions/Pet").unwrap().namespace, "definitions");
        assert_eq!(LocalRef::parse("#/responses/NotFound/schema").unwrap().namespace, "responses");
        assert_eq!(LocalRef::parse("#/parameters").unwrap().namespace, "parameters");
    }

    #[test]
    fn test_external_refs_are_not_local() {
        assert!(LocalRef::parse("pets.yaml#/Pet").is_none());
        assert!(LocalRef::parse("#").is_none());
        assert!(LocalRef::parse("definitions/Pet").is_none());
    }

    #[test]
    fn test_table() {
        assert!(!is_misplaced(StructuralKind::Response, "#/responses/abc"));
        assert!(is_misplaced(StructuralKind::Response, "#/parameters/abc"));
        assert!(!is_misplaced(StructuralKind::Schema, "#/definitions/abc"));
        assert!(is_misplaced(StructuralKind::PropertySchema, "#/responses/abc"));
        assert!(!is_misplaced(StructuralKind::Parameter, "#/parameters/abc"));
        assert!(is_misplaced(StructuralKind::Parameter, "#/definitions/abc"));
        assert!(!is_misplaced(StructuralKind::DefinitionModel, "#/definitions/abc"));
    }

    #[test]
    fn test_misplaced_ref_reports_allowed_namespaces() {
        assert_eq!(
            misplaced_ref(StructuralKind::Response, "#/definitions/abc"),
            Some(&[RESPONSES][..])
        );
    }

    #[test]
    fn test_namespace_match_is_exact() {
        assert!(is_misplaced(StructuralKind::Schema, "#/definition/abc"));
        assert!(is_misplaced(StructuralKind::Schema, "#/definitionsX/abc"));
    }

    #[test]
    fn test_unrestricted_positions() {
        assert!(!is_misplaced(StructuralKind::PathItem, "#/definitions/abc"));
        assert!(!is_misplaced(StructuralKind::Other, "#/anything"));
        assert!(!is_misplaced(StructuralKind::Response, "other.yaml#/responses/x"));
    }
}
