//! Structural Position Tracking
//!
//! Classifies every node by the chain of keys used to reach it. The same
//! token means different things in different places: `type` under a schema
//! declares its data type, `type` under `properties` names a property, and
//! `type` under `definitions` names a model. Classification never looks at
//! the node's own content, only at the parent kind and the incoming segment.

use serde::{Deserialize, Serialize};

use super::path::PathSegment;

/// Operation keys of a path item
pub const HTTP_METHODS: [&str; 8] = [
    "get", "put", "post", "delete", "options", "head", "patch", "trace",
];

/// Why a node exists at its path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StructuralKind {
    /// The document itself
    Root,
    /// The top-level `paths` map
    Paths,
    /// A path template entry (`/pets/{id}`)
    PathItem,
    /// An HTTP method under a path item
    Operation,
    /// A map of status codes (or named responses at top level)
    Responses,
    /// A single response object
    Response,
    /// A schema reached through `schema`, `items`, etc.
    Schema,
    /// The array under `allOf`/`anyOf`/`oneOf`
    SchemaList,
    /// A schema's `properties` map
    PropertiesMap,
    /// A named entry of a `properties` map
    PropertySchema,
    /// The top-level `definitions` map
    Definitions,
    /// A named model under `definitions`
    DefinitionModel,
    /// A `parameters` map or list
    Parameters,
    /// A single parameter object
    Parameter,
    /// Anything without semantic rules
    Other,
}

impl StructuralKind {
    /// Kind of the child reached from a node of this kind through `segment`
    pub fn child(self, segment: &PathSegment) -> StructuralKind {
        use StructuralKind::*;

        let key = match segment {
            PathSegment::Key(key) => key.as_str(),
            PathSegment::Index(_) => {
                return match self {
                    Parameters => Parameter,
                    // tuple-form `items` and composition lists
                    SchemaList | Schema | PropertySchema | DefinitionModel => Schema,
                    _ => Other,
                };
            }
        };

        match self {
            Root => match key {
                "paths" => Paths,
                "definitions" => Definitions,
                "parameters" => Parameters,
                "responses" => Responses,
                _ => Other,
            },
            Paths | Responses if is_extension(key) => Other,
            Paths => PathItem,
            PathItem => match key {
                "parameters" => Parameters,
                "responses" => Responses,
                "schema" => Schema,
                method if HTTP_METHODS.contains(&method) => Operation,
                _ => Other,
            },
            Operation => match key {
                "responses" => Responses,
                "parameters" => Parameters,
                _ => Other,
            },
            Responses => Response,
            Response => match key {
                "schema" => Schema,
                _ => Other,
            },
            Schema | PropertySchema | DefinitionModel => match key {
                "properties" => PropertiesMap,
                "items" | "additionalProperties" | "not" => Schema,
                "allOf" | "anyOf" | "oneOf" => SchemaList,
                _ => Other,
            },
            PropertiesMap => PropertySchema,
            Definitions => DefinitionModel,
            Parameters => Parameter,
            Parameter => match key {
                "schema" | "items" => Schema,
                _ => Other,
            },
            SchemaList | Other => Other,
        }
    }

    /// Nodes whose `type` field is a type declarator
    pub fn is_schema_like(self) -> bool {
        use StructuralKind::*;

        match self {
            Schema | PropertySchema | DefinitionModel => true,
            Root | Paths | PathItem | Operation | Responses | Response | SchemaList
            | PropertiesMap | Definitions | Parameters | Parameter | Other => false,
        }
    }

    /// Nodes that may carry numeric bound pairs
    pub fn carries_bounds(self) -> bool {
        self.is_schema_like() || self == StructuralKind::Parameter
    }
}

/// Vendor extension key (`x-*`)
pub fn is_extension(key: &str) -> bool {
    key.starts_with("x-")
}

#[cfg(test)]
mod tests {
    use super::StructuralKind::*;
    use super::*;

    fn walk(keys: &[PathSegment]) -> StructuralKind {
        keys.iter().fold(Root, |kind, segment| kind.child(segment))
    }

    fn key(k: &str) -> PathSegment {
        PathSegment::from(k)
    }

    #[test]
    fn test_type_as_property_name() {
        let kind = walk(&[key("definitions"), key("ApiResponse"), key("properties"), key("type")]);
        assert_eq!(kind, PropertySchema);
        assert!(kind.is_schema_like());
    }

    #[test]
    fn test_type_as_model_name() {
        assert_eq!(walk(&[key("definitions"), key("type")]), DefinitionModel);
    }

    #[test]
    fn test_type_as_declarator() {
        let kind = walk(&[key("definitions"), key("Pet"), key("type")]);
        assert_eq!(kind, Other);
    }

    #[test]
    fn test_properties_as_property_name() {
        let kind = walk(&[key("definitions"), key("Plan"), key("properties"), key("properties")]);
        assert_eq!(kind, PropertySchema);
        let nested = walk(&[
            key("definitions"),
            key("Plan"),
            key("properties"),
            key("properties"),
            key("properties"),
        ]);
        assert_eq!(nested, PropertiesMap);
    }

    #[test]
    fn test_response_under_operation() {
        let kind = walk(&[key("paths"), key("/pets"), key("get"), key("responses"), key("200")]);
        assert_eq!(kind, Response);
        let schema = walk(&[
            key("paths"),
            key("/pets"),
            key("get"),
            key("responses"),
            key("200"),
            key("schema"),
        ]);
        assert_eq!(schema, Schema);
    }

    #[test]
    fn test_parameter_list_entry() {
        let kind = walk(&[key("paths"), key("/pets/{id}"), key("parameters"), PathSegment::from(0usize)]);
        assert_eq!(kind, Parameter);
        assert_eq!(walk(&[key("parameters"), key("limit")]), Parameter);
    }

    #[test]
    fn test_parameter_items_are_schemas() {
        let items = walk(&[key("parameters"), key("tags"), key("items")]);
        assert_eq!(items, Schema);
        assert!(items.is_schema_like());
        assert_eq!(walk(&[key("parameters"), key("tags"), key("items"), key("items")]), Schema);
        assert_eq!(walk(&[key("parameters"), key("tags"), key("enum")]), Other);
    }

    #[test]
    fn test_property_named_parameters_is_not_parameters() {
        let kind = walk(&[key("definitions"), key("Plan"), key("properties"), key("parameters")]);
        assert_eq!(kind, PropertySchema);
    }

    #[test]
    fn test_composition_and_items() {
        let base = [key("definitions"), key("Pet")];
        let all_of: Vec<_> = base.iter().cloned().chain([key("allOf"), PathSegment::from(1usize)]).collect();
        assert_eq!(walk(&all_of), Schema);
        let items: Vec<_> = base.iter().cloned().chain([key("items")]).collect();
        assert_eq!(walk(&items), Schema);
    }

    #[test]
    fn test_extensions_are_not_names() {
        assert_eq!(walk(&[key("paths"), key("x-internal")]), Other);
        assert_eq!(walk(&[key("paths"), key("/a"), key("responses"), key("x-note")]), Other);
        assert_eq!(walk(&[key("x-anything"), key("schema")]), Other);
    }
}
