//! Schema node tree.
//!
//! A schema is described as a JSON-shaped mapping literal and parsed once,
//! at construction, into a structured tree: nested objects become field
//! maps or collection markers, string leaves become type expressions.
//! Parsing is total below the root; malformed pieces (wildcard with
//! siblings, unknown type names) are carried in the tree and reported
//! lazily when a `match` traversal reaches them.

use crate::grammar::{NULLABLE_PREFIX, TypeExpr};
use crate::value::Key;

/// The wildcard key marking a collection: "apply the sub-schema to every
/// element of the data at this level".
pub const WILDCARD: &str = "*";

/// One level of a schema tree.
#[derive(Debug, Clone)]
pub enum Node {
    /// Expected keys at a mapping level, in declaration order.
    Fields(Vec<FieldRule>),
    /// A collection marker. `well_formed` is false when the wildcard had
    /// sibling keys at the same level; that violation is recorded at
    /// traversal time and the walk never descends into `element`.
    Collection { element: Box<Rule>, well_formed: bool },
}

/// What a schema key maps to: a nested level or a type expression.
#[derive(Debug, Clone)]
pub enum Rule {
    Node(Node),
    Type(TypeExpr),
}

#[derive(Debug, Clone)]
pub struct FieldRule {
    /// Field name without the optional-marker prefix; also the path segment.
    pub name: String,
    /// Lookup key, canonicalized the same way decoded data keys are.
    pub key: Key,
    pub optional: bool,
    pub rule: Rule,
}

/// A parsed, immutable schema. Construct once, reuse across any number of
/// match calls.
#[derive(Debug, Clone)]
pub struct Schema {
    root: Node,
}

/// Schema descriptions must be mapping literals at the root; everything
/// below the root parses totally (bad pieces report lazily instead).
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("schema root must be a mapping, got {found}")]
    RootNotMapping { found: &'static str },
}

impl Schema {
    /// Parse a schema description. An empty mapping is a valid schema that
    /// matches any data unconditionally.
    pub fn from_value(desc: &serde_json::Value) -> Result<Self, SchemaError> {
        match desc {
            serde_json::Value::Object(fields) => Ok(Schema {
                root: Node::from_map(fields),
            }),
            other => Err(SchemaError::RootNotMapping {
                found: json_type_name(other),
            }),
        }
    }

    pub(crate) fn root(&self) -> &Node {
        &self.root
    }
}

impl Node {
    fn from_map(map: &serde_json::Map<String, serde_json::Value>) -> Node {
        if let Some(element) = map.get(WILDCARD) {
            return Node::Collection {
                element: Box::new(Rule::from_value(element)),
                well_formed: map.len() == 1,
            };
        }
        let fields = map
            .iter()
            .map(|(k, v)| {
                let (optional, name) = match k.strip_prefix(NULLABLE_PREFIX) {
                    Some(rest) => (true, rest),
                    None => (false, k.as_str()),
                };
                FieldRule {
                    name: name.to_string(),
                    key: Key::canonical(name),
                    optional,
                    rule: Rule::from_value(v),
                }
            })
            .collect();
        Node::Fields(fields)
    }
}

impl Rule {
    fn from_value(v: &serde_json::Value) -> Rule {
        match v {
            serde_json::Value::Object(m) => Rule::Node(Node::from_map(m)),
            serde_json::Value::String(s) => Rule::Type(TypeExpr::parse(s)),
            // a bare number/bool/null/array names no type; report lazily
            other => Rule::Type(TypeExpr::unrecognized(other.to_string())),
        }
    }
}

fn json_type_name(v: &serde_json::Value) -> &'static str {
    match v {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "a mapping",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::{Primitive, Shape};
    use serde_json::json;

    #[test]
    fn optional_prefix_strips_from_field_names() {
        let schema = Schema::from_value(&json!({"title": "string", "?isbn": "string"})).unwrap();
        let Node::Fields(fields) = schema.root() else {
            panic!("expected field map")
        };
        assert_eq!(fields[0].name, "title");
        assert!(!fields[0].optional);
        assert_eq!(fields[1].name, "isbn");
        assert!(fields[1].optional);
    }

    #[test]
    fn fields_keep_declaration_order() {
        let schema = Schema::from_value(&json!({"z": "string", "a": "integer"})).unwrap();
        let Node::Fields(fields) = schema.root() else {
            panic!("expected field map")
        };
        let names: Vec<&str> = fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["z", "a"]);
    }

    #[test]
    fn wildcard_alone_is_a_well_formed_collection() {
        let schema = Schema::from_value(&json!({"*": {"id": "integer"}})).unwrap();
        let Node::Collection { well_formed, .. } = schema.root() else {
            panic!("expected collection")
        };
        assert!(well_formed);
    }

    #[test]
    fn wildcard_with_siblings_is_flagged() {
        let schema =
            Schema::from_value(&json!({"*": {"foo": "integer"}, "bar": "integer"})).unwrap();
        let Node::Collection { well_formed, .. } = schema.root() else {
            panic!("expected collection")
        };
        assert!(!well_formed);
    }

    #[test]
    fn non_mapping_root_is_rejected() {
        let err = Schema::from_value(&json!("integer")).unwrap_err();
        assert!(matches!(err, SchemaError::RootNotMapping { found: "a string" }));
    }

    #[test]
    fn nested_nodes_parse_recursively() {
        let schema = Schema::from_value(&json!({
            "role": {"rules": "string => boolean"},
        }))
        .unwrap();
        let Node::Fields(fields) = schema.root() else {
            panic!("expected field map")
        };
        let Rule::Node(Node::Fields(inner)) = &fields[0].rule else {
            panic!("expected nested field map")
        };
        let Rule::Type(expr) = &inner[0].rule else {
            panic!("expected type expression")
        };
        assert_eq!(
            expr.shape,
            Shape::Map {
                key: Primitive::String,
                value: Primitive::Boolean
            }
        );
    }

    #[test]
    fn non_string_leaf_becomes_unknown_expression() {
        let schema = Schema::from_value(&json!({"count": 42})).unwrap();
        let Node::Fields(fields) = schema.root() else {
            panic!("expected field map")
        };
        let Rule::Type(expr) = &fields[0].rule else {
            panic!("expected type expression")
        };
        assert_eq!(expr.shape, Shape::Unknown("42".into()));
    }
}
