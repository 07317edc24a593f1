//! Type-expression micro-grammar.
//!
//! Schema leaves are strings like `"integer"`, `"?string"` or
//! `"string => boolean"`. They are parsed exactly once, at schema
//! construction, into a structured form; anything unrecognized is kept
//! verbatim as [`Shape::Unknown`] and reported only when the traversal
//! actually visits that path.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::value::{Key, Value};

/// Lexical shape a composite map expression must have.
static COMPOSITE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z]+ => [a-z]+$").expect("composite pattern compiles"));

/// Separator of composite "key-type => value-type" expressions.
pub const COMPOSITE_SEPARATOR: &str = " => ";

/// Prefix marking a type expression nullable (or a schema key optional).
pub const NULLABLE_PREFIX: char = '?';

/// The four recognized primitive types. Nothing else names a type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    Integer,
    Double,
    Boolean,
    String,
}

impl Primitive {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "integer" => Some(Primitive::Integer),
            "double" => Some(Primitive::Double),
            "boolean" => Some(Primitive::Boolean),
            "string" => Some(Primitive::String),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Primitive::Integer => "integer",
            Primitive::Double => "double",
            Primitive::Boolean => "boolean",
            Primitive::String => "string",
        }
    }

    /// Whether a data value has this runtime type. Mappings and null never
    /// satisfy a primitive check.
    pub fn admits(self, value: &Value) -> bool {
        matches!(
            (self, value),
            (Primitive::Integer, Value::Int(_))
                | (Primitive::Double, Value::Double(_))
                | (Primitive::Boolean, Value::Bool(_))
                | (Primitive::String, Value::Str(_))
        )
    }

    /// Whether a mapping key has this runtime type. Keys are only ever
    /// integers or strings, so `double`/`boolean` admit no key.
    pub fn admits_key(self, key: &Key) -> bool {
        matches!(
            (self, key),
            (Primitive::Integer, Key::Int(_)) | (Primitive::String, Key::Str(_))
        )
    }
}

/// A parsed type expression: nullability plus the underlying shape.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeExpr {
    pub nullable: bool,
    pub shape: Shape,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// One of the four primitives.
    Scalar(Primitive),
    /// `key => value` constraint over every pair of a data mapping.
    Map { key: Primitive, value: Primitive },
    /// Did not parse; carries the offending text for the diagnostic.
    Unknown(String),
}

impl TypeExpr {
    /// Parse a schema leaf. Total: never fails, unparseable input lands in
    /// [`Shape::Unknown`] so the error surfaces lazily during traversal.
    pub fn parse(raw: &str) -> Self {
        let (nullable, body) = match raw.strip_prefix(NULLABLE_PREFIX) {
            Some(rest) => (true, rest),
            None => (false, raw),
        };
        let shape = if body.contains(COMPOSITE_SEPARATOR) {
            parse_composite(body)
        } else if let Some(prim) = Primitive::from_name(body) {
            Shape::Scalar(prim)
        } else {
            Shape::Unknown(body.to_string())
        };
        TypeExpr { nullable, shape }
    }

    /// A schema leaf that is not even a string (a bare number, say).
    /// Reported as TYPE_UNKNOWN when visited, like any other bad type name.
    pub fn unrecognized(raw: String) -> Self {
        TypeExpr {
            nullable: false,
            shape: Shape::Unknown(raw),
        }
    }
}

fn parse_composite(body: &str) -> Shape {
    // lexical check first (`word => word`, lowercase words only),
    // then both words must be in the primitive vocabulary
    if !COMPOSITE_RE.is_match(body) {
        return Shape::Unknown(body.to_string());
    }
    let Some((key, value)) = body.split_once(COMPOSITE_SEPARATOR) else {
        return Shape::Unknown(body.to_string());
    };
    match (Primitive::from_name(key), Primitive::from_name(value)) {
        (Some(key), Some(value)) => Shape::Map { key, value },
        _ => Shape::Unknown(body.to_string()),
    }
}
