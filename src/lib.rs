//! Declarative schema matcher for untyped data trees.
//!
//! Validates a dynamically-shaped data tree (a decoded JSON document, a
//! config file, a test fixture) against a lightweight schema description
//! without binding the data to a static type first. The schema is a nested
//! mapping literal; leaves are tiny type expressions:
//!
//! - `"integer" | "double" | "boolean" | "string"` — the primitive vocabulary
//! - `"?string"` — nullable: `null` satisfies the field
//! - `"?name"` as a field key — optional: an absent field is skipped
//! - `"string => boolean"` — composite map: every key/value pair of the
//!   data mapping must carry those runtime types
//! - `"*"` as the only key of a level — collection: the sub-schema applies
//!   to every element
//!
//! Matching never throws past construction. Malformed schemas (unknown type
//! names, a wildcard with siblings) and non-conforming data are reported
//! through the same channel: an insertion-ordered report keyed by dotted
//! path, each path carrying one or more error kinds. `matches` returns
//! exactly "the report is empty".
//!
//! Pipeline: decode (caller) → [`Value`] → [`Schema`] comparison → [`Report`].

pub mod grammar;
pub mod matcher;
pub mod report;
pub mod schema;
pub mod value;

pub use grammar::{Primitive, Shape, TypeExpr};
pub use matcher::Matcher;
pub use report::{ErrorKind, Report};
pub use schema::{Schema, SchemaError};
pub use value::{Key, Value};
