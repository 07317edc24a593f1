//! Recursive schema-vs-data comparison.
//!
//! One pass over (schema, data): a plain synchronous tree walk with no I/O
//! and no early exit beyond the failing branch. Every failure lands in the
//! [`Report`]; the walk itself never returns an error. Recursion only
//! descends where schema and data both nest, so depth is bounded by the
//! caller-authored schema, not by the input data.

use crate::grammar::{Primitive, Shape, TypeExpr};
use crate::report::{ErrorKind, Report};
use crate::schema::{Node, Rule, Schema, WILDCARD};
use crate::value::Value;

// ————————————————————————————————————————————————————————————————————————————
// MATCHER
// ————————————————————————————————————————————————————————————————————————————

/// Reusable matcher: one immutable schema plus the report of the most
/// recent [`matches`](Matcher::matches) call.
///
/// `matches` takes `&mut self` because it replaces the stored report, so
/// sharing one matcher across concurrent calls is a compile error. For a
/// shared-schema setup use [`Schema::check`], which is `&self` and returns
/// a fresh report per call.
#[derive(Debug, Clone)]
pub struct Matcher {
    schema: Schema,
    report: Report,
}

impl Matcher {
    pub fn new(schema: Schema) -> Self {
        Matcher {
            schema,
            report: Report::new(),
        }
    }

    /// Build a matcher straight from a JSON-shaped schema description.
    pub fn from_value(desc: &serde_json::Value) -> Result<Self, crate::schema::SchemaError> {
        Ok(Matcher::new(Schema::from_value(desc)?))
    }

    /// Compare `data` against the schema. The stored report is replaced
    /// first, so repeated calls never leak stale errors; the return value
    /// is exactly "the fresh report is empty".
    pub fn matches(&mut self, data: &Value) -> bool {
        self.report = self.schema.check(data);
        self.report.is_empty()
    }

    /// Report from the most recent `matches` call; empty before any call.
    pub fn errors(&self) -> &Report {
        &self.report
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }
}

impl Schema {
    /// The comparison as a pure function: fresh report, no stored state.
    pub fn check(&self, data: &Value) -> Report {
        let mut report = Report::new();
        compare_node(self.root(), data, "", &mut report);
        report
    }
}

// ————————————————————————————————————————————————————————————————————————————
// WALK
// ————————————————————————————————————————————————————————————————————————————

fn join(parent: &str, segment: &str) -> String {
    if parent.is_empty() {
        segment.to_string()
    } else {
        format!("{parent}.{segment}")
    }
}

fn compare_node(node: &Node, data: &Value, parent: &str, report: &mut Report) {
    match node {
        Node::Collection { element, well_formed } => {
            let path = join(parent, WILDCARD);
            if !*well_formed {
                report.record(
                    &path,
                    ErrorKind::CollectionDefinition,
                    "the collection definition must be the only definition at its level".into(),
                );
                return;
            }
            // non-mapping data has no elements; vacuously fine
            let Some(items) = data.as_map() else { return };
            // every element shares the wildcard path; repeated failures on
            // one (path, kind) collapse into a single record
            for item in items.values() {
                match element.as_ref() {
                    Rule::Node(node) => compare_node(node, item, &path, report),
                    Rule::Type(expr) => compare_type(expr, item, &path, report),
                }
            }
        }
        Node::Fields(fields) => {
            for field in fields {
                let value = data.as_map().and_then(|m| m.get(&field.key));
                if field.optional && value.is_none() {
                    continue;
                }
                let path = join(parent, &field.name);
                let Some(value) = value else {
                    report.record(
                        &path,
                        ErrorKind::KeyNotFound,
                        "the key defined in the schema is not found in the data".into(),
                    );
                    continue;
                };
                match &field.rule {
                    Rule::Node(node) => {
                        if value.as_map().is_none() {
                            report.record(
                                &path,
                                ErrorKind::TypeMismatch,
                                "the value must be a mapping as defined in the schema".into(),
                            );
                            continue;
                        }
                        compare_node(node, value, &path, report);
                    }
                    Rule::Type(expr) => compare_type(expr, value, &path, report),
                }
            }
        }
    }
}

fn compare_type(expr: &TypeExpr, value: &Value, path: &str, report: &mut Report) {
    if expr.nullable && value.is_null() {
        return;
    }
    match &expr.shape {
        Shape::Unknown(raw) => {
            report.record(path, ErrorKind::TypeUnknown, format!("unknown value type: {raw}"));
        }
        Shape::Scalar(prim) => {
            if !prim.admits(value) {
                report.record(
                    path,
                    ErrorKind::TypeMismatch,
                    format!(
                        "the value must be of type '{}', got {}",
                        prim.name(),
                        value.type_name()
                    ),
                );
            }
        }
        Shape::Map { key, value: val } => compare_composite(*key, *val, value, path, report),
    }
}

fn compare_composite(
    key_ty: Primitive,
    val_ty: Primitive,
    value: &Value,
    path: &str,
    report: &mut Report,
) {
    let Some(map) = value.as_map() else {
        report.record(
            path,
            ErrorKind::TypeMismatch,
            format!(
                "the value must be a mapping of type '{} => {}', got {}",
                key_ty.name(),
                val_ty.name(),
                value.type_name()
            ),
        );
        return;
    };
    // one record covers the whole mapping; scan to the end regardless
    for (key, value) in map {
        if !key_ty.admits_key(key) || !val_ty.admits(value) {
            report.record(
                path,
                ErrorKind::TypeMismatch,
                format!(
                    "every entry must be of type '{} => {}'",
                    key_ty.name(),
                    val_ty.name()
                ),
            );
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// TESTS
// ————————————————————————————————————————————————————————————————————————————
