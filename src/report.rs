//! Ordered error report keyed by dotted path.
//!
//! Failures are data, never panics or `Err`: the walk records (path, kind,
//! message) triples here and keeps going. Insertion order follows traversal
//! order; a (path, kind) pair is recorded at most once, later identical
//! records are dropped.

use indexmap::IndexMap;
use serde::Serialize;

/// The four error kinds the matcher can report. Kinds are the contract a
/// caller checks against; messages are diagnostics only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    /// A wildcard key had sibling keys at the same schema level.
    CollectionDefinition,
    /// A required field is absent from the data mapping.
    KeyNotFound,
    /// A type expression names no recognized type.
    TypeUnknown,
    /// The data's runtime type disagrees with the schema.
    TypeMismatch,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::CollectionDefinition => "COLLECTION_DEFINITION",
            ErrorKind::KeyNotFound => "KEY_NOT_FOUND",
            ErrorKind::TypeUnknown => "TYPE_UNKNOWN",
            ErrorKind::TypeMismatch => "TYPE_MISMATCH",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Accumulated errors from one match call, path → kind → message.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Report {
    entries: IndexMap<String, IndexMap<ErrorKind, String>>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one error. Idempotent per (path, kind): the first message for
    /// a pair wins, and the pair keeps its original insertion position.
    pub(crate) fn record(&mut self, path: &str, kind: ErrorKind, message: String) {
        self.entries
            .entry(path.to_string())
            .or_default()
            .entry(kind)
            .or_insert(message);
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of distinct paths with at least one error.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Errors recorded at one path, in traversal order.
    pub fn get(&self, path: &str) -> Option<&IndexMap<ErrorKind, String>> {
        self.entries.get(path)
    }

    pub fn contains(&self, path: &str, kind: ErrorKind) -> bool {
        self.get(path).is_some_and(|kinds| kinds.contains_key(&kind))
    }

    /// Paths with errors, in traversal order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &IndexMap<ErrorKind, String>)> {
        self.entries.iter().map(|(path, kinds)| (path.as_str(), kinds))
    }
}

impl std::fmt::Display for Report {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (path, kinds) in &self.entries {
            for (kind, message) in kinds {
                if !first {
                    writeln!(f)?;
                }
                first = false;
                write!(f, "{path}: {kind}: {message}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_path_kind_keeps_first_message() {
        let mut report = Report::new();
        report.record("a.b", ErrorKind::TypeMismatch, "first".into());
        report.record("a.b", ErrorKind::TypeMismatch, "second".into());
        let kinds = report.get("a.b").unwrap();
        assert_eq!(kinds.len(), 1);
        assert_eq!(kinds[&ErrorKind::TypeMismatch], "first");
    }

    #[test]
    fn one_path_accumulates_several_kinds() {
        let mut report = Report::new();
        report.record("x", ErrorKind::TypeUnknown, "u".into());
        report.record("x", ErrorKind::TypeMismatch, "m".into());
        assert_eq!(report.len(), 1);
        assert!(report.contains("x", ErrorKind::TypeUnknown));
        assert!(report.contains("x", ErrorKind::TypeMismatch));
    }

    #[test]
    fn paths_keep_insertion_order() {
        let mut report = Report::new();
        report.record("z", ErrorKind::KeyNotFound, "".into());
        report.record("a", ErrorKind::KeyNotFound, "".into());
        let paths: Vec<&str> = report.paths().collect();
        assert_eq!(paths, ["z", "a"]);
    }

    #[test]
    fn kinds_render_screaming_snake() {
        assert_eq!(ErrorKind::CollectionDefinition.as_str(), "COLLECTION_DEFINITION");
        assert_eq!(ErrorKind::KeyNotFound.to_string(), "KEY_NOT_FOUND");
        assert_eq!(
            serde_json::to_string(&ErrorKind::TypeUnknown).unwrap(),
            "\"TYPE_UNKNOWN\""
        );
    }
}
