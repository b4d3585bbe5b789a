//! Human-readable and structured rendering of validation results.
//!
//! ```
//! use contour_schema::{number, object, report, Value};
//!
//! let schema = object([("age", number().gt(18).unwrap())]);
//! let result = schema.parse(Value::object([("age", 13)]));
//! assert_eq!(report::format(&result), "age: must be greater than 18");
//! ```

use indexmap::IndexMap;
use serde::Serialize;

use crate::error::{PathSegment, ValidationErrors, ValidationIssue};
use crate::validate::ValidationResult;

/// Renders a result: one `path: message` line per issue on failure, the
/// normalized value itself on success.
#[must_use]
pub fn format(result: &ValidationResult) -> String {
    match result {
        Ok(value) => value.to_string(),
        Err(errors) => render_issues(errors.issues()),
    }
}

/// Joins issues as `path: message` lines in collection order.
#[must_use]
pub fn render_issues(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Renders a path with dots between keys and brackets around indices.
/// The empty path renders as `(root)`.
#[must_use]
pub fn render_path(path: &[PathSegment]) -> String {
    if path.is_empty() {
        return "(root)".to_owned();
    }
    let mut out = String::new();
    for segment in path {
        match segment {
            PathSegment::Key(key) => {
                if !out.is_empty() {
                    out.push('.');
                }
                out.push_str(key);
            }
            PathSegment::Index(index) => {
                out.push('[');
                out.push_str(&index.to_string());
                out.push(']');
            }
        }
    }
    out
}

/// Issue messages grouped by top-level field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FlattenedErrors {
    /// Messages of issues reported on the root value itself.
    pub form_errors: Vec<String>,
    /// Messages keyed by the first path segment, in first-seen order.
    pub field_errors: IndexMap<String, Vec<String>>,
}

impl ValidationErrors {
    /// Groups messages by their top-level field.
    #[must_use]
    pub fn flatten(&self) -> FlattenedErrors {
        let mut flat = FlattenedErrors::default();
        for issue in self {
            let message = issue.message.to_string();
            match issue.path.first() {
                None => flat.form_errors.push(message),
                Some(head) => flat
                    .field_errors
                    .entry(head.to_string())
                    .or_default()
                    .push(message),
            }
        }
        flat
    }

    /// Structured form: one object per issue with `path`, `code` and `message`.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}
