//! Recursive validation of a [`Value`] against a [`Schema`].
//!
//! The validator walks schema and value together, depth-first in field
//! declaration order, and produces either a normalized copy of the value
//! (defaults filled in, unknown keys handled, set duplicates dropped) or every
//! issue it found. Independent subtrees never short-circuit each other; only
//! a union stops at its first accepting variant.
//!
//! # Examples
//!
//! ```
//! use contour_schema::{number, object, string, validate, Value};
//!
//! let schema = object([
//!     ("name", string().min(5).unwrap()),
//!     ("age", number().gt(18).unwrap()),
//! ]);
//! let input = Value::object([("name", Value::from("John")), ("age", Value::from(13))]);
//!
//! let errors = validate(&schema, &input).unwrap_err();
//! assert_eq!(errors.len(), 2);
//! ```

use std::borrow::Cow;
use std::panic::{AssertUnwindSafe, catch_unwind};

use indexmap::IndexMap;

use crate::error::{
    IssueCode, IssuePath, ParseError, PathSegment, ValidationErrors, ValidationIssue,
};
use crate::options::{UnknownKeys, ValidateOptions};
use crate::schema::{ObjectShape, Predicate, Schema, SchemaKind};
use crate::value::{Value, dedup};

/// Normalized value on success, every issue found on failure.
pub type ValidationResult = Result<Value, ValidationErrors>;

/// Validates `value` against `schema` with default options.
pub fn validate(schema: &Schema, value: &Value) -> ValidationResult {
    Validator::default().validate(schema, value)
}

/// Validates starting at `path`, so issues are reported relative to an
/// enclosing document.
pub fn validate_at(schema: &Schema, value: &Value, path: &[PathSegment]) -> ValidationResult {
    Validator::default().validate_at(schema, value, path)
}

/// Validation entry point carrying [`ValidateOptions`].
///
/// A validator holds no per-call state and can be shared freely.
#[derive(Debug, Clone, Copy, Default)]
pub struct Validator {
    options: ValidateOptions,
}

impl Validator {
    #[must_use]
    pub fn new(options: ValidateOptions) -> Self {
        Self { options }
    }

    #[must_use]
    pub fn options(&self) -> &ValidateOptions {
        &self.options
    }

    pub fn validate(&self, schema: &Schema, value: &Value) -> ValidationResult {
        self.validate_at(schema, value, &[])
    }

    pub fn validate_at(
        &self,
        schema: &Schema,
        value: &Value,
        path: &[PathSegment],
    ) -> ValidationResult {
        tracing::trace!(
            kind = schema.kind_name(),
            depth = path.len(),
            "validating value"
        );

        let mut walk = Walk {
            options: &self.options,
            path: path.iter().cloned().collect(),
            issues: Vec::new(),
        };
        let output = walk.check(schema, value);

        match output {
            Some(value) if walk.issues.is_empty() => Ok(value),
            _ => {
                tracing::debug!(issues = walk.issues.len(), "validation failed");
                Err(walk.issues.into_iter().collect())
            }
        }
    }
}

// ============================================================================
// WALKER
// ============================================================================

/// State of one validation call: the current path and the issues so far.
///
/// `check` returns `Some(normalized)` exactly when it added no issue.
struct Walk<'o> {
    options: &'o ValidateOptions,
    path: IssuePath,
    issues: Vec<ValidationIssue>,
}

impl Walk<'_> {
    fn issue(&mut self, code: IssueCode, message: impl Into<Cow<'static, str>>) {
        self.issues.push(ValidationIssue {
            path: self.path.clone(),
            code,
            message: message.into(),
        });
    }

    fn mismatch(&mut self, expected: &str, value: &Value) {
        if value.is_absent() {
            self.issue(IssueCode::TypeMismatch, "required");
        } else {
            self.issue(
                IssueCode::TypeMismatch,
                format!("expected {expected}, received {}", value.type_name()),
            );
        }
    }

    fn descend<T>(
        &mut self,
        segment: impl Into<PathSegment>,
        f: impl FnOnce(&mut Self) -> T,
    ) -> T {
        self.path.push(segment.into());
        let out = f(self);
        self.path.pop();
        out
    }

    fn check(&mut self, schema: &Schema, value: &Value) -> Option<Value> {
        match schema.kind() {
            SchemaKind::Any => Some(value.clone()),
            SchemaKind::Optional(inner) => {
                if value.is_absent() {
                    Some(Value::Absent)
                } else {
                    self.check(inner, value)
                }
            }
            SchemaKind::Nullable(inner) => {
                if value.is_null() {
                    Some(Value::Null)
                } else {
                    self.check(inner, value)
                }
            }
            SchemaKind::Default { inner, producer } => {
                if value.is_absent() {
                    let produced = producer();
                    self.check(inner, &produced)
                } else {
                    self.check(inner, value)
                }
            }
            SchemaKind::Refinement {
                inner,
                predicate,
                message,
            } => {
                let output = self.check(inner, value)?;
                self.refine(predicate, message, output)
            }
            SchemaKind::Union(variants) => self.union(schema, variants, value),
            _ => self.structural(schema, value),
        }
    }

    /// Kinds that look at the value's tag and may carry checks.
    fn structural(&mut self, schema: &Schema, value: &Value) -> Option<Value> {
        let before = self.issues.len();

        let output = match (schema.kind(), value) {
            (SchemaKind::String, Value::String(s)) => {
                self.apply_checks(schema, s.chars().count() as f64);
                Some(value.clone())
            }
            (SchemaKind::Number, Value::Number(n)) if !n.is_nan() => {
                self.apply_checks(schema, *n);
                Some(value.clone())
            }
            (SchemaKind::Boolean, Value::Bool(_)) | (SchemaKind::Date, Value::Date(_)) => {
                Some(value.clone())
            }
            (SchemaKind::Literal(expected), _) if !value.is_absent() => {
                self.literal(expected, value)
            }
            (SchemaKind::NativeEnum(allowed), _) if !value.is_absent() => {
                self.native_enum(allowed, value)
            }
            (SchemaKind::Tuple { items, rest }, Value::List(input)) => {
                self.tuple(items, rest.as_ref(), input)
            }
            (SchemaKind::Array(element), Value::List(input)) => {
                let output = self.elements(element, input);
                self.apply_checks(schema, input.len() as f64);
                output.map(Value::List)
            }
            (SchemaKind::Set(element), Value::Set(input)) => {
                let output = self.elements(element, input).map(dedup);
                let size = output
                    .as_ref()
                    .map_or_else(|| dedup(input.iter().cloned()).len(), Vec::len);
                self.apply_checks(schema, size as f64);
                output.map(Value::Set)
            }
            (SchemaKind::Object(shape), Value::Object(input)) => self.object(shape, input),
            (SchemaKind::Record { key, value: field }, Value::Object(input)) => {
                self.record(key, field, input)
            }
            (SchemaKind::Map { key, value: field }, Value::Map(input)) => {
                self.map(key, field, input)
            }
            _ => {
                self.mismatch(&schema.describe(), value);
                None
            }
        };

        output.filter(|_| self.issues.len() == before)
    }

    fn apply_checks(&mut self, schema: &Schema, measured: f64) {
        let Some(measure) = schema.measure() else {
            return;
        };
        for check in schema.checks() {
            if let Some((code, message)) = check.violation(measured, measure) {
                self.issue(code, message);
            }
        }
    }

    fn literal(&mut self, expected: &Value, value: &Value) -> Option<Value> {
        if value == expected {
            Some(value.clone())
        } else {
            self.issue(
                IssueCode::InvalidLiteral,
                format!("invalid literal value, expected {expected}"),
            );
            None
        }
    }

    fn native_enum(&mut self, allowed: &[Value], value: &Value) -> Option<Value> {
        if allowed.contains(value) {
            return Some(value.clone());
        }
        let options = allowed
            .iter()
            .map(quote)
            .collect::<Vec<_>>()
            .join(" | ");
        self.issue(
            IssueCode::InvalidEnumValue,
            format!(
                "invalid enum value, expected {options}, received {}",
                quote(value)
            ),
        );
        None
    }

    fn union(&mut self, schema: &Schema, variants: &[Schema], value: &Value) -> Option<Value> {
        let mut tag_matched = false;
        for variant in variants {
            let mut trial = Walk {
                options: self.options,
                path: self.path.clone(),
                issues: Vec::new(),
            };
            if let Some(output) = trial.check(variant, value) {
                return Some(output);
            }
            tag_matched |= !trial.is_tag_mismatch(self.path.len());
        }

        if tag_matched && !value.is_absent() {
            self.issue(
                IssueCode::TypeMismatch,
                format!(
                    "no variant of {} accepted the {}",
                    schema.describe(),
                    value.type_name()
                ),
            );
        } else {
            self.mismatch(&schema.describe(), value);
        }
        None
    }

    /// True when the only failure is a tag mismatch on the value itself.
    fn is_tag_mismatch(&self, depth: usize) -> bool {
        matches!(
            self.issues.as_slice(),
            [issue] if issue.code == IssueCode::TypeMismatch && issue.path.len() == depth
        )
    }

    fn tuple(&mut self, items: &[Schema], rest: Option<&Schema>, input: &[Value]) -> Option<Value> {
        let fixed = items.len();
        if input.len() < fixed {
            self.issue(
                IssueCode::TooSmall,
                format!("must contain at least {fixed} element(s)"),
            );
            return None;
        }
        if rest.is_none() && input.len() > fixed {
            self.issue(
                IssueCode::TooBig,
                format!("must contain at most {fixed} element(s)"),
            );
            return None;
        }

        let mut output = Vec::with_capacity(input.len());
        let mut ok = true;
        for (index, element) in input.iter().enumerate() {
            let schema = items.get(index).or(rest)?;
            match self.descend(index, |walk| walk.check(schema, element)) {
                Some(value) => output.push(value),
                None => ok = false,
            }
        }
        ok.then_some(Value::List(output))
    }

    /// Validates every element; never stops at the first failure.
    fn elements(&mut self, element: &Schema, input: &[Value]) -> Option<Vec<Value>> {
        let mut output = Vec::with_capacity(input.len());
        let mut ok = true;
        for (index, item) in input.iter().enumerate() {
            match self.descend(index, |walk| walk.check(element, item)) {
                Some(value) => output.push(value),
                None => ok = false,
            }
        }
        ok.then_some(output)
    }

    fn object(&mut self, shape: &ObjectShape, input: &IndexMap<String, Value>) -> Option<Value> {
        let mut output = IndexMap::with_capacity(shape.len());
        let mut ok = true;

        for (name, field) in shape {
            let value = input.get(name).unwrap_or(&Value::Absent);
            match self.descend(name.as_str(), |walk| walk.check(field, value)) {
                Some(Value::Absent) => {}
                Some(value) => {
                    output.insert(name.clone(), value);
                }
                None => ok = false,
            }
        }

        let unknown = input
            .iter()
            .filter(|(key, value)| !value.is_absent() && !shape.contains(key));
        match self.options.policy_for(shape.unknown_keys()) {
            UnknownKeys::Strip => {}
            UnknownKeys::Passthrough => {
                output.extend(unknown.map(|(k, v)| (k.clone(), v.clone())));
            }
            UnknownKeys::Strict => {
                let keys: Vec<String> = unknown.map(|(k, _)| format!("'{k}'")).collect();
                if !keys.is_empty() {
                    self.issue(
                        IssueCode::UnrecognizedKeys,
                        format!("unrecognized key(s) in object: {}", keys.join(", ")),
                    );
                    ok = false;
                }
            }
        }

        ok.then_some(Value::Object(output))
    }

    fn record(
        &mut self,
        key: &Schema,
        field: &Schema,
        input: &IndexMap<String, Value>,
    ) -> Option<Value> {
        let mut output = IndexMap::with_capacity(input.len());
        let mut ok = true;

        for (name, value) in input.iter().filter(|(_, value)| !value.is_absent()) {
            let (checked_key, checked_value) = self.descend(name.as_str(), |walk| {
                let k = walk.check(key, &Value::String(name.clone()));
                let v = walk.check(field, value);
                (k, v)
            });
            match (checked_key, checked_value) {
                (Some(k), Some(v)) => {
                    let k = match k {
                        Value::String(s) => s,
                        _ => name.clone(),
                    };
                    output.insert(k, v);
                }
                _ => ok = false,
            }
        }

        ok.then_some(Value::Object(output))
    }

    fn map(&mut self, key: &Schema, field: &Schema, input: &[(Value, Value)]) -> Option<Value> {
        let mut output = Vec::with_capacity(input.len());
        let mut ok = true;

        for (index, (k, v)) in input.iter().enumerate() {
            let (checked_key, checked_value) = self.descend(index, |walk| {
                let k = walk.descend("key", |walk| walk.check(key, k));
                let v = walk.descend("value", |walk| walk.check(field, v));
                (k, v)
            });
            match (checked_key, checked_value) {
                (Some(k), Some(v)) => output.push((k, v)),
                _ => ok = false,
            }
        }

        ok.then_some(Value::Map(output))
    }

    fn refine(
        &mut self,
        predicate: &Predicate,
        message: &Cow<'static, str>,
        output: Value,
    ) -> Option<Value> {
        match catch_unwind(AssertUnwindSafe(|| predicate(&output))) {
            Ok(true) => Some(output),
            Ok(false) => {
                self.issue(IssueCode::Custom, message.clone());
                None
            }
            Err(_) => {
                tracing::warn!(message = %message, "refinement predicate panicked");
                self.issue(IssueCode::Custom, message.clone());
                None
            }
        }
    }
}

fn quote(value: &Value) -> String {
    match value {
        Value::String(s) => format!("'{s}'"),
        other => other.to_string(),
    }
}

// ============================================================================
// SCHEMA CONVENIENCE METHODS
// ============================================================================

impl Schema {
    /// Validates with default options.
    pub fn validate(&self, value: &Value) -> ValidationResult {
        validate(self, value)
    }

    /// Converts `value` and validates it with default options.
    pub fn parse(&self, value: impl Into<Value>) -> ValidationResult {
        validate(self, &value.into())
    }

    /// Returns true if `value` satisfies this schema.
    #[must_use]
    pub fn is_valid(&self, value: &Value) -> bool {
        validate(self, value).is_ok()
    }

    /// Parses a JSON document and validates it.
    pub fn parse_json(&self, input: &str) -> Result<Value, ParseError> {
        let json: serde_json::Value = serde_json::from_str(input)?;
        Ok(validate(self, &Value::from(json))?)
    }
}

// ============================================================================
// TESTS
// ============================================================================
