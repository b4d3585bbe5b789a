//! Error types for schema construction and validation
//!
//! Two classes of failure exist:
//!
//! - [`SchemaError`]: returned immediately when a schema is built or derived
//!   with invalid parameters (a constraint on an incompatible kind, `pick` of
//!   an unknown key, ...).
//! - [`ValidationIssue`]: one structural or constraint failure found while
//!   validating a value. Issues are never raised one at a time; a failed
//!   validation returns all of them inside [`ValidationErrors`].
//!
//! Messages use `Cow<'static, str>` so static messages never allocate.

use std::borrow::Cow;
use std::fmt;

use serde::Serialize;
use smallvec::SmallVec;

// ============================================================================
// CONFIGURATION ERRORS
// ============================================================================

/// Error raised while constructing or deriving a schema.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    /// A constraint was applied to a kind that cannot carry it.
    #[error("`{constraint}` cannot be applied to a {kind} schema")]
    IncompatibleConstraint {
        constraint: &'static str,
        kind: &'static str,
    },

    /// A constraint bound is not usable (NaN, negative length, ...).
    #[error("invalid bound for `{constraint}`: {reason}")]
    InvalidBound {
        constraint: &'static str,
        reason: String,
    },

    /// An object-only operation was applied to another kind.
    #[error("`{operation}` requires an object schema, found {kind}")]
    NotAnObject {
        operation: &'static str,
        kind: &'static str,
    },

    /// `rest` was applied to a schema that is not a tuple.
    #[error("`rest` requires a tuple schema, found {kind}")]
    NotATuple { kind: &'static str },

    /// A derivation named a key the object schema does not declare.
    #[error("unknown key `{key}` in object schema")]
    UnknownKey { key: String },

    /// A union or enum was built without any members.
    #[error("{kind} schema requires at least one {member}")]
    Empty {
        kind: &'static str,
        member: &'static str,
    },
}

impl SchemaError {
    /// Broad error category for grouping in logs.
    #[must_use]
    pub fn category(&self) -> &str {
        match self {
            Self::IncompatibleConstraint { .. } | Self::InvalidBound { .. } => "constraint",
            Self::NotAnObject { .. } | Self::NotATuple { .. } => "kind",
            Self::UnknownKey { .. } => "lookup",
            Self::Empty { .. } => "members",
        }
    }

    /// Machine-readable error code for programmatic handling.
    #[must_use]
    pub fn code(&self) -> &str {
        match self {
            Self::IncompatibleConstraint { .. } => "SCHEMA_INCOMPATIBLE_CONSTRAINT",
            Self::InvalidBound { .. } => "SCHEMA_INVALID_BOUND",
            Self::NotAnObject { .. } => "SCHEMA_NOT_AN_OBJECT",
            Self::NotATuple { .. } => "SCHEMA_NOT_A_TUPLE",
            Self::UnknownKey { .. } => "SCHEMA_UNKNOWN_KEY",
            Self::Empty { .. } => "SCHEMA_EMPTY",
        }
    }
}

// ============================================================================
// ISSUE PATHS
// ============================================================================

/// One step of an issue path: an object key or a list position.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum PathSegment {
    /// Object field, record key, or map entry side (`"key"` / `"value"`).
    Key(String),
    /// Position in a list, tuple, set or map.
    Index(usize),
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        Self::Key(key.to_owned())
    }
}

impl From<String> for PathSegment {
    fn from(key: String) -> Self {
        Self::Key(key)
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(key) => f.write_str(key),
            Self::Index(index) => write!(f, "{index}"),
        }
    }
}

/// Location of an issue, from the root value downwards.
///
/// Most paths are shallow, so up to four segments live inline.
pub type IssuePath = SmallVec<[PathSegment; 4]>;

// ============================================================================
// VALIDATION ISSUES
// ============================================================================

/// Machine-readable classification of a [`ValidationIssue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueCode {
    /// The value has the wrong tag, or a required value is absent.
    TypeMismatch,
    /// A length, size or numeric lower bound was violated.
    TooSmall,
    /// A length, size or numeric upper bound was violated.
    TooBig,
    /// The value differs from the expected literal.
    InvalidLiteral,
    /// The value is not one of the allowed enum members.
    InvalidEnumValue,
    /// A strict object received keys it does not declare.
    UnrecognizedKeys,
    /// A refinement predicate rejected the value.
    Custom,
}

impl IssueCode {
    /// The snake_case name used in serialized output.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::TypeMismatch => "type_mismatch",
            Self::TooSmall => "too_small",
            Self::TooBig => "too_big",
            Self::InvalidLiteral => "invalid_literal",
            Self::InvalidEnumValue => "invalid_enum_value",
            Self::UnrecognizedKeys => "unrecognized_keys",
            Self::Custom => "custom",
        }
    }
}

impl fmt::Display for IssueCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single structural or constraint failure.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationIssue {
    /// Where the failure happened, root first.
    pub path: IssuePath,
    /// What kind of failure it is.
    pub code: IssueCode,
    /// Human-readable description in English.
    pub message: Cow<'static, str>,
}

impl ValidationIssue {
    /// Creates an issue at the given path.
    pub fn new(
        path: impl IntoIterator<Item = PathSegment>,
        code: IssueCode,
        message: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self {
            path: path.into_iter().collect(),
            code,
            message: message.into(),
        }
    }

    /// Renders the path in dotted/bracketed form, e.g. `tuple.custom[2]`.
    #[must_use]
    pub fn path_string(&self) -> String {
        crate::report::render_path(&self.path)
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path_string(), self.message)
    }
}

// ============================================================================
// ISSUE COLLECTION
// ============================================================================

/// All issues found by one validation call, in traversal order.
///
/// This is the error half of [`ValidationResult`](crate::ValidationResult)
/// and implements [`std::error::Error`], so a failed validation can be
/// propagated with `?`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    issues: Vec<ValidationIssue>,
}

impl ValidationErrors {
    /// Creates an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self { issues: Vec::new() }
    }

    /// Appends an issue.
    pub fn add(&mut self, issue: ValidationIssue) {
        self.issues.push(issue);
    }

    /// Appends several issues, keeping their order.
    pub fn extend(&mut self, issues: impl IntoIterator<Item = ValidationIssue>) {
        self.issues.extend(issues);
    }

    /// Number of issues.
    #[must_use]
    pub fn len(&self) -> usize {
        self.issues.len()
    }

    /// Returns true if no issue was collected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    /// All issues in collection order.
    #[must_use]
    pub fn issues(&self) -> &[ValidationIssue] {
        &self.issues
    }

    /// Iterates over the issues.
    pub fn iter(&self) -> std::slice::Iter<'_, ValidationIssue> {
        self.issues.iter()
    }

    /// Issues whose path equals `path` exactly.
    pub fn at<'a>(&'a self, path: &'a [PathSegment]) -> impl Iterator<Item = &'a ValidationIssue> {
        self.issues
            .iter()
            .filter(move |issue| issue.path.as_slice() == path)
    }

    /// Converts to a `Result`, succeeding with `ok_value` when empty.
    #[must_use = "result must be used"]
    pub fn into_result<T>(self, ok_value: T) -> Result<T, ValidationErrors> {
        if self.is_empty() {
            Ok(ok_value)
        } else {
            Err(self)
        }
    }
}

impl FromIterator<ValidationIssue> for ValidationErrors {
    fn from_iter<I: IntoIterator<Item = ValidationIssue>>(iter: I) -> Self {
        Self {
            issues: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for ValidationErrors {
    type Item = ValidationIssue;
    type IntoIter = std::vec::IntoIter<ValidationIssue>;

    fn into_iter(self) -> Self::IntoIter {
        self.issues.into_iter()
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a ValidationIssue;
    type IntoIter = std::slice::Iter<'a, ValidationIssue>;

    fn into_iter(self) -> Self::IntoIter {
        self.issues.iter()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::report::render_issues(&self.issues))
    }
}

impl std::error::Error for ValidationErrors {}

// ============================================================================
// PARSE ERRORS
// ============================================================================

/// Error returned by [`Schema::parse_json`](crate::Schema::parse_json).
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// The input was not well-formed JSON.
    #[error("malformed JSON input: {0}")]
    Json(#[from] serde_json::Error),

    /// The input parsed but did not match the schema.
    #[error(transparent)]
    Invalid(#[from] ValidationErrors),
}

impl ParseError {
    /// The validation issues, when the failure came from the schema.
    #[must_use]
    pub fn issues(&self) -> Option<&ValidationErrors> {
        match self {
            Self::Invalid(errors) => Some(errors),
            Self::Json(_) => None,
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
