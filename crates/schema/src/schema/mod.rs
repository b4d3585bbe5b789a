//! Immutable schema nodes.
//!
//! A [`Schema`] is a cheap, clonable handle to a shared node. Nodes are never
//! mutated: every modifier (`optional`, `min`, `refine`, ...) and every
//! derivation (`merge`, `pick`, ...) builds a new node, reusing unchanged
//! subtrees through `Arc`. A schema graph can therefore be built once and
//! validated against from any number of threads.
//!
//! # Examples
//!
//! ```
//! use contour_schema::{number, object, string};
//!
//! let user = object([
//!     ("name", string().min(5).unwrap()),
//!     ("age", number().gt(18).unwrap()),
//! ]);
//! let adult = user.pick(["age"]).unwrap();
//! assert_eq!(adult.shape().unwrap().len(), 1);
//! ```

mod builders;
pub mod checks;
mod object;

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

pub use builders::{
    any, array, boolean, date, literal, map, native_enum, number, object, record, set, string,
    tuple, union,
};
pub use checks::Check;
pub use object::ObjectShape;

use crate::error::SchemaError;
use crate::options::UnknownKeys;
use crate::value::Value;
use checks::Measure;

/// User predicate run by a refinement on the normalized value.
pub type Predicate = Arc<dyn Fn(&Value) -> bool + Send + Sync>;

/// Producer for a default value, invoked once per validation that needs it.
pub type DefaultProducer = Arc<dyn Fn() -> Value + Send + Sync>;

/// The shape a schema node expects.
#[derive(Clone)]
pub enum SchemaKind {
    String,
    Number,
    Boolean,
    Date,
    /// Exactly this value.
    Literal(Value),
    /// One of these values.
    NativeEnum(Vec<Value>),
    /// Fixed positional items, then optional trailing items of one schema.
    Tuple {
        items: Vec<Schema>,
        rest: Option<Schema>,
    },
    Array(Schema),
    Object(ObjectShape),
    /// String-keyed mapping with uniform keys and values.
    Record {
        key: Schema,
        value: Schema,
    },
    /// Arbitrary-keyed mapping with uniform keys and values.
    Map {
        key: Schema,
        value: Schema,
    },
    Set(Schema),
    /// First variant that accepts the value wins.
    Union(Vec<Schema>),
    /// Accepts absence.
    Optional(Schema),
    /// Accepts null.
    Nullable(Schema),
    /// Substitutes a produced value for absence.
    Default {
        inner: Schema,
        producer: DefaultProducer,
    },
    /// Runs a predicate after the inner schema succeeds.
    Refinement {
        inner: Schema,
        predicate: Predicate,
        message: Cow<'static, str>,
    },
    /// Accepts anything, unchanged.
    Any,
}

impl fmt::Debug for SchemaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String => f.write_str("String"),
            Self::Number => f.write_str("Number"),
            Self::Boolean => f.write_str("Boolean"),
            Self::Date => f.write_str("Date"),
            Self::Any => f.write_str("Any"),
            Self::Literal(v) => f.debug_tuple("Literal").field(v).finish(),
            Self::NativeEnum(values) => f.debug_tuple("NativeEnum").field(values).finish(),
            Self::Tuple { items, rest } => f
                .debug_struct("Tuple")
                .field("items", items)
                .field("rest", rest)
                .finish(),
            Self::Array(el) => f.debug_tuple("Array").field(el).finish(),
            Self::Object(shape) => f.debug_tuple("Object").field(shape).finish(),
            Self::Record { key, value } => f
                .debug_struct("Record")
                .field("key", key)
                .field("value", value)
                .finish(),
            Self::Map { key, value } => f
                .debug_struct("Map")
                .field("key", key)
                .field("value", value)
                .finish(),
            Self::Set(el) => f.debug_tuple("Set").field(el).finish(),
            Self::Union(variants) => f.debug_tuple("Union").field(variants).finish(),
            Self::Optional(inner) => f.debug_tuple("Optional").field(inner).finish(),
            Self::Nullable(inner) => f.debug_tuple("Nullable").field(inner).finish(),
            Self::Default { inner, .. } => f
                .debug_struct("Default")
                .field("inner", inner)
                .field("producer", &"<function>")
                .finish(),
            Self::Refinement { inner, message, .. } => f
                .debug_struct("Refinement")
                .field("inner", inner)
                .field("predicate", &"<function>")
                .field("message", message)
                .finish(),
        }
    }
}

#[derive(Debug)]
struct SchemaNode {
    kind: SchemaKind,
    checks: Vec<Check>,
}

/// Handle to an immutable schema node.
#[derive(Clone)]
pub struct Schema {
    node: Arc<SchemaNode>,
}

impl fmt::Debug for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.node.checks.is_empty() {
            self.node.kind.fmt(f)
        } else {
            f.debug_struct("Schema")
                .field("kind", &self.node.kind)
                .field("checks", &self.node.checks)
                .finish()
        }
    }
}

impl Schema {
    pub(crate) fn from_parts(kind: SchemaKind, checks: Vec<Check>) -> Self {
        Self {
            node: Arc::new(SchemaNode { kind, checks }),
        }
    }

    pub(crate) fn from_kind(kind: SchemaKind) -> Self {
        Self::from_parts(kind, Vec::new())
    }

    /// Rebuilds this node with another kind, keeping its checks.
    pub(crate) fn with_kind(&self, kind: SchemaKind) -> Self {
        Self::from_parts(kind, self.node.checks.clone())
    }

    // ------------------------------------------------------------------
    // Inspection
    // ------------------------------------------------------------------

    #[must_use]
    pub fn kind(&self) -> &SchemaKind {
        &self.node.kind
    }

    /// Constraints attached to this node, in attachment order.
    #[must_use]
    pub fn checks(&self) -> &[Check] {
        &self.node.checks
    }

    /// Short name of this node's kind.
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        match self.kind() {
            SchemaKind::String => "string",
            SchemaKind::Number => "number",
            SchemaKind::Boolean => "boolean",
            SchemaKind::Date => "date",
            SchemaKind::Literal(_) => "literal",
            SchemaKind::NativeEnum(_) => "enum",
            SchemaKind::Tuple { .. } => "tuple",
            SchemaKind::Array(_) => "array",
            SchemaKind::Object(_) => "object",
            SchemaKind::Record { .. } => "record",
            SchemaKind::Map { .. } => "map",
            SchemaKind::Set(_) => "set",
            SchemaKind::Union(_) => "union",
            SchemaKind::Optional(_) => "optional",
            SchemaKind::Nullable(_) => "nullable",
            SchemaKind::Default { .. } => "default",
            SchemaKind::Refinement { .. } => "refinement",
            SchemaKind::Any => "any",
        }
    }

    /// Human-readable description of what this schema accepts,
    /// e.g. `string | number` or `date | undefined`.
    #[must_use]
    pub fn describe(&self) -> String {
        match self.kind() {
            SchemaKind::Literal(v) => v.to_string(),
            SchemaKind::Union(variants) => variants
                .iter()
                .map(Schema::describe)
                .collect::<Vec<_>>()
                .join(" | "),
            SchemaKind::Optional(inner) => format!("{} | undefined", inner.describe()),
            SchemaKind::Nullable(inner) => format!("{} | null", inner.describe()),
            SchemaKind::Default { inner, .. } | SchemaKind::Refinement { inner, .. } => {
                inner.describe()
            }
            _ => self.kind_name().to_owned(),
        }
    }

    /// The fields of an object schema, `None` for other kinds.
    #[must_use]
    pub fn shape(&self) -> Option<&ObjectShape> {
        match self.kind() {
            SchemaKind::Object(shape) => Some(shape),
            _ => None,
        }
    }

    /// One field of an object schema.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Schema> {
        self.shape()?.get(name)
    }

    /// Returns true if this schema succeeds on an absent value without
    /// reporting `required`.
    #[must_use]
    pub fn accepts_absent(&self) -> bool {
        match self.kind() {
            SchemaKind::Optional(_) | SchemaKind::Default { .. } | SchemaKind::Any => true,
            SchemaKind::Nullable(inner) | SchemaKind::Refinement { inner, .. } => {
                inner.accepts_absent()
            }
            SchemaKind::Union(variants) => variants.iter().any(Schema::accepts_absent),
            _ => false,
        }
    }

    /// Returns true if both handles point at the same node.
    #[must_use]
    pub fn ptr_eq(&self, other: &Schema) -> bool {
        Arc::ptr_eq(&self.node, &other.node)
    }

    pub(crate) fn measure(&self) -> Option<Measure> {
        match self.kind() {
            SchemaKind::String => Some(Measure::Length),
            SchemaKind::Number => Some(Measure::Value),
            SchemaKind::Array(_) | SchemaKind::Set(_) => Some(Measure::Size),
            _ => None,
        }
    }

    // ------------------------------------------------------------------
    // Wrapping modifiers
    // ------------------------------------------------------------------

    /// Accepts absence in addition to what this schema accepts.
    pub fn optional(self) -> Schema {
        Self::from_kind(SchemaKind::Optional(self))
    }

    /// Accepts null in addition to what this schema accepts.
    pub fn nullable(self) -> Schema {
        Self::from_kind(SchemaKind::Nullable(self))
    }

    /// Accepts both absence and null.
    pub fn nullish(self) -> Schema {
        self.nullable().optional()
    }

    /// Replaces absence with a freshly produced value on every validation.
    ///
    /// The produced value is validated like any other input.
    pub fn default_with<F>(self, producer: F) -> Schema
    where
        F: Fn() -> Value + Send + Sync + 'static,
    {
        Self::from_kind(SchemaKind::Default {
            inner: self,
            producer: Arc::new(producer),
        })
    }

    /// Replaces absence with a constant.
    pub fn default_value(self, value: impl Into<Value>) -> Schema {
        let value = value.into();
        self.default_with(move || value.clone())
    }

    /// Adds a predicate run on the normalized value once this schema
    /// succeeds. A rejected value produces a `custom` issue with `message`.
    pub fn refine<F>(self, predicate: F, message: impl Into<Cow<'static, str>>) -> Schema
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        Self::from_kind(SchemaKind::Refinement {
            inner: self,
            predicate: Arc::new(predicate),
            message: message.into(),
        })
    }

    // ------------------------------------------------------------------
    // Constraints
    // ------------------------------------------------------------------

    /// Attaches a check, failing when the kind cannot carry it.
    pub fn check(self, check: Check) -> Result<Schema, SchemaError> {
        let measure = self
            .measure()
            .ok_or_else(|| SchemaError::IncompatibleConstraint {
                constraint: check.name(),
                kind: self.kind_name(),
            })?;
        check.validate_bound(measure)?;

        let mut checks = self.node.checks.clone();
        checks.push(check);
        Ok(Self::from_parts(self.node.kind.clone(), checks))
    }

    /// Inclusive lower bound on length, value or size.
    pub fn min(self, bound: impl Into<f64>) -> Result<Schema, SchemaError> {
        self.check(Check::Min(bound.into()))
    }

    /// Inclusive upper bound on length, value or size.
    pub fn max(self, bound: impl Into<f64>) -> Result<Schema, SchemaError> {
        self.check(Check::Max(bound.into()))
    }

    /// Exclusive lower bound.
    pub fn gt(self, bound: impl Into<f64>) -> Result<Schema, SchemaError> {
        self.check(Check::Gt(bound.into()))
    }

    /// Exclusive upper bound.
    pub fn lt(self, bound: impl Into<f64>) -> Result<Schema, SchemaError> {
        self.check(Check::Lt(bound.into()))
    }

    /// At least one character or element.
    pub fn nonempty(self) -> Result<Schema, SchemaError> {
        self.check(Check::NonEmpty)
    }

    // ------------------------------------------------------------------
    // Kind-specific modifiers
    // ------------------------------------------------------------------

    /// Validates trailing tuple elements against `rest`.
    pub fn rest(self, rest: Schema) -> Result<Schema, SchemaError> {
        match self.kind() {
            SchemaKind::Tuple { items, .. } => Ok(self.with_kind(SchemaKind::Tuple {
                items: items.clone(),
                rest: Some(rest),
            })),
            _ => Err(SchemaError::NotATuple {
                kind: self.kind_name(),
            }),
        }
    }

    /// Rejects undeclared keys.
    pub fn strict(self) -> Result<Schema, SchemaError> {
        self.with_unknown_keys("strict", UnknownKeys::Strict)
    }

    /// Keeps undeclared keys in the output.
    pub fn passthrough(self) -> Result<Schema, SchemaError> {
        self.with_unknown_keys("passthrough", UnknownKeys::Passthrough)
    }

    /// Drops undeclared keys from the output (the default).
    pub fn strip(self) -> Result<Schema, SchemaError> {
        self.with_unknown_keys("strip", UnknownKeys::Strip)
    }

    fn with_unknown_keys(
        self,
        operation: &'static str,
        policy: UnknownKeys,
    ) -> Result<Schema, SchemaError> {
        let shape = self.shape().ok_or(SchemaError::NotAnObject {
            operation,
            kind: self.kind_name(),
        })?;
        Ok(self.with_kind(SchemaKind::Object(shape.with_policy(policy))))
    }
}
