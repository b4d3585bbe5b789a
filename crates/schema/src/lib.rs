//! # contour-schema
//!
//! Declarative schemas for dynamic values: build a schema from factory
//! functions and modifiers, validate a [`Value`] against it, and get back
//! either a normalized value or every issue found, each with a path.
//!
//! ## Quick Start
//!
//! ```
//! use contour_schema::prelude::*;
//!
//! let user = object([
//!     ("name", string().min(5).unwrap()),
//!     ("age", number().gt(18).unwrap()),
//!     ("birthday", date().optional()),
//! ]);
//!
//! let input = Value::object([("name", Value::from("John")), ("age", Value::from(13))]);
//! let result = user.validate(&input);
//!
//! assert_eq!(
//!     contour_schema::format(&result),
//!     "name: must contain at least 5 character(s)\nage: must be greater than 18",
//! );
//! ```
//!
//! ## Building Schemas
//!
//! - **Primitives**: [`string`], [`number`], [`boolean`], [`date`], [`any`]
//! - **Exact values**: [`literal`], [`native_enum`]
//! - **Containers**: [`array`], [`tuple`], [`object`], [`record`], [`map`], [`set`]
//! - **Alternatives**: [`union`]
//! - **Modifiers**: [`Schema::optional`], [`Schema::nullable`], [`Schema::nullish`],
//!   [`Schema::default_with`], [`Schema::refine`], [`Schema::rest`]
//! - **Constraints**: [`Schema::min`], [`Schema::max`], [`Schema::gt`], [`Schema::lt`],
//!   [`Schema::nonempty`]
//!
//! ## Deriving Schemas
//!
//! [`merge`], [`extend`], [`pick`], [`omit`], [`partial`] and [`deep_partial`]
//! build new object schemas without touching their inputs.

// ValidationErrors travels by value through every nested call and is not
// worth boxing.
#![allow(clippy::result_large_err)]

pub mod algebra;
pub mod error;
mod json;
pub mod options;
pub mod prelude;
pub mod report;
pub mod schema;
pub mod validate;
pub mod value;

pub use algebra::{deep_partial, extend, merge, omit, partial, pick};
pub use error::{
    IssueCode, IssuePath, ParseError, PathSegment, SchemaError, ValidationErrors, ValidationIssue,
};
pub use options::{UnknownKeys, ValidateOptions};
pub use report::{FlattenedErrors, format};
pub use schema::{
    Check, DefaultProducer, ObjectShape, Predicate, Schema, SchemaKind, any, array, boolean, date,
    literal, map, native_enum, number, object, record, set, string, tuple, union,
};
pub use validate::{ValidationResult, Validator, validate, validate_at};
pub use value::Value;
