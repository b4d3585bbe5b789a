//! Prelude module for convenient imports.
//!
//! `use contour_schema::prelude::*;` brings in the schema factories, the
//! value model and the result types.

// ============================================================================
// SCHEMAS: Handle, factories and constraint checks
// ============================================================================

pub use crate::schema::{
    Check, Schema, any, array, boolean, date, literal, map, native_enum, number, object, record,
    set, string, tuple, union,
};

// ============================================================================
// VALUES AND RESULTS
// ============================================================================

pub use crate::error::{IssueCode, PathSegment, SchemaError, ValidationErrors, ValidationIssue};
pub use crate::validate::{ValidationResult, Validator};
pub use crate::value::Value;

// ============================================================================
// OPTIONS
// ============================================================================

pub use crate::options::{UnknownKeys, ValidateOptions};
