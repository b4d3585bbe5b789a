//! Factory functions, one per schema kind.

use super::{ObjectShape, Schema, SchemaKind};
use crate::error::SchemaError;
use crate::options::UnknownKeys;
use crate::value::{Value, dedup};

/// Accepts strings. Supports `min`, `max`, `gt`, `lt`, `nonempty` on length.
pub fn string() -> Schema {
    Schema::from_kind(SchemaKind::String)
}

/// Accepts numbers other than NaN. Supports `min`, `max`, `gt`, `lt`.
pub fn number() -> Schema {
    Schema::from_kind(SchemaKind::Number)
}

pub fn boolean() -> Schema {
    Schema::from_kind(SchemaKind::Boolean)
}

pub fn date() -> Schema {
    Schema::from_kind(SchemaKind::Date)
}

/// Accepts every value, including absence, unchanged.
pub fn any() -> Schema {
    Schema::from_kind(SchemaKind::Any)
}

/// Accepts exactly `value`.
pub fn literal(value: impl Into<Value>) -> Schema {
    Schema::from_kind(SchemaKind::Literal(value.into()))
}

/// Accepts any one of `values`, e.g. the string values of a Rust enum.
///
/// ```
/// use contour_schema::native_enum;
///
/// let hobby = native_enum(["reading", "writing", "coding"]).unwrap();
/// assert!(hobby.parse("coding").is_ok());
/// assert!(hobby.parse("gaming").is_err());
/// ```
pub fn native_enum<T: Into<Value>>(
    values: impl IntoIterator<Item = T>,
) -> Result<Schema, SchemaError> {
    let values = dedup(values.into_iter().map(Into::into));
    if values.is_empty() {
        return Err(SchemaError::Empty {
            kind: "enum",
            member: "value",
        });
    }
    Ok(Schema::from_kind(SchemaKind::NativeEnum(values)))
}

/// Fixed-arity positional list. Add trailing items with [`Schema::rest`].
pub fn tuple(items: impl IntoIterator<Item = Schema>) -> Schema {
    Schema::from_kind(SchemaKind::Tuple {
        items: items.into_iter().collect(),
        rest: None,
    })
}

/// List whose elements all match `element`. Supports size constraints.
pub fn array(element: Schema) -> Schema {
    Schema::from_kind(SchemaKind::Array(element))
}

/// Object with the given fields in declaration order. Unknown keys are
/// stripped unless [`Schema::strict`] or [`Schema::passthrough`] is applied.
pub fn object<K: Into<String>>(fields: impl IntoIterator<Item = (K, Schema)>) -> Schema {
    let fields = fields.into_iter().map(|(k, v)| (k.into(), v)).collect();
    Schema::from_kind(SchemaKind::Object(ObjectShape::new(
        fields,
        UnknownKeys::default(),
    )))
}

/// String-keyed mapping: every key matches `key`, every value `value`.
pub fn record(key: Schema, value: Schema) -> Schema {
    Schema::from_kind(SchemaKind::Record { key, value })
}

/// Arbitrary-keyed mapping: every key matches `key`, every value `value`.
pub fn map(key: Schema, value: Schema) -> Schema {
    Schema::from_kind(SchemaKind::Map { key, value })
}

/// Set whose elements all match `element`. Supports size constraints.
pub fn set(element: Schema) -> Schema {
    Schema::from_kind(SchemaKind::Set(element))
}

/// Tries `variants` in order; the first that accepts the value wins.
pub fn union(variants: impl IntoIterator<Item = Schema>) -> Result<Schema, SchemaError> {
    let variants: Vec<Schema> = variants.into_iter().collect();
    if variants.is_empty() {
        return Err(SchemaError::Empty {
            kind: "union",
            member: "variant",
        });
    }
    Ok(Schema::from_kind(SchemaKind::Union(variants)))
}
