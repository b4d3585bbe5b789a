//! Derivations that build new object schemas from existing ones.
//!
//! None of these mutate their inputs: the result is a fresh node whose field
//! schemas are shared with the source.
//!
//! # Examples
//!
//! ```
//! use contour_schema::{number, object, string, tuple};
//!
//! let user = object([("name", string()), ("age", number())]);
//! let geo = object([("coords", tuple([number(), number(), number()]))]);
//!
//! let located = user.merge(&geo).unwrap();
//! assert_eq!(located.shape().unwrap().len(), 3);
//!
//! let patch = located.partial().unwrap();
//! assert!(patch.parse(contour_schema::Value::Object(Default::default())).is_ok());
//! ```

use indexmap::IndexMap;

use crate::error::SchemaError;
use crate::schema::{ObjectShape, Schema, SchemaKind, object};

fn shape_of<'a>(
    schema: &'a Schema,
    operation: &'static str,
) -> Result<&'a ObjectShape, SchemaError> {
    schema.shape().ok_or(SchemaError::NotAnObject {
        operation,
        kind: schema.kind_name(),
    })
}

fn rebuild(source: &Schema, shape: &ObjectShape, fields: IndexMap<String, Schema>) -> Schema {
    source.with_kind(SchemaKind::Object(ObjectShape::new(
        fields,
        shape.unknown_keys(),
    )))
}

/// `left`'s fields followed by `right`'s; on collision `right`'s definition
/// takes `left`'s position.
fn union_fields(left: &ObjectShape, right: &ObjectShape) -> IndexMap<String, Schema> {
    let mut fields = left.fields().clone();
    for (name, schema) in right {
        fields.insert(name.clone(), schema.clone());
    }
    fields
}

fn unknown_key(shape: &ObjectShape, key: &str) -> Result<(), SchemaError> {
    if shape.contains(key) {
        Ok(())
    } else {
        Err(SchemaError::UnknownKey {
            key: key.to_owned(),
        })
    }
}

/// Field-wise union of two objects. On collision `b`'s definition wins and
/// keeps `a`'s position; the result takes `b`'s unknown-key policy.
pub fn merge(a: &Schema, b: &Schema) -> Result<Schema, SchemaError> {
    let left = shape_of(a, "merge")?;
    let right = shape_of(b, "merge")?;

    let fields = union_fields(left, right);

    tracing::debug!(
        operation = "merge",
        fields = fields.len(),
        "derived object schema"
    );
    Ok(rebuild(b, right, fields))
}

/// Adds or replaces fields like [`merge`] with `object(fields)`, but keeps
/// `a`'s unknown-key policy.
pub fn extend<K: Into<String>>(
    a: &Schema,
    fields: impl IntoIterator<Item = (K, Schema)>,
) -> Result<Schema, SchemaError> {
    let extension = object(fields);
    let left = shape_of(a, "extend")?;
    let right = shape_of(&extension, "extend")?;

    let merged = union_fields(left, right);

    tracing::debug!(
        operation = "extend",
        fields = merged.len(),
        "derived object schema"
    );
    Ok(rebuild(a, left, merged))
}

/// Keeps only the named fields, in the order requested.
pub fn pick<K: AsRef<str>>(
    a: &Schema,
    keys: impl IntoIterator<Item = K>,
) -> Result<Schema, SchemaError> {
    let shape = shape_of(a, "pick")?;

    let mut fields = IndexMap::new();
    for key in keys {
        let key = key.as_ref();
        unknown_key(shape, key)?;
        if let Some(schema) = shape.get(key) {
            fields.insert(key.to_owned(), schema.clone());
        }
    }

    tracing::debug!(
        operation = "pick",
        fields = fields.len(),
        "derived object schema"
    );
    Ok(rebuild(a, shape, fields))
}

/// Drops the named fields.
pub fn omit<K: AsRef<str>>(
    a: &Schema,
    keys: impl IntoIterator<Item = K>,
) -> Result<Schema, SchemaError> {
    let shape = shape_of(a, "omit")?;

    let mut fields = shape.fields().clone();
    for key in keys {
        let key = key.as_ref();
        unknown_key(shape, key)?;
        fields.shift_remove(key);
    }

    tracing::debug!(
        operation = "omit",
        fields = fields.len(),
        "derived object schema"
    );
    Ok(rebuild(a, shape, fields))
}

/// Makes every field optional, one level deep.
pub fn partial(a: &Schema) -> Result<Schema, SchemaError> {
    let shape = shape_of(a, "partial")?;

    let fields: IndexMap<String, Schema> = shape
        .iter()
        .map(|(name, schema)| (name.clone(), make_optional(schema.clone())))
        .collect();

    tracing::debug!(
        operation = "partial",
        fields = fields.len(),
        "derived object schema"
    );
    Ok(rebuild(a, shape, fields))
}

/// Makes every field optional, recursing into nested objects, arrays,
/// tuples and optional/nullable wrappers.
pub fn deep_partial(a: &Schema) -> Result<Schema, SchemaError> {
    shape_of(a, "deep_partial")?;
    let derived = deepen(a);
    tracing::debug!(
        operation = "deep_partial",
        fields = derived.shape().map_or(0, ObjectShape::len),
        "derived object schema"
    );
    Ok(derived)
}

fn make_optional(schema: Schema) -> Schema {
    if matches!(schema.kind(), SchemaKind::Optional(_)) {
        schema
    } else {
        schema.optional()
    }
}

fn deepen(schema: &Schema) -> Schema {
    match schema.kind() {
        SchemaKind::Object(shape) => {
            let fields = shape
                .iter()
                .map(|(name, field)| (name.clone(), make_optional(deepen(field))))
                .collect();
            rebuild(schema, shape, fields)
        }
        SchemaKind::Array(element) => schema.with_kind(SchemaKind::Array(deepen(element))),
        SchemaKind::Tuple { items, rest } => schema.with_kind(SchemaKind::Tuple {
            items: items.iter().map(deepen).collect(),
            rest: rest.as_ref().map(deepen),
        }),
        SchemaKind::Optional(inner) => schema.with_kind(SchemaKind::Optional(deepen(inner))),
        SchemaKind::Nullable(inner) => schema.with_kind(SchemaKind::Nullable(deepen(inner))),
        _ => schema.clone(),
    }
}

// ============================================================================
// SCHEMA METHODS
// ============================================================================

impl Schema {
    /// See [`merge`].
    pub fn merge(&self, other: &Schema) -> Result<Schema, SchemaError> {
        merge(self, other)
    }

    /// See [`extend`].
    pub fn extend<K: Into<String>>(
        &self,
        fields: impl IntoIterator<Item = (K, Schema)>,
    ) -> Result<Schema, SchemaError> {
        extend(self, fields)
    }

    /// See [`pick`].
    pub fn pick<K: AsRef<str>>(
        &self,
        keys: impl IntoIterator<Item = K>,
    ) -> Result<Schema, SchemaError> {
        pick(self, keys)
    }

    /// See [`omit`].
    pub fn omit<K: AsRef<str>>(
        &self,
        keys: impl IntoIterator<Item = K>,
    ) -> Result<Schema, SchemaError> {
        omit(self, keys)
    }

    /// See [`partial`].
    pub fn partial(&self) -> Result<Schema, SchemaError> {
        partial(self)
    }

    /// See [`deep_partial`].
    pub fn deep_partial(&self) -> Result<Schema, SchemaError> {
        deep_partial(self)
    }
}
