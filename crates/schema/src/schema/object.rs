use indexmap::IndexMap;

use super::Schema;
use crate::options::UnknownKeys;

/// Declared fields of an object schema, in declaration order.
#[derive(Debug, Clone, Default)]
pub struct ObjectShape {
    fields: IndexMap<String, Schema>,
    unknown_keys: UnknownKeys,
}

impl ObjectShape {
    pub(crate) fn new(fields: IndexMap<String, Schema>, unknown_keys: UnknownKeys) -> Self {
        Self {
            fields,
            unknown_keys,
        }
    }

    pub(crate) fn with_policy(&self, unknown_keys: UnknownKeys) -> Self {
        Self {
            fields: self.fields.clone(),
            unknown_keys,
        }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Schema> {
        self.fields.get(name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Fields in declaration order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Schema> {
        self.fields.iter()
    }

    /// Field names in declaration order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    #[must_use]
    pub fn unknown_keys(&self) -> UnknownKeys {
        self.unknown_keys
    }

    /// Names of fields that may be absent from the input.
    pub fn optional_keys(&self) -> impl Iterator<Item = &str> {
        self.fields
            .iter()
            .filter(|(_, schema)| schema.accepts_absent())
            .map(|(name, _)| name.as_str())
    }

    pub(crate) fn fields(&self) -> &IndexMap<String, Schema> {
        &self.fields
    }
}

impl<'a> IntoIterator for &'a ObjectShape {
    type Item = (&'a String, &'a Schema);
    type IntoIter = indexmap::map::Iter<'a, String, Schema>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}
