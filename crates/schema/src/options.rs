//! Per-call validation options.
//!
//! Options are plain data so they can be loaded alongside the rest of an
//! application's configuration:
//!
//! ```
//! use contour_schema::{UnknownKeys, ValidateOptions};
//!
//! let options = ValidateOptions::from_json(r#"{"unknown_keys": "strict"}"#).unwrap();
//! assert_eq!(options.unknown_keys, Some(UnknownKeys::Strict));
//! ```

use serde::{Deserialize, Serialize};

/// What an object schema does with input keys it does not declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownKeys {
    /// Drop unknown keys from the normalized output.
    #[default]
    Strip,
    /// Report unknown keys as an `unrecognized_keys` issue.
    Strict,
    /// Copy unknown keys to the output without validating them.
    Passthrough,
}

/// Options for a [`Validator`](crate::Validator).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidateOptions {
    /// Overrides the unknown-key policy of every object schema when set.
    pub unknown_keys: Option<UnknownKeys>,
}

impl ValidateOptions {
    /// Default options: each object keeps its own policy.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Forces one unknown-key policy on every object.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_unknown_keys(mut self, policy: UnknownKeys) -> Self {
        self.unknown_keys = Some(policy);
        self
    }

    /// Reads options from a JSON document; missing fields take defaults.
    pub fn from_json(input: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(input)
    }

    pub(crate) fn policy_for(&self, declared: UnknownKeys) -> UnknownKeys {
        self.unknown_keys.unwrap_or(declared)
    }
}
