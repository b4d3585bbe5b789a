//! Constraints attached to string, number, array and set schemas.
//!
//! A check measures one quantity of an already structurally valid value
//! (character count, numeric value, element count) and compares it against
//! a bound. Checks never short-circuit each other.

use crate::error::{IssueCode, SchemaError};

/// A single bound on a measured quantity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Check {
    /// Inclusive lower bound.
    Min(f64),
    /// Inclusive upper bound.
    Max(f64),
    /// Exclusive lower bound.
    Gt(f64),
    /// Exclusive upper bound.
    Lt(f64),
    /// At least one character / element.
    NonEmpty,
}

/// What a check measures on a given schema kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Measure {
    /// Characters of a string.
    Length,
    /// The number itself.
    Value,
    /// Elements of an array or set.
    Size,
}

impl Check {
    /// Builder-facing name, used in configuration errors.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Min(_) => "min",
            Self::Max(_) => "max",
            Self::Gt(_) => "gt",
            Self::Lt(_) => "lt",
            Self::NonEmpty => "nonempty",
        }
    }

    fn bound(&self) -> Option<f64> {
        match self {
            Self::Min(b) | Self::Max(b) | Self::Gt(b) | Self::Lt(b) => Some(*b),
            Self::NonEmpty => None,
        }
    }

    /// Rejects bounds that can never be meaningfully compared.
    pub(crate) fn validate_bound(&self, measure: Measure) -> Result<(), SchemaError> {
        let Some(bound) = self.bound() else {
            return if measure == Measure::Value {
                Err(SchemaError::IncompatibleConstraint {
                    constraint: self.name(),
                    kind: "number",
                })
            } else {
                Ok(())
            };
        };

        if !bound.is_finite() {
            return Err(SchemaError::InvalidBound {
                constraint: self.name(),
                reason: format!("{bound} is not a finite number"),
            });
        }
        if measure != Measure::Value && (bound < 0.0 || bound.fract() != 0.0) {
            return Err(SchemaError::InvalidBound {
                constraint: self.name(),
                reason: format!("{bound} is not a non-negative whole number"),
            });
        }
        Ok(())
    }

    /// Returns the issue for `measured`, or `None` when the bound holds.
    pub(crate) fn violation(&self, measured: f64, measure: Measure) -> Option<(IssueCode, String)> {
        let holds = match self {
            Self::Min(b) => measured >= *b,
            Self::Max(b) => measured <= *b,
            Self::Gt(b) => measured > *b,
            Self::Lt(b) => measured < *b,
            Self::NonEmpty => measured >= 1.0,
        };
        if holds {
            return None;
        }

        let code = match self {
            Self::Min(_) | Self::Gt(_) | Self::NonEmpty => IssueCode::TooSmall,
            Self::Max(_) | Self::Lt(_) => IssueCode::TooBig,
        };
        Some((code, self.message(measure)))
    }

    fn message(&self, measure: Measure) -> String {
        let unit = match measure {
            Measure::Length => "character(s)",
            Measure::Size => "element(s)",
            Measure::Value => {
                return match self {
                    Self::Min(b) => format!("must be greater than or equal to {b}"),
                    Self::Max(b) => format!("must be less than or equal to {b}"),
                    Self::Gt(b) => format!("must be greater than {b}"),
                    Self::Lt(b) => format!("must be less than {b}"),
                    Self::NonEmpty => "must not be empty".to_owned(),
                };
            }
        };
        match self {
            Self::Min(b) => format!("must contain at least {b} {unit}"),
            Self::Max(b) => format!("must contain at most {b} {unit}"),
            Self::Gt(b) => format!("must contain more than {b} {unit}"),
            Self::Lt(b) => format!("must contain fewer than {b} {unit}"),
            Self::NonEmpty => format!("must contain at least 1 {unit}"),
        }
    }
}
