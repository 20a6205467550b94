// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Error types, split by blast radius.
//!
//! | Type          | Raised by                         | Effect                         |
//! |---------------|-----------------------------------|--------------------------------|
//! | `ConfigError` | plan construction, config loading | aborts scoring for the query   |
//! | `FieldError`  | per-field similarity evaluation   | voids one field of one document|
//! | `ValueError`  | value coercions                   | wrapped into one of the above  |
//!
//! A `FieldError` never aborts a query. It exists so that "the candidate's
//! value didn't match" and "the candidate's value was garbage" stay
//! distinguishable in explanations and logs.

use thiserror::Error;

/// Fatal, per-query configuration error.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A `sub.<field>` parameter is not a finite, non-negative number.
    #[error("invalid tolerance for field '{field}': '{value}'")]
    InvalidTolerance { field: String, value: String },
    /// The host rejected the wrapped sub-query text.
    #[error("error parsing query: {0}")]
    SubQuery(String),
    /// A scoring config failed to deserialize or validate.
    #[error("invalid scoring config: {0}")]
    InvalidConfig(String),
    /// A scoring config file could not be read.
    #[error("failed to read scoring config: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::InvalidConfig(err.to_string())
    }
}

/// A single field of a single document could not be evaluated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    /// The reference or candidate value of a numeric field is not a number.
    #[error("invalid numeric field '{field}': '{value}'")]
    InvalidNumericField { field: String, value: String },
    /// The reference value is an id list where a scalar was required.
    #[error("field '{field}' expected a scalar reference value")]
    NotScalar { field: String },
}

/// A tagged value was coerced to the wrong shape.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueError {
    #[error("expected a scalar value, found an id list")]
    NotScalar,
    #[error("expected an id list, found a scalar value")]
    NotIdList,
    #[error("'{0}' is not a finite number")]
    NotNumeric(String),
}

impl FieldError {
    /// Attach a field name to a coercion failure.
    pub fn from_value(field: &str, err: ValueError) -> Self {
        match err {
            ValueError::NotNumeric(value) => FieldError::InvalidNumericField {
                field: field.to_string(),
                value,
            },
            ValueError::NotScalar | ValueError::NotIdList => FieldError::NotScalar {
                field: field.to_string(),
            },
        }
    }

    /// Name of the field that failed.
    pub fn field(&self) -> &str {
        match self {
            FieldError::InvalidNumericField { field, .. } | FieldError::NotScalar { field } => field,
        }
    }
}
