// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The per-query data model.
//!
//! Everything here is built once when a query arrives and then only read.
//! Mutating methods are crate-private so that a map handed to a caller is
//! frozen for the rest of the query.
//!
//! | Type                | Holds                                      |
//! |---------------------|--------------------------------------------|
//! | `QueryAttributeMap` | reference product attributes, plus `id`    |
//! | `ToleranceMap`      | `sub.<field>` maximum differences          |
//! | `WeightMap`         | point budget per tolerance-scored field    |
//! | `WeightedFieldSet`  | fields nominated for the stepped bonus     |
//!
//! # Invariants
//!
//! - **FieldMap**: keys are unique and keep first-insertion order. Re-inserting
//!   a key replaces its value in place.
//! - **QueryAttributeMap**: the `id` key, when present, always holds
//!   `QueryValue::Ids`. Every other key holds `QueryValue::Scalar`.
//! - **ToleranceMap**: every value is finite and `>= 0`.

use serde::{Deserialize, Serialize};

use crate::error::ValueError;

// =============================================================================
// FIELD NAMES WITH FIXED MEANING
// =============================================================================

/// Reserved field whose query occurrences accumulate into an id list.
pub const ID_FIELD: &str = "id";

/// Categorical filler field. A match here unlocks `fillersContent`.
pub const FILLERS_FIELD: &str = "fillers";

/// Categorical filler-content field, only scored after a `fillers` match.
pub const FILLERS_CONTENT_FIELD: &str = "fillersContent";

/// Numeric field compared by exact equality only.
pub const EXACT_NUMERIC_FIELD: &str = "rep_fr";

/// Prefix marking numeric fields scored by linear decay.
pub const NUMERIC_PREFIX: &str = "rep_";

// =============================================================================
// QUERY VALUES
// =============================================================================

/// One `id:<identifier>[^multiplier]` occurrence from the query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdBoost {
    pub id: String,
    /// Defaults to 1 when the token had no `^` suffix.
    pub multiplier: f64,
}

impl IdBoost {
    pub fn new(id: impl Into<String>, multiplier: f64) -> Self {
        Self {
            id: id.into(),
            multiplier,
        }
    }
}

/// A reference value: a plain scalar, or the accumulated id list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QueryValue {
    Scalar(String),
    Ids(Vec<IdBoost>),
}

impl QueryValue {
    pub fn as_scalar(&self) -> Result<&str, ValueError> {
        match self {
            QueryValue::Scalar(value) => Ok(value),
            QueryValue::Ids(_) => Err(ValueError::NotScalar),
        }
    }

    pub fn as_ids(&self) -> Result<&[IdBoost], ValueError> {
        match self {
            QueryValue::Ids(ids) => Ok(ids),
            QueryValue::Scalar(_) => Err(ValueError::NotIdList),
        }
    }

    /// Parse the scalar as a finite `f64`. Surrounding whitespace is ignored.
    pub fn as_number(&self) -> Result<f64, ValueError> {
        parse_finite(self.as_scalar()?)
    }
}

/// Parse a finite number. `NaN` and infinities are rejected.
pub fn parse_finite(raw: &str) -> Result<f64, ValueError> {
    match raw.trim().parse::<f64>() {
        Ok(n) if n.is_finite() => Ok(n),
        _ => Err(ValueError::NotNumeric(raw.to_string())),
    }
}

// =============================================================================
// ORDERED FIELD MAP
// =============================================================================

/// Small insertion-ordered map keyed by field name.
///
/// Queries carry a handful of fields, so a vector beats hashing and gives a
/// deterministic iteration order, which keeps floating-point sums
/// reproducible across runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldMap<V> {
    entries: Vec<(String, V)>,
}

impl<V> Default for FieldMap<V> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<V> FieldMap<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: &str) -> Option<&V> {
        self.entries
            .iter()
            .find(|(key, _)| key == field)
            .map(|(_, value)| value)
    }

    pub fn contains_key(&self, field: &str) -> bool {
        self.entries.iter().any(|(key, _)| key == field)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Insert or replace. A replaced key keeps its original position.
    pub(crate) fn insert(&mut self, field: impl Into<String>, value: V) {
        let field = field.into();
        match self.entries.iter_mut().find(|(key, _)| *key == field) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((field, value)),
        }
    }

    pub(crate) fn remove(&mut self, field: &str) -> Option<V> {
        let position = self.entries.iter().position(|(key, _)| key == field)?;
        Some(self.entries.remove(position).1)
    }

    pub(crate) fn values_mut(&mut self) -> impl Iterator<Item = &mut V> {
        self.entries.iter_mut().map(|(_, value)| value)
    }
}

impl<K: Into<String>, V> FromIterator<(K, V)> for FieldMap<V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = FieldMap::new();
        for (key, value) in iter {
            map.insert(key, value);
        }
        map
    }
}

/// Reference product attributes parsed from the `q` parameter.
pub type QueryAttributeMap = FieldMap<QueryValue>;

/// Maximum allowed difference per field, from `sub.<field>`.
pub type ToleranceMap = FieldMap<f64>;

/// Score weight per field. Sums to 100 when every budget is in play.
pub type WeightMap = FieldMap<f64>;

impl FieldMap<QueryValue> {
    /// Set a scalar attribute. Later values for the same field win.
    pub(crate) fn insert_scalar(&mut self, field: &str, value: String) {
        debug_assert_ne!(field, ID_FIELD, "id values must go through push_id");
        self.insert(field, QueryValue::Scalar(value));
    }

    /// Append to the `id` list, creating it on first use.
    pub(crate) fn push_id(&mut self, boost: IdBoost) {
        match self.entries.iter_mut().find(|(key, _)| *key == ID_FIELD) {
            Some((_, QueryValue::Ids(ids))) => ids.push(boost),
            Some((_, slot)) => *slot = QueryValue::Ids(vec![boost]),
            None => self
                .entries
                .push((ID_FIELD.to_string(), QueryValue::Ids(vec![boost]))),
        }
    }

    /// The accumulated `id` list, if the query named any ids.
    pub fn ids(&self) -> Option<&[IdBoost]> {
        self.get(ID_FIELD).and_then(|value| value.as_ids().ok())
    }
}

impl FieldMap<f64> {
    /// Sum of all values in insertion order.
    pub fn total(&self) -> f64 {
        self.entries.iter().fold(0.0, |acc, (_, value)| acc + value)
    }
}

// =============================================================================
// WEIGHTED FIELD SET
// =============================================================================

/// Fields nominated through `wg.f` for the stepped similarity bonus.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeightedFieldSet {
    fields: Vec<String>,
}

impl WeightedFieldSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field. Duplicates are ignored, first occurrence keeps its slot.
    pub(crate) fn insert(&mut self, field: &str) {
        if !self.contains(field) {
            self.fields.push(field.to_string());
        }
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.iter().any(|f| f == field)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(String::as_str)
    }
}

impl<'a> FromIterator<&'a str> for WeightedFieldSet {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut set = WeightedFieldSet::new();
        for field in iter {
            set.insert(field);
        }
        set
    }
}
