// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Read-only access to candidate documents.
//!
//! The host engine owns storage. All the scorer needs is "what is stored in
//! field X of document N", answered as a string, a number, or nothing. That
//! question is the `DocumentReader` trait. `MemorySegment` answers it from
//! memory for tests, benches, and hosts that materialize hits up front.

use std::borrow::Cow;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::ValueError;
use crate::types::parse_finite;

/// Segment-local document number, as handed out by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(transparent)]
pub struct DocId(pub u32);

impl From<u32> for DocId {
    fn from(id: u32) -> Self {
        DocId(id)
    }
}

/// A stored field value, borrowed from the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    Str(&'a str),
    Num(f64),
}

impl FieldValue<'_> {
    /// Categorical equality against a reference string.
    ///
    /// Numeric values compare by parsed value, so a stored `5` equals a
    /// reference of `"5"` or `"5.0"`.
    pub fn equals_str(&self, reference: &str) -> bool {
        match *self {
            FieldValue::Str(value) => value == reference,
            FieldValue::Num(value) => parse_finite(reference).is_ok_and(|r| r == value),
        }
    }

    pub fn to_number(&self) -> Result<f64, ValueError> {
        match *self {
            FieldValue::Str(value) => parse_finite(value),
            FieldValue::Num(value) if value.is_finite() => Ok(value),
            FieldValue::Num(value) => Err(ValueError::NotNumeric(value.to_string())),
        }
    }

    /// String form used for identity comparison.
    pub fn to_id_string(&self) -> Cow<'_, str> {
        match *self {
            FieldValue::Str(value) => Cow::Borrowed(value),
            FieldValue::Num(value) => Cow::Owned(value.to_string()),
        }
    }
}

/// Per-segment stored-field lookup.
///
/// Implementations are called concurrently from scoring threads, one
/// provider per segment, and must not mutate shared state.
pub trait DocumentReader {
    /// The value stored in `field` for `doc`, or `None` when not stored.
    fn field(&self, doc: DocId, field: &str) -> Option<FieldValue<'_>>;
}

impl<R: DocumentReader + ?Sized> DocumentReader for &R {
    fn field(&self, doc: DocId, field: &str) -> Option<FieldValue<'_>> {
        (**self).field(doc, field)
    }
}

// =============================================================================
// IN-MEMORY SEGMENT
// =============================================================================

/// Owned stored value, as it appears in JSON fixtures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StoredValue {
    Num(f64),
    Str(String),
}

impl StoredValue {
    fn as_field_value(&self) -> FieldValue<'_> {
        match self {
            StoredValue::Num(value) => FieldValue::Num(*value),
            StoredValue::Str(value) => FieldValue::Str(value),
        }
    }
}

/// One stored document: field name to value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemoryDocument {
    fields: BTreeMap<String, StoredValue>,
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_str(mut self, field: &str, value: &str) -> Self {
        self.fields
            .insert(field.to_string(), StoredValue::Str(value.to_string()));
        self
    }

    pub fn with_num(mut self, field: &str, value: f64) -> Self {
        self.fields.insert(field.to_string(), StoredValue::Num(value));
        self
    }

    pub fn get(&self, field: &str) -> Option<FieldValue<'_>> {
        self.fields.get(field).map(StoredValue::as_field_value)
    }
}

/// A segment held in memory. `DocId(n)` is the n-th document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemorySegment {
    docs: Vec<MemoryDocument>,
}

impl MemorySegment {
    pub fn new(docs: Vec<MemoryDocument>) -> Self {
        Self { docs }
    }

    /// Load a segment from a JSON array of flat objects.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    /// All document ids in this segment, in storage order.
    pub fn doc_ids(&self) -> impl Iterator<Item = DocId> {
        (0..self.docs.len() as u32).map(DocId)
    }
}

impl DocumentReader for MemorySegment {
    fn field(&self, doc: DocId, field: &str) -> Option<FieldValue<'_>> {
        self.docs.get(doc.0 as usize)?.get(field)
    }
}
