// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Compound query tokenizer.
//!
//! A `q` value looks like `rep_mfr:5 fillers:"glass" id:PA66^2 id:PA6`.
//! Every whitespace-separated token with a colon becomes one attribute. The
//! parser is lenient: a bad token is skipped and reported, and the rest of the
//! query still counts. A reference product with one typo should still find
//! alternatives.
//!
//! Splitting follows the classic `split(":")` shape: the field is the first
//! segment, the value is the second, anything after a further colon is
//! dropped, and trailing colons count as no value at all.

use std::fmt;

use tracing::debug;

use crate::types::{parse_finite, IdBoost, QueryAttributeMap, ID_FIELD};

/// Why a token was left out of the attribute map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// No `field:value` separator.
    MissingColon,
    /// Nothing before the colon.
    EmptyField,
    /// Nothing after the colon.
    MissingValue,
    /// An `id` token whose `^multiplier` is not a finite number.
    InvalidBoost(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::MissingColon => write!(f, "missing ':'"),
            SkipReason::EmptyField => write!(f, "empty field name"),
            SkipReason::MissingValue => write!(f, "missing value"),
            SkipReason::InvalidBoost(raw) => write!(f, "invalid boost multiplier '{}'", raw),
        }
    }
}

/// A token the parser gave up on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedToken {
    pub token: String,
    pub reason: SkipReason,
}

enum Token<'a> {
    Attribute { field: &'a str, value: String },
    Id(IdBoost),
}

/// Parse the `q` values into an attribute map, logging skipped tokens.
pub fn parse_query<S: AsRef<str>>(inputs: &[S]) -> QueryAttributeMap {
    parse_query_with(inputs, |skipped| {
        debug!(token = %skipped.token, reason = %skipped.reason, "skipping query token");
    })
}

/// Parse the `q` values, handing every skipped token to `on_skip`.
pub fn parse_query_with<S, F>(inputs: &[S], mut on_skip: F) -> QueryAttributeMap
where
    S: AsRef<str>,
    F: FnMut(SkippedToken),
{
    let mut attributes = QueryAttributeMap::new();

    for input in inputs {
        for raw in input.as_ref().split_whitespace() {
            match parse_token(raw) {
                Ok(Token::Attribute { field, value }) => attributes.insert_scalar(field, value),
                Ok(Token::Id(boost)) => attributes.push_id(boost),
                Err(reason) => on_skip(SkippedToken {
                    token: raw.to_string(),
                    reason,
                }),
            }
        }
    }

    attributes
}

fn parse_token(raw: &str) -> Result<Token<'_>, SkipReason> {
    if !raw.contains(':') {
        return Err(SkipReason::MissingColon);
    }

    let mut segments = raw.trim_end_matches(':').split(':');
    let field = segments.next().unwrap_or_default();
    let value = segments.next().ok_or(SkipReason::MissingValue)?;
    if field.is_empty() {
        return Err(SkipReason::EmptyField);
    }

    let value = value.replace('"', "");
    if field == ID_FIELD {
        parse_id_boost(&value).map(Token::Id)
    } else {
        Ok(Token::Attribute { field, value })
    }
}

/// Parse `identifier[^multiplier]`. The multiplier defaults to 1.
pub fn parse_id_boost(value: &str) -> Result<IdBoost, SkipReason> {
    let mut parts = value.split('^');
    let id = parts.next().unwrap_or_default();

    match parts.next() {
        None => Ok(IdBoost::new(id, 1.0)),
        Some(raw) => parse_finite(raw)
            .map(|multiplier| IdBoost::new(id, multiplier))
            .map_err(|_| SkipReason::InvalidBoost(raw.to_string())),
    }
}
