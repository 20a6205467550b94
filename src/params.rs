// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Request parameters the scorer reads.
//!
//! | Name          | Effect                                                  |
//! |---------------|---------------------------------------------------------|
//! | `q`           | compound `field:value` strings for the reference product|
//! | `wg.f`        | fields that receive the stepped similarity bonus        |
//! | `sub.<field>` | maximum difference for `<field>`; enables its scoring   |

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Compound reference-product query.
pub const QUERY_PARAM: &str = "q";

/// Weighted-bonus field list.
pub const WEIGHTED_FIELDS_PARAM: &str = "wg.f";

/// Prefix of the per-field tolerance parameters.
pub const TOLERANCE_PREFIX: &str = "sub.";

/// `sub.<field>`.
pub fn tolerance_param(field: &str) -> String {
    format!("{TOLERANCE_PREFIX}{field}")
}

/// Multi-valued request parameter lookup provided by the host.
pub trait RequestParams {
    /// Every value given for `name`, in request order. `None` when absent.
    fn get_params(&self, name: &str) -> Option<&[String]>;

    /// First value given for `name`.
    fn get(&self, name: &str) -> Option<&str> {
        self.get_params(name)
            .and_then(|values| values.first())
            .map(String::as_str)
    }
}

impl<P: RequestParams + ?Sized> RequestParams for &P {
    fn get_params(&self, name: &str) -> Option<&[String]> {
        (**self).get_params(name)
    }
}

/// In-memory parameters, deserializable from `{"name": ["value", ...]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParamMap {
    params: BTreeMap<String, Vec<String>>,
}

impl ParamMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a value to `name`.
    pub fn add(&mut self, name: &str, value: &str) -> &mut Self {
        self.params
            .entry(name.to_string())
            .or_default()
            .push(value.to_string());
        self
    }

    /// Builder form of [`ParamMap::add`].
    pub fn with(mut self, name: &str, value: &str) -> Self {
        self.add(name, value);
        self
    }

    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl<'a> FromIterator<(&'a str, &'a str)> for ParamMap {
    fn from_iter<I: IntoIterator<Item = (&'a str, &'a str)>>(iter: I) -> Self {
        let mut params = ParamMap::new();
        for (name, value) in iter {
            params.add(name, value);
        }
        params
    }
}

impl RequestParams for ParamMap {
    fn get_params(&self, name: &str) -> Option<&[String]> {
        self.params.get(name).map(Vec::as_slice)
    }
}
