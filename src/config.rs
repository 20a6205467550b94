// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Scoring constants, passed explicitly into weight allocation.
//!
//! The defaults reproduce the production weight split:
//!
//! | Field            | Weight | Kind   |
//! |------------------|--------|--------|
//! | `fillers`        | 15     | fixed  |
//! | `fillersContent` | 15     | fixed  |
//! | `rep_mfr`        | 20     | custom |
//! | `rep_mvr`        | 20     | custom |
//! | `rep_density`    | 10     | custom |
//! | generic fields   | 20     | shared |
//!
//! Fixed and custom weights sum to 80 and the generic budget adds 20, for a
//! 100-point scale. The stepped bonus budget (100) and the identity boost sit
//! on top of that scale.
//!
//! A config can also come from JSON:
//!
//! ```json
//! {
//!   "weights": {
//!     "base": [{"field": "fillers", "weight": 15.0}, {"field": "rep_mfr", "weight": 20.0}],
//!     "custom_fields": ["rep_mfr"],
//!     "generic_budget": 20.0
//!   },
//!   "bonus_budget": 100.0
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::{FILLERS_CONTENT_FIELD, FILLERS_FIELD};

// =============================================================================
// DEFAULT CONSTANTS
// =============================================================================

pub const DEFAULT_FILLERS_WEIGHT: f64 = 15.0;
pub const DEFAULT_FILLERS_CONTENT_WEIGHT: f64 = 15.0;
pub const DEFAULT_MFR_WEIGHT: f64 = 20.0;
pub const DEFAULT_MVR_WEIGHT: f64 = 20.0;
pub const DEFAULT_DENSITY_WEIGHT: f64 = 10.0;

/// Points split evenly across tolerance fields outside the base table.
pub const DEFAULT_GENERIC_BUDGET: f64 = 20.0;

/// Points split evenly across `wg.f` fields for the stepped bonus.
pub const DEFAULT_BONUS_BUDGET: f64 = 100.0;

/// Custom fields, in elimination order.
pub const DEFAULT_CUSTOM_FIELDS: [&str; 3] = ["rep_mfr", "rep_mvr", "rep_density"];

/// One base-table entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldWeight {
    pub field: String,
    pub weight: f64,
}

impl FieldWeight {
    pub fn new(field: &str, weight: f64) -> Self {
        Self {
            field: field.to_string(),
            weight,
        }
    }
}

/// Base weights plus the rules for redistributing them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeightTable {
    /// Starting weights, in evaluation order.
    pub base: Vec<FieldWeight>,
    /// Base fields dropped (and their weight redistributed) when the query
    /// gives them no tolerance. Base fields not listed here are fixed.
    pub custom_fields: Vec<String>,
    /// Budget shared by every other tolerance field.
    pub generic_budget: f64,
}

impl Default for WeightTable {
    fn default() -> Self {
        Self {
            base: vec![
                FieldWeight::new(FILLERS_FIELD, DEFAULT_FILLERS_WEIGHT),
                FieldWeight::new(FILLERS_CONTENT_FIELD, DEFAULT_FILLERS_CONTENT_WEIGHT),
                FieldWeight::new(DEFAULT_CUSTOM_FIELDS[0], DEFAULT_MFR_WEIGHT),
                FieldWeight::new(DEFAULT_CUSTOM_FIELDS[1], DEFAULT_MVR_WEIGHT),
                FieldWeight::new(DEFAULT_CUSTOM_FIELDS[2], DEFAULT_DENSITY_WEIGHT),
            ],
            custom_fields: DEFAULT_CUSTOM_FIELDS.iter().map(|f| f.to_string()).collect(),
            generic_budget: DEFAULT_GENERIC_BUDGET,
        }
    }
}

impl WeightTable {
    pub fn base_weight(&self, field: &str) -> Option<f64> {
        self.base.iter().find(|fw| fw.field == field).map(|fw| fw.weight)
    }

    pub fn is_custom(&self, field: &str) -> bool {
        self.custom_fields.iter().any(|f| f == field)
    }

    /// In the base table and never eliminated.
    pub fn is_fixed(&self, field: &str) -> bool {
        !self.is_custom(field) && self.base_weight(field).is_some()
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for fw in &self.base {
            check_budget(&format!("weight of '{}'", fw.field), fw.weight)?;
        }
        for (i, fw) in self.base.iter().enumerate() {
            if self.base[..i].iter().any(|prev| prev.field == fw.field) {
                return Err(ConfigError::InvalidConfig(format!(
                    "duplicate base field '{}'",
                    fw.field
                )));
            }
        }
        // fillersContent reads the flag fillers sets, so fillers must be seen first
        let position = |name: &str| self.base.iter().position(|fw| fw.field == name);
        if let (Some(fillers), Some(content)) =
            (position(FILLERS_FIELD), position(FILLERS_CONTENT_FIELD))
        {
            if content < fillers {
                return Err(ConfigError::InvalidConfig(format!(
                    "'{}' must come after '{}' in the base table",
                    FILLERS_CONTENT_FIELD, FILLERS_FIELD
                )));
            }
        }
        for field in &self.custom_fields {
            if self.base_weight(field).is_none() {
                return Err(ConfigError::InvalidConfig(format!(
                    "custom field '{}' has no base weight",
                    field
                )));
            }
        }
        check_budget("generic_budget", self.generic_budget)
    }
}

/// Everything tunable about the scoring formula.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub weights: WeightTable,
    /// Split evenly across the weighted-bonus fields of a query.
    pub bonus_budget: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            weights: WeightTable::default(),
            bonus_budget: DEFAULT_BONUS_BUDGET,
        }
    }
}

impl ScoringConfig {
    /// Parse and validate a JSON config. Missing keys take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: ScoringConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.weights.validate()?;
        check_budget("bonus_budget", self.bonus_budget)
    }
}

fn check_budget(what: &str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidConfig(format!(
            "{} must be finite and non-negative, got {}",
            what, value
        )))
    }
}
