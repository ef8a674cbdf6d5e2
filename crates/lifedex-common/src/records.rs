/// Core record types shared by the dataset loader and the scoring engine.
/// Rust representations of one CSV row and one category definition.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::region::Region;

// ---------------------------------------------------------------------------
// Country record
// ---------------------------------------------------------------------------

/// One row of the dataset: a country, or an aggregate pseudo-row such as
/// "OECD - Total".
///
/// Indicator cells that were empty or unparseable are `None`, never 0 —
/// see ARCHITECTURE.md §2.2.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountryRecord {
    /// Unique row key (the `Country` column, trimmed).
    pub name: String,
    /// Flag emoji; empty string when the dataset has no `Flag` column.
    pub flag: String,
    pub population: Option<f64>,
    /// Indicator column name (trimmed) → parsed value.
    pub indicators: HashMap<String, Option<f64>>,
    /// True for aggregate pseudo-rows; these never contribute to
    /// normalisation extents or cross-country averages.
    pub is_aggregate: bool,
    pub region: Region,
}

impl CountryRecord {
    /// Look up a single indicator value, flattening "column absent" and
    /// "cell empty" into one `None`.
    pub fn indicator(&self, name: &str) -> Option<f64> {
        self.indicators.get(name).copied().flatten()
    }

    /// True when every indicator cell is missing.
    pub fn is_all_null(&self) -> bool {
        self.indicators.values().all(|v| v.is_none())
    }
}

// ---------------------------------------------------------------------------
// Category definition
// ---------------------------------------------------------------------------

/// A named group of indicator columns, e.g. Income = {household income,
/// household net wealth}. Member order matters only for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryDefinition {
    pub name: String,
    pub indicators: Vec<String>,
}

impl CategoryDefinition {
    pub fn new(name: &str, indicators: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            indicators: indicators.iter().map(|s| s.to_string()).collect(),
        }
    }
}
