//! Caller-owned engine state.
//!
//! The view layer owns one `EngineState` and threads it through each
//! recomputation. Nothing in the engine holds state between calls, so two
//! independently-rendered views can never observe different weight sets.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineState {
    /// Non-negative weight per category name. Absent categories weigh 0.
    #[serde(default)]
    pub weights: HashMap<String, f64>,

    /// Country currently highlighted across views, if any. The engine does
    /// not read this; it rides along for cross-view continuity.
    #[serde(default)]
    pub selected_country: Option<String>,
}

impl EngineState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style weight assignment.
    pub fn with_weight(mut self, category: &str, weight: f64) -> Self {
        self.weights.insert(category.to_string(), weight);
        self
    }

    pub fn set_weight(&mut self, category: &str, weight: f64) {
        self.weights.insert(category.to_string(), weight);
    }

    pub fn select(&mut self, country: Option<&str>) {
        self.selected_country = country.map(|c| c.to_string());
    }
}
