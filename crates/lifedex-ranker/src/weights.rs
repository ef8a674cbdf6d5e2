//! Category weight vector for composite ranking.
//! See ARCHITECTURE.md §3.3.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use lifedex_common::{EngineState, LifedexError, Result};

/// Non-negative weight per category name. Weights need not sum to 1; only
/// their ratios matter for the resulting order. Categories absent from the
/// map weigh 0.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategoryWeights {
    weights: BTreeMap<String, f64>,
}

impl CategoryWeights {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style weight assignment.
    pub fn with(mut self, category: &str, weight: f64) -> Self {
        self.weights.insert(category.to_string(), weight);
        self
    }

    /// Copy the weights out of a caller-owned [`EngineState`].
    pub fn from_state(state: &EngineState) -> Self {
        let mut weights = Self::new();
        for (category, weight) in &state.weights {
            weights.weights.insert(category.clone(), *weight);
        }
        weights
    }

    pub fn set(&mut self, category: &str, weight: f64) {
        self.weights.insert(category.to_string(), weight);
    }

    pub fn get(&self, category: &str) -> f64 {
        self.weights.get(category).copied().unwrap_or(0.0)
    }

    /// Reject negative or non-finite weights.
    pub fn validate(&self) -> Result<()> {
        for (category, weight) in &self.weights {
            if !weight.is_finite() || *weight < 0.0 {
                return Err(LifedexError::Config(format!(
                    "weight for '{category}' must be a non-negative number, got {weight}"
                )));
            }
        }
        Ok(())
    }

    pub fn total(&self) -> f64 {
        self.weights.values().sum()
    }

    /// True when no category carries any weight (initial UI state, or the
    /// user reset every slider). Ranking falls back to the default category.
    pub fn is_all_zero(&self) -> bool {
        self.weights.values().all(|w| *w == 0.0)
    }

    /// Rescale so the weights sum to 1.0. No-op when all weights are zero.
    pub fn normalise(&mut self) {
        let total = self.total();
        if total > 0.0 {
            for weight in self.weights.values_mut() {
                *weight /= total;
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.weights.iter().map(|(k, v)| (k.as_str(), *v))
    }
}
