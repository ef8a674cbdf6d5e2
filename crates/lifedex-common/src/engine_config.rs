//! Engine configuration: category definitions, score scale, and ranking
//! fallback.
//!
//! Consumers can override the built-in Better Life Index categories via a
//! YAML/JSON config file; the defaults match the published BLI topic list.

use serde::{Deserialize, Serialize};

use crate::error::{LifedexError, Result};
use crate::records::CategoryDefinition;

/// Complete engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Category definitions mapping indicator columns into named topics.
    #[serde(default = "default_categories")]
    pub categories: Vec<CategoryDefinition>,

    /// Target range category scores are normalised onto.
    #[serde(default)]
    pub scale: ScoreScale,

    /// Category used for ranking when every weight is zero.
    #[serde(default = "default_fallback_category")]
    pub default_category: String,

    /// A row whose country name contains one of these markers is treated as
    /// an aggregate pseudo-row (see ARCHITECTURE.md §2.3).
    #[serde(default = "default_aggregate_markers")]
    pub aggregate_markers: Vec<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            categories: default_categories(),
            scale: ScoreScale::default(),
            default_category: default_fallback_category(),
            aggregate_markers: default_aggregate_markers(),
        }
    }
}

// ── Score scale ───────────────────────────────────────────────────────────────

/// Output range for normalised category scores.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ScoreScale {
    #[serde(default = "default_scale_min")]
    pub min: f64,
    #[serde(default = "default_scale_max")]
    pub max: f64,
}

fn default_scale_min() -> f64 { 1.0 }
fn default_scale_max() -> f64 { 10.0 }

impl Default for ScoreScale {
    fn default() -> Self {
        Self {
            min: default_scale_min(),
            max: default_scale_max(),
        }
    }
}

impl ScoreScale {
    pub fn midpoint(&self) -> f64 {
        (self.min + self.max) / 2.0
    }
}

// ── Defaults ──────────────────────────────────────────────────────────────────

fn default_fallback_category() -> String {
    "Life Satisfaction".to_string()
}

fn default_aggregate_markers() -> Vec<String> {
    vec!["OECD".to_string()]
}

/// The 11 Better Life Index topics with their indicator columns.
fn default_categories() -> Vec<CategoryDefinition> {
    vec![
        CategoryDefinition::new(
            "Housing",
            &[
                "Dwellings without basic facilities",
                "Housing expenditure",
                "Rooms per person",
            ],
        ),
        CategoryDefinition::new(
            "Income",
            &[
                "Household net adjusted disposable income",
                "Household net wealth",
            ],
        ),
        CategoryDefinition::new(
            "Jobs",
            &[
                "Labour market insecurity",
                "Employment rate",
                "Long-term unemployment rate",
                "Personal earnings",
            ],
        ),
        CategoryDefinition::new("Community", &["Quality of support network"]),
        CategoryDefinition::new(
            "Education",
            &[
                "Educational attainment",
                "Student skills",
                "Years in education",
            ],
        ),
        CategoryDefinition::new("Environment", &["Air pollution", "Water quality"]),
        CategoryDefinition::new(
            "Civic Engagement",
            &[
                "Stakeholder engagement for developing regulations",
                "Voter turnout",
            ],
        ),
        CategoryDefinition::new("Health", &["Life expectancy", "Self-reported health"]),
        CategoryDefinition::new("Life Satisfaction", &["Life satisfaction"]),
        CategoryDefinition::new(
            "Safety",
            &["Feeling safe walking alone at night", "Homicide rate"],
        ),
        CategoryDefinition::new(
            "Work-Life Balance",
            &[
                "Employees working very long hours",
                "Time devoted to leisure and personal care",
            ],
        ),
    ]
}

// ── Helper methods ────────────────────────────────────────────────────────────

impl EngineConfig {
    /// Load from YAML file
    pub fn from_yaml(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Load from JSON file
    pub fn from_json(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save to YAML file
    pub fn to_yaml(&self, path: &str) -> anyhow::Result<()> {
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Structural sanity checks: a usable scale, at least one category,
    /// and a fallback category that actually exists.
    pub fn validate(&self) -> Result<()> {
        if self.scale.max <= self.scale.min {
            return Err(LifedexError::Config(format!(
                "score scale max ({}) must exceed min ({})",
                self.scale.max, self.scale.min
            )));
        }
        if self.categories.is_empty() {
            return Err(LifedexError::Config(
                "at least one category is required".to_string(),
            ));
        }
        if !self.categories.iter().any(|c| c.name == self.default_category) {
            return Err(LifedexError::Config(format!(
                "default category '{}' is not among the configured categories",
                self.default_category
            )));
        }
        Ok(())
    }

    pub fn category(&self, name: &str) -> Option<&CategoryDefinition> {
        self.categories.iter().find(|c| c.name == name)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.categories.len(), 11);
        assert_eq!(config.default_category, "Life Satisfaction");
        assert_eq!(config.scale.min, 1.0);
        assert_eq!(config.scale.max, 10.0);
    }

    #[test]
    fn test_default_scale_midpoint() {
        assert!((ScoreScale::default().midpoint() - 5.5).abs() < 1e-12);
    }

    #[test]
    fn test_income_category_members() {
        let config = EngineConfig::default();
        let income = config.category("Income").unwrap();
        assert!(income
            .indicators
            .contains(&"Household net wealth".to_string()));
    }

    #[test]
    fn test_validate_rejects_inverted_scale() {
        let mut config = EngineConfig::default();
        config.scale = ScoreScale { min: 10.0, max: 1.0 };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_unknown_fallback() {
        let mut config = EngineConfig::default();
        config.default_category = "Happiness".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_yaml_roundtrip() {
        let config = EngineConfig::default();
        let yaml = serde_yaml::to_string(&config).unwrap();
        let parsed: EngineConfig = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(config.categories.len(), parsed.categories.len());
        assert_eq!(config.default_category, parsed.default_category);
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let parsed: EngineConfig = serde_yaml::from_str("default_category: Health\n").unwrap();
        assert_eq!(parsed.default_category, "Health");
        assert_eq!(parsed.categories.len(), 11);
        assert_eq!(parsed.aggregate_markers, vec!["OECD".to_string()]);
    }
}
