//! Per-category score table.
//! See ARCHITECTURE.md §3.1–§3.2.
//!
//! The table is a pure function of `(records, categories, scale)` and is
//! recomputed in full whenever either input changes; nothing here caches
//! across calls.

use std::collections::{HashMap, HashSet};

use serde::Serialize;
use tracing::warn;

use lifedex_common::{CategoryDefinition, CountryRecord, LifedexError, ScoreScale};

use crate::normalise::{mean_of_available, minmax_scale};

/// One computed category: raw means and normalised scores per country, plus
/// the normalisation extent and the cross-country average.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryColumn {
    pub name: String,
    /// `(min, max)` of raw means across real countries with data; `None`
    /// when no real country has a valid value.
    pub extent: Option<(f64, f64)>,
    /// Unweighted mean of non-null raw means across real countries — the
    /// "OECD average" shown against each country on the radar chart.
    pub average: Option<f64>,
    raw_means: Vec<Option<f64>>,
    scores: Vec<Option<f64>>,
}

/// Score table over all countries and categories, row-indexed by country in
/// original dataset order.
#[derive(Debug, Clone, Serialize)]
pub struct ScoreTable {
    scale: ScoreScale,
    countries: Vec<String>,
    aggregates: Vec<bool>,
    columns: Vec<CategoryColumn>,
    #[serde(skip)]
    country_index: HashMap<String, usize>,
    #[serde(skip)]
    column_index: HashMap<String, usize>,
}

impl ScoreTable {
    /// Compute the full table.
    ///
    /// A category referencing a column absent from the dataset is skipped —
    /// all-null everywhere — with a warning, and scoring continues for the
    /// remaining categories. Aggregate pseudo-rows receive scores but never
    /// contribute to extents or averages.
    pub fn compute(
        records: &[CountryRecord],
        categories: &[CategoryDefinition],
        scale: ScoreScale,
    ) -> Self {
        let countries: Vec<String> = records.iter().map(|r| r.name.clone()).collect();
        let aggregates: Vec<bool> = records.iter().map(|r| r.is_aggregate).collect();

        let known_columns: HashSet<&str> = records
            .iter()
            .flat_map(|r| r.indicators.keys())
            .map(|k| k.as_str())
            .collect();

        let mut columns = Vec::with_capacity(categories.len());
        for category in categories {
            let missing = category
                .indicators
                .iter()
                .find(|ind| !known_columns.contains(ind.as_str()));

            if let Some(column) = missing {
                warn!(
                    "skipping category '{}': {}",
                    category.name,
                    LifedexError::MissingColumn(column.clone())
                );
                columns.push(CategoryColumn {
                    name: category.name.clone(),
                    extent: None,
                    average: None,
                    raw_means: vec![None; records.len()],
                    scores: vec![None; records.len()],
                });
                continue;
            }

            let raw_means: Vec<Option<f64>> = records
                .iter()
                .map(|record| {
                    mean_of_available(
                        category.indicators.iter().map(|ind| record.indicator(ind)),
                    )
                })
                .collect();

            // Extent and average over real countries only
            let real_means: Vec<f64> = records
                .iter()
                .zip(raw_means.iter())
                .filter(|(record, _)| !record.is_aggregate)
                .filter_map(|(_, mean)| *mean)
                .collect();

            let extent = if real_means.is_empty() {
                None
            } else {
                let min = real_means.iter().cloned().fold(f64::INFINITY, f64::min);
                let max = real_means.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
                Some((min, max))
            };
            let average = if real_means.is_empty() {
                None
            } else {
                Some(real_means.iter().sum::<f64>() / real_means.len() as f64)
            };

            let scores: Vec<Option<f64>> = raw_means
                .iter()
                .map(|mean| match (mean, extent) {
                    (Some(value), Some(extent)) => Some(minmax_scale(*value, extent, &scale)),
                    _ => None,
                })
                .collect();

            columns.push(CategoryColumn {
                name: category.name.clone(),
                extent,
                average,
                raw_means,
                scores,
            });
        }

        let country_index = countries
            .iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), i))
            .collect();
        let column_index = columns
            .iter()
            .enumerate()
            .map(|(i, column)| (column.name.clone(), i))
            .collect();

        Self {
            scale,
            countries,
            aggregates,
            columns,
            country_index,
            column_index,
        }
    }

    pub fn scale(&self) -> &ScoreScale {
        &self.scale
    }

    /// Country names in original dataset order, aggregates included.
    pub fn countries(&self) -> &[String] {
        &self.countries
    }

    pub fn is_aggregate(&self, country: &str) -> bool {
        self.country_index
            .get(country)
            .map(|&i| self.aggregates[i])
            .unwrap_or(false)
    }

    pub fn category_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn has_categories(&self) -> bool {
        !self.columns.is_empty()
    }

    pub fn column(&self, category: &str) -> Option<&CategoryColumn> {
        self.column_index.get(category).map(|&i| &self.columns[i])
    }

    /// Mean of the available member-indicator values; `None` means "no
    /// data", never zero.
    pub fn raw_mean(&self, country: &str, category: &str) -> Option<f64> {
        let row = *self.country_index.get(country)?;
        self.column(category)?.raw_means.get(row).copied().flatten()
    }

    /// Normalised score on the configured scale.
    pub fn score(&self, country: &str, category: &str) -> Option<f64> {
        let row = *self.country_index.get(country)?;
        self.column(category)?.scores.get(row).copied().flatten()
    }

    pub fn extent(&self, category: &str) -> Option<(f64, f64)> {
        self.column(category)?.extent
    }

    /// Cross-country average raw mean.
    pub fn average(&self, category: &str) -> Option<f64> {
        self.column(category)?.average
    }

    /// Cross-country average mapped onto the score scale, for plotting
    /// against a country's own scores.
    pub fn average_score(&self, category: &str) -> Option<f64> {
        let column = self.column(category)?;
        let extent = column.extent?;
        column
            .average
            .map(|avg| minmax_scale(avg, extent, &self.scale))
    }

    /// Radar-chart profile: one `(category, score)` pair per category, in
    /// definition order. `None` for an unknown country.
    pub fn profile(&self, country: &str) -> Option<Vec<(&str, Option<f64>)>> {
        let row = *self.country_index.get(country)?;
        Some(
            self.columns
                .iter()
                .map(|column| (column.name.as_str(), column.scores[row]))
                .collect(),
        )
    }
}
