//! Composite ranking over the category score table.
//! Implements the weighted-mean formula from ARCHITECTURE.md §3.3.

use serde::{Deserialize, Serialize};
use tracing::debug;

use lifedex_common::{EngineState, LifedexError, Result};

use crate::scores::ScoreTable;
use crate::weights::CategoryWeights;

/// One ranked entry. `rank` is 1-based; ties share composite values but
/// keep distinct ranks in input order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedCountry {
    pub name: String,
    pub composite: f64,
    pub rank: usize,
}

/// Rank every real country by weighted composite score, descending.
///
/// `composite = Σ w_c · score(country, c) / Σ w_c`, summed over categories
/// where the country has a defined score; zero-weight categories contribute
/// nothing and need no score. All-zero weights fall back to
/// `default_category` at implicit weight 1, so a ranking is always
/// produced. Countries with no scoreable weighted category are omitted
/// (they have no composite, which is not the same as scoring 0).
///
/// The full list is returned; truncation to top-N is the caller's concern.
pub fn rank(
    table: &ScoreTable,
    weights: &CategoryWeights,
    default_category: &str,
) -> Result<Vec<RankedCountry>> {
    if !table.has_categories() {
        return Err(LifedexError::EmptyCategorySet);
    }
    weights.validate()?;

    let fallback;
    let effective = if weights.is_all_zero() {
        debug!("all weights zero, falling back to '{default_category}'");
        fallback = CategoryWeights::new().with(default_category, 1.0);
        &fallback
    } else {
        weights
    };

    // Input order first so the stable sort breaks ties deterministically
    let mut ranked: Vec<RankedCountry> = table
        .countries()
        .iter()
        .filter(|country| !table.is_aggregate(country))
        .filter_map(|country| {
            composite_score(table, effective, country).map(|composite| RankedCountry {
                name: country.clone(),
                composite,
                rank: 0,
            })
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.composite
            .partial_cmp(&a.composite)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    for (i, entry) in ranked.iter_mut().enumerate() {
        entry.rank = i + 1;
    }

    Ok(ranked)
}

/// Rank using the weights carried in a caller-owned [`EngineState`].
pub fn rank_with_state(
    table: &ScoreTable,
    state: &EngineState,
    default_category: &str,
) -> Result<Vec<RankedCountry>> {
    rank(table, &CategoryWeights::from_state(state), default_category)
}

/// Weighted mean over the categories where this country has a score.
/// `None` when no positively-weighted category is scoreable.
fn composite_score(table: &ScoreTable, weights: &CategoryWeights, country: &str) -> Option<f64> {
    let mut weighted_sum = 0.0;
    let mut weight_total = 0.0;

    for (category, weight) in weights.iter() {
        if weight == 0.0 {
            continue;
        }
        if let Some(score) = table.score(country, category) {
            weighted_sum += weight * score;
            weight_total += weight;
        }
    }

    if weight_total > 0.0 {
        Some(weighted_sum / weight_total)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lifedex_common::{CategoryDefinition, CountryRecord, Region, ScoreScale};

    fn record(name: &str, income: Option<f64>, health: Option<f64>) -> CountryRecord {
        CountryRecord {
            name: name.to_string(),
            flag: String::new(),
            population: None,
            indicators: [
                ("Earnings".to_string(), income),
                ("Life expectancy".to_string(), health),
            ]
            .into_iter()
            .collect(),
            is_aggregate: false,
            region: Region::Other,
        }
    }

    fn categories() -> Vec<CategoryDefinition> {
        vec![
            CategoryDefinition::new("Income", &["Earnings"]),
            CategoryDefinition::new("Health", &["Life expectancy"]),
        ]
    }

    fn five_country_table() -> ScoreTable {
        let records = vec![
            record("A", Some(10.0), Some(75.0)),
            record("B", Some(50.0), Some(85.0)),
            record("C", Some(30.0), Some(70.0)),
            record("D", Some(20.0), Some(90.0)),
            record("E", Some(40.0), Some(80.0)),
        ];
        ScoreTable::compute(&records, &categories(), ScoreScale::default())
    }

    fn order(ranked: &[RankedCountry]) -> Vec<&str> {
        ranked.iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn test_single_weighted_category_orders_by_that_category() {
        let table = five_country_table();
        let weights = CategoryWeights::new().with("Income", 1.0).with("Health", 0.0);
        let ranked = rank(&table, &weights, "Health").unwrap();
        assert_eq!(order(&ranked), vec!["B", "E", "C", "D", "A"]);
        assert_eq!(ranked[0].rank, 1);
        assert_eq!(ranked[4].rank, 5);
    }

    #[test]
    fn test_weight_scaling_does_not_change_order() {
        let table = five_country_table();
        let small = CategoryWeights::new().with("Income", 1.0).with("Health", 3.0);
        let large = CategoryWeights::new().with("Income", 5.0).with("Health", 15.0);
        let a = rank(&table, &small, "Income").unwrap();
        let b = rank(&table, &large, "Income").unwrap();
        assert_eq!(order(&a), order(&b));
        for (x, y) in a.iter().zip(b.iter()) {
            assert!((x.composite - y.composite).abs() < 1e-9);
        }
    }

    #[test]
    fn test_all_zero_weights_fall_back_to_default_category() {
        let table = five_country_table();
        let zero = CategoryWeights::new().with("Income", 0.0).with("Health", 0.0);
        let fallback = rank(&table, &zero, "Health").unwrap();
        let explicit = rank(
            &table,
            &CategoryWeights::new().with("Health", 1.0),
            "Income",
        )
        .unwrap();
        assert_eq!(order(&fallback), order(&explicit));
        // D has the best life expectancy
        assert_eq!(fallback[0].name, "D");
    }

    #[test]
    fn test_empty_weight_map_also_falls_back() {
        let table = five_country_table();
        let ranked = rank(&table, &CategoryWeights::new(), "Income").unwrap();
        assert_eq!(ranked[0].name, "B");
    }

    #[test]
    fn test_country_missing_one_category_still_ranked() {
        let records = vec![
            record("A", Some(10.0), Some(75.0)),
            record("B", Some(50.0), None), // no health data
            record("C", Some(30.0), Some(90.0)),
        ];
        let table = ScoreTable::compute(&records, &categories(), ScoreScale::default());
        let weights = CategoryWeights::new().with("Income", 1.0).with("Health", 1.0);
        let ranked = rank(&table, &weights, "Income").unwrap();

        // B's composite is its income score alone (10.0), putting it first
        assert_eq!(ranked[0].name, "B");
        assert!((ranked[0].composite - 10.0).abs() < 1e-9);
        assert_eq!(ranked.len(), 3);
    }

    #[test]
    fn test_country_with_no_scoreable_category_is_omitted() {
        let records = vec![
            record("A", Some(10.0), Some(75.0)),
            record("B", Some(50.0), Some(85.0)),
            record("Z", None, None),
        ];
        let table = ScoreTable::compute(&records, &categories(), ScoreScale::default());
        let ranked = rank(
            &table,
            &CategoryWeights::new().with("Income", 1.0),
            "Income",
        )
        .unwrap();
        assert_eq!(ranked.len(), 2);
        assert!(!order(&ranked).contains(&"Z"));
    }

    #[test]
    fn test_ties_keep_input_order() {
        let records = vec![
            record("First", Some(30.0), None),
            record("Second", Some(30.0), None),
            record("Third", Some(60.0), None),
        ];
        let table = ScoreTable::compute(&records, &categories(), ScoreScale::default());
        let ranked = rank(
            &table,
            &CategoryWeights::new().with("Income", 1.0),
            "Income",
        )
        .unwrap();
        assert_eq!(order(&ranked), vec!["Third", "First", "Second"]);
    }

    #[test]
    fn test_empty_category_set_is_an_error() {
        let records = vec![record("A", Some(1.0), Some(2.0))];
        let table = ScoreTable::compute(&records, &[], ScoreScale::default());
        let err = rank(&table, &CategoryWeights::new(), "Income").unwrap_err();
        assert!(matches!(err, LifedexError::EmptyCategorySet));
    }

    #[test]
    fn test_negative_weight_is_rejected() {
        let table = five_country_table();
        let weights = CategoryWeights::new().with("Income", -2.0);
        assert!(rank(&table, &weights, "Income").is_err());
    }

    #[test]
    fn test_rank_with_state_matches_explicit_weights() {
        let table = five_country_table();
        let state = EngineState::new().with_weight("Income", 2.0);
        let via_state = rank_with_state(&table, &state, "Health").unwrap();
        let explicit = rank(
            &table,
            &CategoryWeights::new().with("Income", 2.0),
            "Health",
        )
        .unwrap();
        assert_eq!(order(&via_state), order(&explicit));
    }
}
