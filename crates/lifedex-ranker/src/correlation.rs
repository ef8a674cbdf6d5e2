//! Pairwise Pearson correlation across indicator columns.
//! See ARCHITECTURE.md §4 — feeds the dashboard's heatmap view.

use std::collections::HashMap;

use serde::Serialize;

use lifedex_common::CountryRecord;

/// Symmetric matrix of Pearson r values indexed by column pair.
///
/// Entries are `None` when the coefficient is undefined (fewer than two
/// pairwise-complete observations, or a constant column) — "undefined" is
/// deliberately distinct from "no relationship" (r = 0).
#[derive(Debug, Clone, Serialize)]
pub struct CorrelationMatrix {
    columns: Vec<String>,
    values: Vec<Vec<Option<f64>>>,
    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl CorrelationMatrix {
    /// Compute r for every column pair over pairwise-complete observations:
    /// a country contributes to `(A, B)` iff both its `A` and `B` values are
    /// present. Aggregate pseudo-rows are excluded from the sample. Only the
    /// upper triangle is computed; the matrix is mirrored by construction.
    pub fn compute(records: &[CountryRecord], columns: &[String]) -> Self {
        let real: Vec<&CountryRecord> =
            records.iter().filter(|r| !r.is_aggregate).collect();

        let n = columns.len();
        let mut values = vec![vec![None; n]; n];

        for i in 0..n {
            // Diagonal: 1 whenever the column has nonzero variance
            let series: Vec<f64> = real
                .iter()
                .filter_map(|r| r.indicator(&columns[i]))
                .filter(|v| v.is_finite())
                .collect();
            values[i][i] = if series.len() >= 2 && sample_variance(&series) > 0.0 {
                Some(1.0)
            } else {
                None
            };

            for j in (i + 1)..n {
                let pairs: Vec<(f64, f64)> = real
                    .iter()
                    .filter_map(|r| {
                        let a = r.indicator(&columns[i])?;
                        let b = r.indicator(&columns[j])?;
                        (a.is_finite() && b.is_finite()).then_some((a, b))
                    })
                    .collect();

                let r = pearson(&pairs);
                values[i][j] = r;
                values[j][i] = r;
            }
        }

        let index = columns
            .iter()
            .enumerate()
            .map(|(i, c)| (c.clone(), i))
            .collect();

        Self {
            columns: columns.to_vec(),
            values,
            index,
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// r for a named column pair; `None` for undefined coefficients and for
    /// unknown columns alike.
    pub fn r(&self, a: &str, b: &str) -> Option<f64> {
        let i = *self.index.get(a)?;
        let j = *self.index.get(b)?;
        self.values[i][j]
    }

    /// r by column position.
    pub fn at(&self, i: usize, j: usize) -> Option<f64> {
        self.values.get(i).and_then(|row| row.get(j)).copied().flatten()
    }
}

/// Sample Pearson correlation (n−1 convention). `None` for fewer than two
/// observations or zero variance in either series.
fn pearson(pairs: &[(f64, f64)]) -> Option<f64> {
    let n = pairs.len();
    if n < 2 {
        return None;
    }
    let nf = n as f64;

    let mean_a = pairs.iter().map(|(a, _)| a).sum::<f64>() / nf;
    let mean_b = pairs.iter().map(|(_, b)| b).sum::<f64>() / nf;

    let (mut cov, mut var_a, mut var_b) = (0.0, 0.0, 0.0);
    for (a, b) in pairs {
        let da = a - mean_a;
        let db = b - mean_b;
        cov += da * db;
        var_a += da * da;
        var_b += db * db;
    }
    cov /= nf - 1.0;
    var_a /= nf - 1.0;
    var_b /= nf - 1.0;

    if var_a == 0.0 || var_b == 0.0 {
        return None;
    }

    Some(cov / (var_a.sqrt() * var_b.sqrt()))
}

fn sample_variance(series: &[f64]) -> f64 {
    let nf = series.len() as f64;
    let mean = series.iter().sum::<f64>() / nf;
    series.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (nf - 1.0)
}
