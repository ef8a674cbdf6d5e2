//! Better Life Index dataset access for country scoring.
//!
//! Loads the bulk CSV export of per-country wellbeing indicators and turns
//! each row into a typed [`CountryRecord`]. Loading is the single
//! asynchronous step in the system; everything downstream is synchronous
//! computation over the records returned here.
//!
//! # Source format
//!
//! | Column | Content |
//! |--------|---------|
//! | `Country` | Unique name; some rows are aggregates like "OECD - Total" |
//! | `Flag` | Emoji string (optional column) |
//! | `Population` | Integer-like (optional column) |
//! | remaining | ~30 numeric indicator columns |
//!
//! Header names in the published export carry stray leading spaces on some
//! columns; every header is trimmed before any lookup. Empty or
//! unparseable numeric cells become `None` — see ARCHITECTURE.md §2.2.
//!
//! # Example
//!
//! ```rust,no_run
//! use lifedex_dataset::Dataset;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let dataset = Dataset::fetch(lifedex_dataset::DATASET_URL).await?;
//!
//!     for record in dataset.records() {
//!         println!("{} {}", record.flag, record.name);
//!     }
//!
//!     Ok(())
//! }
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::{debug, info};

use lifedex_common::{CountryRecord, LifedexError, Region, Result};

/// Default URL of the bulk dataset export.
pub const DATASET_URL: &str =
    "https://raw.githubusercontent.com/lifedex/data/main/better-life-index.csv";

/// Cached dataset filename.
pub const DATASET_FILE: &str = "better-life-index.csv";

/// Name column; its presence is required.
pub const COUNTRY_COLUMN: &str = "Country";

/// Flag emoji column (optional).
pub const FLAG_COLUMN: &str = "Flag";

/// Population column (optional); numeric but not an indicator.
pub const POPULATION_COLUMN: &str = "Population";

/// Default aggregate-row name markers (see ARCHITECTURE.md §2.3).
pub const DEFAULT_AGGREGATE_MARKERS: &[&str] = &["OECD"];

/// A fully parsed dataset: trimmed headers plus one record per data row,
/// in original row order. No row is ever dropped, even when every numeric
/// cell is missing.
#[derive(Debug, Clone)]
pub struct Dataset {
    headers: Vec<String>,
    records: Vec<CountryRecord>,
}

impl Dataset {
    /// Parse CSV text using the default aggregate markers.
    pub fn from_csv_str(text: &str) -> Result<Self> {
        let markers: Vec<String> = DEFAULT_AGGREGATE_MARKERS
            .iter()
            .map(|m| m.to_string())
            .collect();
        Self::from_csv_str_with_markers(text, &markers)
    }

    /// Parse CSV text, marking rows whose `Country` contains any of
    /// `aggregate_markers` as aggregate pseudo-rows.
    pub fn from_csv_str_with_markers(text: &str, aggregate_markers: &[String]) -> Result<Self> {
        let mut reader = csv::Reader::from_reader(text.as_bytes());

        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        if headers.is_empty() || headers.iter().all(|h| h.is_empty()) {
            return Err(LifedexError::DataFormat(
                "header row is absent or empty".to_string(),
            ));
        }

        let country_idx = headers
            .iter()
            .position(|h| h == COUNTRY_COLUMN)
            .ok_or_else(|| {
                LifedexError::DataFormat(format!("no '{COUNTRY_COLUMN}' column in header"))
            })?;
        let flag_idx = headers.iter().position(|h| h == FLAG_COLUMN);
        let population_idx = headers.iter().position(|h| h == POPULATION_COLUMN);

        let mut records = Vec::new();
        for result in reader.records() {
            let row = result?;

            let name = row
                .get(country_idx)
                .map(|s| s.trim().to_string())
                .unwrap_or_default();
            let flag = flag_idx
                .and_then(|i| row.get(i))
                .map(|s| s.trim().to_string())
                .unwrap_or_default();
            let population = population_idx.and_then(|i| row.get(i)).and_then(parse_cell);

            let mut indicators = HashMap::new();
            for (i, header) in headers.iter().enumerate() {
                if i == country_idx || Some(i) == flag_idx || Some(i) == population_idx {
                    continue;
                }
                indicators.insert(header.clone(), row.get(i).and_then(parse_cell));
            }

            let is_aggregate = aggregate_markers.iter().any(|m| name.contains(m.as_str()));
            let region = if is_aggregate {
                Region::Aggregate
            } else {
                Region::classify(&name)
            };

            records.push(CountryRecord {
                name,
                flag,
                population,
                indicators,
                is_aggregate,
                region,
            });
        }

        debug!(
            "parsed dataset: {} records, {} columns",
            records.len(),
            headers.len()
        );

        Ok(Self { headers, records })
    }

    /// Read and parse a local CSV file.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("loading dataset from {:?}", path);
        let text = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("failed to read dataset file {path:?}"))?;
        Self::from_csv_str(&text)
    }

    /// Fetch the dataset, caching the downloaded CSV under the default
    /// cache directory. Subsequent calls load from the cache.
    pub async fn fetch(url: &str) -> Result<Self> {
        Self::fetch_with_cache(url, Self::default_cache_dir()).await
    }

    /// Fetch with an explicit cache directory.
    pub async fn fetch_with_cache(url: &str, cache_dir: PathBuf) -> Result<Self> {
        std::fs::create_dir_all(&cache_dir)
            .with_context(|| format!("failed to create cache directory {cache_dir:?}"))?;

        let cached = cache_dir.join(DATASET_FILE);
        if cached.exists() {
            info!("loading cached dataset from {:?}", cached);
            return Self::from_path(&cached).await;
        }

        info!("downloading dataset from {url}");
        let response = reqwest::get(url).await?;
        if !response.status().is_success() {
            return Err(anyhow::anyhow!(
                "failed to download dataset: HTTP {}",
                response.status()
            )
            .into());
        }

        let text = response.text().await?;
        tokio::fs::write(&cached, &text)
            .await
            .with_context(|| format!("failed to write dataset cache {cached:?}"))?;
        info!("cached dataset at {:?}", cached);

        Self::from_csv_str(&text)
    }

    fn default_cache_dir() -> PathBuf {
        dirs::cache_dir()
            .unwrap_or_else(|| PathBuf::from(".cache"))
            .join("lifedex")
    }

    /// Trimmed header names in file order.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Indicator column names: every header except `Country`, `Flag`, and
    /// `Population`.
    pub fn indicator_columns(&self) -> Vec<String> {
        self.headers
            .iter()
            .filter(|h| {
                h.as_str() != COUNTRY_COLUMN
                    && h.as_str() != FLAG_COLUMN
                    && h.as_str() != POPULATION_COLUMN
            })
            .cloned()
            .collect()
    }

    /// All records in original row order, aggregates included.
    pub fn records(&self) -> &[CountryRecord] {
        &self.records
    }

    /// Look up one record by exact country name.
    pub fn record(&self, name: &str) -> Option<&CountryRecord> {
        self.records.iter().find(|r| r.name == name)
    }

    /// Names of real countries (aggregate pseudo-rows excluded).
    pub fn country_names(&self) -> Vec<String> {
        self.records
            .iter()
            .filter(|r| !r.is_aggregate)
            .map(|r| r.name.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Parse one numeric cell. Empty and unparseable cells are `None`, never 0.
fn parse_cell(cell: &str) -> Option<f64> {
    let trimmed = cell.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
Country,Flag,Population, Life expectancy,Life satisfaction,Homicide rate
Norway,🇳🇴,5.4,83.2,7.4,0.5
Chile,🇨🇱,19.5,80.6,6.5,
OECD - Total,,1380.0,81.0,6.7,2.6
Nulland,,,,,
";

    #[test]
    fn test_headers_are_trimmed() {
        let dataset = Dataset::from_csv_str(SAMPLE).unwrap();
        // " Life expectancy" has a stray leading space in the source
        assert!(dataset.headers().contains(&"Life expectancy".to_string()));
        assert!(!dataset.headers().iter().any(|h| h.starts_with(' ')));
    }

    #[test]
    fn test_numeric_and_missing_cells() {
        let dataset = Dataset::from_csv_str(SAMPLE).unwrap();
        let norway = dataset.record("Norway").unwrap();
        assert_eq!(norway.indicator("Life expectancy"), Some(83.2));
        assert_eq!(norway.population, Some(5.4));

        let chile = dataset.record("Chile").unwrap();
        assert_eq!(chile.indicator("Homicide rate"), None);
    }

    #[test]
    fn test_no_row_is_dropped() {
        let dataset = Dataset::from_csv_str(SAMPLE).unwrap();
        assert_eq!(dataset.len(), 4);

        // All-null rows survive; downstream consumers handle them.
        let nulland = dataset.record("Nulland").unwrap();
        assert!(nulland.is_all_null());
        assert_eq!(nulland.population, None);
    }

    #[test]
    fn test_row_order_preserved() {
        let dataset = Dataset::from_csv_str(SAMPLE).unwrap();
        let names: Vec<&str> = dataset.records().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Norway", "Chile", "OECD - Total", "Nulland"]);
    }

    #[test]
    fn test_aggregate_detection() {
        let dataset = Dataset::from_csv_str(SAMPLE).unwrap();
        let total = dataset.record("OECD - Total").unwrap();
        assert!(total.is_aggregate);
        assert_eq!(total.region, Region::Aggregate);

        assert!(!dataset.record("Norway").unwrap().is_aggregate);
        assert_eq!(dataset.record("Norway").unwrap().region, Region::Europe);
    }

    #[test]
    fn test_country_names_exclude_aggregates() {
        let dataset = Dataset::from_csv_str(SAMPLE).unwrap();
        let names = dataset.country_names();
        assert!(names.contains(&"Norway".to_string()));
        assert!(!names.contains(&"OECD - Total".to_string()));
    }

    #[test]
    fn test_indicator_columns_exclude_metadata() {
        let dataset = Dataset::from_csv_str(SAMPLE).unwrap();
        let columns = dataset.indicator_columns();
        assert_eq!(
            columns,
            vec!["Life expectancy", "Life satisfaction", "Homicide rate"]
        );
    }

    #[test]
    fn test_empty_source_is_data_format_error() {
        let err = Dataset::from_csv_str("").unwrap_err();
        assert!(matches!(err, LifedexError::DataFormat(_)));
    }

    #[test]
    fn test_missing_country_column_is_data_format_error() {
        let err = Dataset::from_csv_str("Nation,Score\nNorway,5\n").unwrap_err();
        assert!(matches!(err, LifedexError::DataFormat(_)));
    }

    #[test]
    fn test_header_only_source_yields_empty_dataset() {
        let dataset = Dataset::from_csv_str("Country,Flag,Life satisfaction\n").unwrap();
        assert!(dataset.is_empty());
        assert_eq!(dataset.indicator_columns(), vec!["Life satisfaction"]);
    }

    #[test]
    fn test_custom_aggregate_markers() {
        let markers = vec!["Average".to_string()];
        let csv = "Country,Life satisfaction\nWorld Average,6.0\nNorway,7.4\n";
        let dataset = Dataset::from_csv_str_with_markers(csv, &markers).unwrap();
        assert!(dataset.record("World Average").unwrap().is_aggregate);
        assert!(!dataset.record("Norway").unwrap().is_aggregate);
    }
}
