//! Static region classification for dataset rows.
//!
//! The dashboard's scatter and map views filter countries by region; the
//! dataset itself carries no region column, so membership is keyed on the
//! country name. Unknown names classify as `Other` rather than failing.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Region {
    Europe,
    AsiaPacific,
    NorthAmerica,
    LatinAmerica,
    MiddleEast,
    /// Aggregate pseudo-rows ("OECD - Total" etc.), assigned by the loader.
    Aggregate,
    Other,
}

const EUROPE: &[&str] = &[
    "Austria", "Belgium", "Czechia", "Czech Republic", "Denmark", "Estonia",
    "Finland", "France", "Germany", "Greece", "Hungary", "Iceland", "Ireland",
    "Italy", "Latvia", "Lithuania", "Luxembourg", "Netherlands", "Norway",
    "Poland", "Portugal", "Slovak Republic", "Slovenia", "Spain", "Sweden",
    "Switzerland", "United Kingdom", "Russia",
];

const ASIA_PACIFIC: &[&str] = &["Australia", "Japan", "Korea", "New Zealand"];

const NORTH_AMERICA: &[&str] = &["Canada", "United States"];

const LATIN_AMERICA: &[&str] = &["Brazil", "Chile", "Colombia", "Costa Rica", "Mexico"];

const MIDDLE_EAST: &[&str] = &["Israel", "Türkiye", "Turkey"];

impl Region {
    /// Classify a country by name. Aggregate rows are the loader's concern
    /// and are never returned here.
    pub fn classify(country: &str) -> Region {
        let name = country.trim();
        if EUROPE.contains(&name) {
            Region::Europe
        } else if ASIA_PACIFIC.contains(&name) {
            Region::AsiaPacific
        } else if NORTH_AMERICA.contains(&name) {
            Region::NorthAmerica
        } else if LATIN_AMERICA.contains(&name) {
            Region::LatinAmerica
        } else if MIDDLE_EAST.contains(&name) {
            Region::MiddleEast
        } else {
            Region::Other
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_known_countries() {
        assert_eq!(Region::classify("Norway"), Region::Europe);
        assert_eq!(Region::classify("Japan"), Region::AsiaPacific);
        assert_eq!(Region::classify("Canada"), Region::NorthAmerica);
        assert_eq!(Region::classify("Chile"), Region::LatinAmerica);
        assert_eq!(Region::classify("Israel"), Region::MiddleEast);
    }

    #[test]
    fn test_classify_handles_both_czech_spellings() {
        assert_eq!(Region::classify("Czechia"), Region::Europe);
        assert_eq!(Region::classify("Czech Republic"), Region::Europe);
    }

    #[test]
    fn test_unknown_name_is_other() {
        assert_eq!(Region::classify("Atlantis"), Region::Other);
    }

    #[test]
    fn test_classify_trims_whitespace() {
        assert_eq!(Region::classify("  Sweden "), Region::Europe);
    }
}
