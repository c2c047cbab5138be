//! Pure derivations from the dataset to view-ready aggregates.
//!
//! Every function takes `Option<&Dataset>` so callers can feed the store's
//! state straight in. A dataset that is not loaded yet and a country that
//! does not exist both yield an empty result.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::data::model::{Country, Dataset};

/// Heading shown above the dashboard chart.
pub const DASHBOARD_TITLE: &str = "Medals per Country";

/// A titled number displayed in a header card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Statistic {
    pub title: String,
    pub value: u64,
}

impl Statistic {
    fn new(title: &str, value: u64) -> Self {
        Self {
            title: title.to_string(),
            value,
        }
    }
}

/// One point of a country's participation series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountryDetailPoint {
    /// Host city.
    pub name: String,
    /// Medals won there.
    pub value: u64,
    pub extra: DetailExtra,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailExtra {
    /// Year of the Games as text.
    pub code: String,
}

/// One slice of the medals-per-country chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartSlice {
    pub name: String,
    pub value: u64,
}

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

/// Number of distinct host cities and number of countries.
pub fn dashboard_statistics(dataset: Option<&Dataset>) -> Vec<Statistic> {
    let Some(dataset) = dataset else {
        return Vec::new();
    };

    let cities: BTreeSet<&str> = dataset
        .countries()
        .iter()
        .flat_map(|c| &c.participations)
        .map(|p| p.city.as_str())
        .collect();

    vec![
        Statistic::new("Number of JOs", cities.len() as u64),
        Statistic::new("Number of countries", dataset.len() as u64),
    ]
}

/// Total medals per country, in dataset order.
pub fn medals_per_country(dataset: Option<&Dataset>) -> Vec<ChartSlice> {
    dataset
        .map(|ds| {
            ds.countries()
                .iter()
                .map(|c| ChartSlice {
                    name: c.country.clone(),
                    value: c.total_medals(),
                })
                .collect()
        })
        .unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Country details
// ---------------------------------------------------------------------------

fn lookup<'a>(dataset: Option<&'a Dataset>, country_id: &str) -> Option<&'a Country> {
    dataset?.find(country_id)
}

/// Entries, total medals and total athletes for one country.
pub fn country_statistics(dataset: Option<&Dataset>, country_id: &str) -> Vec<Statistic> {
    let Some(country) = lookup(dataset, country_id) else {
        return Vec::new();
    };

    vec![
        Statistic::new("Number of entries", country.participations.len() as u64),
        Statistic::new("Total number of medals", country.total_medals()),
        Statistic::new("Total number of athletes", country.total_athletes()),
    ]
}

/// Medals per Games for one country, in stored order.
pub fn country_detail_series(dataset: Option<&Dataset>, country_id: &str) -> Vec<CountryDetailPoint> {
    let Some(country) = lookup(dataset, country_id) else {
        return Vec::new();
    };

    country
        .participations
        .iter()
        .map(|p| CountryDetailPoint {
            name: p.city.clone(),
            value: u64::from(p.medals_count),
            extra: DetailExtra {
                code: p.year.to_string(),
            },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Participation;

    fn p(city: &str, year: i32, medals: u32, athletes: u32) -> Participation {
        Participation {
            year,
            city: city.to_string(),
            medals_count: medals,
            athlete_count: athletes,
        }
    }

    fn sample() -> Dataset {
        Dataset::from_countries(vec![
            Country {
                country: "A".into(),
                participations: vec![p("X", 2000, 3, 10), p("Y", 2004, 1, 5)],
            },
            Country {
                country: "B".into(),
                participations: vec![p("X", 2000, 2, 8)],
            },
        ])
        .unwrap()
    }

    fn stat(title: &str, value: u64) -> Statistic {
        Statistic::new(title, value)
    }

    #[test]
    fn dashboard_counts_distinct_cities_and_countries() {
        let ds = sample();
        assert_eq!(
            dashboard_statistics(Some(&ds)),
            vec![stat("Number of JOs", 2), stat("Number of countries", 2)]
        );
    }

    #[test]
    fn dashboard_on_empty_dataset_reports_zeros() {
        assert_eq!(
            dashboard_statistics(Some(&Dataset::default())),
            vec![stat("Number of JOs", 0), stat("Number of countries", 0)]
        );
    }

    #[test]
    fn dashboard_before_load_is_empty() {
        assert!(dashboard_statistics(None).is_empty());
    }

    #[test]
    fn country_statistics_sum_participations() {
        let ds = sample();
        assert_eq!(
            country_statistics(Some(&ds), "A"),
            vec![
                stat("Number of entries", 2),
                stat("Total number of medals", 4),
                stat("Total number of athletes", 15),
            ]
        );
    }

    #[test]
    fn missing_country_and_missing_dataset_look_the_same() {
        let ds = sample();
        assert!(country_statistics(None, "A").is_empty());
        assert!(country_statistics(Some(&ds), "Z").is_empty());
        assert!(country_detail_series(None, "A").is_empty());
        assert!(country_detail_series(Some(&ds), "Z").is_empty());
    }

    #[test]
    fn country_id_is_not_normalised() {
        let ds = sample();
        assert!(country_statistics(Some(&ds), "a").is_empty());
        assert!(country_statistics(Some(&ds), " A").is_empty());
    }

    #[test]
    fn detail_series_keeps_stored_order() {
        let ds = sample();
        let series = country_detail_series(Some(&ds), "A");
        assert_eq!(
            serde_json::to_value(&series).unwrap(),
            serde_json::json!([
                {"name": "X", "value": 3, "extra": {"code": "2000"}},
                {"name": "Y", "value": 1, "extra": {"code": "2004"}}
            ])
        );
    }

    #[test]
    fn medals_per_country_follows_dataset_order() {
        let ds = sample();
        assert_eq!(
            medals_per_country(Some(&ds)),
            vec![
                ChartSlice { name: "A".into(), value: 4 },
                ChartSlice { name: "B".into(), value: 2 },
            ]
        );
        assert!(medals_per_country(None).is_empty());
    }
}
