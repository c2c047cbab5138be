use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::LoadError;

// ---------------------------------------------------------------------------
// Participation – one country at one Games
// ---------------------------------------------------------------------------

/// A single appearance of a country at an Olympic Games.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participation {
    pub year: i32,
    /// Host city of the Games.
    pub city: String,
    pub medals_count: u32,
    pub athlete_count: u32,
}

// ---------------------------------------------------------------------------
// Country – one record of the payload
// ---------------------------------------------------------------------------

/// A country and its participation history, in the order the source lists it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    /// Unique key of the record, e.g. `"France"`.
    pub country: String,
    pub participations: Vec<Participation>,
}

impl Country {
    /// Sum of medals over every participation.
    pub fn total_medals(&self) -> u64 {
        self.participations
            .iter()
            .map(|p| u64::from(p.medals_count))
            .sum()
    }

    /// Sum of athletes over every participation.
    pub fn total_athletes(&self) -> u64 {
        self.participations
            .iter()
            .map(|p| u64::from(p.athlete_count))
            .sum()
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded payload
// ---------------------------------------------------------------------------

/// The full dataset: countries in source order, unique by name.
///
/// There is no way to mutate a dataset once built; the store hands it out
/// behind an `Arc`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Country>", into = "Vec<Country>")]
pub struct Dataset {
    countries: Vec<Country>,
}

impl Dataset {
    /// Build a dataset, rejecting duplicate country names.
    pub fn from_countries(countries: Vec<Country>) -> Result<Self, LoadError> {
        let mut seen: BTreeSet<&str> = BTreeSet::new();
        for c in &countries {
            if !seen.insert(c.country.as_str()) {
                return Err(LoadError::DuplicateCountry(c.country.clone()));
            }
        }
        Ok(Dataset { countries })
    }

    pub fn countries(&self) -> &[Country] {
        &self.countries
    }

    /// Exact, case-sensitive lookup by country name.
    pub fn find(&self, country: &str) -> Option<&Country> {
        self.countries.iter().find(|c| c.country == country)
    }

    /// Number of countries.
    pub fn len(&self) -> usize {
        self.countries.len()
    }

    /// Whether the dataset holds no country at all.
    pub fn is_empty(&self) -> bool {
        self.countries.is_empty()
    }
}

impl TryFrom<Vec<Country>> for Dataset {
    type Error = LoadError;

    fn try_from(countries: Vec<Country>) -> Result<Self, Self::Error> {
        Dataset::from_countries(countries)
    }
}

impl From<Dataset> for Vec<Country> {
    fn from(dataset: Dataset) -> Self {
        dataset.countries
    }
}
