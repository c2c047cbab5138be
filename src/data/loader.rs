use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use super::model::{Country, Dataset, Participation};
use crate::error::LoadError;

// ---------------------------------------------------------------------------
// Format detection
// ---------------------------------------------------------------------------

/// Payload encodings understood by the loader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataFormat {
    /// `[{ "country": ..., "participations": [...] }, ...]`
    Json,
    /// Flat rows `country,year,city,medalsCount,athleteCount`.
    Csv,
}

impl DataFormat {
    /// Pick the format from a path's extension.
    ///
    /// Paths without an extension are treated as JSON, which is what the
    /// static asset is served as.
    pub fn from_path(path: &Path) -> Result<Self, LoadError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("json")
            .to_ascii_lowercase();

        match ext.as_str() {
            "json" => Ok(DataFormat::Json),
            "csv" => Ok(DataFormat::Csv),
            other => Err(LoadError::UnsupportedFormat(other.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Parse a raw payload in the given format.
pub fn parse(format: DataFormat, bytes: &[u8]) -> Result<Dataset, LoadError> {
    match format {
        DataFormat::Json => parse_json(bytes),
        DataFormat::Csv => parse_csv(bytes),
    }
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema:
///
/// ```json
/// [
///   {
///     "id": 1,
///     "country": "Italy",
///     "participations": [
///       { "id": 1, "year": 2012, "city": "Londres", "medalsCount": 28, "athleteCount": 372 }
///     ]
///   }
/// ]
/// ```
///
/// `id` keys are accepted and ignored.
pub fn parse_json(bytes: &[u8]) -> Result<Dataset, LoadError> {
    Ok(serde_json::from_slice(bytes)?)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CsvRow {
    country: String,
    year: i32,
    city: String,
    medals_count: u32,
    athlete_count: u32,
}

/// CSV layout: one participation per row, header row required.
///
/// Rows are grouped by `country`; countries keep the order in which they
/// first appear and participations keep file order.
pub fn parse_csv(bytes: &[u8]) -> Result<Dataset, LoadError> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(bytes);
    let mut countries: Vec<Country> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for result in reader.deserialize::<CsvRow>() {
        let row = result?;
        let participation = Participation {
            year: row.year,
            city: row.city,
            medals_count: row.medals_count,
            athlete_count: row.athlete_count,
        };

        match index.get(&row.country) {
            Some(&i) => countries[i].participations.push(participation),
            None => {
                index.insert(row.country.clone(), countries.len());
                countries.push(Country {
                    country: row.country,
                    participations: vec![participation],
                });
            }
        }
    }

    Dataset::from_countries(countries)
}
