//! Backing sources the store fetches its dataset from.
//!
//! The store only sees [`DatasetSource`]; it treats every failure the same
//! way, so implementations just report what went wrong through [`LoadError`].

use std::path::PathBuf;

use async_trait::async_trait;

use super::loader::{self, DataFormat};
use super::model::Dataset;
use crate::error::LoadError;

/// A read-only fetch of the whole dataset.
#[async_trait]
pub trait DatasetSource: Send + Sync {
    /// Fetch and parse the dataset.
    async fn fetch(&self) -> Result<Dataset, LoadError>;

    /// Human-readable location, used in log lines.
    fn describe(&self) -> String;
}

// ---------------------------------------------------------------------------
// Local file
// ---------------------------------------------------------------------------

/// A JSON or CSV file on disk, format picked from the extension.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl DatasetSource for FileSource {
    async fn fetch(&self) -> Result<Dataset, LoadError> {
        let format = DataFormat::from_path(&self.path)?;
        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|source| LoadError::Io {
                path: self.path.clone(),
                source,
            })?;
        loader::parse(format, &bytes)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

// ---------------------------------------------------------------------------
// In-memory
// ---------------------------------------------------------------------------

/// A dataset already held in memory, or a canned failure.
#[derive(Debug, Clone)]
pub struct StaticSource {
    outcome: Result<Dataset, String>,
}

impl StaticSource {
    pub fn new(dataset: Dataset) -> Self {
        Self {
            outcome: Ok(dataset),
        }
    }

    /// A source whose every fetch fails with an I/O error carrying `reason`.
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            outcome: Err(reason.into()),
        }
    }
}

#[async_trait]
impl DatasetSource for StaticSource {
    async fn fetch(&self) -> Result<Dataset, LoadError> {
        match &self.outcome {
            Ok(dataset) => Ok(dataset.clone()),
            Err(reason) => Err(LoadError::Io {
                path: PathBuf::from("<memory>"),
                source: std::io::Error::other(reason.clone()),
            }),
        }
    }

    fn describe(&self) -> String {
        "<memory>".to_string()
    }
}

// ---------------------------------------------------------------------------
// HTTP
// ---------------------------------------------------------------------------

/// A JSON payload served over HTTP(S).
#[cfg(feature = "http")]
#[derive(Debug, Clone)]
pub struct HttpSource {
    url: String,
    client: reqwest::Client,
}

#[cfg(feature = "http")]
impl HttpSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            client: reqwest::Client::new(),
        }
    }
}

#[cfg(feature = "http")]
#[async_trait]
impl DatasetSource for HttpSource {
    async fn fetch(&self) -> Result<Dataset, LoadError> {
        let http_err = |source: reqwest::Error| LoadError::Http {
            url: self.url.clone(),
            source,
        };
        let body = self
            .client
            .get(&self.url)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(http_err)?
            .bytes()
            .await
            .map_err(http_err)?;
        loader::parse_json(&body)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

/// Resolve a configured location into a source.
///
/// `http://` and `https://` locations need the `http` feature; without it
/// they are treated as paths and fail on read.
pub fn source_for_location(location: &str) -> Box<dyn DatasetSource> {
    remote_source(location).unwrap_or_else(|| Box::new(FileSource::new(location)))
}

#[cfg(feature = "http")]
fn remote_source(location: &str) -> Option<Box<dyn DatasetSource>> {
    (location.starts_with("http://") || location.starts_with("https://"))
        .then(|| Box::new(HttpSource::new(location)) as Box<dyn DatasetSource>)
}

#[cfg(not(feature = "http"))]
fn remote_source(_location: &str) -> Option<Box<dyn DatasetSource>> {
    None
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[tokio::test]
    async fn file_source_reads_json() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(
            file,
            r#"[{{"country": "A", "participations": [{{"year": 2000, "city": "X", "medalsCount": 1, "athleteCount": 2}}]}}]"#
        )
        .unwrap();

        let ds = FileSource::new(file.path()).fetch().await.unwrap();
        assert_eq!(ds.len(), 1);
    }

    #[tokio::test]
    async fn file_source_reads_csv() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, "country,year,city,medalsCount,athleteCount").unwrap();
        writeln!(file, "A,2000,X,1,2").unwrap();

        let ds = FileSource::new(file.path()).fetch().await.unwrap();
        assert_eq!(ds.find("A").unwrap().total_athletes(), 2);
    }

    #[tokio::test]
    async fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = FileSource::new(dir.path().join("absent.json"))
            .fetch()
            .await
            .unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }

    #[tokio::test]
    async fn static_source_failure() {
        let err = StaticSource::failing("boom").fetch().await.unwrap_err();
        assert!(err.to_string().contains("boom"));
    }

    #[test]
    fn plain_locations_are_files() {
        assert_eq!(source_for_location("assets/olympic.json").describe(), "assets/olympic.json");
    }
}
