use std::fmt;
use std::io::Cursor;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::StatusCode;
use thiserror::Error;

use super::loader;
use super::model::SurveyDataset;

/// Where the published survey archive lives.
pub const DEFAULT_DATASET_URL: &str =
    "https://github.com/azalliamelani/stackoverflow-2023-survey/raw/main/dashboard/survey_results_public.zip";

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} answered with {status}")]
    Status { url: String, status: StatusCode },
}

// ---------------------------------------------------------------------------
// DatasetSource
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatasetSource {
    /// A zip archive served over HTTP(S).
    Remote(String),
    /// A local file in any format [`loader::load_file`] understands.
    Local(PathBuf),
}

impl DatasetSource {
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.starts_with("http://") || raw.starts_with("https://") {
            DatasetSource::Remote(raw.to_string())
        } else {
            DatasetSource::Local(PathBuf::from(raw))
        }
    }

    /// Fetch (if remote) and parse the dataset.
    pub fn load(&self, timeout: Duration) -> Result<SurveyDataset> {
        match self {
            DatasetSource::Remote(url) => {
                let bytes = fetch_archive(url, timeout)?;
                log::info!("Downloaded {} bytes from {url}", bytes.len());
                let dataset = loader::load_archive(Cursor::new(bytes))
                    .with_context(|| format!("unpacking archive from {url}"))?;
                log::info!("Loaded {} records from {url}", dataset.len());
                Ok(dataset)
            }
            DatasetSource::Local(path) => loader::load_file(path),
        }
    }
}

impl Default for DatasetSource {
    fn default() -> Self {
        DatasetSource::Remote(DEFAULT_DATASET_URL.to_string())
    }
}

impl fmt::Display for DatasetSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatasetSource::Remote(url) => write!(f, "{url}"),
            DatasetSource::Local(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Download the archive body. One attempt; failures are returned as-is.
pub fn fetch_archive(url: &str, timeout: Duration) -> Result<Vec<u8>, FetchError> {
    let request_err = |source: reqwest::Error| FetchError::Request {
        url: url.to_string(),
        source,
    };

    let client = reqwest::blocking::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(request_err)?;
    let response = client.get(url).send().map_err(request_err)?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            url: url.to_string(),
            status,
        });
    }

    let body = response.bytes().map_err(request_err)?;
    Ok(body.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_distinguishes_urls_from_paths() {
        assert_eq!(
            DatasetSource::parse("https://example.com/survey.zip"),
            DatasetSource::Remote("https://example.com/survey.zip".into())
        );
        assert_eq!(
            DatasetSource::parse(" data/survey.csv "),
            DatasetSource::Local(PathBuf::from("data/survey.csv"))
        );
    }

    #[test]
    fn default_points_at_published_archive() {
        assert_eq!(DatasetSource::default().to_string(), DEFAULT_DATASET_URL);
    }

    #[test]
    fn local_source_loads_through_file_loader() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        std::io::Write::write_all(
            &mut file,
            b"Age,Country\n45-54 years old,Norway\n",
        )
        .unwrap();
        let source = DatasetSource::Local(file.path().to_path_buf());
        let dataset = source.load(Duration::from_secs(1)).unwrap();
        assert_eq!(dataset.len(), 1);
        assert_eq!(dataset.records[0].age_numeric(), Some(49.5));
    }
}
