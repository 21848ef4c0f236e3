//! Raw data sources

use crate::csv_reader::{parse_csv, read_csv_file};
use crate::error::{ExtractError, ExtractResult};
use evwh_core::{ingest, Dataset, IngestReport, RawTable, SourceConfig};
use std::path::PathBuf;
use std::time::Duration;

/// Anything that can produce the raw registration table.
pub trait Source {
    /// Fetch and parse the full raw table.
    fn fetch(&self) -> ExtractResult<RawTable>;

    /// Human-readable origin, for logs.
    fn describe(&self) -> String;
}

/// CSV export served over HTTP(S).
#[derive(Debug, Clone)]
pub struct HttpSource {
    pub url: String,
    pub timeout: Duration,
}

impl HttpSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            url: url.into(),
            timeout,
        }
    }

    pub fn from_config(config: &SourceConfig) -> Self {
        Self::new(&config.url, Duration::from_secs(config.timeout_secs))
    }
}

impl Source for HttpSource {
    fn fetch(&self) -> ExtractResult<RawTable> {
        let http_err = |source| ExtractError::Http {
            url: self.url.clone(),
            source,
        };

        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(http_err)?;
        let response = client.get(&self.url).send().map_err(http_err)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ExtractError::SourceUnavailable {
                url: self.url.clone(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().map_err(http_err)?;
        log::debug!("Downloaded {} bytes from {}", body.len(), self.url);
        parse_csv(body.as_ref())
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

/// CSV file on local disk.
#[derive(Debug, Clone)]
pub struct FileSource {
    pub path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Source for FileSource {
    fn fetch(&self) -> ExtractResult<RawTable> {
        read_csv_file(&self.path)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Fetch from `source` and type the result into a [`Dataset`].
pub fn extract(source: &dyn Source) -> ExtractResult<(Dataset, IngestReport)> {
    log::info!("Extracting from {}", source.describe());
    let raw = source.fetch()?;
    let (dataset, report) = ingest(&raw);
    log::info!("Extracted {} records", dataset.len());
    Ok((dataset, report))
}

#[cfg(test)]
#[path = "source_test.rs"]
mod tests;
