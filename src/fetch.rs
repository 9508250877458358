use async_trait::async_trait;
use itertools::Itertools;
use reqwest::header::ACCEPT;
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use tracing::debug;

use crate::error::RetrievalError;

/// Where a time-series table lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Source {
    Remote(String),
    Local(PathBuf),
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Remote(url) => write!(f, "{}", url),
            Source::Local(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Reduces a data source to a single scalar total.
#[async_trait(?Send)]
pub trait MetricFetcher {
    async fn fetch_total(&self, source: &Source) -> Result<u64, RetrievalError>;
}

/// The most recent column of a time-series table.
#[derive(Debug, Clone, PartialEq)]
pub struct LastColumn {
    pub header: String,
    pub values: Vec<f64>,
}

impl LastColumn {
    pub fn total(&self) -> u64 {
        let sum: f64 = self.values.iter().sum();
        sum.max(0.0).round() as u64
    }
}

/// Select the last column of a CSV table with a header row.
///
/// Columns are dated in chronological order, so the last one is the latest
/// snapshot. Empty cells are skipped; anything else that is not a number is
/// an error.
pub fn last_column(body: &str) -> Result<LastColumn, RetrievalError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(body.as_bytes());

    let headers = reader.headers()?.clone();
    let index = match headers.len().checked_sub(1) {
        Some(index) => index,
        None => return Err(RetrievalError::MissingColumn),
    };
    let header = headers.get(index).unwrap_or_default().to_string();

    let mut values = Vec::new();
    for (row, record) in reader.records().enumerate() {
        let record = record?;
        let cell = match record.get(index) {
            Some(cell) => cell.trim(),
            None => continue,
        };
        if cell.is_empty() {
            continue;
        }
        let value = cell
            .parse::<f64>()
            .map_err(|_| RetrievalError::MalformedCell {
                row: row + 1,
                column: header.clone(),
                value: cell.to_string(),
            })?;
        values.push(value);
    }

    Ok(LastColumn { header, values })
}

/// Fetches CSV tables over HTTP or from local fixture files.
pub struct CsvFetcher {
    client: reqwest::Client,
    verbose: bool,
}

impl CsvFetcher {
    pub fn new(verbose: bool) -> Self {
        Self::with_client(reqwest::Client::new(), verbose)
    }

    pub fn with_client(client: reqwest::Client, verbose: bool) -> Self {
        CsvFetcher { client, verbose }
    }

    async fn download(&self, source: &Source) -> Result<String, RetrievalError> {
        match source {
            Source::Remote(url) => {
                let res = self
                    .client
                    .get(url)
                    .header(ACCEPT, "text/csv")
                    .send()
                    .await?
                    .error_for_status()?
                    .text()
                    .await?;
                Ok(res)
            }
            Source::Local(path) => {
                tokio::fs::read_to_string(path)
                    .await
                    .map_err(|source| RetrievalError::Io {
                        path: path.clone(),
                        source,
                    })
            }
        }
    }
}

#[async_trait(?Send)]
impl MetricFetcher for CsvFetcher {
    async fn fetch_total(&self, source: &Source) -> Result<u64, RetrievalError> {
        let body = self.download(source).await?;
        if self.verbose {
            println!("{}", body);
        }

        let column = last_column(&body)?;
        if self.verbose {
            println!(
                "{}: [{}]",
                column.header,
                column.values.iter().map(|v| v.to_string()).join(", ")
            );
        }

        let total = column.total();
        debug!(%source, column = %column.header, rows = column.values.len(), total, "fetched");
        Ok(total)
    }
}
