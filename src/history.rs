use std::path::PathBuf;
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;

use crate::constants::HISTORY_FILE;
use crate::error::HistoryError;

/// Append-only log of rendered reports.
#[derive(Debug, Clone)]
pub struct HistoryRecorder {
    path: PathBuf,
}

impl HistoryRecorder {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        HistoryRecorder { path: path.into() }
    }

    /// `~/covid19_history.dat`, or the working directory without a home.
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(HISTORY_FILE)
    }

    fn error(&self, source: std::io::Error) -> HistoryError {
        HistoryError {
            path: self.path.clone(),
            source,
        }
    }

    pub async fn append(&self, text: &str) -> Result<(), HistoryError> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .map_err(|e| self.error(e))?;
        file.write_all(text.as_bytes())
            .await
            .map_err(|e| self.error(e))?;
        file.flush().await.map_err(|e| self.error(e))?;
        Ok(())
    }

    /// Full log contents; creates an empty log on first use.
    pub async fn replay(&self) -> Result<String, HistoryError> {
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .map_err(|e| self.error(e))?;
        fs::read_to_string(&self.path)
            .await
            .map_err(|e| self.error(e))
    }
}
