//! Local filesystem storage implementation.
//!
//! ## Storage Layout
//!
//! ```text
//! {root}/
//! ├── dataset.json          # Normalized jobs
//! └── stats.json            # Run summary
//! ```

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};
use tokio::io::AsyncWriteExt;

use crate::error::{AppError, Result};
use crate::models::{NormalizedJob, RunSummary};
use crate::storage::{DatasetData, JobSink, WriteMetadata};

const DATASET_KEY: &str = "dataset.json";
const STATS_KEY: &str = "stats.json";

/// Local filesystem storage backend.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    root_dir: PathBuf,
    pretty: bool,
}

impl LocalStorage {
    /// Create a new LocalStorage rooted at the given directory.
    pub fn new(root_dir: impl Into<PathBuf>) -> Self {
        Self {
            root_dir: root_dir.into(),
            pretty: true,
        }
    }

    /// Toggle pretty-printed JSON output.
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    /// Get the full path for a relative key.
    fn path(&self, key: &str) -> PathBuf {
        self.root_dir.join(key)
    }

    /// Ensure parent directory exists.
    async fn ensure_dir(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        Ok(())
    }

    /// Write bytes atomically (write to temp, then rename).
    async fn write_bytes(&self, key: &str, bytes: &[u8]) -> Result<()> {
        let path = self.path(key);
        self.ensure_dir(&path).await?;

        let tmp = path.with_extension("tmp");
        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(bytes).await?;
        file.flush().await?;
        drop(file);

        tokio::fs::rename(&tmp, &path).await?;
        Ok(())
    }

    /// Write JSON data.
    async fn write_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let bytes = if self.pretty {
            serde_json::to_vec_pretty(value)?
        } else {
            serde_json::to_vec(value)?
        };
        self.write_bytes(key, &bytes).await
    }

    /// Read bytes, returning None if file doesn't exist.
    async fn read_bytes(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let path = self.path(key);
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::Io(e)),
        }
    }

    /// Read JSON data.
    async fn read_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.read_bytes(key).await? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    /// Load the full dataset document, if one was written.
    pub async fn load_dataset(&self) -> Result<Option<DatasetData>> {
        self.read_json(DATASET_KEY).await
    }

    /// Load the summary of the last run, if one was written.
    pub async fn load_summary(&self) -> Result<Option<RunSummary>> {
        self.read_json(STATS_KEY).await
    }
}

#[async_trait]
impl JobSink for LocalStorage {
    async fn write_jobs(
        &self,
        jobs: &[NormalizedJob],
        summary: &RunSummary,
    ) -> Result<WriteMetadata> {
        let dataset = DatasetData::new(jobs.to_vec());
        self.write_json(DATASET_KEY, &dataset).await?;
        log::info!("{} jobs written to {}", dataset.count, DATASET_KEY);

        // Write stats for debugging
        self.write_json(STATS_KEY, summary).await?;

        Ok(WriteMetadata {
            job_count: dataset.count,
            location: self.path(DATASET_KEY).display().to_string(),
            timestamp: dataset.updated_at,
        })
    }

    async fn load_jobs(&self) -> Result<Vec<NormalizedJob>> {
        match self.load_dataset().await? {
            Some(data) => Ok(data.jobs),
            None => {
                log::warn!("No {} found", DATASET_KEY);
                Ok(Vec::new())
            }
        }
    }
}
