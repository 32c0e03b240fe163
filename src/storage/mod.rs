//! Storage abstractions for job output.
//!
//! ## Directory Structure
//!
//! ```text
//! storage/
//! ├── dataset.json          # Jobs of the last run, in processing order
//! └── stats.json            # Run summary of the last run
//! ```

pub mod local;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::{NormalizedJob, RunSummary};

// Re-export for convenience
pub use local::LocalStorage;

/// Metadata about a storage write operation.
#[derive(Debug, Clone)]
pub struct WriteMetadata {
    /// Number of jobs written
    pub job_count: usize,
    /// Where the jobs were written
    pub location: String,
    /// Timestamp of the write
    pub timestamp: DateTime<Utc>,
}

/// Content of `dataset.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetData {
    /// ISO 8601 timestamp of last update
    pub updated_at: DateTime<Utc>,
    /// Total job count
    pub count: usize,
    /// The jobs array
    pub jobs: Vec<NormalizedJob>,
}

impl DatasetData {
    pub fn new(jobs: Vec<NormalizedJob>) -> Self {
        Self {
            updated_at: Utc::now(),
            count: jobs.len(),
            jobs,
        }
    }
}

/// Receiver of the normalized jobs of a run.
#[async_trait]
pub trait JobSink: Send + Sync {
    /// Write the jobs of a run as one batch, together with its summary.
    async fn write_jobs(&self, jobs: &[NormalizedJob], summary: &RunSummary)
    -> Result<WriteMetadata>;

    /// Load the jobs of the last written batch.
    async fn load_jobs(&self) -> Result<Vec<NormalizedJob>>;
}
