//! Sequential merges over many files.

use std::path::PathBuf;
use tracing::warn;

use super::options::MergeOptions;
use super::orchestrator::{merge_file, MergeOutcome};
use crate::error::{Error, Result};

/// Where the generated text of a job comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobSource {
    /// Generated text held in memory.
    Text(String),
    /// A file holding the generated text.
    File(PathBuf),
}

/// MergeJob merges one generated document into one target file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeJob {
    pub target: PathBuf,
    pub source: JobSource,
    pub options: MergeOptions,
}

impl MergeJob {
    /// Creates a job merging in-memory text.
    pub fn from_text(target: impl Into<PathBuf>, text: impl Into<String>, options: MergeOptions) -> Self {
        MergeJob {
            target: target.into(),
            source: JobSource::Text(text.into()),
            options,
        }
    }

    /// Creates a job merging the contents of a file.
    pub fn from_file(target: impl Into<PathBuf>, source: impl Into<PathBuf>, options: MergeOptions) -> Self {
        MergeJob {
            target: target.into(),
            source: JobSource::File(source.into()),
            options,
        }
    }

    /// Runs the job.
    pub fn run(&self) -> Result<MergeOutcome> {
        match &self.source {
            JobSource::Text(text) => merge_file(&self.target, text, &self.options),
            JobSource::File(path) => {
                let text = std::fs::read_to_string(path).map_err(|e| Error::io("read", path, e))?;
                merge_file(&self.target, &text, &self.options)
            }
        }
    }
}

/// Runs every job in order and returns one result per job.
///
/// A failed job is logged and does not stop the jobs after it.
pub fn merge_all(jobs: &[MergeJob]) -> Vec<Result<MergeOutcome>> {
    jobs.iter()
        .map(|job| {
            let result = job.run();
            if let Err(e) = &result {
                warn!(path = %job.target.display(), error = %e, "merge failed");
            }
            result
        })
        .collect()
}
