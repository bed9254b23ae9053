//! Run summary and reporting

use serde::Serialize;
use std::time::Duration;

/// One failed file in a batch run
#[derive(Debug, Clone, Serialize)]
pub struct FileError {
    /// Path of the file that failed
    pub path: String,

    /// Human-readable failure description
    pub message: String,
}

impl FileError {
    /// Creates a new file error record
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Summary of one batch run
///
/// Per-file and per-tag problems are recoverable and visible in the log
/// stream; the summary carries the aggregate counts so callers don't have
/// to scrape logs to learn whether anything failed.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    /// Number of candidate files discovered in the input directory
    pub files_found: usize,

    /// Number of files anonymized and written to the output directory
    pub files_anonymized: usize,

    /// Number of files that failed to decode, transform, or encode
    pub files_failed: usize,

    /// Wall-clock duration of the run in milliseconds
    pub duration_ms: u64,

    /// Errors encountered during the run
    pub errors: Vec<FileError>,
}

impl RunSummary {
    /// Creates a new empty run summary
    pub fn new() -> Self {
        Self {
            files_found: 0,
            files_anonymized: 0,
            files_failed: 0,
            duration_ms: 0,
            errors: Vec::new(),
        }
    }

    /// Records a successfully anonymized file
    pub fn record_success(&mut self) {
        self.files_anonymized += 1;
    }

    /// Records a failed file
    pub fn record_failure(&mut self, error: FileError) {
        self.files_failed += 1;
        self.errors.push(error);
    }

    /// Sets the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration_ms = duration.as_millis() as u64;
        self
    }

    /// Check if the run completed without failures
    pub fn is_successful(&self) -> bool {
        self.files_failed == 0 && self.errors.is_empty()
    }

    /// Get success rate as a percentage
    pub fn success_rate(&self) -> f64 {
        if self.files_found == 0 {
            return 100.0;
        }
        (self.files_anonymized as f64 / self.files_found as f64) * 100.0
    }
}

impl Default for RunSummary {
    fn default() -> Self {
        Self::new()
    }
}
