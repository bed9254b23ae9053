//! Batch coordinator - orchestrates a whole de-identification run
//!
//! Enumerates the DICOM files of an input directory and pushes each one
//! through decode → transform → encode. A failing file is logged and
//! recorded in the summary; it never stops the batch. Only directory-level
//! preconditions are terminal.

use crate::core::batch::summary::{FileError, RunSummary};
use crate::core::codec::DicomCodec;
use crate::core::engine::TransformEngine;
use crate::domain::{Result, VeilError};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Batch coordinator
pub struct BatchCoordinator<C: DicomCodec> {
    codec: C,
    engine: TransformEngine,
}

impl<C: DicomCodec> BatchCoordinator<C> {
    /// Creates a coordinator over a codec and a transform engine
    pub fn new(codec: C, engine: TransformEngine) -> Self {
        Self { codec, engine }
    }

    /// Runs the batch
    ///
    /// Fails only for directory-level preconditions: a missing input
    /// directory or an output directory that cannot be created. Per-file
    /// errors are recorded in the returned [`RunSummary`].
    pub async fn execute(&self, input_dir: &Path, output_dir: &Path) -> Result<RunSummary> {
        let start = Instant::now();

        if !input_dir.is_dir() {
            return Err(VeilError::Usage(format!(
                "Input folder does not exist: {}",
                input_dir.display()
            )));
        }

        std::fs::create_dir_all(output_dir)?;

        let files = discover_dicom_files(input_dir)?;
        let mut summary = RunSummary::new();
        summary.files_found = files.len();

        tracing::info!(
            input = %input_dir.display(),
            output = %output_dir.display(),
            files = files.len(),
            "Starting anonymization run"
        );

        for path in files {
            match self.process_file(&path, output_dir).await {
                Ok(output_path) => {
                    tracing::info!(
                        input = %path.display(),
                        output = %output_path.display(),
                        "Successfully anonymized DICOM file"
                    );
                    summary.record_success();
                }
                Err(error) => {
                    tracing::error!(path = %path.display(), %error, "Error processing file");
                    summary.record_failure(FileError::new(
                        path.display().to_string(),
                        error.to_string(),
                    ));
                }
            }
        }

        let summary = summary.with_duration(start.elapsed());
        tracing::info!(
            anonymized = summary.files_anonymized,
            failed = summary.files_failed,
            duration_ms = summary.duration_ms,
            "Anonymization run finished"
        );

        Ok(summary)
    }

    /// Decode, transform, and encode one file
    async fn process_file(&self, path: &Path, output_dir: &Path) -> Result<PathBuf> {
        let mut dataset = self.codec.decode(path)?;

        self.engine.anonymize(&mut dataset);

        let file_name = path.file_name().ok_or_else(|| {
            VeilError::Io(format!("Path has no file name: {}", path.display()))
        })?;
        let output_path = output_dir.join(file_name);

        self.codec.encode(dataset, &output_path)?;
        Ok(output_path)
    }
}

/// Lists `*.dcm` files (case-insensitive extension) in sorted order
fn discover_dicom_files(input_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in std::fs::read_dir(input_dir)? {
        let entry = entry?;
        let path = entry.path();
        let is_dicom = path.is_file()
            && path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case("dcm"));
        if is_dicom {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}
