// Veil - DICOM De-identification Tool
// Copyright (c) 2026 Veil Contributors
// Licensed under the MIT License

use clap::Parser;
use std::process;
use std::sync::Arc;
use veil::adapters::dicom::DicomFileCodec;
use veil::cli::Cli;
use veil::config::LoggingConfig;
use veil::core::batch::{BatchCoordinator, RunSummary};
use veil::core::engine::TransformEngine;
use veil::core::random::SystemShiftSource;
use veil::core::rules::RuleSet;
use veil::logging::init_logging;

#[tokio::main]
async fn main() {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging with console-only config
    let log_level = cli.log_level.as_deref().unwrap_or("info");
    let logging_config = LoggingConfig::default();
    let _guard = match init_logging(log_level, &logging_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(1);
        }
    };

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "Veil - DICOM de-identification tool"
    );

    let exit_code = match run(&cli).await {
        Ok(summary) => {
            println!(
                "Anonymization complete. {} of {} files written to {} ({} failed).",
                summary.files_anonymized,
                summary.files_found,
                cli.output_dir.display(),
                summary.files_failed
            );
            0
        }
        Err(e) => {
            tracing::error!(error = %e, "Anonymization run failed");
            eprintln!("Error: {e}");
            1
        }
    };

    process::exit(exit_code);
}

/// Build the pipeline by explicit construction and run the batch
async fn run(cli: &Cli) -> anyhow::Result<RunSummary> {
    let source = Arc::new(SystemShiftSource::new());
    let engine = TransformEngine::new(RuleSet::standard(source));
    let coordinator = BatchCoordinator::new(DicomFileCodec::new(), engine);

    let summary = coordinator.execute(&cli.input_dir, &cli.output_dir).await?;

    if let Ok(report) = serde_json::to_string(&summary) {
        tracing::debug!(%report, "Run summary");
    }

    Ok(summary)
}
