//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for Veil using clap.
//! The surface is deliberately small: an input directory, an output
//! directory, and the ambient log level. Anything else is a usage error.

use clap::Parser;
use std::path::PathBuf;

/// Veil - DICOM de-identification tool
#[derive(Parser, Debug)]
#[command(name = "veil")]
#[command(version, about, long_about = None)]
#[command(author = "Veil Contributors")]
pub struct Cli {
    /// Directory containing the DICOM files to de-identify
    #[arg(long, value_name = "DIR", env = "VEIL_INPUT_DIR")]
    pub input_dir: PathBuf,

    /// Directory that receives the de-identified files
    #[arg(long, value_name = "DIR", env = "VEIL_OUTPUT_DIR")]
    pub output_dir: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "VEIL_LOG_LEVEL")]
    pub log_level: Option<String>,
}
