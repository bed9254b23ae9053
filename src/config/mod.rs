//! Configuration for Veil.
//!
//! The de-identification policy itself is a design-time constant (see
//! [`crate::core::rules::RuleSet::standard`]), and the directories come in
//! on the command line, so there is no configuration file layer. What
//! remains configurable is the ambient logging behavior.
//!
//! # Environment Variables
//!
//! - `VEIL_INPUT_DIR` / `VEIL_OUTPUT_DIR` - defaults for the CLI arguments
//! - `VEIL_LOG_LEVEL` - default log level
//!
//! A `.env` file in the working directory is loaded on startup when
//! present.

use serde::{Deserialize, Serialize};

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Whether to write log files in addition to console output
    pub local_enabled: bool,

    /// Directory that receives rotated log files
    pub local_path: String,

    /// Rotation policy: "daily" or "hourly"
    pub local_rotation: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: "logs".to_string(),
            local_rotation: "daily".to_string(),
        }
    }
}
