//! Core business logic for Veil.
//!
//! This module contains the de-identification policy and its orchestration.
//!
//! # Modules
//!
//! - [`rules`] - Rule variants and the standard policy table
//! - [`random`] - The injectable random shift source
//! - [`dataset`] - The tag→value dataset abstraction the engine operates on
//! - [`engine`] - The three-pass dataset transform engine
//! - [`codec`] - The decode/encode seam to the DICOM codec collaborator
//! - [`batch`] - Directory-level batch orchestration and run summaries
//!
//! # Processing Workflow
//!
//! Per input file:
//!
//! 1. **Decode**: the codec opens the file into a tag→value dataset
//! 2. **Apply rules**: each configured rule rewrites its attribute
//! 3. **Sweep**: unmapped attributes are removed or neutralized
//! 4. **Backfill**: required structural attributes are inserted
//! 5. **Encode**: the codec validates referential fields and writes the file
//!
//! # Example
//!
//! ```rust,no_run
//! use std::path::Path;
//! use std::sync::Arc;
//! use veil::adapters::dicom::DicomFileCodec;
//! use veil::core::batch::BatchCoordinator;
//! use veil::core::engine::TransformEngine;
//! use veil::core::random::SystemShiftSource;
//! use veil::core::rules::RuleSet;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let source = Arc::new(SystemShiftSource::new());
//! let engine = TransformEngine::new(RuleSet::standard(source));
//! let coordinator = BatchCoordinator::new(DicomFileCodec::new(), engine);
//!
//! let summary = coordinator
//!     .execute(Path::new("input"), Path::new("output"))
//!     .await?;
//!
//! println!("Anonymized: {}", summary.files_anonymized);
//! println!("Failed: {}", summary.files_failed);
//! # Ok(())
//! # }
//! ```

pub mod batch;
pub mod codec;
pub mod dataset;
pub mod engine;
pub mod random;
pub mod rules;
