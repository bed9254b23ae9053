// Veil - DICOM De-identification Tool
// Copyright (c) 2026 Veil Contributors
// Licensed under the MIT License

//! # Veil - DICOM De-identification
//!
//! Veil is a command-line tool built in Rust that de-identifies DICOM
//! medical imaging files: a fixed policy table rewrites patient-identifying
//! metadata while preserving the attributes needed for clinical and
//! technical interpretation (image geometry, pixel encoding, referential
//! identifiers).
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Applying** per-attribute rules (preserve, replace, date-shift)
//! - **Sweeping** unmapped attributes out of the dataset
//! - **Backfilling** required structural attributes with documented defaults
//! - **Batching** over directories with per-file failure isolation
//!
//! ## Architecture
//!
//! Veil follows a layered architecture:
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Business logic (rules, transform engine, batch orchestration)
//! - [`adapters`] - The dicom-rs codec integration
//! - [`domain`] - Core domain types and errors
//! - [`config`] - Configuration
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
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
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let source = Arc::new(SystemShiftSource::new());
//!     let engine = TransformEngine::new(RuleSet::standard(source));
//!     let coordinator = BatchCoordinator::new(DicomFileCodec::new(), engine);
//!
//!     let summary = coordinator
//!         .execute(Path::new("input"), Path::new("output"))
//!         .await?;
//!
//!     println!("Anonymized {} files", summary.files_anonymized);
//!     Ok(())
//! }
//! ```
//!
//! ## De-identification Policy
//!
//! The policy table is a design-time constant built once at startup
//! ([`core::rules::RuleSet::standard`]): birth and study dates are shifted
//! back by a random 1–364 days, identity-neutral attributes are preserved
//! verbatim, and everything the table does not mention is removed by the
//! sweep (with a small keep-list of structurally required attributes, a
//! placeholder for the patient name, and an exemption for pixel data).
//!
//! Date shifting is one-way and non-idempotent: every run draws fresh
//! offsets, so repeated runs over the same input produce different dates.
//!
//! ## Error Handling
//!
//! Veil uses the [`domain::VeilError`] type for all errors. No error ever
//! crosses a file boundary: a bad attribute is logged and skipped, a bad
//! file is logged and recorded in the run summary, and only directory-level
//! preconditions abort a batch.

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
