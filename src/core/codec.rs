//! Codec collaborator seam
//!
//! The core never parses DICOM itself. Everything byte-level (transfer
//! syntaxes, explicit/implicit VR, file meta information) lives behind
//! this trait, implemented by the dicom-rs adapter in
//! [`crate::adapters::dicom`].

use crate::core::dataset::Dataset;
use crate::domain::Result;
use std::path::Path;

/// Decodes files into datasets and serializes them back
pub trait DicomCodec {
    /// The dataset representation this codec produces
    type Dataset: Dataset;

    /// Opens a DICOM file into a tag→value dataset
    ///
    /// Fails with a decode error on malformed input or a missing file.
    fn decode(&self, path: &Path) -> Result<Self::Dataset>;

    /// Serializes a dataset to the given path
    ///
    /// The codec guarantees referential fields (the SOP Instance UID in
    /// particular) are structurally valid before writing, regenerating
    /// them when malformed.
    fn encode(&self, dataset: Self::Dataset, path: &Path) -> Result<()>;
}
