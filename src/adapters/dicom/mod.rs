//! DICOM codec adapter
//!
//! Everything byte-level is delegated to the dicom-rs crate family; this
//! module adapts it to the core's [`Dataset`](crate::core::dataset::Dataset)
//! and [`DicomCodec`](crate::core::codec::DicomCodec) seams.

pub mod codec;
pub mod dataset;

pub use codec::DicomFileCodec;
pub use dataset::DicomDataset;
