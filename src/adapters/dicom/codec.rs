//! File decode/encode over dicom-rs
//!
//! Decoding opens a DICOM Part 10 file into an in-memory object. Encoding
//! runs the save-side post-processing (inserting defaults for a handful of
//! attributes a reader expects to find, and repairing a malformed SOP
//! Instance UID) before rebuilding the file meta group and writing.

use crate::adapters::dicom::dataset::DicomDataset;
use crate::core::codec::DicomCodec;
use crate::domain::{Result, VeilError};
use dicom::core::{DataElement, PrimitiveValue, Tag as DicomTag, VR};
use dicom::object::meta::FileMetaTableBuilder;
use dicom::object::{open_file, InMemDicomObject};
use regex::Regex;
use std::path::Path;
use uuid::Uuid;

/// Syntactic shape of a DICOM unique identifier
const UID_PATTERN: &str = r"^[0-9]+(\.[0-9]+)*$";

/// Maximum UID length permitted by the encoding rules
const UID_MAX_LEN: usize = 64;

const TRANSFER_SYNTAX_FALLBACK: &str = "1.2.840.10008.1.2.1";

/// dicom-rs backed codec collaborator
pub struct DicomFileCodec {
    uid_pattern: Regex,
}

impl DicomFileCodec {
    /// Creates a new codec
    pub fn new() -> Self {
        Self {
            uid_pattern: Regex::new(UID_PATTERN).expect("UID pattern is a valid regex"),
        }
    }

    fn is_valid_uid(&self, uid: &str) -> bool {
        !uid.is_empty() && uid.len() <= UID_MAX_LEN && self.uid_pattern.is_match(uid)
    }

    /// Ensure the SOP Instance UID is structurally valid, regenerating it
    /// when missing or malformed. Returns the UID the file will carry.
    fn repair_sop_instance_uid(&self, data: &mut InMemDicomObject) -> String {
        let sop_instance = DicomTag(0x0008, 0x0018);
        let current = data
            .element(sop_instance)
            .ok()
            .and_then(|element| element.to_str().ok())
            .map(|value| value.trim_end_matches(['\0', ' ']).to_string());

        match current {
            Some(uid) if self.is_valid_uid(&uid) => uid,
            _ => {
                tracing::info!("Invalid SOP Instance UID, regenerating");
                let uid = generate_uid();
                data.put(DataElement::new(
                    sop_instance,
                    VR::UI,
                    PrimitiveValue::from(uid.as_str()),
                ));
                uid
            }
        }
    }
}

impl Default for DicomFileCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl DicomCodec for DicomFileCodec {
    type Dataset = DicomDataset;

    fn decode(&self, path: &Path) -> Result<DicomDataset> {
        let object = open_file(path).map_err(|error| VeilError::Decode {
            path: path.display().to_string(),
            message: error.to_string(),
        })?;

        let meta = object.meta().clone();
        Ok(DicomDataset::new(object.into_inner(), meta))
    }

    fn encode(&self, mut dataset: DicomDataset, path: &Path) -> Result<()> {
        add_missing_attributes(dataset.data_mut());
        let sop_instance_uid = self.repair_sop_instance_uid(dataset.data_mut());

        let (data, meta) = dataset.into_parts();

        let sop_class_uid = data
            .element(DicomTag(0x0008, 0x0016))
            .ok()
            .and_then(|element| element.to_str().ok())
            .map(|value| value.trim_end_matches(['\0', ' ']).to_string())
            .unwrap_or_else(|| meta.media_storage_sop_class_uid.trim_end_matches('\0').to_string());

        let transfer_syntax = meta.transfer_syntax.trim_end_matches('\0').trim();
        let transfer_syntax = if transfer_syntax.is_empty() {
            TRANSFER_SYNTAX_FALLBACK
        } else {
            transfer_syntax
        };

        let builder = FileMetaTableBuilder::new()
            .media_storage_sop_class_uid(sop_class_uid)
            .media_storage_sop_instance_uid(sop_instance_uid)
            .transfer_syntax(transfer_syntax);

        let object = data.with_meta(builder).map_err(|error| VeilError::Encode {
            path: path.display().to_string(),
            message: error.to_string(),
        })?;

        object.write_to_file(path).map_err(|error| VeilError::Encode {
            path: path.display().to_string(),
            message: error.to_string(),
        })
    }
}

/// A fresh UUID-derived unique identifier
fn generate_uid() -> String {
    format!("2.25.{}", Uuid::new_v4().as_u128())
}

fn put_str_if_absent(data: &mut InMemDicomObject, tag: DicomTag, vr: VR, value: &str) {
    if data.element(tag).is_err() {
        data.put(DataElement::new(tag, vr, PrimitiveValue::from(value)));
    }
}

/// Defaults for attributes a downstream reader expects in a radiograph
fn add_missing_attributes(data: &mut InMemDicomObject) {
    put_str_if_absent(data, DicomTag(0x0018, 0x0015), VR::CS, "UNKNOWN"); // BodyPartExamined
    put_str_if_absent(data, DicomTag(0x0018, 0x5101), VR::CS, "AP"); // ViewPosition
    put_str_if_absent(data, DicomTag(0x0020, 0x0013), VR::IS, "1"); // InstanceNumber

    if data.element(DicomTag(0x0020, 0x000E)).is_err() {
        let uid = generate_uid();
        data.put(DataElement::new(
            DicomTag(0x0020, 0x000E),
            VR::UI,
            PrimitiveValue::from(uid.as_str()),
        )); // SeriesInstanceUID
    }

    put_str_if_absent(data, DicomTag(0x0020, 0x0011), VR::IS, "1"); // SeriesNumber
    put_str_if_absent(data, DicomTag(0x0008, 0x0020), VR::DA, "20240101"); // StudyDate
    put_str_if_absent(data, DicomTag(0x0008, 0x0030), VR::TM, "120000"); // StudyTime
    put_str_if_absent(data, DicomTag(0x0008, 0x0050), VR::SH, "ANON12345"); // AccessionNumber
    put_str_if_absent(
        data,
        DicomTag(0x0008, 0x0090),
        VR::PN,
        "Anonymized Physician",
    ); // ReferringPhysicianName

    if data.element(DicomTag(0x0020, 0x000D)).is_err() {
        let uid = generate_uid();
        data.put(DataElement::new(
            DicomTag(0x0020, 0x000D),
            VR::UI,
            PrimitiveValue::from(uid.as_str()),
        )); // StudyInstanceUID
    }

    put_str_if_absent(data, DicomTag(0x0020, 0x0010), VR::SH, "ANONStudyID"); // StudyID

    if data.element(DicomTag(0x0028, 0x0002)).is_err() {
        data.put(DataElement::new(
            DicomTag(0x0028, 0x0002),
            VR::US,
            PrimitiveValue::from(1_u16),
        )); // SamplesPerPixel
    }

    put_str_if_absent(data, DicomTag(0x0010, 0x0030), VR::DA, "20000101"); // PatientBirthDate
    put_str_if_absent(data, DicomTag(0x0010, 0x0040), VR::CS, "O"); // PatientSex
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::dataset::Dataset;
    use crate::domain::Tag;
    use dicom::core::header::Header;
    use dicom::object::meta::FileMetaTableBuilder;
    use dicom::object::FileMetaTable;
    use tempfile::TempDir;

    fn test_meta() -> FileMetaTable {
        FileMetaTableBuilder::new()
            .media_storage_sop_class_uid("1.2.840.10008.5.1.4.1.1.1")
            .media_storage_sop_instance_uid("1.2.3.4")
            .transfer_syntax("1.2.840.10008.1.2.1")
            .build()
            .unwrap()
    }

    #[test]
    fn test_uid_validation() {
        let codec = DicomFileCodec::new();

        assert!(codec.is_valid_uid("1.2.840.10008.1.2.1"));
        assert!(codec.is_valid_uid("2.25.329800735698586629295641978511506172918"));
        assert!(!codec.is_valid_uid(""));
        assert!(!codec.is_valid_uid("1.2.abc.4"));
        assert!(!codec.is_valid_uid("1..2"));
        assert!(!codec.is_valid_uid(".1.2"));
        assert!(!codec.is_valid_uid(&"1".repeat(65)));
    }

    #[test]
    fn test_generated_uid_is_valid() {
        let codec = DicomFileCodec::new();
        let uid = generate_uid();

        assert!(uid.starts_with("2.25."));
        assert!(codec.is_valid_uid(&uid));
        assert!(uid.len() <= UID_MAX_LEN);
    }

    #[test]
    fn test_repair_keeps_valid_uid() {
        let codec = DicomFileCodec::new();
        let mut data = InMemDicomObject::new_empty();
        data.put(DataElement::new(
            DicomTag(0x0008, 0x0018),
            VR::UI,
            PrimitiveValue::from("1.2.3.4.5"),
        ));

        let uid = codec.repair_sop_instance_uid(&mut data);
        assert_eq!(uid, "1.2.3.4.5");
    }

    #[test]
    fn test_repair_regenerates_malformed_uid() {
        let codec = DicomFileCodec::new();
        let mut data = InMemDicomObject::new_empty();
        data.put(DataElement::new(
            DicomTag(0x0008, 0x0018),
            VR::UI,
            PrimitiveValue::from("not-a-uid"),
        ));

        let uid = codec.repair_sop_instance_uid(&mut data);
        assert!(codec.is_valid_uid(&uid));

        let stored = data
            .element(DicomTag(0x0008, 0x0018))
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();
        assert_eq!(stored, uid);
    }

    #[test]
    fn test_repair_regenerates_missing_uid() {
        let codec = DicomFileCodec::new();
        let mut data = InMemDicomObject::new_empty();

        let uid = codec.repair_sop_instance_uid(&mut data);
        assert!(codec.is_valid_uid(&uid));
        assert!(data.element(DicomTag(0x0008, 0x0018)).is_ok());
    }

    #[test]
    fn test_missing_attributes_are_defaulted() {
        let mut data = InMemDicomObject::new_empty();
        add_missing_attributes(&mut data);

        let body_part = data
            .element(DicomTag(0x0018, 0x0015))
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();
        assert_eq!(body_part, "UNKNOWN");

        let samples = data.element(DicomTag(0x0028, 0x0002)).unwrap();
        assert_eq!(samples.vr(), VR::US);

        assert!(data.element(DicomTag(0x0020, 0x000D)).is_ok()); // StudyInstanceUID
        assert!(data.element(DicomTag(0x0020, 0x000E)).is_ok()); // SeriesInstanceUID
    }

    #[test]
    fn test_present_attributes_are_not_overwritten() {
        let mut data = InMemDicomObject::new_empty();
        data.put(DataElement::new(
            DicomTag(0x0008, 0x0020),
            VR::DA,
            PrimitiveValue::from("20191231"),
        ));

        add_missing_attributes(&mut data);

        let study_date = data
            .element(DicomTag(0x0008, 0x0020))
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();
        assert_eq!(study_date, "20191231");
    }

    #[test]
    fn test_decode_missing_file_is_a_decode_error() {
        let codec = DicomFileCodec::new();
        let result = codec.decode(Path::new("/definitely/missing.dcm"));
        assert!(matches!(result, Err(VeilError::Decode { .. })));
    }

    #[test]
    fn test_encode_decode_round_trip() {
        let codec = DicomFileCodec::new();
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.dcm");

        let mut data = InMemDicomObject::new_empty();
        data.put(DataElement::new(
            DicomTag(0x0008, 0x0016),
            VR::UI,
            PrimitiveValue::from("1.2.840.10008.5.1.4.1.1.1"),
        ));
        data.put(DataElement::new(
            DicomTag(0x0008, 0x0018),
            VR::UI,
            PrimitiveValue::from("1.2.3.4.5"),
        ));
        data.put(DataElement::new(
            DicomTag(0x0010, 0x0010),
            VR::PN,
            PrimitiveValue::from("DEFAULT NAME"),
        ));

        let dataset = DicomDataset::new(data, test_meta());
        codec.encode(dataset, &path).unwrap();

        let reloaded = codec.decode(&path).unwrap();
        assert_eq!(
            reloaded.string(&Tag::new("0010", "0010")).unwrap(),
            Some("DEFAULT NAME".to_string())
        );
        assert_eq!(
            reloaded.string(&Tag::new("0008", "0018")).unwrap(),
            Some("1.2.3.4.5".to_string())
        );
        // Save-side defaults were applied before writing.
        assert_eq!(
            reloaded.string(&Tag::new("0018", "0015")).unwrap(),
            Some("UNKNOWN".to_string())
        );
    }
}
