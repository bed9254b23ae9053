//! Core dataset trait implemented over a dicom-rs in-memory object
//!
//! The main data set and the file meta information group are kept apart,
//! as dicom-rs models them: the engine only ever sees the main data set,
//! while the meta table is owned by the codec and round-tripped at encode
//! time.

use crate::core::dataset::{Dataset, ValueKind};
use crate::domain::{Result, Tag, VeilError};
use dicom::core::header::Header;
use dicom::core::value::{PrimitiveValue, Value as DicomValue, C};
use dicom::core::{DataElement, Tag as DicomTag, VR};
use dicom::object::{FileMetaTable, InMemDicomObject};

/// A decoded DICOM file: main data set plus file meta information
pub struct DicomDataset {
    data: InMemDicomObject,
    meta: FileMetaTable,
}

impl DicomDataset {
    /// Wraps a data set and its file meta table
    pub fn new(data: InMemDicomObject, meta: FileMetaTable) -> Self {
        Self { data, meta }
    }

    /// The main data set
    pub fn data(&self) -> &InMemDicomObject {
        &self.data
    }

    /// Mutable access for the codec's save-side post-processing
    pub(crate) fn data_mut(&mut self) -> &mut InMemDicomObject {
        &mut self.data
    }

    /// The file meta information group
    pub fn meta(&self) -> &FileMetaTable {
        &self.meta
    }

    /// Splits the dataset into its parts for serialization
    pub(crate) fn into_parts(self) -> (InMemDicomObject, FileMetaTable) {
        (self.data, self.meta)
    }
}

/// Converts a domain tag into a numeric dicom-rs tag
///
/// This is where structurally tolerated malformed hex finally fails.
pub(crate) fn to_dicom_tag(tag: &Tag) -> Result<DicomTag> {
    let group = u16::from_str_radix(tag.group(), 16)
        .map_err(|_| VeilError::Dataset(format!("Malformed tag group: {tag}")))?;
    let element = u16::from_str_radix(tag.element(), 16)
        .map_err(|_| VeilError::Dataset(format!("Malformed tag element: {tag}")))?;
    Ok(DicomTag(group, element))
}

pub(crate) fn from_dicom_tag(tag: DicomTag) -> Tag {
    Tag::new(format!("{:04X}", tag.group()), format!("{:04X}", tag.element()))
}

/// Value representations that string rewriting cannot safely touch
fn kind_for_vr(vr: VR) -> ValueKind {
    match vr {
        VR::OB | VR::OW | VR::OD | VR::OF | VR::OL | VR::OV | VR::SQ | VR::UN | VR::UT
        | VR::AT => ValueKind::Opaque,
        VR::DS | VR::IS => ValueKind::NumericList,
        _ => ValueKind::Text,
    }
}

/// Re-encodes a string into the native value type of a binary numeric VR
///
/// Text VRs carry the string as-is. The original value of a binary
/// attribute reads out as its decimal rendering, so a preserve round-trip
/// parses back without loss; anything unparseable is a per-tag error.
fn primitive_for(vr: VR, value: &str) -> Result<PrimitiveValue> {
    let parse_error =
        |vr: VR| VeilError::Dataset(format!("Cannot encode {value:?} as {vr:?}"));
    Ok(match vr {
        VR::US => PrimitiveValue::from(value.trim().parse::<u16>().map_err(|_| parse_error(vr))?),
        VR::SS => PrimitiveValue::from(value.trim().parse::<i16>().map_err(|_| parse_error(vr))?),
        VR::UL => PrimitiveValue::from(value.trim().parse::<u32>().map_err(|_| parse_error(vr))?),
        VR::SL => PrimitiveValue::from(value.trim().parse::<i32>().map_err(|_| parse_error(vr))?),
        VR::FL => PrimitiveValue::from(value.trim().parse::<f32>().map_err(|_| parse_error(vr))?),
        VR::FD => PrimitiveValue::from(value.trim().parse::<f64>().map_err(|_| parse_error(vr))?),
        _ => PrimitiveValue::from(value),
    })
}

/// VR used when inserting an attribute that is not already present
fn vr_for_new_tag(tag: DicomTag) -> VR {
    match (tag.group(), tag.element()) {
        (0x0008, 0x0060) | (0x0018, 0x0015) | (0x0018, 0x5101) | (0x0010, 0x0040) => VR::CS,
        (0x0008, 0x0020) | (0x0010, 0x0030) => VR::DA,
        (0x0008, 0x0030) | (0x0008, 0x0031) => VR::TM,
        (0x0020, 0x0013) | (0x0020, 0x0011) => VR::IS,
        (0x0008, 0x0050) | (0x0020, 0x0010) => VR::SH,
        (0x0008, 0x0090) | (0x0010, 0x0010) => VR::PN,
        (0x0008, 0x0016) | (0x0008, 0x0018) | (0x0020, 0x000D) | (0x0020, 0x000E) => VR::UI,
        _ => VR::LO,
    }
}

fn trim_value(value: &str) -> String {
    value.trim_end_matches(['\0', ' ']).to_string()
}

impl Dataset for DicomDataset {
    fn contains(&self, tag: &Tag) -> bool {
        to_dicom_tag(tag)
            .map(|dtag| self.data.element(dtag).is_ok())
            .unwrap_or(false)
    }

    fn kind(&self, tag: &Tag) -> Option<ValueKind> {
        let dtag = to_dicom_tag(tag).ok()?;
        let element = self.data.element(dtag).ok()?;
        match element.value() {
            DicomValue::Primitive(_) => Some(kind_for_vr(element.vr())),
            // Nested data sets and encapsulated pixel data are never
            // string-rewritable, whatever their VR claims.
            _ => Some(ValueKind::Opaque),
        }
    }

    fn string(&self, tag: &Tag) -> Result<Option<String>> {
        let dtag = to_dicom_tag(tag)?;
        let element = match self.data.element(dtag) {
            Ok(element) => element,
            Err(_) => return Ok(None),
        };

        match element.value() {
            DicomValue::Primitive(value) => {
                Ok(value.to_multi_str().first().map(|s| trim_value(s)))
            }
            _ => Err(VeilError::Dataset(format!(
                "tag {tag} is not string-readable"
            ))),
        }
    }

    fn strings(&self, tag: &Tag) -> Result<Vec<String>> {
        let dtag = to_dicom_tag(tag)?;
        let element = match self.data.element(dtag) {
            Ok(element) => element,
            Err(_) => return Ok(Vec::new()),
        };

        match element.value() {
            DicomValue::Primitive(value) => Ok(value
                .to_multi_str()
                .iter()
                .map(|s| trim_value(s))
                .collect()),
            _ => Err(VeilError::Dataset(format!(
                "tag {tag} is not string-readable"
            ))),
        }
    }

    fn put_string(&mut self, tag: &Tag, value: &str) -> Result<()> {
        let dtag = to_dicom_tag(tag)?;
        let vr = self
            .data
            .element(dtag)
            .map(|element| element.vr())
            .unwrap_or_else(|_| vr_for_new_tag(dtag));
        let primitive = primitive_for(vr, value)?;
        self.data.put(DataElement::new(dtag, vr, primitive));
        Ok(())
    }

    fn put_strings(&mut self, tag: &Tag, values: &[String]) -> Result<()> {
        let dtag = to_dicom_tag(tag)?;
        let vr = self
            .data
            .element(dtag)
            .map(|element| element.vr())
            .unwrap_or_else(|_| vr_for_new_tag(dtag));
        let values: C<String> = values.iter().cloned().collect();
        self.data
            .put(DataElement::new(dtag, vr, PrimitiveValue::Strs(values)));
        Ok(())
    }

    fn remove(&mut self, tag: &Tag) -> bool {
        to_dicom_tag(tag)
            .map(|dtag| self.data.remove_element(dtag))
            .unwrap_or(false)
    }

    fn tags(&self) -> Vec<Tag> {
        self.data
            .iter()
            .map(|element| from_dicom_tag(element.tag()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dicom::object::mem::InMemElement;
    use dicom::object::meta::FileMetaTableBuilder;

    fn test_meta() -> FileMetaTable {
        FileMetaTableBuilder::new()
            .media_storage_sop_class_uid("1.2.840.10008.5.1.4.1.1.1")
            .media_storage_sop_instance_uid("1.2.3.4")
            .transfer_syntax("1.2.840.10008.1.2.1")
            .build()
            .unwrap()
    }

    fn dataset_with(elements: Vec<InMemElement>) -> DicomDataset {
        let mut data = InMemDicomObject::new_empty();
        for element in elements {
            data.put(element);
        }
        DicomDataset::new(data, test_meta())
    }

    #[test]
    fn test_contains_and_string() {
        let ds = dataset_with(vec![DataElement::new(
            DicomTag(0x0010, 0x0010),
            VR::PN,
            PrimitiveValue::from("Doe^Jane"),
        )]);

        let tag = Tag::new("0010", "0010");
        assert!(ds.contains(&tag));
        assert_eq!(ds.string(&tag).unwrap(), Some("Doe^Jane".to_string()));
        assert_eq!(ds.string(&Tag::new("0010", "0020")).unwrap(), None);
    }

    #[test]
    fn test_kind_maps_vrs() {
        let ds = dataset_with(vec![
            DataElement::new(DicomTag(0x0010, 0x0010), VR::PN, PrimitiveValue::from("X")),
            DataElement::new(
                DicomTag(0x0028, 0x0030),
                VR::DS,
                PrimitiveValue::from("0.5"),
            ),
            DataElement::new(
                DicomTag(0x7FE0, 0x0010),
                VR::OB,
                PrimitiveValue::U8(vec![0u8; 4].into()),
            ),
        ]);

        assert_eq!(ds.kind(&Tag::new("0010", "0010")), Some(ValueKind::Text));
        assert_eq!(
            ds.kind(&Tag::new("0028", "0030")),
            Some(ValueKind::NumericList)
        );
        assert_eq!(ds.kind(&Tag::new("7FE0", "0010")), Some(ValueKind::Opaque));
        assert_eq!(ds.kind(&Tag::new("0008", "0060")), None);
    }

    #[test]
    fn test_multi_valued_strings() {
        let values: C<String> = vec!["0.2".to_string(), "0.3".to_string()]
            .into_iter()
            .collect();
        let ds = dataset_with(vec![DataElement::new(
            DicomTag(0x0028, 0x0030),
            VR::DS,
            PrimitiveValue::Strs(values),
        )]);

        let tag = Tag::new("0028", "0030");
        assert_eq!(ds.strings(&tag).unwrap(), vec!["0.2", "0.3"]);
        // Scalar read yields the first value.
        assert_eq!(ds.string(&tag).unwrap(), Some("0.2".to_string()));
    }

    #[test]
    fn test_put_string_keeps_existing_vr() {
        let mut ds = dataset_with(vec![DataElement::new(
            DicomTag(0x0010, 0x0030),
            VR::DA,
            PrimitiveValue::from("20000101"),
        )]);

        let tag = Tag::new("0010", "0030");
        ds.put_string(&tag, "19991222").unwrap();

        let element = ds.data().element(DicomTag(0x0010, 0x0030)).unwrap();
        assert_eq!(element.vr(), VR::DA);
        assert_eq!(ds.string(&tag).unwrap(), Some("19991222".to_string()));
    }

    #[test]
    fn test_put_string_inserts_new_attribute() {
        let mut ds = dataset_with(Vec::new());

        let tag = Tag::new("0010", "0010");
        ds.put_string(&tag, "DEFAULT NAME").unwrap();

        let element = ds.data().element(DicomTag(0x0010, 0x0010)).unwrap();
        assert_eq!(element.vr(), VR::PN);
    }

    #[test]
    fn test_remove_and_tags() {
        let mut ds = dataset_with(vec![
            DataElement::new(DicomTag(0x0010, 0x0010), VR::PN, PrimitiveValue::from("X")),
            DataElement::new(DicomTag(0x0008, 0x0060), VR::CS, PrimitiveValue::from("CR")),
        ]);

        assert_eq!(ds.tags().len(), 2);
        assert!(ds.remove(&Tag::new("0010", "0010")));
        assert!(!ds.remove(&Tag::new("0010", "0010")));
        assert_eq!(ds.tags(), vec![Tag::new("0008", "0060")]);
    }

    #[test]
    fn test_put_string_reencodes_binary_numeric_vr() {
        let mut ds = dataset_with(vec![DataElement::new(
            DicomTag(0x0028, 0x0010),
            VR::US,
            PrimitiveValue::from(1024_u16),
        )]);

        let tag = Tag::new("0028", "0010");
        assert_eq!(ds.string(&tag).unwrap(), Some("1024".to_string()));

        ds.put_string(&tag, "1024").unwrap();

        let element = ds.data().element(DicomTag(0x0028, 0x0010)).unwrap();
        assert_eq!(element.vr(), VR::US);
        assert_eq!(ds.string(&tag).unwrap(), Some("1024".to_string()));
    }

    #[test]
    fn test_put_string_rejects_unparseable_binary_value() {
        let mut ds = dataset_with(vec![DataElement::new(
            DicomTag(0x0028, 0x0010),
            VR::US,
            PrimitiveValue::from(1024_u16),
        )]);

        let result = ds.put_string(&Tag::new("0028", "0010"), "DEFAULT_VALUE");
        assert!(matches!(result, Err(VeilError::Dataset(_))));
    }

    #[test]
    fn test_empty_value_reads_as_none() {
        let ds = dataset_with(vec![DataElement::new(
            DicomTag(0x0008, 0x0050),
            VR::SH,
            PrimitiveValue::Empty,
        )]);

        let tag = Tag::new("0008", "0050");
        assert!(ds.contains(&tag));
        assert_eq!(ds.string(&tag).unwrap(), None);
    }

    #[test]
    fn test_malformed_hex_fails_at_conversion() {
        let ds = dataset_with(Vec::new());
        let tag = Tag::new("zzzz", "0010");

        assert!(!ds.contains(&tag));
        assert!(matches!(ds.string(&tag), Err(VeilError::Dataset(_))));
    }
}
