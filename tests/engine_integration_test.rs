//! End-to-end transform engine scenarios over synthetic datasets

use std::sync::Arc;
use veil::core::dataset::{Dataset, MemoryDataset};
use veil::core::engine::TransformEngine;
use veil::core::random::FixedShiftSource;
use veil::core::rules::RuleSet;
use veil::domain::Tag;

fn engine_with_offset(offset: i64) -> TransformEngine {
    TransformEngine::new(RuleSet::standard(Arc::new(FixedShiftSource(offset))))
}

#[test]
fn birth_date_shifts_across_month_boundary_sex_preserved() {
    let mut ds = MemoryDataset::new();
    ds.insert_text(Tag::new("0010", "0030"), "20000101");
    ds.insert_text(Tag::new("0010", "0040"), "M");

    engine_with_offset(10).anonymize(&mut ds);

    assert_eq!(
        ds.string(&Tag::new("0010", "0030")).unwrap(),
        Some("19991222".to_string())
    );
    assert_eq!(
        ds.string(&Tag::new("0010", "0040")).unwrap(),
        Some("M".to_string())
    );
}

#[test]
fn study_date_shifts_across_year_boundary() {
    let mut ds = MemoryDataset::new();
    ds.insert_text(Tag::new("0008", "0020"), "20200101");

    engine_with_offset(10).anonymize(&mut ds);

    assert_eq!(
        ds.string(&Tag::new("0008", "0020")).unwrap(),
        Some("20191222".to_string())
    );
}

#[test]
fn lone_unmapped_patient_name_becomes_placeholder() {
    let mut ds = MemoryDataset::new();
    ds.insert_text(Tag::new("0010", "0010"), "Test^Patient");

    engine_with_offset(10).anonymize(&mut ds);

    assert_eq!(
        ds.string(&Tag::new("0010", "0010")).unwrap(),
        Some("DEFAULT NAME".to_string())
    );
}

#[test]
fn unmapped_binary_attribute_survives_untouched() {
    let mut ds = MemoryDataset::new();
    let tag = Tag::new("0043", "1029");
    let payload = vec![0x01, 0x02, 0x03, 0x04];
    ds.insert_opaque(tag.clone(), payload.clone());

    engine_with_offset(10).anonymize(&mut ds);

    assert_eq!(ds.opaque_bytes(&tag), Some(payload.as_slice()));
}

#[test]
fn full_dataset_pass_preserves_geometry_and_strips_identity() {
    let mut ds = MemoryDataset::new();
    // Identity
    ds.insert_text(Tag::new("0010", "0010"), "Doe^Jane");
    ds.insert_text(Tag::new("0010", "0030"), "19851121");
    ds.insert_text(Tag::new("0010", "0040"), "F");
    // Unmapped identity-bearing attributes
    ds.insert_text(Tag::new("0008", "0080"), "General Hospital");
    ds.insert_text(Tag::new("0008", "0090"), "Dr^House");
    // Geometry and pixel encoding
    ds.insert_text(Tag::new("0028", "0010"), "1024");
    ds.insert_text(Tag::new("0028", "0011"), "1024");
    ds.insert_numeric_list(
        Tag::new("0028", "0030"),
        vec!["0.2".to_string(), "0.2".to_string()],
    );
    ds.insert_opaque(Tag::new("7FE0", "0010"), vec![0u8; 32]);

    engine_with_offset(30).anonymize(&mut ds);

    // Shifted identity date
    assert_eq!(
        ds.string(&Tag::new("0010", "0030")).unwrap(),
        Some("19851022".to_string())
    );
    // Unmapped attributes are gone
    assert!(!ds.contains(&Tag::new("0008", "0080")));
    assert!(!ds.contains(&Tag::new("0008", "0090")));
    // Patient name neutralized, not removed
    assert_eq!(
        ds.string(&Tag::new("0010", "0010")).unwrap(),
        Some("DEFAULT NAME".to_string())
    );
    // Geometry intact
    assert_eq!(
        ds.string(&Tag::new("0028", "0010")).unwrap(),
        Some("1024".to_string())
    );
    assert_eq!(
        ds.strings(&Tag::new("0028", "0030")).unwrap(),
        vec!["0.2", "0.2"]
    );
    assert!(ds.contains(&Tag::new("7FE0", "0010")));
    // Required attributes backfilled
    assert_eq!(
        ds.string(&Tag::new("0008", "0060")).unwrap(),
        Some("CR".to_string())
    );
    assert_eq!(
        ds.string(&Tag::new("0010", "0020")).unwrap(),
        Some("AnonymizedPatientID".to_string())
    );
}

#[test]
fn repeated_runs_with_different_offsets_differ() {
    let mut first = MemoryDataset::new();
    first.insert_text(Tag::new("0010", "0030"), "20000615");
    let mut second = first.clone();

    engine_with_offset(3).anonymize(&mut first);
    engine_with_offset(200).anonymize(&mut second);

    let a = first.string(&Tag::new("0010", "0030")).unwrap();
    let b = second.string(&Tag::new("0010", "0030")).unwrap();
    assert_ne!(a, b);
    assert_ne!(a, Some("20000615".to_string()));
    assert_ne!(b, Some("20000615".to_string()));
}
