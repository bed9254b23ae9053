//! The standard de-identification policy table
//!
//! An ordered, immutable-after-construction registry of (tag → rule)
//! bindings, built once at process start and shared read-only across all
//! file operations. The table mirrors the attribute-handling profile for
//! projection radiographs: patient identity dates are shifted, while the
//! attributes needed for clinical and technical interpretation (geometry,
//! pixel encoding, referential identifiers) are preserved.

use crate::core::random::ShiftSource;
use crate::core::rules::Rule;
use crate::domain::Tag;
use std::sync::Arc;

/// Placeholder written to rule-bound attributes that carry no value
pub const DEFAULT_VALUE_SENTINEL: &str = "DEFAULT_VALUE";

/// Placeholder written over an unmapped patient name
pub const DEFAULT_PATIENT_NAME: &str = "DEFAULT NAME";

/// Modality inserted when absent after the sweep
pub const DEFAULT_MODALITY: &str = "CR";

/// Manufacturer inserted when absent after the sweep
pub const DEFAULT_MANUFACTURER: &str = "Anonymized";

/// Patient identifier inserted when absent after the sweep
pub const DEFAULT_PATIENT_ID: &str = "AnonymizedPatientID";

/// Ordered sequence of rules, one per configured tag
///
/// Tags without an entry are "unmapped" and handled by the engine's sweep
/// pass. Duplicate bindings are not validated; sequential application gives
/// last-write-wins semantics.
#[derive(Debug)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    /// Creates a rule set from an explicit list of rules
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    /// Builds the standard policy table
    pub fn standard(source: Arc<dyn ShiftSource>) -> Self {
        let mut rules = Vec::new();

        // Patient
        rules.push(Rule::shift_date(Tag::new("0010", "0030"), Arc::clone(&source))); // PatientBirthDate
        rules.push(Rule::preserve(Tag::new("0010", "0040"))); // PatientSex

        // Study
        rules.push(Rule::shift_date(Tag::new("0008", "0020"), Arc::clone(&source))); // StudyDate
        rules.push(Rule::preserve(Tag::new("0020", "000d"))); // StudyInstanceUID

        // Series
        rules.push(Rule::preserve(Tag::new("0008", "0060"))); // Modality

        // Equipment
        rules.push(Rule::preserve(Tag::new("0008", "0070"))); // Manufacturer
        rules.push(Rule::preserve(Tag::new("0008", "1090"))); // ManufacturerModelName
        rules.push(Rule::preserve(Tag::new("0018", "1020"))); // SoftwareVersions
        rules.push(Rule::preserve(Tag::new("0018", "1164"))); // ImagerPixelSpacing

        // Image
        rules.push(Rule::preserve(Tag::new("0028", "0010"))); // Rows
        rules.push(Rule::preserve(Tag::new("0028", "0011"))); // Columns
        rules.push(Rule::preserve(Tag::new("0028", "0030"))); // PixelSpacing
        rules.push(Rule::preserve(Tag::new("0028", "0100"))); // BitsAllocated
        rules.push(Rule::preserve(Tag::new("0028", "0103"))); // PixelRepresentation
        rules.push(Rule::preserve(Tag::new("0028", "0106"))); // SmallestImagePixelValue
        rules.push(Rule::preserve(Tag::new("0028", "0107"))); // LargestImagePixelValue
        rules.push(Rule::preserve(Tag::new("7fe0", "0010"))); // PixelData
        rules.push(Rule::preserve(Tag::new("0008", "0016"))); // SOPClassUID
        rules.push(Rule::preserve(Tag::new("0008", "0018"))); // SOPInstanceUID

        // Other
        rules.push(Rule::preserve(Tag::new("0028", "0004"))); // PhotometricInterpretation
        rules.push(Rule::preserve(Tag::new("0028", "0101"))); // BitsStored
        rules.push(Rule::preserve(Tag::new("0028", "0102"))); // HighBit
        rules.push(Rule::preserve(Tag::new("0002", "0002"))); // MediaStorageSOPClassUID
        rules.push(Rule::preserve(Tag::new("0002", "0003"))); // MediaStorageSOPInstanceUID
        rules.push(Rule::preserve(Tag::new("0002", "0010"))); // TransferSyntaxUID

        Self { rules }
    }

    /// Iterates the rules in table order
    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter()
    }

    /// Returns true when some rule is bound to the tag
    pub fn is_bound(&self, tag: &Tag) -> bool {
        self.rules.iter().any(|rule| rule.tag() == tag)
    }

    /// Number of configured bindings
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns true when no rules are configured
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
