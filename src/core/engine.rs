//! Dataset transform engine
//!
//! Orchestrates the three strictly ordered de-identification passes over a
//! single dataset:
//!
//! 1. **Configured rules**: every rule in the policy table is applied to
//!    its tag if present; list-encoded numeric values are rewritten per
//!    element; rule-bound attributes with no value gain the
//!    `DEFAULT_VALUE` sentinel.
//! 2. **Unmapped-tag sweep**: tags without a rule binding are removed,
//!    except for opaque encodings (left untouched), a small keep-list of
//!    structurally required attributes, pixel data, and the patient name
//!    (overwritten with a placeholder instead of removed).
//! 3. **Required-attribute backfill**: modality, manufacturer, and the
//!    patient identifier are inserted with documented defaults when absent.
//!
//! A failure while handling one tag is logged and never aborts the file;
//! the batch coordinator owns file-level failures.

use crate::core::dataset::{Dataset, ValueKind};
use crate::core::rules::policy::{
    DEFAULT_MANUFACTURER, DEFAULT_MODALITY, DEFAULT_PATIENT_ID, DEFAULT_PATIENT_NAME,
    DEFAULT_VALUE_SENTINEL,
};
use crate::core::rules::{Rule, RuleSet};
use crate::domain::{Element, Result, Tag};

/// Identity and referential attributes that must survive the sweep
const ESSENTIAL_TAGS: [&str; 7] = [
    "00080016", // SOP Class UID
    "00080018", // SOP Instance UID
    "00020010", // Transfer Syntax UID
    "00020002", // Media Storage SOP Class UID
    "00020003", // Media Storage SOP Instance UID
    "00080060", // Modality
    "00280004", // Photometric Interpretation
];

/// Attributes required by the SOP class for a decodable image
const ALLOWED_TAGS: [&str; 7] = [
    "00280010", // Rows
    "00280011", // Columns
    "00280100", // Bits Allocated
    "00280101", // Bits Stored
    "00280102", // High Bit
    "00280103", // Pixel Representation
    "7FE00010", // Pixel Data
];

const PATIENT_NAME_GROUP: &str = "0010";
const PATIENT_NAME_ELEMENT: &str = "0010";
const PIXEL_DATA_GROUP: &str = "7FE0";

/// Rule-driven attribute rewriting engine
///
/// Holds the read-only policy table; one engine instance serves every file
/// in a batch. Datasets are mutated in place.
pub struct TransformEngine {
    rules: RuleSet,
}

impl TransformEngine {
    /// Creates an engine over a policy table
    pub fn new(rules: RuleSet) -> Self {
        Self { rules }
    }

    /// Runs all three passes over the dataset
    pub fn anonymize<D: Dataset>(&self, dataset: &mut D) {
        self.apply_rules(dataset);
        self.sweep_unmapped(dataset);
        self.backfill_required(dataset);
    }

    /// Pass 1: apply each configured rule to its tag, in table order
    fn apply_rules<D: Dataset>(&self, dataset: &mut D) {
        for rule in self.rules.iter() {
            if let Err(error) = self.apply_rule(dataset, rule) {
                tracing::error!(tag = %rule.tag(), %error, "Error applying rule");
            }
        }
    }

    fn apply_rule<D: Dataset>(&self, dataset: &mut D, rule: &Rule) -> Result<()> {
        let tag = rule.tag();

        if !dataset.contains(tag) {
            return Ok(());
        }

        match dataset.kind(tag) {
            Some(ValueKind::Opaque) => {
                tracing::info!(tag = %tag, "Skipping rule for non-string value representation");
            }
            Some(ValueKind::NumericList) => {
                let values = dataset.strings(tag)?;
                let rewritten: Vec<String> = values
                    .iter()
                    .map(|value| {
                        rule.apply(&Element::new(tag.clone(), Some(value.clone())))
                            .unwrap_or_else(|| value.clone())
                    })
                    .collect();
                dataset.put_strings(tag, &rewritten)?;
            }
            Some(ValueKind::Text) => {
                let current = dataset.string(tag)?;
                match rule.apply(&Element::new(tag.clone(), current.clone())) {
                    Some(output) => dataset.put_string(tag, &output)?,
                    None => {
                        // Rule-bound but valueless; give it parseable content.
                        if let Err(error) = dataset.put_string(tag, DEFAULT_VALUE_SENTINEL) {
                            tracing::warn!(tag = %tag, %error, "Could not add default value");
                        }
                    }
                }
            }
            None => {}
        }

        Ok(())
    }

    /// Pass 2: remove or neutralize every tag the policy does not know
    fn sweep_unmapped<D: Dataset>(&self, dataset: &mut D) {
        for tag in dataset.tags() {
            if self.rules.is_bound(&tag) {
                continue;
            }

            if dataset.kind(&tag) == Some(ValueKind::Opaque) {
                tracing::debug!(tag = %tag, "Leaving unmapped opaque attribute untouched");
                continue;
            }

            let id = tag.id();
            if ESSENTIAL_TAGS.contains(&id.as_str()) || ALLOWED_TAGS.contains(&id.as_str()) {
                continue;
            }

            if tag.group() == PATIENT_NAME_GROUP && tag.element() == PATIENT_NAME_ELEMENT {
                if let Err(error) = dataset.put_string(&tag, DEFAULT_PATIENT_NAME) {
                    tracing::error!(tag = %tag, %error, "Error writing patient name placeholder");
                }
            } else if tag.group() != PIXEL_DATA_GROUP {
                dataset.remove(&tag);
            }
        }
    }

    /// Pass 3: insert structural attributes that must always be present
    fn backfill_required<D: Dataset>(&self, dataset: &mut D) {
        let defaults = [
            (Tag::new("0008", "0060"), DEFAULT_MODALITY),
            (Tag::new("0008", "0070"), DEFAULT_MANUFACTURER),
            (Tag::new("0010", "0020"), DEFAULT_PATIENT_ID),
        ];

        for (tag, default) in defaults {
            if !dataset.contains(&tag) {
                if let Err(error) = dataset.put_string(&tag, default) {
                    tracing::error!(tag = %tag, %error, "Error backfilling required attribute");
                }
            }
        }
    }
}
