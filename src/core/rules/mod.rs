//! De-identification rules
//!
//! A [`Rule`] is a policy object permanently bound to one tag; applying it
//! to the tag's current value computes the value that survives
//! de-identification. The rule kinds form a closed set so the engine can
//! match exhaustively:
//!
//! - **Preserve**: output equals input, unchanged (including absent/empty)
//! - **ReplaceWithConstant**: output is a fixed literal, input is ignored
//! - **ShiftDateBySubtraction**: 8-digit `YYYYMMDD` dates are moved back by
//!   a random 1–364 days; anything that does not parse passes through
//!   unchanged
//!
//! `apply` never fails: malformed input is a documented fallback, not an
//! error.

pub mod policy;

use crate::core::random::ShiftSource;
use crate::domain::{Element, Tag};
use chrono::NaiveDate;
use std::fmt;
use std::sync::Arc;

pub use policy::RuleSet;

const DATE_FORMAT: &str = "%Y%m%d";

/// The policy variants a rule can take
pub enum RuleKind {
    /// Keep the original value
    Preserve,
    /// Replace the value with a fixed literal
    ReplaceWithConstant(String),
    /// Shift a `YYYYMMDD` date back by a random 1–364 days
    ShiftDateBySubtraction { source: Arc<dyn ShiftSource> },
}

impl fmt::Debug for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleKind::Preserve => write!(f, "Preserve"),
            RuleKind::ReplaceWithConstant(value) => {
                f.debug_tuple("ReplaceWithConstant").field(value).finish()
            }
            RuleKind::ShiftDateBySubtraction { .. } => write!(f, "ShiftDateBySubtraction"),
        }
    }
}

/// A policy bound to exactly one tag
///
/// The binding is fixed at construction and immutable for the rule's
/// lifetime. Callers are responsible for only applying the rule to elements
/// of the bound tag; the binding is not re-validated on every call.
#[derive(Debug)]
pub struct Rule {
    tag: Tag,
    kind: RuleKind,
}

impl Rule {
    /// Creates a rule that keeps the original value
    pub fn preserve(tag: Tag) -> Self {
        Self {
            tag,
            kind: RuleKind::Preserve,
        }
    }

    /// Creates a rule that replaces the value with a fixed literal
    pub fn replace_with(tag: Tag, value: impl Into<String>) -> Self {
        Self {
            tag,
            kind: RuleKind::ReplaceWithConstant(value.into()),
        }
    }

    /// Creates a rule that shifts dates back by a random offset
    pub fn shift_date(tag: Tag, source: Arc<dyn ShiftSource>) -> Self {
        Self {
            tag,
            kind: RuleKind::ShiftDateBySubtraction { source },
        }
    }

    /// Returns the tag this rule is bound to
    pub fn tag(&self) -> &Tag {
        &self.tag
    }

    /// Computes the output value for the element's current value
    ///
    /// Pure except for one draw from the shift source in the date variant.
    /// Returns `None` only when the input value is absent and the rule
    /// preserves or shifts; constants are always returned.
    pub fn apply(&self, element: &Element) -> Option<String> {
        match &self.kind {
            RuleKind::Preserve => element.value().map(ToOwned::to_owned),
            RuleKind::ReplaceWithConstant(value) => Some(value.clone()),
            RuleKind::ShiftDateBySubtraction { source } => {
                let value = element.value()?;
                Some(shift_date_back(value, source.as_ref()))
            }
        }
    }
}

/// Moves a strict `YYYYMMDD` date back by a drawn offset of 1–364 days
///
/// Calendar arithmetic rolls across month and year boundaries. Anything
/// that is not an 8-digit valid Gregorian date is returned unchanged.
fn shift_date_back(value: &str, source: &dyn ShiftSource) -> String {
    if value.len() != 8 {
        return value.to_string();
    }

    match NaiveDate::parse_from_str(value, DATE_FORMAT) {
        Ok(date) => {
            let offset = source.next_in(1, 365);
            let shifted = date - chrono::Duration::days(offset);
            shifted.format(DATE_FORMAT).to_string()
        }
        Err(_) => value.to_string(),
    }
}
