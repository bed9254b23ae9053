//! DICOM tag value type
//!
//! A tag is the two-part hexadecimal address of one attribute slot in a
//! DICOM dataset, e.g. `(0010,0030)` for PatientBirthDate.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Two-part hexadecimal attribute address
///
/// Both halves are stored uppercase-normalized so that equality and hashing
/// are case-insensitive with respect to the constructor input. No hex
/// validation is performed here; malformed input is tolerated structurally
/// and surfaces as an adapter error when the codec converts it to a numeric
/// tag.
///
/// # Examples
///
/// ```
/// use veil::domain::Tag;
///
/// let tag = Tag::new("0010", "0030");
/// assert_eq!(tag, Tag::new("0010", "0030"));
/// assert_eq!(tag, Tag::new("0010", "0030".to_lowercase()));
/// assert_eq!(tag.to_string(), "(0010,0030)");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Tag {
    group: String,
    element: String,
}

impl Tag {
    /// Creates a tag from group and element hex strings
    pub fn new(group: impl Into<String>, element: impl Into<String>) -> Self {
        Self {
            group: group.into().to_uppercase(),
            element: element.into().to_uppercase(),
        }
    }

    /// Returns the group half, uppercase-normalized
    pub fn group(&self) -> &str {
        &self.group
    }

    /// Returns the element half, uppercase-normalized
    pub fn element(&self) -> &str {
        &self.element
    }

    /// Returns the concatenated `GGGGEEEE` form used by keep-lists
    pub fn id(&self) -> String {
        format!("{}{}", self.group, self.element)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.group, self.element)
    }
}
