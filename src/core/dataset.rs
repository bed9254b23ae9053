//! Dataset abstraction at the core boundary
//!
//! The transform engine never touches the DICOM codec directly; it operates
//! on a mutable tag→value store behind the [`Dataset`] trait. The concrete
//! codec adapter implements this trait over an in-memory DICOM object, and
//! [`MemoryDataset`] implements it over a plain map for tests.

use crate::domain::{Result, Tag, VeilError};
use std::collections::BTreeMap;

/// How an attribute's value is encoded, as far as string rewriting cares
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// A scalar string value; safe to rewrite
    Text,
    /// A backslash-separated list of numeric strings (decimal/integer
    /// string encodings); rules apply per element
    NumericList,
    /// Binary, sequence, unknown, or unbounded-text encodings; opaque to
    /// string rewriting and always skipped
    Opaque,
}

/// Mutable mapping from tags to string-encoded values
///
/// Enumeration order is implementation-defined but stable. A dataset is
/// owned by exactly one in-flight file operation and never shared across
/// concurrent operations.
pub trait Dataset {
    /// Membership test
    fn contains(&self, tag: &Tag) -> bool;

    /// The value encoding of the tag, or `None` when absent
    fn kind(&self, tag: &Tag) -> Option<ValueKind>;

    /// Reads a scalar value
    ///
    /// Returns `Ok(None)` when the attribute is present but carries no
    /// value (zero multiplicity); a present empty string reads as
    /// `Ok(Some(""))`.
    fn string(&self, tag: &Tag) -> Result<Option<String>>;

    /// Reads all values of a list-encoded attribute
    fn strings(&self, tag: &Tag) -> Result<Vec<String>>;

    /// Inserts or overwrites a scalar value
    fn put_string(&mut self, tag: &Tag, value: &str) -> Result<()>;

    /// Inserts or overwrites a list-encoded value
    fn put_strings(&mut self, tag: &Tag, values: &[String]) -> Result<()>;

    /// Removes the attribute; returns true when something was removed
    fn remove(&mut self, tag: &Tag) -> bool;

    /// Enumerates every tag currently in the dataset
    fn tags(&self) -> Vec<Tag>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum MemoryValue {
    Text(Vec<String>),
    NumericList(Vec<String>),
    Opaque(Vec<u8>),
}

/// Map-backed dataset used by engine and batch tests
///
/// Values are held exactly as written; opaque entries keep their raw bytes
/// so tests can assert they survive a transform untouched.
#[derive(Debug, Default, Clone)]
pub struct MemoryDataset {
    entries: BTreeMap<Tag, MemoryValue>,
}

impl MemoryDataset {
    /// Creates an empty dataset
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a scalar text value
    pub fn insert_text(&mut self, tag: Tag, value: impl Into<String>) {
        self.entries.insert(tag, MemoryValue::Text(vec![value.into()]));
    }

    /// Inserts a text attribute with zero multiplicity
    pub fn insert_empty(&mut self, tag: Tag) {
        self.entries.insert(tag, MemoryValue::Text(Vec::new()));
    }

    /// Inserts a numeric-string list value
    pub fn insert_numeric_list(&mut self, tag: Tag, values: Vec<String>) {
        self.entries.insert(tag, MemoryValue::NumericList(values));
    }

    /// Inserts an opaque binary value
    pub fn insert_opaque(&mut self, tag: Tag, bytes: Vec<u8>) {
        self.entries.insert(tag, MemoryValue::Opaque(bytes));
    }

    /// Reads back the raw bytes of an opaque entry
    pub fn opaque_bytes(&self, tag: &Tag) -> Option<&[u8]> {
        match self.entries.get(tag) {
            Some(MemoryValue::Opaque(bytes)) => Some(bytes),
            _ => None,
        }
    }

    /// Number of attributes in the dataset
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when the dataset holds no attributes
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Dataset for MemoryDataset {
    fn contains(&self, tag: &Tag) -> bool {
        self.entries.contains_key(tag)
    }

    fn kind(&self, tag: &Tag) -> Option<ValueKind> {
        self.entries.get(tag).map(|value| match value {
            MemoryValue::Text(_) => ValueKind::Text,
            MemoryValue::NumericList(_) => ValueKind::NumericList,
            MemoryValue::Opaque(_) => ValueKind::Opaque,
        })
    }

    fn string(&self, tag: &Tag) -> Result<Option<String>> {
        match self.entries.get(tag) {
            Some(MemoryValue::Text(values)) | Some(MemoryValue::NumericList(values)) => {
                Ok(values.first().cloned())
            }
            Some(MemoryValue::Opaque(_)) => Err(VeilError::Dataset(format!(
                "tag {tag} is not string-readable"
            ))),
            None => Ok(None),
        }
    }

    fn strings(&self, tag: &Tag) -> Result<Vec<String>> {
        match self.entries.get(tag) {
            Some(MemoryValue::Text(values)) | Some(MemoryValue::NumericList(values)) => {
                Ok(values.clone())
            }
            Some(MemoryValue::Opaque(_)) => Err(VeilError::Dataset(format!(
                "tag {tag} is not string-readable"
            ))),
            None => Ok(Vec::new()),
        }
    }

    fn put_string(&mut self, tag: &Tag, value: &str) -> Result<()> {
        let entry = match self.entries.get(tag) {
            Some(MemoryValue::NumericList(_)) => MemoryValue::NumericList(vec![value.to_string()]),
            _ => MemoryValue::Text(vec![value.to_string()]),
        };
        self.entries.insert(tag.clone(), entry);
        Ok(())
    }

    fn put_strings(&mut self, tag: &Tag, values: &[String]) -> Result<()> {
        self.entries
            .insert(tag.clone(), MemoryValue::NumericList(values.to_vec()));
        Ok(())
    }

    fn remove(&mut self, tag: &Tag) -> bool {
        self.entries.remove(tag).is_some()
    }

    fn tags(&self) -> Vec<Tag> {
        self.entries.keys().cloned().collect()
    }
}
