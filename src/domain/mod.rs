//! Domain models and types for Veil.
//!
//! The domain layer provides:
//! - **Attribute addressing** ([`Tag`]): the two-part hexadecimal address
//!   of one dataset attribute
//! - **Attribute values** ([`Element`]): a tag plus its current
//!   string-encoded value, as seen by rule evaluation
//! - **Error types** ([`VeilError`]) and the crate-wide [`Result`] alias
//!
//! # Type Safety
//!
//! Tags are a dedicated value type rather than bare strings so that the rule
//! set, the transform engine, and the codec adapter cannot mix up attribute
//! addresses with attribute values:
//!
//! ```rust
//! use veil::domain::{Element, Tag};
//!
//! let tag = Tag::new("0010", "0030");
//! let element = Element::new(tag.clone(), Some("20000101".to_string()));
//! assert_eq!(element.tag(), &tag);
//! ```

pub mod element;
pub mod errors;
pub mod tag;

// Re-export commonly used types for convenience
pub use element::Element;
pub use errors::{Result, VeilError};
pub use tag::Tag;
