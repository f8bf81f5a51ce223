//! Parsed document tree and parser contract.
//!
//! # Responsibility
//! - Describe the abstract node tree the storage layer decodes boards from.
//! - Hide the concrete markup parser behind `DocumentParser`.
//! - Escape attribute values for emitted fragments.
//!
//! # Invariants
//! - A parsed document has exactly one root node.
//! - Attribute order is preserved as written; names are unique per node.

use std::borrow::Cow;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod schema;
mod xml;

pub use xml::XmlDocumentParser;

pub type DocumentResult<T> = Result<T, DocumentError>;

/// Failure to turn raw text into a node tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentError {
    /// Input holds no element at all.
    Empty,
    /// More than one top-level element.
    MultipleRoots,
    /// An element was never closed.
    Unclosed(String),
    /// Character data where only elements are allowed.
    UnexpectedText { position: u64 },
    /// Syntax error reported by the markup reader.
    Malformed { position: u64, message: String },
}

impl Display for DocumentError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "document has no root element"),
            Self::MultipleRoots => write!(f, "document has more than one root element"),
            Self::Unclosed(tag) => write!(f, "element `{tag}` is never closed"),
            Self::UnexpectedText { position } => {
                write!(f, "unexpected text content at byte {position}")
            }
            Self::Malformed { position, message } => {
                write!(f, "malformed document at byte {position}: {message}")
            }
        }
    }
}

impl Error for DocumentError {}

/// One element of a parsed document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentNode {
    pub tag: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<DocumentNode>,
}

impl DocumentNode {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Returns the unescaped value of attribute `name`, if present.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn children(&self) -> &[DocumentNode] {
        &self.children
    }
}

/// Turns raw document text into a node tree.
pub trait DocumentParser {
    fn parse(&self, text: &str) -> DocumentResult<DocumentNode>;
}

/// Escapes `value` for use inside a double-quoted attribute.
pub fn escape_attribute(value: &str) -> Cow<'_, str> {
    quick_xml::escape::escape(value)
}
