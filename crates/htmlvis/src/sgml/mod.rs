//! Annotated text (TreeTagger SGML) parsing.
//!
//! The dialect allows exactly one structural unit per line:
//!
//! ```text
//! <norm xml:id="u1" pos="N" norm="ⲕⲟⲥⲙⲟⲥ">
//! ⲕⲟⲥⲙⲟⲥ
//! </norm>
//! ```
//!
//! Lines that are neither a well-formed opening nor closing tag are tokens.

mod element;
mod parser;

pub use element::{Attributes, Element, Token};
pub use parser::{extract_meta, parse_annotations};

/// Result of parsing an annotated document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AnnotatedText {
    /// Tokens in document order.
    pub tokens: Vec<Token>,
    /// Closed elements in completion order, individuated.
    pub elements: Vec<Element>,
    /// Attributes of the first `<meta …>` line, if present.
    pub meta: Option<Attributes>,
}
