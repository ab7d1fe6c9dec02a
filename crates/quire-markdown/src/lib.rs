//! Line-oriented Markdown to HTML conversion.
//!
//! This crate implements the small Markdown dialect quire pages are written in:
//! headings, unordered lists, blockquotes, fenced code blocks and paragraphs,
//! plus inline images, links, bold and italic. It is not a
//! CommonMark implementation; every construct is recognised by a literal line
//! prefix or a single regular expression.

pub mod codeblock;
pub mod converter;
pub mod inline;

pub use codeblock::Fence;
pub use converter::{classify, convert, LineKind};
pub use inline::substitute;
