//! Renderer capability set.
//!
//! A renderer receives a document's segments in reading order through three
//! calls: one for markdown text and one for each literal display primitive
//! ([`Primitive::Block`] and [`Primitive::Inline`]). Backends decide how each
//! primitive looks; they must not alter literal text beyond the escaping
//! their output format requires.
//!
//! # Backends
//!
//! - [`MarkdownRenderer`]: recomposes markdown source
//! - [`HtmlRenderer`]: renders through `pulldown-cmark`

mod html;
mod markdown;

pub use html::{HtmlRenderer, escape_html};
pub(crate) use html::markdown_options;
pub use markdown::MarkdownRenderer;

use folio_core::Result;

use crate::body::LiteralBlock;
use crate::metadata::DocumentMetadata;

/// The two literal display primitives every renderer supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    /// Multi-line verbatim block.
    Block,
    /// Short verbatim span within running text.
    Inline,
}

/// A rendering backend driven by [`Document::render`](crate::Document::render).
pub trait Renderer {
    /// What the backend produces once all segments are consumed.
    type Output;

    /// Consume a markdown text run.
    fn text(&mut self, text: &str) -> Result<()>;

    /// Consume a literal block ([`Primitive::Block`]).
    fn literal_block(&mut self, block: &LiteralBlock) -> Result<()>;

    /// Consume an inline literal span ([`Primitive::Inline`]).
    fn literal_inline(&mut self, span: &str) -> Result<()>;

    /// Produce the final output, with access to the page metadata.
    fn finish(self, metadata: &DocumentMetadata) -> Result<Self::Output>;
}
