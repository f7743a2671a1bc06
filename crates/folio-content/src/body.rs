//! Document body: an ordered run of text and literal segments.
//!
//! Segment order is the reading order. Literal blocks and inline spans are
//! stored exactly as given; nothing in this module trims, escapes, or
//! re-indents them.

use serde::{Deserialize, Serialize};

use crate::render::Primitive;

/// A verbatim multi-line block, e.g. a configuration file listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiteralBlock {
    /// Exact block text.
    pub text: String,

    /// Optional language hint for highlighting, e.g. `"yaml"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    /// Container prefix in front of the opening fence, e.g. `"   "` for a
    /// block nested under a numbered list item. Empty at top level.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub indent: String,
}

impl LiteralBlock {
    /// Create a block with no language hint.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            language: None,
            indent: String::new(),
        }
    }

    /// Set the language hint.
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Set the container prefix of the opening fence line.
    pub fn with_indent(mut self, indent: impl Into<String>) -> Self {
        self.indent = indent.into();
        self
    }
}

/// One unit of a document body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Segment {
    /// Markdown text run.
    Text(String),
    /// Verbatim block.
    Block(LiteralBlock),
    /// Verbatim inline span, e.g. a filename or command.
    Inline(String),
}

impl Segment {
    /// Create a text run.
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// Create a literal block without a language hint.
    pub fn block(text: impl Into<String>) -> Self {
        Self::Block(LiteralBlock::new(text))
    }

    /// Create an inline literal span.
    pub fn inline(text: impl Into<String>) -> Self {
        Self::Inline(text.into())
    }

    /// The segment's raw content.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Text(text) | Self::Inline(text) => text,
            Self::Block(block) => &block.text,
        }
    }

    /// The display primitive a literal segment maps to; `None` for text.
    pub fn primitive(&self) -> Option<Primitive> {
        match self {
            Self::Text(_) => None,
            Self::Block(_) => Some(Primitive::Block),
            Self::Inline(_) => Some(Primitive::Inline),
        }
    }

    /// Whether this segment is a block or inline literal.
    pub fn is_literal(&self) -> bool {
        self.primitive().is_some()
    }
}

/// Ordered sequence of [`Segment`]s.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentBody {
    segments: Vec<Segment>,
}

impl DocumentBody {
    /// Create an empty body.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a fluent builder.
    pub fn builder() -> BodyBuilder {
        BodyBuilder::default()
    }

    /// Append a segment.
    pub fn push(&mut self, segment: Segment) {
        self.segments.push(segment);
    }

    /// All segments in reading order.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Iterate over segments in reading order.
    pub fn iter(&self) -> std::slice::Iter<'_, Segment> {
        self.segments.iter()
    }

    /// Number of segments.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Whether the body has no segments.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Number of literal segments rendered with `primitive`.
    pub fn count(&self, primitive: Primitive) -> usize {
        self.segments
            .iter()
            .filter(|s| s.primitive() == Some(primitive))
            .count()
    }

    /// Consume the body, returning its segments.
    pub fn into_segments(self) -> Vec<Segment> {
        self.segments
    }
}

impl From<Vec<Segment>> for DocumentBody {
    fn from(segments: Vec<Segment>) -> Self {
        Self { segments }
    }
}

impl FromIterator<Segment> for DocumentBody {
    fn from_iter<I: IntoIterator<Item = Segment>>(iter: I) -> Self {
        Self {
            segments: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a DocumentBody {
    type Item = &'a Segment;
    type IntoIter = std::slice::Iter<'a, Segment>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.iter()
    }
}

impl IntoIterator for DocumentBody {
    type Item = Segment;
    type IntoIter = std::vec::IntoIter<Segment>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.into_iter()
    }
}

/// Fluent builder for [`DocumentBody`].
///
/// ```
/// use folio_content::{DocumentBody, Segment};
///
/// let body = DocumentBody::builder()
///     .text("Create a ")
///     .inline(".circleci/config.yml")
///     .text(" file:\n\n")
///     .block_with_language("version: 2\n", "yaml")
///     .build();
///
/// assert_eq!(body.len(), 4);
/// assert_eq!(body.segments()[1], Segment::inline(".circleci/config.yml"));
/// ```
#[derive(Debug, Default)]
pub struct BodyBuilder {
    segments: Vec<Segment>,
}

impl BodyBuilder {
    /// Append a text run.
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.segments.push(Segment::text(text));
        self
    }

    /// Append an inline literal span.
    pub fn inline(mut self, text: impl Into<String>) -> Self {
        self.segments.push(Segment::inline(text));
        self
    }

    /// Append a literal block.
    pub fn block(mut self, text: impl Into<String>) -> Self {
        self.segments.push(Segment::block(text));
        self
    }

    /// Append a literal block with a language hint.
    pub fn block_with_language(
        mut self,
        text: impl Into<String>,
        language: impl Into<String>,
    ) -> Self {
        self.segments
            .push(Segment::Block(LiteralBlock::new(text).with_language(language)));
        self
    }

    /// Append any segment.
    pub fn segment(mut self, segment: Segment) -> Self {
        self.segments.push(segment);
        self
    }

    /// Finish building.
    pub fn build(self) -> DocumentBody {
        DocumentBody::from(self.segments)
    }
}
