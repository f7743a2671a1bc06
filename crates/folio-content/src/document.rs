//! The page assembler.
//!
//! [`assemble`] is the single entry point that turns a metadata record and a
//! body into a [`Document`]. It validates the required metadata fields and
//! otherwise passes both inputs through untouched.

use folio_core::Result;
use serde::Serialize;

use crate::body::{DocumentBody, Segment};
use crate::metadata::DocumentMetadata;
use crate::render::Renderer;

/// An assembled documentation page.
///
/// Fields are private: once assembled, a document cannot be changed, only
/// read, cloned, rendered, or taken apart with [`Document::into_parts`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Document {
    metadata: DocumentMetadata,
    body: DocumentBody,
}

impl Document {
    /// Page metadata.
    pub fn metadata(&self) -> &DocumentMetadata {
        &self.metadata
    }

    /// Page body.
    pub fn body(&self) -> &DocumentBody {
        &self.body
    }

    /// Consume the document, returning its metadata and body.
    pub fn into_parts(self) -> (DocumentMetadata, DocumentBody) {
        (self.metadata, self.body)
    }

    /// Feed every segment to `renderer` in reading order, then finish it.
    ///
    /// # Errors
    ///
    /// Propagates the first error returned by the renderer.
    pub fn render<R: Renderer>(&self, mut renderer: R) -> Result<R::Output> {
        for segment in &self.body {
            match segment {
                Segment::Text(text) => renderer.text(text)?,
                Segment::Block(block) => renderer.literal_block(block)?,
                Segment::Inline(span) => renderer.literal_inline(span)?,
            }
        }
        renderer.finish(&self.metadata)
    }
}

/// Compose `metadata` and `body` into a [`Document`].
///
/// # Errors
///
/// Returns [`folio_core::Error::InvalidMetadata`] when `title` or
/// `description` is empty. Any body, including an empty one, is accepted.
///
/// # Example
///
/// ```
/// use folio_content::{assemble, DocumentBody, DocumentMetadata};
///
/// let metadata = DocumentMetadata::new(
///     "Automate Node Deployment with CircleCI",
///     "Using CircleCI to automate your Now Node deployments",
/// )
/// .with_date("26 May 2018")
/// .with_edit_url("pages/docs/continuous-integration/circleci.js");
///
/// let body = DocumentBody::builder()
///     .text("Every time you push...")
///     .block("version: 2\n")
///     .build();
///
/// let doc = assemble(metadata.clone(), body).unwrap();
/// assert_eq!(doc.metadata(), &metadata);
/// assert_eq!(doc.body().len(), 2);
/// ```
pub fn assemble(metadata: DocumentMetadata, body: DocumentBody) -> Result<Document> {
    metadata.validate()?;
    log::debug!(
        "Assembled '{}' ({} segment(s))",
        metadata.title,
        body.len()
    );
    Ok(Document { metadata, body })
}
