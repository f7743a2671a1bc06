//! Documentation page model, assembler, renderers, and site build.
//!
//! A page is a [`DocumentMetadata`] record plus a [`DocumentBody`] of text
//! runs and literal segments. [`assemble`] validates the metadata and
//! composes the two into an immutable [`Document`]; everything else in
//! this crate either feeds the assembler or consumes its output.
//!
//! # Modules
//!
//! - [`metadata`]: Title, description, date, authors, edit path
//! - [`body`]: Ordered text/literal segments
//! - [`document`]: The assembler and the [`Document`] type
//! - [`render`]: Renderer capability set with markdown and HTML backends
//! - [`source`]: Markdown + YAML frontmatter page sources
//! - [`site`]: Loading a directory of pages, navigation, edit links
//! - [`validation`]: Edit-path and build-outcome checks
//!
//! # Example
//!
//! ```rust
//! use folio_content::{DocumentBody, DocumentMetadata, HtmlRenderer, assemble};
//!
//! let doc = assemble(
//!     DocumentMetadata::new("Deploy with CI", "Automate deployments"),
//!     DocumentBody::builder()
//!         .text("Create a ")
//!         .inline("now.json")
//!         .text(" file.")
//!         .build(),
//! )
//! .unwrap();
//!
//! let html = doc.render(HtmlRenderer::new()).unwrap();
//! assert!(html.contains("<code>now.json</code>"));
//! ```

pub mod body;
pub mod document;
pub mod metadata;
pub mod render;
pub mod site;
pub mod source;
pub mod validation;

// Re-export commonly used types
pub use body::{BodyBuilder, DocumentBody, LiteralBlock, Segment};
pub use document::{Document, assemble};
pub use metadata::DocumentMetadata;
pub use render::{HtmlRenderer, MarkdownRenderer, Primitive, Renderer};
pub use site::{NavEntry, Site, SiteBuilder, SlugCollision, edit_link};
pub use source::{Page, load_page, parse_page};
pub use validation::{Severity, ValidationIssue, ValidationResult, check_site};
