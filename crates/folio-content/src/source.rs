//! Page sources: markdown files with YAML frontmatter.
//!
//! A page source looks like:
//!
//! ````text
//! ---
//! title: Automate Node Deployment with CircleCI
//! description: Using CircleCI to automate your Now Node deployments
//! date: 26 May 2018
//! authors: []
//! editUrl: pages/docs/continuous-integration/circleci.js
//! ---
//!
//! Create a `.circleci/config.yml` file:
//!
//! ```yaml
//! version: 2
//! ```
//! ````
//!
//! The frontmatter becomes [`DocumentMetadata`]; fenced code blocks and code
//! spans in the body become literal segments, and everything between them
//! is kept as text exactly as written.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use pulldown_cmark::{CodeBlockKind, Event, Parser, Tag, TagEnd};
use regex::Regex;

use folio_core::util::files::read_file;
use folio_core::util::paths::slug_from_path;
use folio_core::{Error, Result};

use crate::body::{DocumentBody, LiteralBlock, Segment};
use crate::document::{Document, assemble};
use crate::metadata::DocumentMetadata;
use crate::render::markdown_options;

static FRONTMATTER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)\A\u{feff}?---[ \t]*\r?\n(?:(.*?)\r?\n)?---[ \t]*(?:\r?\n|\z)")
        .expect("frontmatter pattern is valid")
});

/// A document together with where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// URL slug derived from the path relative to the content root.
    pub slug: String,
    /// Path of the source file.
    pub source_path: PathBuf,
    /// The assembled document.
    pub document: Document,
}

/// Split a page source into its YAML frontmatter and markdown body.
///
/// # Errors
///
/// Returns [`Error::Frontmatter`] if the source does not open with a
/// `---` delimited block.
pub fn split_frontmatter(source: &str) -> Result<(&str, &str)> {
    let captures = FRONTMATTER
        .captures(source)
        .ok_or_else(|| Error::frontmatter("page does not start with a `---` frontmatter block"))?;

    let yaml = captures.get(1).map_or("", |m| m.as_str());
    let end = captures.get(0).map_or(0, |m| m.end());
    Ok((yaml, &source[end..]))
}

/// Deserialize frontmatter YAML into metadata.
///
/// Empty frontmatter yields empty metadata, which [`assemble`] then rejects.
pub fn parse_metadata(yaml: &str) -> Result<DocumentMetadata> {
    if yaml.trim().is_empty() {
        return Ok(DocumentMetadata::default());
    }
    yaml_serde::from_str(yaml).map_err(|e| Error::frontmatter(e.to_string()))
}

/// Split a markdown body into text runs and literal segments.
///
/// Fenced code blocks become [`Segment::Block`] (one trailing newline
/// removed, first word of the info string as language, fence-line prefix
/// as indent) and code spans become [`Segment::Inline`]. Indented code
/// blocks stay inside text. The line break after a closing fence belongs
/// to the block, not to the following text.
pub fn parse_body(markdown: &str) -> DocumentBody {
    let mut body = DocumentBody::new();
    let mut cursor = 0;
    let mut pending: Option<LiteralBlock> = None;

    for (event, range) in Parser::new_ext(markdown, markdown_options()).into_offset_iter() {
        match event {
            Event::Start(Tag::CodeBlock(CodeBlockKind::Fenced(info))) => {
                let fence_start = range.start
                    + markdown[range.start..]
                        .find(['`', '~'])
                        .unwrap_or(0);
                let line_start = markdown[..fence_start].rfind('\n').map_or(0, |i| i + 1);
                push_text(&mut body, &markdown[cursor..fence_start]);

                let mut block = LiteralBlock::new("")
                    .with_indent(&markdown[line_start.max(cursor)..fence_start]);
                block.language = info.split_whitespace().next().map(str::to_string);
                pending = Some(block);
            }
            Event::Text(text) => {
                if let Some(block) = pending.as_mut() {
                    block.text.push_str(&text);
                }
            }
            Event::End(TagEnd::CodeBlock) => {
                if let Some(mut block) = pending.take() {
                    if block.text.ends_with('\n') {
                        block.text.pop();
                    }
                    body.push(Segment::Block(block));
                    cursor = range.end + closing_line_break(markdown, range.end);
                }
            }
            Event::Code(code) if pending.is_none() => {
                push_text(&mut body, &markdown[cursor..range.start]);
                body.push(Segment::Inline(code.into_string()));
                cursor = range.end;
            }
            _ => {}
        }
    }

    push_text(&mut body, &markdown[cursor..]);
    body
}

/// Length of the line break ending a closing fence at `end`, if the block
/// range stopped short of it.
fn closing_line_break(markdown: &str, end: usize) -> usize {
    if markdown[..end].ends_with('\n') {
        return 0;
    }
    let rest = &markdown[end..];
    if rest.starts_with("\r\n") {
        2
    } else if rest.starts_with('\n') {
        1
    } else {
        0
    }
}

fn push_text(body: &mut DocumentBody, text: &str) {
    if !text.is_empty() {
        body.push(Segment::text(text));
    }
}

/// Parse and assemble a page from source text.
///
/// # Errors
///
/// - [`Error::Frontmatter`] if the frontmatter is missing or not valid YAML
/// - [`Error::InvalidMetadata`] if `title` or `description` is empty
pub fn parse_page(source: &str) -> Result<Document> {
    let (yaml, markdown) = split_frontmatter(source)?;
    let metadata = parse_metadata(yaml)?;
    assemble(metadata, parse_body(markdown))
}

/// Read and assemble the page at `path`, deriving its slug from the path
/// relative to `content_root`.
pub async fn load_page(path: &Path, content_root: &Path) -> Result<Page> {
    let source = read_file(path).await?;
    let document = parse_page(&source)?;
    let relative = path.strip_prefix(content_root).unwrap_or(path);

    Ok(Page {
        slug: slug_from_path(relative),
        source_path: path.to_path_buf(),
        document,
    })
}
