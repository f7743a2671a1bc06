//! Markdown backend.
//!
//! Text runs are copied through. Inline spans become code spans and blocks
//! become fenced code blocks; in both cases the fence is made longer than
//! any backtick run inside the literal so the literal cannot close it.
//! A block nested in a list item or blockquote is written back under the
//! same container prefix it was parsed from.

use folio_core::{Error, Result};

use super::Renderer;
use crate::body::LiteralBlock;
use crate::metadata::DocumentMetadata;

/// Recomposes a document as markdown source.
#[derive(Debug, Default)]
pub struct MarkdownRenderer {
    out: String,
    frontmatter: bool,
}

impl MarkdownRenderer {
    /// Create a renderer that emits only the body.
    pub fn new() -> Self {
        Self::default()
    }

    /// Prefix the output with the metadata as YAML frontmatter.
    pub fn with_frontmatter(mut self, enabled: bool) -> Self {
        self.frontmatter = enabled;
        self
    }
}

impl Renderer for MarkdownRenderer {
    type Output = String;

    fn text(&mut self, text: &str) -> Result<()> {
        self.out.push_str(text);
        Ok(())
    }

    fn literal_block(&mut self, block: &LiteralBlock) -> Result<()> {
        let current_line = self.out.rsplit('\n').next().unwrap_or_default();
        if current_line != block.indent {
            if !self.out.is_empty() && !self.out.ends_with('\n') {
                self.out.push('\n');
            }
            self.out.push_str(&block.indent);
        }

        let prefix = continuation_prefix(&block.indent);
        let fence = "`".repeat((longest_backtick_run(&block.text) + 1).max(3));
        self.out.push_str(&fence);
        if let Some(language) = &block.language {
            self.out.push_str(language);
        }
        self.out.push('\n');
        if !block.text.is_empty() {
            for line in block.text.split('\n') {
                if line.is_empty() {
                    self.out.push_str(prefix.trim_end());
                } else {
                    self.out.push_str(&prefix);
                    self.out.push_str(line);
                }
                self.out.push('\n');
            }
        }
        self.out.push_str(&prefix);
        self.out.push_str(&fence);
        self.out.push('\n');
        Ok(())
    }

    fn literal_inline(&mut self, span: &str) -> Result<()> {
        if span.is_empty() {
            return Ok(());
        }
        if span.contains(['\n', '\r']) {
            return Err(Error::render(format!(
                "inline literal spans a line break: {span:?}"
            )));
        }

        let fence = "`".repeat(longest_backtick_run(span) + 1);
        // CommonMark strips one space from each side when both are present.
        let pad = span.starts_with('`')
            || span.ends_with('`')
            || (span.starts_with(' ') && span.ends_with(' ') && !span.trim().is_empty());

        self.out.push_str(&fence);
        if pad {
            self.out.push(' ');
        }
        self.out.push_str(span);
        if pad {
            self.out.push(' ');
        }
        self.out.push_str(&fence);
        Ok(())
    }

    fn finish(self, metadata: &DocumentMetadata) -> Result<String> {
        if !self.frontmatter {
            return Ok(self.out);
        }

        let yaml = yaml_serde::to_string(metadata)
            .map_err(|e| Error::serialization(format!("frontmatter: {e}")))?;
        let mut page = String::with_capacity(yaml.len() + self.out.len() + 16);
        page.push_str("---\n");
        page.push_str(&yaml);
        if !yaml.ends_with('\n') {
            page.push('\n');
        }
        page.push_str("---\n");
        page.push_str(&self.out);
        Ok(page)
    }
}

/// Prefix for the lines after an opening fence: blockquote markers and tabs
/// are kept, everything else (list markers included) becomes a space.
fn continuation_prefix(indent: &str) -> String {
    indent
        .chars()
        .map(|c| if c == '>' || c == '\t' { c } else { ' ' })
        .collect()
}

fn longest_backtick_run(text: &str) -> usize {
    let mut longest = 0;
    let mut current = 0;
    for c in text.chars() {
        if c == '`' {
            current += 1;
            longest = longest.max(current);
        } else {
            current = 0;
        }
    }
    longest
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DocumentBody, Segment, assemble};

    fn render(body: DocumentBody) -> String {
        let doc = assemble(DocumentMetadata::new("T", "D"), body).unwrap();
        doc.render(MarkdownRenderer::new()).unwrap()
    }

    #[test]
    fn test_text_and_inline() {
        let body = DocumentBody::builder()
            .text("Create a ")
            .inline(".circleci/config.yml")
            .text(" file.")
            .build();
        assert_eq!(render(body), "Create a `.circleci/config.yml` file.");
    }

    #[test]
    fn test_block_with_language_on_fresh_line() {
        let body = DocumentBody::builder()
            .text("following:")
            .block_with_language("version: 2\njobs:\n  build: {}", "yaml")
            .build();
        assert_eq!(
            render(body),
            "following:\n```yaml\nversion: 2\njobs:\n  build: {}\n```\n"
        );
    }

    #[test]
    fn test_block_containing_fence_uses_longer_fence() {
        let body = DocumentBody::builder().block("```\ninner\n```").build();
        assert_eq!(render(body), "````\n```\ninner\n```\n````\n");
    }

    #[test]
    fn test_inline_with_backticks_is_padded() {
        let body = DocumentBody::builder().inline("`now`").build();
        assert_eq!(render(body), "`` `now` ``");
    }

    #[test]
    fn test_empty_block() {
        let body = DocumentBody::builder().block("").build();
        assert_eq!(render(body), "```\n```\n");
    }

    #[test]
    fn test_block_keeps_trailing_newline() {
        let body = DocumentBody::builder().block("a\n").build();
        assert_eq!(render(body), "```\na\n\n```\n");
    }

    #[test]
    fn test_indented_block_after_list_item() {
        let body = DocumentBody::builder()
            .text("1. Step:\n\n   ")
            .segment(Segment::Block(
                LiteralBlock::new("a: 1\n\nb: 2").with_language("yaml").with_indent("   "),
            ))
            .text("2. Next\n")
            .build();
        assert_eq!(
            render(body),
            "1. Step:\n\n   ```yaml\n   a: 1\n\n   b: 2\n   ```\n2. Next\n"
        );
    }

    #[test]
    fn test_indented_block_starts_its_own_line() {
        let body = DocumentBody::builder()
            .text("> Quote:")
            .segment(Segment::Block(LiteralBlock::new("x").with_indent("> ")))
            .build();
        assert_eq!(render(body), "> Quote:\n> ```\n> x\n> ```\n");
    }

    #[test]
    fn test_empty_inline_renders_nothing() {
        let body = DocumentBody::builder().text("a").inline("").text("b").build();
        assert_eq!(render(body), "ab");
    }

    #[test]
    fn test_inline_with_line_break_is_rejected() {
        let doc = assemble(
            DocumentMetadata::new("T", "D"),
            DocumentBody::builder().inline("one\ntwo").build(),
        )
        .unwrap();
        let err = doc.render(MarkdownRenderer::new()).unwrap_err();
        assert!(matches!(err, Error::Render(_)));
    }

    #[test]
    fn test_continuation_prefix() {
        assert_eq!(continuation_prefix("1. "), "   ");
        assert_eq!(continuation_prefix("> - "), ">   ");
        assert_eq!(continuation_prefix(""), "");
    }

    #[test]
    fn test_frontmatter_is_prefixed() {
        let meta = DocumentMetadata::new("Title", "Desc").with_date("26 May 2018");
        let doc = assemble(meta, DocumentBody::builder().text("Body\n").build()).unwrap();
        let out = doc
            .render(MarkdownRenderer::new().with_frontmatter(true))
            .unwrap();

        assert!(out.starts_with("---\n"));
        assert!(out.contains("title: Title\n"));
        assert!(out.contains("date: 26 May 2018\n"));
        assert!(out.ends_with("---\nBody\n"));
    }

    #[test]
    fn test_longest_backtick_run() {
        assert_eq!(longest_backtick_run("none"), 0);
        assert_eq!(longest_backtick_run("a ` b `` c"), 2);
    }
}
