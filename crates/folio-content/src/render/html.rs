//! HTML backend.
//!
//! Segments are recomposed as markdown and converted with `pulldown-cmark`,
//! so literal blocks come out as `<pre><code>` with only HTML escaping
//! applied. Metadata is rendered into an `<article>` header, plus an
//! "Edit this page" footer when an edit base URL is configured.

use pulldown_cmark::{Options, Parser, html};

use folio_core::Result;

use super::{MarkdownRenderer, Renderer};
use crate::body::LiteralBlock;
use crate::metadata::DocumentMetadata;
use crate::site::edit_link;

/// Renders a document to HTML.
#[derive(Debug, Default)]
pub struct HtmlRenderer {
    markdown: MarkdownRenderer,
    edit_base_url: Option<String>,
    standalone: bool,
}

impl HtmlRenderer {
    /// Create a renderer that emits an `<article>` fragment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Base URL that `edit_url` is appended to for the edit link.
    pub fn with_edit_base_url(mut self, base: impl Into<String>) -> Self {
        self.edit_base_url = Some(base.into());
        self
    }

    /// Wrap the article in a complete HTML document with `<title>` and
    /// `<meta name="description">`.
    pub fn standalone(mut self, enabled: bool) -> Self {
        self.standalone = enabled;
        self
    }
}

fn article(metadata: &DocumentMetadata, body_html: &str, edit_base_url: Option<&str>) -> String {
    let mut out = String::with_capacity(body_html.len() + 512);
    out.push_str("<article class=\"doc\">\n<header>\n");
    out.push_str(&format!("<h1>{}</h1>\n", escape_html(&metadata.title)));
    out.push_str(&format!(
        "<p class=\"description\">{}</p>\n",
        escape_html(&metadata.description)
    ));

    let mut meta_line = Vec::new();
    if !metadata.date.is_empty() {
        meta_line.push(format!("<time>{}</time>", escape_html(&metadata.date)));
    }
    if !metadata.authors.is_empty() {
        let authors: Vec<String> = metadata.authors.iter().map(|a| escape_html(a)).collect();
        meta_line.push(format!(
            "<span class=\"authors\">{}</span>",
            authors.join(", ")
        ));
    }
    if !meta_line.is_empty() {
        out.push_str(&format!("<p class=\"meta\">{}</p>\n", meta_line.join(" ")));
    }
    out.push_str("</header>\n");
    out.push_str(body_html);

    if let Some(base) = edit_base_url {
        if !metadata.edit_url.is_empty() {
            out.push_str(&format!(
                "<footer><a class=\"edit-link\" href=\"{}\">Edit this page</a></footer>\n",
                escape_html(&edit_link(base, &metadata.edit_url))
            ));
        }
    }
    out.push_str("</article>\n");
    out
}

impl Renderer for HtmlRenderer {
    type Output = String;

    fn text(&mut self, text: &str) -> Result<()> {
        self.markdown.text(text)
    }

    fn literal_block(&mut self, block: &LiteralBlock) -> Result<()> {
        self.markdown.literal_block(block)
    }

    fn literal_inline(&mut self, span: &str) -> Result<()> {
        self.markdown.literal_inline(span)
    }

    fn finish(self, metadata: &DocumentMetadata) -> Result<String> {
        let Self {
            markdown,
            edit_base_url,
            standalone,
        } = self;

        let markdown = markdown.finish(metadata)?;
        let parser = Parser::new_ext(&markdown, markdown_options());
        let mut body_html = String::with_capacity(markdown.len() * 3 / 2);
        html::push_html(&mut body_html, parser);

        let fragment = article(metadata, &body_html, edit_base_url.as_deref());
        if !standalone {
            return Ok(fragment);
        }

        Ok(format!(
            "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n\
             <title>{}</title>\n<meta name=\"description\" content=\"{}\">\n\
             </head>\n<body>\n{}</body>\n</html>\n",
            escape_html(&metadata.title),
            escape_html(&metadata.description),
            fragment
        ))
    }
}

pub(crate) fn markdown_options() -> Options {
    Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH
}

/// Escape the five HTML-significant characters.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
