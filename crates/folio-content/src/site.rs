//! Site build: load every page under a content directory.
//!
//! Each page is assembled on its own. A page whose metadata is invalid is
//! either skipped (and recorded) or, in strict mode, fails the whole build;
//! it is never patched with defaults. Pages that share an `edit_url` are
//! revisions of the same topic: the first in path order is kept and the
//! rest are recorded as duplicates. Two sources that map to the same slug
//! (`docs.md` and `docs/index.md`) cannot both be published; the later one
//! is recorded as a collision, or fails a strict build.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Serialize;

use folio_core::util::files::{FindOptions, find_all_files};
use folio_core::{Error, Result};

use crate::source::{Page, load_page};

// ============================================================================
// Types
// ============================================================================

/// A page left out of the build because it could not be assembled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedPage {
    /// Source file.
    pub path: PathBuf,
    /// Why it was skipped.
    pub reason: String,
}

/// A page dropped because an earlier page has the same `edit_url`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicatePage {
    /// Source file that was dropped.
    pub path: PathBuf,
    /// Source file that was kept.
    pub kept: PathBuf,
    /// The shared edit path.
    pub edit_url: String,
}

/// A page dropped because an earlier page already has its slug.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlugCollision {
    /// Source file that was dropped.
    pub path: PathBuf,
    /// Source file that owns the slug.
    pub kept: PathBuf,
    pub slug: String,
}

/// One navigation entry for the site layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavEntry {
    /// URL slug.
    pub slug: String,
    /// Page title.
    pub title: String,
    /// Page description.
    pub description: String,
    /// Display date.
    pub date: String,
    /// Author identifiers.
    pub authors: Vec<String>,
    /// Source path relative to the site root.
    pub edit_url: String,
    /// Full "edit this page" link, when an edit base URL is known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edit_link: Option<String>,
}

/// The loaded pages of a site.
#[derive(Debug, Clone, Default)]
pub struct Site {
    content_dir: PathBuf,
    pages: Vec<Page>,
    skipped: Vec<SkippedPage>,
    duplicates: Vec<DuplicatePage>,
    collisions: Vec<SlugCollision>,
}

impl Site {
    /// Directory the pages were loaded from.
    pub fn content_dir(&self) -> &Path {
        &self.content_dir
    }

    /// Assembled pages, in relative-path order.
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    /// Pages left out because they could not be assembled.
    pub fn skipped(&self) -> &[SkippedPage] {
        &self.skipped
    }

    /// Pages left out as near-duplicates.
    pub fn duplicates(&self) -> &[DuplicatePage] {
        &self.duplicates
    }

    /// Pages left out because their slug was taken.
    pub fn collisions(&self) -> &[SlugCollision] {
        &self.collisions
    }

    /// Find a page by slug.
    pub fn page(&self, slug: &str) -> Option<&Page> {
        self.pages.iter().find(|p| p.slug == slug)
    }

    /// Navigation index ordered by slug.
    pub fn navigation(&self, edit_base_url: Option<&str>) -> Vec<NavEntry> {
        let mut entries: Vec<NavEntry> = self
            .pages
            .iter()
            .map(|page| {
                let meta = page.document.metadata();
                NavEntry {
                    slug: page.slug.clone(),
                    title: meta.title.clone(),
                    description: meta.description.clone(),
                    date: meta.date.clone(),
                    authors: meta.authors.clone(),
                    edit_url: meta.edit_url.clone(),
                    edit_link: edit_base_url
                        .filter(|_| !meta.edit_url.is_empty())
                        .map(|base| edit_link(base, &meta.edit_url)),
                }
            })
            .collect();
        entries.sort_by(|a, b| a.slug.cmp(&b.slug));
        entries
    }
}

// ============================================================================
// Builder
// ============================================================================

/// Loads a [`Site`] from a content directory.
#[derive(Debug, Clone)]
pub struct SiteBuilder {
    content_dir: PathBuf,
    strict: bool,
}

impl SiteBuilder {
    /// Create a builder for `content_dir`.
    pub fn new(content_dir: impl Into<PathBuf>) -> Self {
        Self {
            content_dir: content_dir.into(),
            strict: false,
        }
    }

    /// Fail the build on the first page that cannot be assembled instead of
    /// skipping it.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Discover and load every `*.md` page.
    ///
    /// # Errors
    ///
    /// - I/O errors while discovering or reading files
    /// - In strict mode, the first [`Error::InvalidMetadata`] or
    ///   [`Error::Frontmatter`] encountered, or [`Error::Validation`] for
    ///   the first slug collision
    pub async fn build(self) -> Result<Site> {
        let files = find_all_files(&self.content_dir, FindOptions::markdown()).await?;

        let mut site = Site {
            content_dir: self.content_dir.clone(),
            ..Site::default()
        };
        let mut by_edit_url: HashMap<String, PathBuf> = HashMap::new();
        let mut by_slug: HashMap<String, PathBuf> = HashMap::new();

        for file in files {
            let page = match load_page(&file.path, &self.content_dir).await {
                Ok(page) => page,
                Err(err @ (Error::InvalidMetadata { .. } | Error::Frontmatter(_))) => {
                    if self.strict {
                        log::error!("{}: {err}", file.path.display());
                        return Err(err);
                    }
                    log::warn!("Skipping {}: {err}", file.path.display());
                    site.skipped.push(SkippedPage {
                        path: file.path,
                        reason: err.to_string(),
                    });
                    continue;
                }
                Err(err) => return Err(err),
            };

            if let Some(kept) = by_slug.get(&page.slug) {
                let message = format!(
                    "{} and {} both map to slug '{}'",
                    kept.display(),
                    page.source_path.display(),
                    page.slug
                );
                if self.strict {
                    log::error!("{message}");
                    return Err(Error::validation(message));
                }
                log::warn!("Dropping page: {message}");
                site.collisions.push(SlugCollision {
                    path: page.source_path,
                    kept: kept.clone(),
                    slug: page.slug,
                });
                continue;
            }

            let edit_url = page.document.metadata().edit_url.clone();
            if !edit_url.is_empty() {
                if let Some(kept) = by_edit_url.get(&edit_url) {
                    log::warn!(
                        "Dropping {}: same edit path {edit_url} as {}",
                        page.source_path.display(),
                        kept.display()
                    );
                    site.duplicates.push(DuplicatePage {
                        path: page.source_path,
                        kept: kept.clone(),
                        edit_url,
                    });
                    continue;
                }
                by_edit_url.insert(edit_url, page.source_path.clone());
            }

            by_slug.insert(page.slug.clone(), page.source_path.clone());
            site.pages.push(page);
        }

        log::info!(
            "Loaded {} page(s) from {} ({} skipped, {} duplicate, {} slug collision)",
            site.pages.len(),
            site.content_dir.display(),
            site.skipped.len(),
            site.duplicates.len(),
            site.collisions.len()
        );
        Ok(site)
    }
}

/// Join an edit base URL and a relative edit path with a single `/`.
///
/// ```
/// use folio_content::edit_link;
///
/// assert_eq!(
///     edit_link("https://github.com/org/docs/edit/main/", "/pages/a.js"),
///     "https://github.com/org/docs/edit/main/pages/a.js"
/// );
/// ```
pub fn edit_link(base: &str, edit_url: &str) -> String {
    let path = edit_url.strip_prefix("./").unwrap_or(edit_url);
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn page_source(title: &str, edit_url: &str) -> String {
        let edit_line = if edit_url.is_empty() {
            String::new()
        } else {
            format!("editUrl: {edit_url}\n")
        };
        format!(
            "---\ntitle: {title}\ndescription: About {title}\ndate: 26 May 2018\n{edit_line}---\n\nBody of {title}.\n"
        )
    }

    fn write(dir: &Path, relative: &str, contents: &str) {
        let path = dir.join(relative);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, contents).unwrap();
    }

    #[tokio::test]
    async fn test_build_loads_pages_in_order() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "docs/zeta.md", &page_source("Zeta", "pages/zeta.js"));
        write(temp.path(), "docs/alpha.md", &page_source("Alpha", "pages/alpha.js"));

        let site = SiteBuilder::new(temp.path()).build().await.unwrap();

        let slugs: Vec<&str> = site.pages().iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, vec!["docs/alpha", "docs/zeta"]);
        assert!(site.skipped().is_empty());
        assert!(site.page("docs/zeta").is_some());
        assert_eq!(site.content_dir(), temp.path());
    }

    #[tokio::test]
    async fn test_build_skips_invalid_metadata() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "good.md", &page_source("Good", "pages/good.js"));
        write(temp.path(), "bad.md", "---\ntitle: ''\ndescription: D\n---\nBody");
        write(temp.path(), "raw.md", "# no frontmatter");

        let site = SiteBuilder::new(temp.path()).build().await.unwrap();

        assert_eq!(site.pages().len(), 1);
        assert_eq!(site.skipped().len(), 2);
        assert!(site.skipped()[0].reason.contains("title"));
    }

    #[tokio::test]
    async fn test_build_strict_fails_on_invalid_metadata() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "bad.md", "---\ndescription: D\n---\nBody");

        let err = SiteBuilder::new(temp.path())
            .strict(true)
            .build()
            .await
            .unwrap_err();
        assert!(err.is_invalid_metadata());
    }

    #[tokio::test]
    async fn test_build_keeps_first_of_duplicates() {
        let temp = TempDir::new().unwrap();
        let shared = "pages/docs/continuous-integration/circleci.js";
        write(temp.path(), "a/circleci.md", &page_source("CircleCI v2", shared));
        write(temp.path(), "b/circleci.md", &page_source("CircleCI v1", shared));

        let site = SiteBuilder::new(temp.path()).build().await.unwrap();

        assert_eq!(site.pages().len(), 1);
        assert_eq!(site.pages()[0].document.metadata().title, "CircleCI v2");
        assert_eq!(site.duplicates().len(), 1);
        assert_eq!(site.duplicates()[0].edit_url, shared);
        assert!(site.duplicates()[0].path.ends_with("b/circleci.md"));
    }

    #[tokio::test]
    async fn test_build_records_slug_collision() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "docs.md", &page_source("Docs", "pages/docs.js"));
        write(temp.path(), "docs/index.md", &page_source("Docs index", "pages/docs/index.js"));

        let site = SiteBuilder::new(temp.path()).build().await.unwrap();

        assert_eq!(site.pages().len(), 1);
        assert_eq!(site.pages()[0].slug, "docs");
        assert_eq!(site.collisions().len(), 1);
        let collision = &site.collisions()[0];
        assert_eq!(collision.slug, "docs");
        assert_ne!(collision.path, collision.kept);
        assert_eq!(site.page("docs").unwrap().source_path, collision.kept);
    }

    #[tokio::test]
    async fn test_build_strict_fails_on_slug_collision() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "docs.md", &page_source("Docs", "pages/docs.js"));
        write(temp.path(), "docs/index.md", &page_source("Docs index", "pages/docs/index.js"));

        let err = SiteBuilder::new(temp.path())
            .strict(true)
            .build()
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Validation(ref msg) if msg.contains("'docs'")));
    }

    #[tokio::test]
    async fn test_build_missing_dir() {
        let temp = TempDir::new().unwrap();
        let result = SiteBuilder::new(temp.path().join("missing")).build().await;
        assert!(matches!(result, Err(Error::NotFound(_))));
    }

    #[tokio::test]
    async fn test_navigation_with_edit_links() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "b.md", &page_source("B", "pages/b.js"));
        write(temp.path(), "a.md", &page_source("A", ""));

        let site = SiteBuilder::new(temp.path()).build().await.unwrap();
        let nav = site.navigation(Some("https://example.com/edit/"));

        assert_eq!(nav.len(), 2);
        assert_eq!(nav[0].slug, "a");
        assert_eq!(nav[0].edit_link, None);
        assert_eq!(
            nav[1].edit_link.as_deref(),
            Some("https://example.com/edit/pages/b.js")
        );
        assert_eq!(nav[1].date, "26 May 2018");
    }

    #[test]
    fn test_edit_link_joins_once() {
        assert_eq!(edit_link("https://x/", "a/b.js"), "https://x/a/b.js");
        assert_eq!(edit_link("https://x", "a/b.js"), "https://x/a/b.js");
        assert_eq!(edit_link("https://x//", "./a/b.js"), "https://x/a/b.js");
    }
}
