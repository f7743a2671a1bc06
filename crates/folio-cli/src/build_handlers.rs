//! Handler functions for `folio build`, `check`, `index` and `show`.

use std::path::{Path, PathBuf};

use folio_content::{
    HtmlRenderer, MarkdownRenderer, Page, Severity, Site, SiteBuilder, ValidationResult,
    check_site,
};
use folio_core::traits::ConfigProvider;
use folio_core::util::files::write_file;
use folio_core::{Error, Result};

use crate::cli::Format;
use crate::config::{FolioConfig, PAGES};

/// File name of the navigation index written next to the pages.
pub const INDEX_FILE: &str = "index.json";

// ============================================================================
// Option types
// ============================================================================

/// Options for `folio build`.
#[derive(Debug, Clone, Default)]
pub struct BuildOptions {
    /// Output directory override.
    pub output: Option<PathBuf>,
    /// Page output format.
    pub format: Format,
    /// Fail on the first page that cannot be assembled.
    pub strict: bool,
}

/// What a build wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildReport {
    /// Output directory.
    pub output: PathBuf,
    /// Pages rendered and written.
    pub pages_written: usize,
    /// Pages skipped for invalid metadata or frontmatter.
    pub skipped: usize,
    /// Pages dropped as near-duplicates.
    pub duplicates: usize,
    /// Pages dropped because their slug was taken.
    pub collisions: usize,
}

// ============================================================================
// Handlers
// ============================================================================

/// Load the configured site.
///
/// Strict mode is on when either `strict` or `site.strict` is set.
pub async fn load_site(config: &FolioConfig, strict: bool) -> Result<Site> {
    let content_path = config.content_path(PAGES)?;
    log::debug!("Loading pages from {}", content_path.display());

    SiteBuilder::new(content_path)
        .strict(strict || config.site.strict)
        .build()
        .await
}

/// Render every page and write the navigation index.
pub async fn handle_build(config: &FolioConfig, options: BuildOptions) -> Result<BuildReport> {
    let output = match options.output {
        Some(path) => path,
        None => config.output_path()?,
    };
    let site = load_site(config, options.strict).await?;
    let edit_base_url = config.edit_base_url();

    for page in site.pages() {
        let rendered = render_page(page, options.format, edit_base_url)?;
        let target = page_output_path(&output, &page.slug, options.format);
        write_file(&target, &rendered).await?;
        log::debug!("Wrote {}", target.display());
    }

    let index = navigation_json(&site, edit_base_url, true)?;
    write_file(&output.join(INDEX_FILE), &index).await?;

    let report = BuildReport {
        output,
        pages_written: site.pages().len(),
        skipped: site.skipped().len(),
        duplicates: site.duplicates().len(),
        collisions: site.collisions().len(),
    };
    log::info!(
        "Built {} page(s) into {}",
        report.pages_written,
        report.output.display()
    );
    Ok(report)
}

/// Validate the site and print the findings.
///
/// # Errors
///
/// Returns [`Error::Validation`] when any error-level issue was found.
pub async fn handle_check(config: &FolioConfig, strict: bool) -> Result<ValidationResult> {
    let site = load_site(config, strict).await?;
    let result = check_site(&site, &config.base_path()?);

    if result.is_valid() {
        println!("Site is valid ({} page(s)).", site.pages().len());
    } else {
        println!("Site has validation issues:");
    }

    for issue in &result.issues {
        println!("  {} [{}]: {}", issue.severity.label(), issue.code, issue.message);
        for page in &issue.pages {
            println!("    - {page}");
        }
    }

    let errors = result.count(Severity::Error);
    println!(
        "\nSummary: {errors} error(s), {} warning(s)",
        result.count(Severity::Warning)
    );

    if result.is_valid() {
        Ok(result)
    } else {
        Err(Error::validation(format!("{errors} error(s) found")))
    }
}

/// Navigation index of the configured site as JSON.
pub async fn handle_index(config: &FolioConfig, pretty: bool) -> Result<String> {
    let site = load_site(config, false).await?;
    navigation_json(&site, config.edit_base_url(), pretty)
}

/// Render one page by slug.
pub async fn handle_show(config: &FolioConfig, slug: &str, format: Format) -> Result<String> {
    let site = load_site(config, false).await?;
    let page = site
        .page(slug)
        .ok_or_else(|| Error::not_found(format!("No page with slug '{slug}'")))?;
    render_page(page, format, config.edit_base_url())
}

// ============================================================================
// Helpers
// ============================================================================

fn render_page(page: &Page, format: Format, edit_base_url: Option<&str>) -> Result<String> {
    match format {
        Format::Markdown => page
            .document
            .render(MarkdownRenderer::new().with_frontmatter(true)),
        Format::Html => {
            let mut renderer = HtmlRenderer::new().standalone(true);
            if let Some(base) = edit_base_url {
                renderer = renderer.with_edit_base_url(base);
            }
            page.document.render(renderer)
        }
    }
}

fn page_output_path(output: &Path, slug: &str, format: Format) -> PathBuf {
    output.join(format!("{slug}.{}", format.extension()))
}

fn navigation_json(site: &Site, edit_base_url: Option<&str>, pretty: bool) -> Result<String> {
    let entries = site.navigation(edit_base_url);
    let json = if pretty {
        serde_json::to_string_pretty(&entries)
    } else {
        serde_json::to_string(&entries)
    };
    json.map_err(|e| Error::serialization(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ContentConfig, SiteConfig};
    use tempfile::TempDir;

    fn write(dir: &Path, relative: &str, contents: &str) {
        let path = dir.join(relative);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, contents).unwrap();
    }

    fn site_fixture() -> (TempDir, FolioConfig) {
        let root = TempDir::new().unwrap();
        write(
            root.path(),
            "pages/docs/now-cli.md",
            "---\ntitle: Now CLI\ndescription: The command line tool\neditUrl: pages/docs/now-cli.md\n---\n\nRun `now` to deploy.\n",
        );
        write(
            root.path(),
            "pages/index.md",
            "---\ntitle: Docs\ndescription: Documentation home\neditUrl: pages/index.md\n---\n\nWelcome.\n",
        );

        let config = FolioConfig {
            base_path: Some(root.path().to_string_lossy().into_owned()),
            site: SiteConfig {
                edit_base_url: Some("https://example.com/edit/main".into()),
                strict: false,
            },
            ..Default::default()
        };
        (root, config)
    }

    #[tokio::test]
    async fn test_build_writes_pages_and_index() {
        let (root, config) = site_fixture();

        let report = handle_build(&config, BuildOptions::default()).await.unwrap();

        assert_eq!(report.output, root.path().join("public"));
        assert_eq!(report.pages_written, 2);
        assert_eq!(report.skipped, 0);
        assert_eq!(report.collisions, 0);

        let html = std::fs::read_to_string(root.path().join("public/docs/now-cli.html")).unwrap();
        assert!(html.contains("<code>now</code>"));
        assert!(html.contains("https://example.com/edit/main/pages/docs/now-cli.md"));

        let index = std::fs::read_to_string(root.path().join("public/index.json")).unwrap();
        let entries: serde_json::Value = serde_json::from_str(&index).unwrap();
        assert_eq!(entries[0]["slug"], "docs/now-cli");
        assert_eq!(entries[1]["slug"], "index");
    }

    #[tokio::test]
    async fn test_build_markdown_to_custom_output() {
        let (root, config) = site_fixture();
        let out = root.path().join("md-out");

        handle_build(
            &config,
            BuildOptions {
                output: Some(out.clone()),
                format: Format::Markdown,
                strict: true,
            },
        )
        .await
        .unwrap();

        let md = std::fs::read_to_string(out.join("docs/now-cli.md")).unwrap();
        assert!(md.starts_with("---\n"));
        assert!(md.contains("Run `now` to deploy."));
    }

    #[tokio::test]
    async fn test_build_strict_from_config() {
        let (root, mut config) = site_fixture();
        write(root.path(), "pages/broken.md", "---\ndescription: D\n---\n");
        config.site.strict = true;

        let err = handle_build(&config, BuildOptions::default()).await.unwrap_err();
        assert!(err.is_invalid_metadata());
    }

    #[tokio::test]
    async fn test_build_counts_slug_collisions() {
        let (root, config) = site_fixture();
        write(
            root.path(),
            "pages/docs/now-cli/index.md",
            "---\ntitle: Now CLI index\ndescription: D\neditUrl: pages/docs/now-cli/index.md\n---\n",
        );

        let report = handle_build(&config, BuildOptions::default()).await.unwrap();
        assert_eq!(report.pages_written, 2);
        assert_eq!(report.collisions, 1);

        let err = handle_check(&config, false).await.unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[tokio::test]
    async fn test_check_reports_missing_edit_target() {
        let (root, config) = site_fixture();
        assert!(handle_check(&config, false).await.is_ok());

        write(
            root.path(),
            "pages/stale.md",
            "---\ntitle: Stale\ndescription: D\neditUrl: pages/gone.js\n---\n",
        );
        let err = handle_check(&config, false).await.unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[tokio::test]
    async fn test_index_and_show() {
        let (root, _) = site_fixture();
        let config = FolioConfig {
            base_path: Some(root.path().to_string_lossy().into_owned()),
            content: ContentConfig {
                path: Some("pages".into()),
            },
            ..Default::default()
        };

        let json = handle_index(&config, false).await.unwrap();
        assert!(json.starts_with("[{"));
        assert!(!json.contains("edit_link"));

        let md = handle_show(&config, "docs/now-cli", Format::Markdown).await.unwrap();
        assert!(md.contains("title: Now CLI"));

        let err = handle_show(&config, "docs/missing", Format::Html).await.unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[test]
    fn test_page_output_path() {
        let out = Path::new("/out");
        assert_eq!(
            page_output_path(out, "docs/continuous-integration/circleci", Format::Html),
            PathBuf::from("/out/docs/continuous-integration/circleci.html")
        );
        assert_eq!(
            page_output_path(out, "releases/v1.2", Format::Markdown),
            PathBuf::from("/out/releases/v1.2.md")
        );
    }
}
