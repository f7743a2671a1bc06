//! Site validation.
//!
//! Assembly never checks that an `edit_url` points at a real file; that is
//! the site build's business. [`check_site`] does it, and also reports the
//! pages the build had to skip or drop.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::site::Site;

// ============================================================================
// Types
// ============================================================================

/// How much a finding matters to the published site.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// A page is missing from the site or its edit link is dead.
    Error,
    /// The page builds, but its metadata needs attention.
    Warning,
    /// Something the build resolved on its own.
    Info,
}

impl Severity {
    /// Fixed-width label for terminal output.
    pub fn label(self) -> &'static str {
        match self {
            Self::Error => "ERROR",
            Self::Warning => "WARN ",
            Self::Info => "INFO ",
        }
    }
}

/// One finding about the pages of a site.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub severity: Severity,
    /// Stable code, e.g. `missing-edit-target`.
    pub code: String,
    pub message: String,
    /// Source files of the pages involved.
    pub pages: Vec<String>,
}

impl ValidationIssue {
    fn new(severity: Severity, code: &str, message: impl Into<String>, pages: &[&Path]) -> Self {
        Self {
            severity,
            code: code.to_string(),
            message: message.into(),
            pages: pages.iter().map(|p| p.display().to_string()).collect(),
        }
    }
}

/// Findings of [`check_site`] in the order the checks ran.
///
/// The site is publishable when no finding has [`Severity::Error`].
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ValidationResult {
    pub issues: Vec<ValidationIssue>,
}

impl ValidationResult {
    /// `true` when nothing blocks publishing.
    pub fn is_valid(&self) -> bool {
        self.count(Severity::Error) == 0
    }

    /// Findings of one severity.
    pub fn of(&self, severity: Severity) -> impl Iterator<Item = &ValidationIssue> {
        self.issues.iter().filter(move |i| i.severity == severity)
    }

    /// Number of findings of one severity.
    pub fn count(&self, severity: Severity) -> usize {
        self.of(severity).count()
    }

    fn report(&mut self, issue: ValidationIssue) {
        self.issues.push(issue);
    }
}

// ============================================================================
// Validation functions
// ============================================================================

/// Validate a loaded site against the site root its edit paths refer to.
///
/// Checks for:
/// - Pages skipped during the build (error)
/// - Pages whose slug was already taken (error)
/// - Edit paths that do not exist under `site_root` (error)
/// - Absolute edit paths (warning)
/// - Pages with no edit path (warning)
/// - Near-duplicate pages dropped by the build (info)
pub fn check_site(site: &Site, site_root: &Path) -> ValidationResult {
    let mut result = ValidationResult::default();

    check_skipped(site, &mut result);
    check_collisions(site, &mut result);
    check_edit_urls(site, site_root, &mut result);
    check_duplicates(site, &mut result);

    result
}

// ============================================================================
// Individual checks
// ============================================================================

fn check_skipped(site: &Site, result: &mut ValidationResult) {
    for skipped in site.skipped() {
        result.report(ValidationIssue::new(
            Severity::Error,
            "skipped-page",
            skipped.reason.clone(),
            &[skipped.path.as_path()],
        ));
    }
}

fn check_collisions(site: &Site, result: &mut ValidationResult) {
    for collision in site.collisions() {
        result.report(ValidationIssue::new(
            Severity::Error,
            "slug-collision",
            format!("Slug '{}' is already used by another page", collision.slug),
            &[collision.path.as_path(), collision.kept.as_path()],
        ));
    }
}

fn check_edit_urls(site: &Site, site_root: &Path, result: &mut ValidationResult) {
    for page in site.pages() {
        let source = page.source_path.as_path();
        let edit_url = &page.document.metadata().edit_url;

        if edit_url.is_empty() {
            result.report(ValidationIssue::new(
                Severity::Warning,
                "missing-edit-url",
                "Page has no edit path",
                &[source],
            ));
            continue;
        }

        if edit_url.starts_with('/') {
            result.report(ValidationIssue::new(
                Severity::Warning,
                "absolute-edit-url",
                format!("Edit path '{edit_url}' should be relative to the site root"),
                &[source],
            ));
        }

        if !site_root.join(edit_url.trim_start_matches('/')).exists() {
            result.report(ValidationIssue::new(
                Severity::Error,
                "missing-edit-target",
                format!("Edit path '{edit_url}' does not exist under {}", site_root.display()),
                &[source],
            ));
        }
    }
}

fn check_duplicates(site: &Site, result: &mut ValidationResult) {
    for dup in site.duplicates() {
        result.report(ValidationIssue::new(
            Severity::Info,
            "duplicate-page",
            format!("Shares edit path '{}' with an earlier page", dup.edit_url),
            &[dup.path.as_path(), dup.kept.as_path()],
        ));
    }
}
