//! Path resolution for sites.
//!
//! Locates the directory that holds `folio.toml` and maps page sources to
//! URL slugs. Configured paths may start with `~`.

use std::path::{Component, Path, PathBuf};

/// How many directories [`find_dir_with_marker`] inspects, `start` included.
pub const MAX_WALK_LEVELS: usize = 10;

/// Find the site root: the nearest of `start` and its ancestors that holds
/// `marker` (usually `folio.toml`).
///
/// The search gives up after [`MAX_WALK_LEVELS`] directories so a stray
/// config high up the tree is not picked by accident.
///
/// ```no_run
/// use folio_core::util::paths::find_dir_with_marker;
///
/// let root = find_dir_with_marker("pages/docs", "folio.toml");
/// ```
pub fn find_dir_with_marker<P: AsRef<Path>>(start: P, marker: &str) -> Option<PathBuf> {
    start
        .as_ref()
        .ancestors()
        .take(MAX_WALK_LEVELS)
        .find(|dir| dir.join(marker).exists())
        .map(Path::to_path_buf)
}

/// Resolve a leading `~` in a configured content or output path.
///
/// Only the bare `~` component is expanded (`~user` is left alone), and the
/// path is returned unchanged when no home directory is known.
pub fn expand_tilde<P: AsRef<Path>>(path: P) -> PathBuf {
    let path = path.as_ref();
    match (path.strip_prefix("~"), dirs::home_dir()) {
        (Ok(rest), Some(home)) => home.join(rest),
        _ => path.to_path_buf(),
    }
}

/// Derive a URL slug from a page path relative to the content root.
///
/// The extension is dropped and components are joined with `/`, so
/// `docs/continuous-integration/circleci.md` becomes
/// `docs/continuous-integration/circleci`. A trailing `index` component
/// collapses into its directory.
///
/// ```
/// use folio_core::util::paths::slug_from_path;
///
/// assert_eq!(slug_from_path("docs/ci/circleci.md"), "docs/ci/circleci");
/// assert_eq!(slug_from_path("docs/index.md"), "docs");
/// ```
pub fn slug_from_path<P: AsRef<Path>>(relative: P) -> String {
    let without_ext = relative.as_ref().with_extension("");
    let mut parts: Vec<String> = without_ext
        .components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();

    if parts.len() > 1 && parts.last().map(String::as_str) == Some("index") {
        parts.pop();
    }

    parts.join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_tilde_output_dir() {
        let Some(home) = dirs::home_dir() else {
            return;
        };
        assert_eq!(expand_tilde("~/sites/docs/public"), home.join("sites/docs/public"));
        assert_eq!(expand_tilde("~"), home);
    }

    #[test]
    fn test_expand_tilde_leaves_other_paths() {
        assert_eq!(expand_tilde("pages"), PathBuf::from("pages"));
        assert_eq!(expand_tilde("/srv/pages"), PathBuf::from("/srv/pages"));
        assert_eq!(expand_tilde("~leo/pages"), PathBuf::from("~leo/pages"));
    }

    #[test]
    fn test_find_dir_with_marker_nested() {
        let temp = tempfile::TempDir::new().unwrap();
        let nested = temp.path().join("pages").join("docs");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(temp.path().join("folio.toml"), "").unwrap();

        let found = find_dir_with_marker(&nested, "folio.toml");
        assert_eq!(found.as_deref(), Some(temp.path()));
    }

    #[test]
    fn test_find_dir_with_marker_prefers_nearest() {
        let temp = tempfile::TempDir::new().unwrap();
        let site = temp.path().join("sites/zeit");
        let pages = site.join("pages");
        std::fs::create_dir_all(&pages).unwrap();
        std::fs::write(temp.path().join("folio.toml"), "").unwrap();
        std::fs::write(site.join("folio.toml"), "").unwrap();

        assert_eq!(find_dir_with_marker(&pages, "folio.toml"), Some(site.clone()));
        assert_eq!(find_dir_with_marker(&site, "folio.toml"), Some(site));
    }

    #[test]
    fn test_find_dir_with_marker_not_found() {
        let result = find_dir_with_marker("/", "nonexistent_marker_folio");
        assert!(result.is_none());
    }

    #[test]
    fn test_slug_from_path_nested() {
        assert_eq!(
            slug_from_path("docs/continuous-integration/circleci.md"),
            "docs/continuous-integration/circleci"
        );
    }

    #[test]
    fn test_slug_from_path_index_collapses() {
        assert_eq!(slug_from_path("guides/index.md"), "guides");
        assert_eq!(slug_from_path("index.md"), "index");
    }
}
