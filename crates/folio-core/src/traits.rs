//! Core traits for Folio configuration.
//!
//! [`ConfigProvider`] abstracts where a documentation site lives: its
//! project identity, its root on disk, and the directory holding each
//! kind of content. The CLI's `FolioConfig` implements it; tests use
//! small in-memory implementations.

use std::path::PathBuf;

use crate::Result;

/// Trait for site configuration.
///
/// # Bounds
///
/// - `Send + Sync`: Configuration must be shareable across threads
/// - `Clone`: Configuration can be duplicated for passing to subsystems
/// - `'static`: Configuration lifetime is not borrowed
///
/// # Example
///
/// ```
/// use std::path::PathBuf;
/// use folio_core::traits::ConfigProvider;
/// use folio_core::Result;
///
/// #[derive(Clone)]
/// struct DocsConfig {
///     root: PathBuf,
/// }
///
/// impl ConfigProvider for DocsConfig {
///     fn project_name(&self) -> &str {
///         "docs"
///     }
///
///     fn base_path(&self) -> Result<PathBuf> {
///         Ok(self.root.clone())
///     }
///
///     fn content_path(&self, content_type: &str) -> Result<PathBuf> {
///         Ok(self.root.join(content_type))
///     }
/// }
/// ```
pub trait ConfigProvider: Send + Sync + Clone + 'static {
    /// The project name, used in log output and default paths.
    fn project_name(&self) -> &str;

    /// Site root. Edit URLs are resolved relative to this directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the path cannot be determined.
    fn base_path(&self) -> Result<PathBuf>;

    /// Path for a specific content type, e.g. `"pages"`.
    ///
    /// # Errors
    ///
    /// Returns an error if the content type is unknown or the path
    /// cannot be resolved.
    fn content_path(&self, content_type: &str) -> Result<PathBuf>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone)]
    struct TestConfig {
        name: String,
        base: PathBuf,
    }

    impl ConfigProvider for TestConfig {
        fn project_name(&self) -> &str {
            &self.name
        }

        fn base_path(&self) -> Result<PathBuf> {
            Ok(self.base.clone())
        }

        fn content_path(&self, content_type: &str) -> Result<PathBuf> {
            match content_type {
                "pages" => Ok(self.base.join("pages")),
                other => Err(crate::Error::config(format!(
                    "Unknown content type: {other}"
                ))),
            }
        }
    }

    fn config() -> TestConfig {
        TestConfig {
            name: "docs".into(),
            base: PathBuf::from("/site"),
        }
    }

    #[test]
    fn test_config_provider_paths() {
        let config = config();
        assert_eq!(config.project_name(), "docs");
        assert_eq!(config.base_path().unwrap(), PathBuf::from("/site"));
        assert_eq!(
            config.content_path("pages").unwrap(),
            PathBuf::from("/site/pages")
        );
    }

    #[test]
    fn test_config_provider_unknown_content_type() {
        let err = config().content_path("graphs").unwrap_err();
        assert!(matches!(err, crate::Error::Config(_)));
    }

    #[test]
    fn test_config_provider_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TestConfig>();
    }
}
