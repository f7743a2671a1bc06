//! Async file utilities for Folio sites.
//!
//! Provides page discovery plus the read/write helpers used by the site
//! build and the CLI.

use async_walkdir::WalkDir;
use futures::StreamExt;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::{Error, Result};

/// Options for discovering files.
#[derive(Debug, Clone, Default)]
pub struct FindOptions {
    /// File extension to match (without dot), e.g., "md"
    pub extension: Option<&'static str>,
    /// Skip entries whose name starts with `.` at any level
    pub skip_hidden: bool,
}

impl FindOptions {
    /// Markdown pages, hidden files and directories excluded.
    pub fn markdown() -> Self {
        Self {
            extension: Some("md"),
            skip_hidden: true,
        }
    }

    fn accepts(&self, relative: &Path) -> bool {
        if self.skip_hidden
            && relative
                .components()
                .any(|c| c.as_os_str().to_string_lossy().starts_with('.'))
        {
            return false;
        }
        match self.extension {
            Some(ext) => relative.extension().and_then(|e| e.to_str()) == Some(ext),
            None => true,
        }
    }
}

/// A discovered file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileInfo {
    /// Full path to the file.
    pub path: PathBuf,
    /// Path relative to the search base.
    pub relative_path: PathBuf,
}

/// Find all files under `base_path` accepted by `options`.
///
/// Results are sorted by relative path, so every run sees the same order.
///
/// ```no_run
/// # use folio_core::util::files::{find_all_files, FindOptions};
/// # use std::path::Path;
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pages = find_all_files(Path::new("pages"), FindOptions::markdown()).await?;
/// # Ok(())
/// # }
/// ```
pub async fn find_all_files(base_path: &Path, options: FindOptions) -> Result<Vec<FileInfo>> {
    if !exists(base_path).await {
        return Err(Error::not_found(format!(
            "Content directory {} does not exist",
            base_path.display()
        )));
    }

    let mut files = Vec::new();
    let mut entries = WalkDir::new(base_path);

    while let Some(entry) = entries.next().await {
        let path = entry
            .map_err(|e| Error::io_with_path(std::io::Error::other(e), base_path))?
            .path();
        if path.is_dir() {
            continue;
        }

        let Ok(relative_path) = path.strip_prefix(base_path).map(Path::to_path_buf) else {
            continue;
        };
        if !options.accepts(&relative_path) {
            continue;
        }

        files.push(FileInfo {
            path,
            relative_path,
        });
    }

    files.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));
    log::debug!("Found {} file(s) under {}", files.len(), base_path.display());
    Ok(files)
}

/// Read a file's contents as a string.
pub async fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path)
        .await
        .map_err(|e| Error::io_with_path(e, path))
}

/// Write `contents` to `path`, creating parent directories as needed.
pub async fn write_file(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .await
            .map_err(|e| Error::io_with_path(e, parent))?;
    }
    fs::write(path, contents)
        .await
        .map_err(|e| Error::io_with_path(e, path))
}

/// Check if a path exists.
pub async fn exists(path: &Path) -> bool {
    fs::try_exists(path).await.unwrap_or(false)
}
