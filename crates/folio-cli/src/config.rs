//! Configuration for the `folio` CLI.
//!
//! Provides the [`FolioConfig`] struct that loads from TOML files,
//! environment variables, and defaults using the `confyg` crate.
//!
//! # Loading Priority
//!
//! 1. Explicit `--config <path>` flag
//! 2. `FOLIO_CONFIG` environment variable
//! 3. A `folio.toml` in the current directory or one of its parents
//! 4. XDG default: `~/.config/folio/config.toml`
//! 5. Built-in defaults
//!
//! `FOLIO_*` environment variables are layered on top of whichever file
//! was found, e.g. `FOLIO_OUTPUT_PATH`.

use std::path::PathBuf;

use confyg::{Confygery, env};
use folio_core::traits::ConfigProvider;
use folio_core::util::paths::{expand_tilde, find_dir_with_marker};
use folio_core::{Error, Result};
use serde::{Deserialize, Serialize};

/// Name of the per-site config file.
pub const SITE_CONFIG_FILE: &str = "folio.toml";

/// Content type the site build reads.
pub const PAGES: &str = "pages";

// ============================================================================
// Configuration structs
// ============================================================================

/// Main configuration for the `folio` CLI.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FolioConfig {
    /// Project name, shown in version output and logs.
    pub project_name: String,

    /// Site root. Edit paths are checked against this directory.
    pub base_path: Option<String>,

    /// Page source configuration.
    pub content: ContentConfig,

    /// Site-wide rendering options.
    pub site: SiteConfig,

    /// Build output configuration.
    pub output: OutputConfig,
}

/// Page source configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentConfig {
    /// Directory holding the `*.md` pages. Relative paths are resolved
    /// against the site root.
    pub path: Option<String>,
}

/// Site-wide rendering options.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Prefix for "edit this page" links, e.g. a repository's edit URL.
    pub edit_base_url: Option<String>,

    /// Fail the build on the first page that cannot be assembled.
    pub strict: bool,
}

/// Build output configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Output directory for rendered pages.
    pub path: Option<String>,
}

impl Default for FolioConfig {
    fn default() -> Self {
        Self {
            project_name: "folio".to_string(),
            base_path: None,
            content: ContentConfig::default(),
            site: SiteConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

// ============================================================================
// Config loading
// ============================================================================

impl FolioConfig {
    /// Load configuration from file, environment, and defaults.
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let mut builder =
            Confygery::new().map_err(|e| Error::config(format!("config init: {e}")))?;

        if let Some(path) = Self::resolve_config_path(config_path) {
            if path.exists() {
                log::debug!("Loading config from {}", path.display());
                builder
                    .add_file(&path.to_string_lossy())
                    .map_err(|e| Error::config(format!("config file: {e}")))?;
            }
        }

        let mut env_opts = env::Options::with_top_level("FOLIO");
        env_opts.add_section("content");
        env_opts.add_section("site");
        env_opts.add_section("output");
        builder
            .add_env(env_opts)
            .map_err(|e| Error::config(format!("config env: {e}")))?;

        builder
            .build()
            .map_err(|e| Error::config(format!("config build: {e}")))
    }

    /// Resolve the config file path from explicit flag, env var, site
    /// marker, or XDG default.
    pub fn resolve_config_path(explicit: Option<&str>) -> Option<PathBuf> {
        if let Some(path) = explicit {
            return Some(expand_tilde(path));
        }

        if let Ok(path) = std::env::var("FOLIO_CONFIG") {
            return Some(expand_tilde(path));
        }

        if let Some(root) = Self::site_root() {
            return Some(root.join(SITE_CONFIG_FILE));
        }

        Self::default_config_path()
    }

    /// Return the XDG default config path.
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("folio").join("config.toml"))
    }

    /// Nearest directory at or above the current one holding a `folio.toml`.
    fn site_root() -> Option<PathBuf> {
        let cwd = std::env::current_dir().ok()?;
        find_dir_with_marker(cwd, SITE_CONFIG_FILE)
    }

    /// Directory for build output: `output.path`, or `public` under the
    /// site root.
    pub fn output_path(&self) -> Result<PathBuf> {
        match &self.output.path {
            Some(p) => self.resolve(p),
            None => Ok(self.base_path()?.join("public")),
        }
    }

    /// Edit base URL, if one is configured and non-blank.
    pub fn edit_base_url(&self) -> Option<&str> {
        self.site
            .edit_base_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
    }

    fn resolve(&self, path: &str) -> Result<PathBuf> {
        let path = expand_tilde(path);
        if path.is_absolute() {
            Ok(path)
        } else {
            Ok(self.base_path()?.join(path))
        }
    }

    /// Serialize this config to a pretty-printed TOML string.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::config(e.to_string()))
    }

    /// Flatten this config into environment variable pairs with `FOLIO_` prefix.
    pub fn to_env_vars(&self) -> Result<Vec<(String, String)>> {
        let value: toml::Value =
            toml::Value::try_from(self).map_err(|e| Error::config(e.to_string()))?;
        let mut vars = Vec::new();
        flatten_toml_value(&value, "FOLIO", &mut vars);
        Ok(vars)
    }
}

// ============================================================================
// ConfigProvider implementation
// ============================================================================

impl ConfigProvider for FolioConfig {
    fn project_name(&self) -> &str {
        &self.project_name
    }

    fn base_path(&self) -> Result<PathBuf> {
        if let Some(p) = &self.base_path {
            return Ok(expand_tilde(p));
        }
        if let Some(root) = Self::site_root() {
            return Ok(root);
        }
        std::env::current_dir()
            .map_err(|e| Error::config(format!("Could not determine base path: {e}")))
    }

    fn content_path(&self, content_type: &str) -> Result<PathBuf> {
        match &self.content.path {
            Some(p) => self.resolve(p),
            None => Ok(self.base_path()?.join(content_type)),
        }
    }
}

// ============================================================================
// Helper: flatten TOML to env vars
// ============================================================================

/// Recursively flatten a TOML value into `KEY=value` pairs.
fn flatten_toml_value(value: &toml::Value, prefix: &str, out: &mut Vec<(String, String)>) {
    match value {
        toml::Value::Table(table) => {
            for (key, val) in table {
                let env_key = format!("{}_{}", prefix, key.to_uppercase());
                flatten_toml_value(val, &env_key, out);
            }
        }
        toml::Value::Array(arr) => {
            if let Ok(json) = serde_json::to_string(arr) {
                out.push((prefix.to_string(), json));
            }
        }
        toml::Value::String(s) => out.push((prefix.to_string(), s.clone())),
        toml::Value::Integer(i) => out.push((prefix.to_string(), i.to_string())),
        toml::Value::Float(f) => out.push((prefix.to_string(), f.to_string())),
        toml::Value::Boolean(b) => out.push((prefix.to_string(), b.to_string())),
        toml::Value::Datetime(dt) => out.push((prefix.to_string(), dt.to_string())),
    }
}

// ============================================================================
// Tests
// ============================================================================
