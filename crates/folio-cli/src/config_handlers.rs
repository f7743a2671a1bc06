//! Handler functions for `folio config {path,get,set,init,export}` and the
//! TOML dotted-key helpers they share.

use std::path::{Path, PathBuf};

use folio_core::{Error, Result};

use crate::cli::ConfigAction;
use crate::config::{FolioConfig, SITE_CONFIG_FILE};

/// Handle a config subcommand.
///
/// Receives the raw `--config` path rather than a loaded config, since
/// `path` and `init` must work before any config file exists.
pub fn handle_config_command(config_path: Option<&str>, action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Path => {
            let path = config_file_path(config_path)?;
            println!("{}", path.display());
            if !path.exists() {
                eprintln!("(not created yet; run `folio config init`)");
            }
            Ok(())
        }
        ConfigAction::Get { key } => {
            println!("{}", config_get(config_path, &key)?);
            Ok(())
        }
        ConfigAction::Set { key, value } => {
            let path = config_file_path(config_path)?;
            config_set(&path, &key, &value)?;
            println!("Set {key} = {value} in {}", path.display());
            Ok(())
        }
        ConfigAction::Init { file, user, force } => {
            let path = match (file, user) {
                (Some(file), _) => PathBuf::from(file),
                (None, true) => FolioConfig::default_config_path()
                    .ok_or_else(|| Error::config("Could not determine config directory"))?,
                (None, false) => PathBuf::from(SITE_CONFIG_FILE),
            };
            config_init(&path, force)?;
            println!("Config file created at {}", path.display());
            Ok(())
        }
        ConfigAction::Export { docker_env } => {
            let config = FolioConfig::load(config_path)?;
            for line in config_export(&config, docker_env)? {
                println!("{line}");
            }
            Ok(())
        }
    }
}

fn config_file_path(config_path: Option<&str>) -> Result<PathBuf> {
    FolioConfig::resolve_config_path(config_path)
        .ok_or_else(|| Error::config("Could not determine config directory for this platform"))
}

/// Look up a value of the effective configuration by dotted key.
fn config_get(config_path: Option<&str>, key: &str) -> Result<String> {
    let config = FolioConfig::load(config_path)?;
    let value = toml::Value::try_from(&config).map_err(|e| Error::config(e.to_string()))?;
    get_nested_value(&value, key)
        .map(format_toml_value)
        .ok_or_else(|| Error::config(format!("Key '{key}' not found in configuration")))
}

/// Write a value into an existing config file.
///
/// The edited file must still deserialize as a [`FolioConfig`]; a value of
/// the wrong type is rejected and the file is left untouched.
fn config_set(path: &Path, key: &str, value: &str) -> Result<()> {
    if !path.exists() {
        return Err(Error::config(format!(
            "Config file does not exist at {}. Run `folio config init` first.",
            path.display()
        )));
    }

    let content = std::fs::read_to_string(path).map_err(|e| Error::io_with_path(e, path))?;
    let mut doc: toml::Value = toml::from_str(&content)
        .map_err(|e| Error::config(format!("Failed to parse {}: {e}", path.display())))?;

    set_nested_value(&mut doc, key, parse_value(value))?;
    doc.clone()
        .try_into::<FolioConfig>()
        .map_err(|e| Error::config(format!("Invalid value for '{key}': {e}")))?;

    let toml_str = toml::to_string_pretty(&doc).map_err(|e| Error::config(e.to_string()))?;
    std::fs::write(path, toml_str).map_err(|e| Error::io_with_path(e, path))
}

/// Write a default config file.
fn config_init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(Error::config(format!(
            "Config file already exists at {}. Use --force to overwrite.",
            path.display()
        )));
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| Error::io_with_path(e, parent))?;
    }

    let toml_str = FolioConfig::default().to_toml_string()?;
    std::fs::write(path, toml_str).map_err(|e| Error::io_with_path(e, path))
}

/// Render the configuration as `KEY=value` lines.
fn config_export(config: &FolioConfig, docker_env: bool) -> Result<Vec<String>> {
    let lines = config
        .to_env_vars()?
        .into_iter()
        .map(|(key, value)| {
            if docker_env {
                format!("--env {key}={value}")
            } else {
                format!("{key}={value}")
            }
        })
        .collect();
    Ok(lines)
}

// ============================================================================
// TOML dotted-key helpers
// ============================================================================

fn get_nested_value<'a>(value: &'a toml::Value, key: &str) -> Option<&'a toml::Value> {
    key.split('.')
        .try_fold(value, |current, part| current.as_table()?.get(part))
}

/// Set a value at a dotted key path, creating intermediate tables as needed.
fn set_nested_value(root: &mut toml::Value, key: &str, value: toml::Value) -> Result<()> {
    let (parents, leaf) = match key.rsplit_once('.') {
        Some((parents, leaf)) => (Some(parents), leaf),
        None => (None, key),
    };
    if leaf.is_empty() {
        return Err(Error::config(format!("Invalid key '{key}'")));
    }

    let mut current = root;
    for part in parents.into_iter().flat_map(|p| p.split('.')) {
        let table = current
            .as_table_mut()
            .ok_or_else(|| Error::config(format!("Cannot navigate into '{part}'")))?;
        current = table
            .entry(part.to_string())
            .or_insert(toml::Value::Table(toml::map::Map::new()));
    }

    current
        .as_table_mut()
        .ok_or_else(|| Error::config(format!("Cannot set '{key}' on a non-table value")))?
        .insert(leaf.to_string(), value);
    Ok(())
}

/// Parse a command-line value: `true`/`false`, an integer, or a string.
fn parse_value(s: &str) -> toml::Value {
    match s {
        "true" => toml::Value::Boolean(true),
        "false" => toml::Value::Boolean(false),
        _ => s
            .parse::<i64>()
            .map(toml::Value::Integer)
            .unwrap_or_else(|_| toml::Value::String(s.to_string())),
    }
}

fn format_toml_value(value: &toml::Value) -> String {
    match value {
        toml::Value::String(s) => s.clone(),
        toml::Value::Array(_) | toml::Value::Table(_) => {
            toml::to_string_pretty(value).unwrap_or_else(|_| format!("{value:?}"))
        }
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_default(dir: &TempDir) -> PathBuf {
        let path = dir.path().join(SITE_CONFIG_FILE);
        config_init(&path, false).unwrap();
        path
    }

    #[test]
    fn test_config_get_top_level_and_nested() {
        let dir = TempDir::new().unwrap();
        let path = write_default(&dir);
        let path = path.to_str().unwrap();

        assert_eq!(config_get(Some(path), "project_name").unwrap(), "folio");
        assert_eq!(config_get(Some(path), "site.strict").unwrap(), "false");
    }

    #[test]
    fn test_config_get_missing_key() {
        let dir = TempDir::new().unwrap();
        let path = write_default(&dir);

        let err = config_get(Some(path.to_str().unwrap()), "site.theme").unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_config_set_writes_nested_key() {
        let dir = TempDir::new().unwrap();
        let path = write_default(&dir);

        config_set(&path, "site.edit_base_url", "https://example.com/edit/main").unwrap();
        config_set(&path, "site.strict", "true").unwrap();

        let config = FolioConfig::load(Some(path.to_str().unwrap())).unwrap();
        assert_eq!(
            config.site.edit_base_url.as_deref(),
            Some("https://example.com/edit/main")
        );
        assert!(config.site.strict);
    }

    #[test]
    fn test_config_set_rejects_wrong_type() {
        let dir = TempDir::new().unwrap();
        let path = write_default(&dir);
        let before = std::fs::read_to_string(&path).unwrap();

        let err = config_set(&path, "site.strict", "sometimes").unwrap_err();
        assert!(err.to_string().contains("site.strict"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), before);
    }

    #[test]
    fn test_config_set_missing_file() {
        let err = config_set(Path::new("/nonexistent/folio.toml"), "a", "b").unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn test_config_init_creates_parents_and_refuses_overwrite() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("folio").join("config.toml");

        config_init(&path, false).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("project_name"));
        assert!(content.contains("[site]"));

        let err = config_init(&path, false).unwrap_err();
        assert!(err.to_string().contains("already exists"));
        config_init(&path, true).unwrap();
    }

    #[test]
    fn test_config_export_formats() {
        let config = FolioConfig::default();

        let plain = config_export(&config, false).unwrap();
        assert!(plain.contains(&"FOLIO_PROJECT_NAME=folio".to_string()));

        let docker = config_export(&config, true).unwrap();
        assert!(docker.iter().all(|line| line.starts_with("--env FOLIO_")));
    }

    #[test]
    fn test_nested_value_helpers() {
        let mut val = toml::Value::Table(toml::map::Map::new());
        set_nested_value(&mut val, "site.strict", toml::Value::Boolean(true)).unwrap();
        set_nested_value(&mut val, "project_name", toml::Value::String("x".into())).unwrap();

        assert_eq!(
            get_nested_value(&val, "site.strict"),
            Some(&toml::Value::Boolean(true))
        );
        assert!(get_nested_value(&val, "site.missing").is_none());
        assert!(set_nested_value(&mut val, "project_name.inner", toml::Value::Integer(1)).is_err());
        assert!(set_nested_value(&mut val, "site.", toml::Value::Integer(1)).is_err());
    }

    #[test]
    fn test_parse_value_types() {
        assert_eq!(parse_value("true"), toml::Value::Boolean(true));
        assert_eq!(parse_value("false"), toml::Value::Boolean(false));
        assert_eq!(parse_value("-7"), toml::Value::Integer(-7));
        assert_eq!(
            parse_value("https://example.com"),
            toml::Value::String("https://example.com".to_string())
        );
    }

    #[test]
    fn test_format_toml_value() {
        assert_eq!(format_toml_value(&toml::Value::String("hi".into())), "hi");
        assert_eq!(format_toml_value(&toml::Value::Integer(42)), "42");
        assert_eq!(format_toml_value(&toml::Value::Boolean(true)), "true");
    }
}
