//! # Configuration Module
//!
//! This module provides configuration support for headerstamp. The rewrite is
//! driven by an explicit [`Settings`] structure (root directory, template
//! path, extension set, exclusion set, markers, year) passed into the entry
//! point rather than paths derived implicitly from the executable's location.
//!
//! Settings are resolved in precedence order: CLI flags, then a
//! `.headerstamp.toml` file (discovered via `--config`, the
//! `HEADERSTAMP_CONFIG` environment variable, or the root directory), then
//! built-in defaults.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::verbose_log;

/// The default config file name.
pub const DEFAULT_CONFIG_FILENAME: &str = ".headerstamp.toml";

/// Environment variable for specifying config file path.
pub const CONFIG_ENV_VAR: &str = "HEADERSTAMP_CONFIG";

/// Default template file name, resolved relative to the root directory.
pub const DEFAULT_TEMPLATE_FILENAME: &str = "copyright.txt";

/// Default extension set: a single systems-language source extension.
pub const DEFAULT_EXTENSIONS: &[&str] = &["rs"];

/// Directory names excluded from recursion by default.
pub const DEFAULT_EXCLUDE_DIRS: &[&str] = &["target"];

/// Default line-comment marker prefixed to every header line.
pub const DEFAULT_COMMENT_MARKER: &str = "// ";

/// Default opt-out marker. A file containing a line that trims to exactly
/// this token anywhere in its content is left untouched.
pub const DEFAULT_OPT_OUT_MARKER: &str = "// no-copyright-header";

/// Fully resolved settings driving one run.
#[derive(Debug, Clone)]
pub struct Settings {
  /// Root directory the walk starts from.
  pub root: PathBuf,
  /// Path to the header template file.
  pub template_path: PathBuf,
  /// File name extensions (without the leading dot) that make a file eligible.
  pub extensions: Vec<String>,
  /// Directory names that are never recursed into.
  pub exclude_dirs: HashSet<String>,
  /// Line-comment marker prefixed to every header line.
  pub comment_marker: String,
  /// Sentinel line that excludes a file from rewriting.
  pub opt_out_marker: String,
  /// Copyright year substituted into the template.
  pub year: i32,
}

impl Settings {
  /// Built-in defaults for the given root directory and year.
  pub fn defaults(root: PathBuf, year: i32) -> Self {
    let template_path = root.join(DEFAULT_TEMPLATE_FILENAME);
    Self {
      root,
      template_path,
      extensions: DEFAULT_EXTENSIONS.iter().map(|s| (*s).to_string()).collect(),
      exclude_dirs: DEFAULT_EXCLUDE_DIRS.iter().map(|s| (*s).to_string()).collect(),
      comment_marker: DEFAULT_COMMENT_MARKER.to_string(),
      opt_out_marker: DEFAULT_OPT_OUT_MARKER.to_string(),
      year,
    }
  }

  /// Overlay values from a config file. CLI flags are applied after this and
  /// take precedence.
  pub fn merge_file_config(&mut self, config: FileConfig) {
    if let Some(template) = config.template {
      self.template_path = if template.is_absolute() {
        template
      } else {
        self.root.join(template)
      };
    }
    if !config.extensions.is_empty() {
      self.extensions = config.extensions;
    }
    if !config.exclude.is_empty() {
      self.exclude_dirs = config.exclude.into_iter().collect();
    }
    if let Some(marker) = config.comment_marker {
      self.comment_marker = marker;
    }
    if let Some(marker) = config.opt_out_marker {
      self.opt_out_marker = marker;
    }
  }
}

/// Schema of the `.headerstamp.toml` file.
#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
pub struct FileConfig {
  /// Path to the header template, relative to the root directory unless
  /// absolute.
  #[serde(default)]
  pub template: Option<PathBuf>,

  /// Extensions (without the leading dot) that make a file eligible.
  #[serde(default)]
  pub extensions: Vec<String>,

  /// Directory names excluded from recursion.
  #[serde(default)]
  pub exclude: Vec<String>,

  /// Line-comment marker prefixed to every header line.
  #[serde(default, rename = "comment-marker")]
  pub comment_marker: Option<String>,

  /// Sentinel line that excludes a file from rewriting.
  #[serde(default, rename = "opt-out-marker")]
  pub opt_out_marker: Option<String>,
}

/// Error type for configuration operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
  /// The config file could not be read.
  #[error("Failed to read config file '{path}': {source}")]
  ReadError { path: PathBuf, source: std::io::Error },

  /// The config file contains invalid TOML.
  #[error("Failed to parse config file '{path}': {source}")]
  ParseError { path: PathBuf, source: toml::de::Error },

  /// A config entry is invalid.
  #[error("Invalid config entry '{entry}': {message}")]
  InvalidEntry { entry: String, message: String },
}

impl FileConfig {
  /// Load a config file.
  ///
  /// # Errors
  ///
  /// Returns an error if the file cannot be read, is not valid TOML, or fails
  /// validation.
  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    verbose_log!("Loading config from: {}", path.display());

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
      path: path.to_path_buf(),
      source: e,
    })?;

    let config: FileConfig = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
      path: path.to_path_buf(),
      source: e,
    })?;

    config.validate()?;

    Ok(config)
  }

  /// Validate the configuration.
  ///
  /// Checks that:
  /// - Extension entries don't include the leading dot and are non-empty
  /// - The comment marker, if set, is non-empty
  /// - The opt-out marker, if set, is a non-blank single line
  fn validate(&self) -> Result<(), ConfigError> {
    for ext in &self.extensions {
      if ext.starts_with('.') {
        return Err(ConfigError::InvalidEntry {
          entry: ext.clone(),
          message: "extension should not include leading dot".to_string(),
        });
      }
      if ext.is_empty() {
        return Err(ConfigError::InvalidEntry {
          entry: "extensions".to_string(),
          message: "extension cannot be empty".to_string(),
        });
      }
    }

    if let Some(ref marker) = self.comment_marker
      && marker.trim().is_empty()
    {
      return Err(ConfigError::InvalidEntry {
        entry: "comment-marker".to_string(),
        message: "comment marker cannot be blank".to_string(),
      });
    }

    if let Some(ref marker) = self.opt_out_marker {
      if marker.trim().is_empty() {
        return Err(ConfigError::InvalidEntry {
          entry: "opt-out-marker".to_string(),
          message: "opt-out marker cannot be blank".to_string(),
        });
      }
      if marker.contains('\n') {
        return Err(ConfigError::InvalidEntry {
          entry: "opt-out-marker".to_string(),
          message: "opt-out marker must be a single line".to_string(),
        });
      }
    }

    Ok(())
  }
}

/// Discover the configuration file path.
///
/// The configuration file is discovered in the following order:
/// 1. Path specified via `--config` flag (passed as `explicit_path`)
/// 2. Path specified via `HEADERSTAMP_CONFIG` environment variable
/// 3. `.headerstamp.toml` in the root directory
///
/// # Returns
///
/// The path to the configuration file, or `None` if no config file is found.
pub fn discover_config_path(explicit_path: Option<&Path>, root: &Path) -> Option<PathBuf> {
  // 1. Explicit path from CLI takes highest priority
  if let Some(path) = explicit_path {
    if path.exists() {
      verbose_log!("Using explicit config path: {}", path.display());
      return Some(path.to_path_buf());
    }
    verbose_log!("Explicit config path does not exist: {}", path.display());
    return None;
  }

  // 2. Check environment variable
  if let Ok(env_path) = std::env::var(CONFIG_ENV_VAR) {
    let path = PathBuf::from(&env_path);
    if path.exists() {
      verbose_log!("Using config from {}: {}", CONFIG_ENV_VAR, path.display());
      return Some(path);
    }
    verbose_log!("{} path does not exist: {}", CONFIG_ENV_VAR, env_path);
  }

  // 3. Check root directory
  let root_config = root.join(DEFAULT_CONFIG_FILENAME);
  if root_config.exists() {
    verbose_log!("Using root config: {}", root_config.display());
    return Some(root_config);
  }

  verbose_log!("No config file found");
  None
}

/// Load configuration from the discovered path, if any.
///
/// # Returns
///
/// The loaded configuration, or `None` when no config file is found or
/// discovery is disabled via `no_config`.
pub fn load_config(explicit_path: Option<&Path>, root: &Path, no_config: bool) -> Result<Option<FileConfig>> {
  if no_config {
    verbose_log!("Config file discovery disabled (--no-config)");
    return Ok(None);
  }

  match discover_config_path(explicit_path, root) {
    Some(path) => {
      let config =
        FileConfig::load(&path).with_context(|| format!("Failed to load config from {}", path.display()))?;
      Ok(Some(config))
    }
    None => Ok(None),
  }
}

#[cfg(test)]
mod tests {
  use tempfile::TempDir;

  use super::*;

  #[test]
  fn test_parse_valid_config() {
    let config_content = concat!(
      "template = \"notices/copyright.txt\"\n",
      "extensions = [\"rs\", \"go\"]\n",
      "exclude = [\"target\", \"vendor\"]\n",
      "comment-marker = \"# \"\n",
      "opt-out-marker = \"# no-copyright-header\"\n",
    );

    let config: FileConfig = toml::from_str(config_content).expect("valid config should parse");

    assert_eq!(config.template, Some(PathBuf::from("notices/copyright.txt")));
    assert_eq!(config.extensions, vec!["rs".to_string(), "go".to_string()]);
    assert_eq!(config.exclude, vec!["target".to_string(), "vendor".to_string()]);
    assert_eq!(config.comment_marker.as_deref(), Some("# "));
    assert_eq!(config.opt_out_marker.as_deref(), Some("# no-copyright-header"));
  }

  #[test]
  fn test_parse_empty_config() {
    let config: FileConfig = toml::from_str("").expect("empty config should parse");
    assert_eq!(config, FileConfig::default());
  }

  #[test]
  fn test_validate_extension_leading_dot() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let config_path = temp_dir.path().join(DEFAULT_CONFIG_FILENAME);
    std::fs::write(&config_path, "extensions = [\".rs\"]\n").expect("write config");

    let result = FileConfig::load(&config_path);
    assert!(matches!(
      result.expect_err("should fail"),
      ConfigError::InvalidEntry { .. }
    ));
  }

  #[test]
  fn test_validate_blank_comment_marker() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let config_path = temp_dir.path().join(DEFAULT_CONFIG_FILENAME);
    std::fs::write(&config_path, "comment-marker = \"  \"\n").expect("write config");

    let result = FileConfig::load(&config_path);
    assert!(matches!(
      result.expect_err("should fail"),
      ConfigError::InvalidEntry { .. }
    ));
  }

  #[test]
  fn test_load_config_file_not_found() {
    let result = FileConfig::load(Path::new("/nonexistent/path/.headerstamp.toml"));
    assert!(matches!(
      result.expect_err("should fail"),
      ConfigError::ReadError { .. }
    ));
  }

  #[test]
  fn test_discover_config_explicit_path() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let config_path = temp_dir.path().join("custom-config.toml");
    std::fs::write(&config_path, "").expect("write config");

    let result = discover_config_path(Some(&config_path), temp_dir.path());

    assert_eq!(result, Some(config_path));
  }

  #[test]
  fn test_discover_config_root() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let config_path = temp_dir.path().join(DEFAULT_CONFIG_FILENAME);
    std::fs::write(&config_path, "").expect("write config");

    let result = discover_config_path(None, temp_dir.path());

    assert_eq!(result, Some(config_path));
  }

  #[test]
  fn test_discover_config_none_found() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let result = discover_config_path(None, temp_dir.path());

    assert!(result.is_none());
  }

  #[test]
  fn test_settings_defaults() {
    let settings = Settings::defaults(PathBuf::from("/project"), 2024);

    assert_eq!(settings.root, PathBuf::from("/project"));
    assert_eq!(settings.template_path, PathBuf::from("/project/copyright.txt"));
    assert_eq!(settings.extensions, vec!["rs".to_string()]);
    assert!(settings.exclude_dirs.contains("target"));
    assert_eq!(settings.comment_marker, "// ");
    assert_eq!(settings.opt_out_marker, "// no-copyright-header");
    assert_eq!(settings.year, 2024);
  }

  #[test]
  fn test_merge_file_config_relative_template() {
    let mut settings = Settings::defaults(PathBuf::from("/project"), 2024);
    settings.merge_file_config(FileConfig {
      template: Some(PathBuf::from("notices/copyright.txt")),
      ..FileConfig::default()
    });

    assert_eq!(
      settings.template_path,
      PathBuf::from("/project/notices/copyright.txt")
    );
  }

  #[test]
  fn test_merge_file_config_overrides() {
    let mut settings = Settings::defaults(PathBuf::from("/project"), 2024);
    settings.merge_file_config(FileConfig {
      template: None,
      extensions: vec!["go".to_string()],
      exclude: vec!["vendor".to_string()],
      comment_marker: Some("# ".to_string()),
      opt_out_marker: Some("# no-copyright-header".to_string()),
    });

    assert_eq!(settings.extensions, vec!["go".to_string()]);
    assert!(settings.exclude_dirs.contains("vendor"));
    assert!(!settings.exclude_dirs.contains("target"));
    assert_eq!(settings.comment_marker, "# ");
    assert_eq!(settings.opt_out_marker, "# no-copyright-header");
  }

  #[test]
  fn test_merge_empty_file_config_keeps_defaults() {
    let mut settings = Settings::defaults(PathBuf::from("/project"), 2024);
    settings.merge_file_config(FileConfig::default());

    assert_eq!(settings.extensions, vec!["rs".to_string()]);
    assert!(settings.exclude_dirs.contains("target"));
  }
}
