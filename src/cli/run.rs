//! # Run Command
//!
//! This module implements the single headerstamp run: resolve settings,
//! render the header once, walk the tree, rewrite each eligible file.

use std::time::Instant;

use anyhow::{Context, Result};
use chrono::Datelike;
use tracing::debug;

use crate::cli::Cli;
use crate::config::{Settings, load_config};
use crate::header::HeaderTemplate;
use crate::logging::{init_tracing, set_quiet, set_verbose};
use crate::output::{RunSummary, print_blank_line, print_start_message, print_summary};
use crate::rewriter::{RewriteOutcome, Rewriter};
use crate::walker::FileWalker;

/// Run headerstamp with the given arguments.
///
/// # Errors
///
/// Returns an error (terminating the process with a non-zero status) when the
/// config or template cannot be loaded, or when any file read or write fails
/// mid-run. Files already rewritten stay rewritten; there is no rollback.
pub fn run(args: Cli) -> Result<()> {
  // Initialize tracing subscriber for structured diagnostics
  init_tracing(args.quiet, args.verbose);

  // Set output mode for the info_log!/verbose_log! macros
  if args.verbose > 0 {
    set_verbose();
  } else if args.quiet {
    set_quiet();
  }
  args.colors.apply();

  let settings = resolve_settings(&args)?;
  debug!(
    "Resolved settings: root={}, template={}, extensions={:?}, exclude={:?}",
    settings.root.display(),
    settings.template_path.display(),
    settings.extensions,
    settings.exclude_dirs
  );

  // Load and render the header exactly once; every file receives the
  // identical bytes.
  let template = HeaderTemplate::load(&settings.template_path).with_context(|| {
    format!(
      "Failed to load header template from {}",
      settings.template_path.display()
    )
  })?;
  let header = template.render(settings.year, &settings.comment_marker);

  let rewriter = Rewriter::new(
    header,
    &settings.comment_marker,
    settings.opt_out_marker.clone(),
    args.dry_run,
  );

  print_start_message(&settings.root, args.dry_run);

  let start_time = Instant::now();
  let mut summary = RunSummary::default();

  for entry in FileWalker::new(&settings.root, &settings.extensions, &settings.exclude_dirs) {
    let path = entry?;
    match rewriter.rewrite_file(&path)? {
      RewriteOutcome::Rewritten => summary.rewritten += 1,
      RewriteOutcome::OptedOut => summary.opted_out += 1,
    }
  }

  print_blank_line();
  print_summary(&summary, start_time.elapsed(), args.dry_run);

  Ok(())
}

/// Resolve the effective settings: CLI flags over config file over defaults.
fn resolve_settings(args: &Cli) -> Result<Settings> {
  let year = args.year.unwrap_or_else(|| chrono::Local::now().year());

  let mut settings = Settings::defaults(args.root.clone(), year);

  if let Some(config) = load_config(args.config.as_deref(), &settings.root, args.no_config)? {
    debug!("Applying configuration file overrides");
    settings.merge_file_config(config);
  }

  // CLI flags take precedence over the config file
  if let Some(ref template) = args.template {
    settings.template_path = template.clone();
  }
  if !args.ext.is_empty() {
    // Accept both "rs" and ".rs" on the command line
    settings.extensions = args
      .ext
      .iter()
      .map(|ext| ext.trim_start_matches('.').to_string())
      .collect();
  }
  if !args.exclude.is_empty() {
    settings.exclude_dirs = args.exclude.iter().cloned().collect();
  }
  if let Some(ref marker) = args.comment_marker {
    settings.comment_marker = marker.clone();
  }
  if let Some(ref marker) = args.opt_out_marker {
    settings.opt_out_marker = marker.clone();
  }

  Ok(settings)
}

#[cfg(test)]
mod tests {
  use std::path::PathBuf;

  use super::*;

  #[test]
  fn test_resolve_settings_cli_overrides() {
    let args = Cli {
      root: PathBuf::from("/project"),
      template: Some(PathBuf::from("custom.txt")),
      ext: vec![".go".to_string(), "rs".to_string()],
      exclude: vec!["vendor".to_string()],
      comment_marker: Some("# ".to_string()),
      opt_out_marker: Some("# keep".to_string()),
      year: Some(2024),
      no_config: true,
      ..Cli::default()
    };

    let settings = resolve_settings(&args).expect("resolve should succeed");

    assert_eq!(settings.template_path, PathBuf::from("custom.txt"));
    assert_eq!(settings.extensions, vec!["go".to_string(), "rs".to_string()]);
    assert!(settings.exclude_dirs.contains("vendor"));
    assert_eq!(settings.comment_marker, "# ");
    assert_eq!(settings.opt_out_marker, "# keep");
    assert_eq!(settings.year, 2024);
  }

  #[test]
  fn test_resolve_settings_defaults() {
    let args = Cli {
      root: PathBuf::from("/project"),
      year: Some(2024),
      no_config: true,
      ..Cli::default()
    };

    let settings = resolve_settings(&args).expect("resolve should succeed");

    assert_eq!(settings.template_path, PathBuf::from("/project/copyright.txt"));
    assert_eq!(settings.extensions, vec!["rs".to_string()]);
    assert_eq!(settings.comment_marker, "// ");
  }
}
