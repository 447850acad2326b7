//! # Rewriter Module
//!
//! This module contains the per-file rewrite routine: it replaces a file's
//! existing leading comment block with the rendered header, or leaves the file
//! untouched when it carries the opt-out marker.
//!
//! The content transformation is a pure function ([`Rewriter::rewrite_content`])
//! so its laws (idempotence, the opt-out law, the boundary laws) are testable
//! without touching the filesystem. File I/O lives in a thin shell around it.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::trace;

use crate::header::RenderedHeader;
use crate::info_log;

/// What happened to a single file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RewriteOutcome {
  /// The leading header block was replaced and the file overwritten.
  Rewritten,
  /// The file carries the opt-out marker and was left byte-identical.
  OptedOut,
}

/// Applies the rendered header to individual files.
///
/// Holds the header rendered once per run; every file receives the identical
/// bytes. There is no per-file customization beyond the shared year
/// substitution already baked into the header.
pub struct Rewriter {
  /// The header block, rendered once per run.
  header: RenderedHeader,
  /// The comment marker with trailing whitespace removed; a leading line
  /// belongs to the existing header block iff it starts with this prefix.
  comment_prefix: String,
  /// Sentinel line that excludes a file from rewriting.
  opt_out_marker: String,
  /// When set, report what would be written without modifying files.
  dry_run: bool,
}

impl Rewriter {
  /// Creates a rewriter for one run.
  ///
  /// # Parameters
  ///
  /// * `header` - The header rendered once for this run
  /// * `comment_marker` - The line-comment marker the header was rendered with
  /// * `opt_out_marker` - Sentinel line excluding a file from rewriting
  /// * `dry_run` - Report without writing
  pub fn new(header: RenderedHeader, comment_marker: &str, opt_out_marker: String, dry_run: bool) -> Self {
    Self {
      header,
      comment_prefix: comment_marker.trim_end().to_string(),
      opt_out_marker,
      dry_run,
    }
  }

  /// Rewrites a single file in place.
  ///
  /// Reads the full content, applies [`rewrite_content`](Self::rewrite_content),
  /// and overwrites the file unless it opted out (or this is a dry run). One
  /// line naming the path is reported for every rewrite.
  ///
  /// # Errors
  ///
  /// Read errors, invalid UTF-8, and write errors are fatal: they propagate to
  /// the caller and abort the run. Files already rewritten stay rewritten.
  pub fn rewrite_file(&self, path: &Path) -> Result<RewriteOutcome> {
    let content = fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path.display()))?;

    let Some(new_content) = self.rewrite_content(&content) else {
      trace!("Skipping: {} (opt-out marker present)", path.display());
      return Ok(RewriteOutcome::OptedOut);
    };

    if self.dry_run {
      info_log!("Would write {}", path.display());
    } else {
      fs::write(path, &new_content).with_context(|| format!("Failed to write file: {}", path.display()))?;
      info_log!("Writing {}", path.display());
    }

    Ok(RewriteOutcome::Rewritten)
  }

  /// Computes the rewritten content, or `None` when the file opts out.
  ///
  /// Algorithm:
  /// 1. If any line anywhere in the content trims to exactly the opt-out
  ///    marker, the file is left untouched.
  /// 2. The boundary is the index of the first line that does not start with
  ///    the comment prefix; a file consisting entirely of comment lines uses
  ///    end-of-file as the boundary.
  /// 3. One blank line immediately at the boundary is consumed.
  /// 4. Everything before the boundary is discarded; the result is the
  ///    rendered header, one blank line, then the remaining content.
  pub fn rewrite_content(&self, content: &str) -> Option<String> {
    let lines: Vec<&str> = content.split('\n').collect();

    if lines.iter().any(|line| line.trim() == self.opt_out_marker) {
      return None;
    }

    let mut boundary = lines
      .iter()
      .position(|line| !line.starts_with(&self.comment_prefix))
      .unwrap_or(lines.len());

    if boundary < lines.len() && lines[boundary].trim().is_empty() {
      boundary += 1;
    }

    let remainder = lines[boundary..].join("\n");
    Some(format!("{}\n\n{}", self.header.as_str(), remainder))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::header::HeaderTemplate;

  fn rewriter() -> Rewriter {
    let header = HeaderTemplate::from_text("Copyright {year} Example").render(2024, "// ");
    Rewriter::new(header, "// ", "// no-copyright-header".to_string(), false)
  }

  #[test]
  fn test_replaces_existing_header() {
    let result = rewriter().rewrite_content("// old header\n\ncode()\n");
    assert_eq!(result.as_deref(), Some("// Copyright 2024 Example\n\ncode()\n"));
  }

  #[test]
  fn test_opt_out_marker_leaves_content_untouched() {
    let result = rewriter().rewrite_content("// no-copyright-header\ncode()\n");
    assert!(result.is_none());
  }

  #[test]
  fn test_opt_out_marker_anywhere_in_file() {
    // The scan covers the entire file, not just the leading block.
    let result = rewriter().rewrite_content("code()\n\n// no-copyright-header\nmore()\n");
    assert!(result.is_none());
  }

  #[test]
  fn test_opt_out_marker_with_surrounding_whitespace() {
    let result = rewriter().rewrite_content("   // no-copyright-header  \ncode()\n");
    assert!(result.is_none());
  }

  #[test]
  fn test_no_leading_comments_prepends_header() {
    let result = rewriter().rewrite_content("code()\n");
    assert_eq!(result.as_deref(), Some("// Copyright 2024 Example\n\ncode()\n"));
  }

  #[test]
  fn test_all_comment_file_becomes_header_only() {
    let result = rewriter().rewrite_content("// only\n// comments\n");
    assert_eq!(result.as_deref(), Some("// Copyright 2024 Example\n\n"));
  }

  #[test]
  fn test_all_comment_file_without_trailing_newline() {
    let result = rewriter().rewrite_content("// only\n// comments");
    assert_eq!(result.as_deref(), Some("// Copyright 2024 Example\n\n"));
  }

  #[test]
  fn test_multi_line_header_replaced() {
    let content = "// line one\n// line two\n// line three\n\nfn main() {}\n";
    let result = rewriter().rewrite_content(content);
    assert_eq!(result.as_deref(), Some("// Copyright 2024 Example\n\nfn main() {}\n"));
  }

  #[test]
  fn test_header_without_separating_blank_line() {
    // No blank line between the old header and the code: only the comment
    // block is discarded.
    let result = rewriter().rewrite_content("// old\ncode()\n");
    assert_eq!(result.as_deref(), Some("// Copyright 2024 Example\n\ncode()\n"));
  }

  #[test]
  fn test_only_one_blank_line_consumed() {
    let result = rewriter().rewrite_content("// old\n\n\ncode()\n");
    assert_eq!(result.as_deref(), Some("// Copyright 2024 Example\n\n\ncode()\n"));
  }

  #[test]
  fn test_rewrite_is_idempotent() {
    let rewriter = rewriter();
    let once = rewriter.rewrite_content("// stale header\n\ncode()\n").expect("rewrites");
    let twice = rewriter.rewrite_content(&once).expect("rewrites");
    assert_eq!(once, twice);
  }

  #[test]
  fn test_idempotent_on_all_comment_result() {
    let rewriter = rewriter();
    let once = rewriter.rewrite_content("// only comments\n").expect("rewrites");
    let twice = rewriter.rewrite_content(&once).expect("rewrites");
    assert_eq!(once, twice);
  }

  #[test]
  fn test_empty_file_gets_header() {
    let result = rewriter().rewrite_content("");
    assert_eq!(result.as_deref(), Some("// Copyright 2024 Example\n\n"));
  }

  #[test]
  fn test_indented_comment_is_not_part_of_header_block() {
    // Leading-block detection requires the comment prefix at column zero.
    let result = rewriter().rewrite_content("  // indented\ncode()\n");
    assert_eq!(
      result.as_deref(),
      Some("// Copyright 2024 Example\n\n  // indented\ncode()\n")
    );
  }

  #[test]
  fn test_hash_comment_marker() {
    let header = HeaderTemplate::from_text("Copyright {year} Example").render(2024, "# ");
    let rewriter = Rewriter::new(header, "# ", "# no-copyright-header".to_string(), false);

    let result = rewriter.rewrite_content("# old header\n\nprint()\n");
    assert_eq!(result.as_deref(), Some("# Copyright 2024 Example\n\nprint()\n"));
  }

  #[test]
  fn test_rewrite_file_roundtrip() {
    let temp_dir = tempfile::tempdir().expect("create temp dir");
    let path = temp_dir.path().join("main.rs");
    std::fs::write(&path, "// old\n\nfn main() {}\n").expect("write file");

    let outcome = rewriter().rewrite_file(&path).expect("rewrite should succeed");
    assert_eq!(outcome, RewriteOutcome::Rewritten);

    let content = std::fs::read_to_string(&path).expect("read back");
    assert_eq!(content, "// Copyright 2024 Example\n\nfn main() {}\n");
  }

  #[test]
  fn test_rewrite_file_opt_out_is_byte_identical() {
    let temp_dir = tempfile::tempdir().expect("create temp dir");
    let path = temp_dir.path().join("main.rs");
    let original = "fn main() {}\n// no-copyright-header\n";
    std::fs::write(&path, original).expect("write file");

    let outcome = rewriter().rewrite_file(&path).expect("rewrite should succeed");
    assert_eq!(outcome, RewriteOutcome::OptedOut);

    let content = std::fs::read_to_string(&path).expect("read back");
    assert_eq!(content, original);
  }

  #[test]
  fn test_dry_run_does_not_modify_file() {
    let temp_dir = tempfile::tempdir().expect("create temp dir");
    let path = temp_dir.path().join("main.rs");
    let original = "fn main() {}\n";
    std::fs::write(&path, original).expect("write file");

    let header = HeaderTemplate::from_text("Copyright {year} Example").render(2024, "// ");
    let dry = Rewriter::new(header, "// ", "// no-copyright-header".to_string(), true);

    let outcome = dry.rewrite_file(&path).expect("rewrite should succeed");
    assert_eq!(outcome, RewriteOutcome::Rewritten);

    let content = std::fs::read_to_string(&path).expect("read back");
    assert_eq!(content, original);
  }

  #[test]
  fn test_rewrite_file_invalid_utf8_is_fatal() {
    let temp_dir = tempfile::tempdir().expect("create temp dir");
    let path = temp_dir.path().join("binary.rs");
    std::fs::write(&path, [0xff, 0xfe, 0x00]).expect("write file");

    assert!(rewriter().rewrite_file(&path).is_err());
  }
}
