//! # Output Module
//!
//! This module centralizes the user-facing output of the headerstamp tool:
//! the start message and the end-of-run summary. Per-file `Writing <path>`
//! lines are emitted by the rewriter itself as it goes.
//!
//! Output respects quiet mode (suppressed) and verbose mode (adds timing),
//! and colors are applied only when the stream supports them.

use std::path::Path;
use std::time::Duration;

use owo_colors::{OwoColorize, Stream};

use crate::logging::{is_quiet, is_verbose};

/// Symbols used in output
pub mod symbols {
  /// Success
  pub const SUCCESS: &str = "\u{2713}"; // ✓
  /// Opted out / skipped
  pub const SKIPPED: &str = "-";
}

/// Aggregated counts for one run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
  /// Files whose leading header block was replaced.
  pub rewritten: usize,
  /// Files left untouched because of the opt-out marker.
  pub opted_out: usize,
}

impl RunSummary {
  /// Total number of eligible files visited.
  pub const fn total(&self) -> usize {
    self.rewritten + self.opted_out
  }
}

/// Print the initial "Stamping ..." or "Checking ..." message.
pub fn print_start_message(root: &Path, dry_run: bool) {
  if is_quiet() {
    return;
  }

  let verb = if dry_run { "Checking" } else { "Stamping" };
  println!("{} headers under {}...", verb, root.display());
}

/// Print a blank line for visual separation (respects quiet mode).
pub fn print_blank_line() {
  if !is_quiet() {
    println!();
  }
}

/// Print the end-of-run summary.
///
/// Format: "Summary: X rewritten, Y opted out"
/// In verbose mode, also shows timing.
pub fn print_summary(summary: &RunSummary, elapsed: Duration, dry_run: bool) {
  if is_quiet() {
    return;
  }

  if summary.total() == 0 {
    println!(
      "{} No eligible files found.",
      symbols::SKIPPED.if_supports_color(Stream::Stdout, |s| s.dimmed())
    );
    return;
  }

  let rewritten_word = if dry_run { "would be rewritten" } else { "rewritten" };
  let rewritten_str = summary.rewritten.if_supports_color(Stream::Stdout, |s| s.cyan());
  let opted_out_str = summary.opted_out.if_supports_color(Stream::Stdout, |s| s.dimmed());

  let mut summary_line = format!(
    "{} Summary: {} {}, {} opted out",
    symbols::SUCCESS.if_supports_color(Stream::Stdout, |s| s.green()),
    rewritten_str,
    rewritten_word,
    opted_out_str
  );

  // Show timing in verbose mode
  if is_verbose() {
    summary_line.push_str(&format!(" ({:.2}s)", elapsed.as_secs_f64()));
  }

  println!("{}", summary_line);
}
