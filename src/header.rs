//! # Header Module
//!
//! This module provides functionality for loading the copyright header
//! template, rendering it with a specific year, and formatting it as a block
//! of line comments.
//!
//! The header is rendered exactly once per run and then applied byte-for-byte
//! identically to every eligible file.
//!
//! ## Example
//!
//! ```rust
//! use headerstamp::header::HeaderTemplate;
//!
//! let template = HeaderTemplate::from_text("Copyright {year} Example");
//! let header = template.render(2024, "// ");
//! assert_eq!(header.as_str(), "// Copyright 2024 Example");
//! ```

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::verbose_log;

/// Placeholder substituted with the decimal year during rendering.
const YEAR_PLACEHOLDER: &str = "{year}";

/// The copyright header template.
///
/// Holds the raw template text (surrounding whitespace trimmed), which may
/// contain the `{year}` placeholder on any line. The template is loaded once
/// at program start and never mutated.
#[derive(Debug, Clone)]
pub struct HeaderTemplate {
  text: String,
}

impl HeaderTemplate {
  /// Creates a template directly from text. Mostly useful in tests.
  pub fn from_text(text: &str) -> Self {
    Self {
      text: text.trim().to_string(),
    }
  }

  /// Loads the template from a file.
  ///
  /// # Errors
  ///
  /// Returns an error if the file does not exist, cannot be read, or is not
  /// valid UTF-8. Per the error taxonomy this is fatal: the run aborts before
  /// any file is touched.
  pub fn load(path: &Path) -> Result<Self> {
    verbose_log!("Loading header template from: {}", path.display());

    let text = fs::read_to_string(path)
      .with_context(|| format!("Failed to read header template file: {}", path.display()))?;

    Ok(Self::from_text(&text))
  }

  /// Renders the template into the final comment-prefixed header block.
  ///
  /// Each template line has `{year}` replaced with the year's decimal
  /// representation, is prefixed with `comment_marker`, and is stripped of
  /// trailing whitespace. A blank template line therefore renders as the bare
  /// trimmed marker (e.g. `//`).
  ///
  /// Deterministic for a fixed template and year; no side effects.
  pub fn render(&self, year: i32, comment_marker: &str) -> RenderedHeader {
    let substituted = self.text.replace(YEAR_PLACEHOLDER, &year.to_string());

    let lines: Vec<String> = substituted
      .split('\n')
      .map(|line| format!("{comment_marker}{line}").trim_end().to_string())
      .collect();

    RenderedHeader {
      text: lines.join("\n"),
    }
  }
}

/// A fully rendered header block: comment-prefixed lines joined with `\n`,
/// without a trailing newline. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedHeader {
  text: String,
}

impl RenderedHeader {
  /// The rendered header text.
  pub fn as_str(&self) -> &str {
    &self.text
  }
}

impl std::fmt::Display for RenderedHeader {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.text)
  }
}
