//! # headerstamp
//!
//! A maintenance tool that inserts or refreshes a standardized copyright
//! header across source files in a project tree.
//!
//! `headerstamp` renders a header template once per run (substituting the
//! `{year}` placeholder and prefixing each line with a comment marker), then
//! recursively enumerates eligible files under a root directory and replaces
//! each file's leading comment block with the rendered header. Files carrying
//! the opt-out marker anywhere in their content are left untouched.
//!
//! The run is single-threaded with synchronous blocking I/O, and idempotent:
//! a second run over the same tree with the same year rewrites each header
//! with identical bytes.
//!
//! ## Usage as a Library
//!
//! ```rust,no_run
//! use std::collections::HashSet;
//! use std::path::Path;
//!
//! use headerstamp::header::HeaderTemplate;
//! use headerstamp::rewriter::Rewriter;
//! use headerstamp::walker::FileWalker;
//!
//! fn main() -> anyhow::Result<()> {
//!   let template = HeaderTemplate::load(Path::new("copyright.txt"))?;
//!   let header = template.render(2025, "// ");
//!   let rewriter = Rewriter::new(header, "// ", "// no-copyright-header".to_string(), false);
//!
//!   let extensions = vec!["rs".to_string()];
//!   let exclude: HashSet<String> = ["target".to_string()].into();
//!
//!   for entry in FileWalker::new(Path::new("."), &extensions, &exclude) {
//!     rewriter.rewrite_file(&entry?)?;
//!   }
//!
//!   Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! * [`header`] - Template loading and one-shot header rendering
//! * [`walker`] - Lazy iterative enumeration of eligible files
//! * [`rewriter`] - Per-file leading comment block replacement
//! * [`config`] - Explicit settings (defaults, config file, environment)
//! * [`logging`] - Output modes and tracing initialization
//! * [`output`] - User-facing start and summary messages

pub mod cli;
pub mod config;
pub mod header;
pub mod logging;
pub mod output;
pub mod rewriter;
pub mod walker;
