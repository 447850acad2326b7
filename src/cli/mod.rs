//! # CLI Module
//!
//! This module contains the command-line interface implementation.
//! It uses clap for argument parsing; every flag has a default so the tool
//! can also run with no arguments at all from a project root.

mod run;

use std::path::PathBuf;

use clap::Parser;
use clap::builder::styling::{AnsiColor, Color, Style, Styles};
pub use run::run;

use crate::logging::ColorMode;

const CUSTOM_STYLES: Styles = Styles::styled()
  .header(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))).bold())
  .usage(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))).bold())
  .literal(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Blue))).bold())
  .placeholder(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Cyan))))
  .error(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Red))).bold())
  .valid(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))))
  .invalid(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Yellow))));

/// Top-level CLI arguments
#[derive(Parser, Debug, Default)]
#[command(
  author,
  version,
  about,
  styles = CUSTOM_STYLES,
  after_help = "Examples:
  # Stamp every .rs file under the current directory
  headerstamp --template copyright.txt

  # Stamp a different tree, with a fixed year
  headerstamp --template notices/copyright.txt --year 2023 path/to/project

  # Stamp Go sources, skipping vendored code
  headerstamp --ext go --exclude vendor --comment-marker \"// \" .

  # Report what would change without writing anything
  headerstamp --dry-run .
",
  help_template = "{before-help}{name} v{version}
{about-section}
{usage-heading} {usage}

{all-args}{after-help}
"
)]
pub struct Cli {
  /// Root directory to process recursively
  #[arg(value_name = "ROOT", default_value = ".")]
  pub root: PathBuf,

  /// Path to the header template file (default: copyright.txt in the root)
  #[arg(long, short = 'f', value_name = "FILE")]
  pub template: Option<PathBuf>,

  /// Only process files with these extensions (repeatable)
  #[arg(long, value_name = "EXT")]
  pub ext: Vec<String>,

  /// Directory names to exclude from recursion (repeatable)
  #[arg(long, value_name = "DIR")]
  pub exclude: Vec<String>,

  /// Line-comment marker prefixed to every header line
  #[arg(long, value_name = "MARKER")]
  pub comment_marker: Option<String>,

  /// Opt-out line: files containing it anywhere are left untouched
  #[arg(long, value_name = "LINE")]
  pub opt_out_marker: Option<String>,

  /// Copyright year (default: the current year)
  #[arg(long, value_name = "YYYY")]
  pub year: Option<i32>,

  /// Dry run mode: report which files would be rewritten without writing
  #[arg(long)]
  pub dry_run: bool,

  /// Path to config file (default: .headerstamp.toml in the root)
  #[arg(long, value_name = "FILE")]
  pub config: Option<PathBuf>,

  /// Ignore config file even if present
  #[arg(long)]
  pub no_config: bool,

  /// Increase verbosity (-v info, -vv debug, -vvv trace)
  #[arg(short, long, action = clap::ArgAction::Count)]
  pub verbose: u8,

  /// Suppress all output except errors
  #[arg(short, long, conflicts_with = "verbose")]
  pub quiet: bool,

  /// Control when to use colored output (auto, never, always)
  #[arg(
    long,
    value_name = "WHEN",
    num_args = 0..=1,
    default_value_t = ColorMode::Auto,
    default_missing_value = "always",
    value_enum
  )]
  pub colors: ColorMode,
}

impl Cli {
  /// Parse CLI arguments and return the Cli struct
  pub fn parse_args() -> Self {
    Self::parse()
  }
}
