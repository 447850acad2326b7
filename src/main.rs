//! # headerstamp
//!
//! A tool that inserts or refreshes a standardized copyright header across
//! source files in a project tree.

use anyhow::Result;
use headerstamp::cli::{Cli, run};

fn main() -> Result<()> {
  let cli = Cli::parse_args();
  run(cli)
}
