//! Subcommand implementations.

pub mod completion;
pub mod create;
pub mod extract;
pub mod list;

use anyhow::Context;
use anyhow::Result;
use std::fs;
use std::path::Path;

/// Reads an archive file as text.
fn read_archive_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read archive '{}'", path.display()))
}
