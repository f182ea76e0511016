//! Error conversion utilities for CLI.
//!
//! Converts mshar-core's typed errors (thiserror) into user-friendly
//! contextual errors (anyhow) with actionable guidance.

use anyhow::anyhow;
use mshar_core::ArchiveError;
use std::path::Path;

/// Converts an error raised while creating an archive.
pub fn convert_creation_error(err: ArchiveError) -> anyhow::Error {
    match err {
        ArchiveError::FileNotFound { path } => {
            anyhow!(
                "Input file not found: {}\n\
                 HINT: Drop --strict to skip missing files with a warning.",
                path.display()
            )
        }
        ArchiveError::NotAFile { path } => {
            anyhow!(
                "Not a regular file: {}\n\
                 HINT: mshar archives regular files only; list the files inside directories explicitly.",
                path.display()
            )
        }
        ArchiveError::FileTooLarge { path, size, max } => {
            anyhow!(
                "File too large: {} ({size} bytes, limit {max})\n\
                 HINT: Raise the limit with --max-file-size.",
                path.display()
            )
        }
        ArchiveError::EncodingFailure { path, reason } => {
            anyhow!(
                "Cannot encode {}: {reason}\n\
                 HINT: Rename the file, or use --strip-prefix to shorten its name.",
                path.display()
            )
        }
        ArchiveError::EmptyInput => {
            anyhow!(
                "No files to archive\n\
                 HINT: Pass at least one file, or use --allow-empty for a scripts-only archive."
            )
        }
        other => anyhow::Error::from(other).context("Failed to create archive"),
    }
}

/// Converts an error raised while reading or unpacking `archive`.
pub fn convert_archive_error(err: ArchiveError, archive: &Path) -> anyhow::Error {
    match err {
        ArchiveError::PathTraversal { path } => {
            anyhow!(
                "Security violation: Archive '{}' writes outside the output directory with '{}'\n\
                 HINT: Inspect it with 'mshar list'. Use --allow-unsafe-paths only for trusted archives.",
                archive.display(),
                path.display()
            )
        }
        ArchiveError::AlreadyExists { path } => {
            anyhow!(
                "Refusing to overwrite '{}' while unpacking '{}'\n\
                 HINT: Use --force to overwrite existing files.",
                path.display(),
                archive.display()
            )
        }
        ArchiveError::MalformedArchive { line, reason } => {
            anyhow!(
                "Invalid archive '{}' at line {line}: {reason}\n\
                 HINT: The archive may have been damaged in transit.",
                archive.display()
            )
        }
        ArchiveError::Io(io_err) => {
            anyhow!(
                "I/O error while processing '{}': {}",
                archive.display(),
                io_err
            )
        }
        other => anyhow::Error::from(other)
            .context(format!("Error processing archive '{}'", archive.display())),
    }
}

/// Adds archive context to a core result
pub fn add_archive_context<T>(
    result: Result<T, ArchiveError>,
    archive: &Path,
) -> anyhow::Result<T> {
    result.map_err(|e| convert_archive_error(e, archive))
}
