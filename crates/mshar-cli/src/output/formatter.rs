//! Output formatter trait for CLI results.

use anyhow::Result;
use mshar_core::ArchiveManifest;
use mshar_core::ArchiveReport;
use mshar_core::UnpackReport;
use serde::Serialize;
use std::path::Path;

/// Where the creation report goes.
///
/// When the archive itself is written to stdout, everything else moves to
/// stderr so the archive stays clean.
#[derive(Debug, Clone, Copy)]
pub enum ReportTarget<'a> {
    /// Archive written to this file; report on stdout.
    File(&'a Path),
    /// Archive written to stdout; report on stderr.
    Stdout,
}

/// Common output formatter trait
pub trait OutputFormatter {
    /// Format archive creation result
    fn format_creation_result(&self, target: ReportTarget<'_>, report: &ArchiveReport)
    -> Result<()>;

    /// Format member names, one per line
    fn format_manifest_short(&self, manifest: &ArchiveManifest) -> Result<()>;

    /// Format members with mode and size
    fn format_manifest_long(&self, manifest: &ArchiveManifest, human_readable: bool)
    -> Result<()>;

    /// Format unpack result
    fn format_unpack_result(&self, dest: &Path, report: &UnpackReport) -> Result<()>;

    /// Format error message
    fn format_error(&self, error: &anyhow::Error);

    /// Format warning message
    fn format_warning(&self, message: &str);
}

/// Generic JSON output structure
#[derive(Debug, Serialize)]
pub struct JsonOutput<T> {
    pub operation: String,
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Error,
}

impl<T: Serialize> JsonOutput<T> {
    pub fn success(operation: impl Into<String>, data: T) -> Self {
        Self {
            operation: operation.into(),
            status: Status::Success,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(operation: impl Into<String>, error: impl Into<String>) -> JsonOutput<()> {
        JsonOutput {
            operation: operation.into(),
            status: Status::Error,
            data: None,
            error: Some(error.into()),
        }
    }
}
