//! JSON output formatter for machine-readable results.

use super::formatter::JsonOutput;
use super::formatter::OutputFormatter;
use super::formatter::ReportTarget;
use anyhow::Result;
use mshar_core::ArchiveManifest;
use mshar_core::ArchiveReport;
use mshar_core::UnpackReport;
use serde::Serialize;
use std::io;
use std::io::Write;
use std::path::Path;

pub struct JsonFormatter;

#[derive(Serialize)]
struct ManifestEntryOutput<'a> {
    name: &'a str,
    size: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    mode: Option<String>,
    compressed: bool,
}

#[derive(Serialize)]
struct ManifestOutput<'a> {
    entries: Vec<ManifestEntryOutput<'a>>,
    total_entries: usize,
    total_size: u64,
}

impl<'a> ManifestOutput<'a> {
    fn new(manifest: &'a ArchiveManifest) -> Self {
        Self {
            entries: manifest
                .entries
                .iter()
                .map(|e| ManifestEntryOutput {
                    name: &e.name,
                    size: e.size,
                    mode: e.mode.map(|m| format!("{m:o}")),
                    compressed: e.compressed,
                })
                .collect(),
            total_entries: manifest.total_entries,
            total_size: manifest.total_size,
        }
    }
}

impl JsonFormatter {
    fn output<T: Serialize>(value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        writeln!(io::stdout(), "{json}")?;
        Ok(())
    }

    // stdout may be carrying an archive
    fn output_stderr<T: Serialize>(value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        writeln!(io::stderr(), "{json}")?;
        Ok(())
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_creation_result(
        &self,
        target: ReportTarget<'_>,
        report: &ArchiveReport,
    ) -> Result<()> {
        #[derive(Serialize)]
        struct CreationOutput {
            #[serde(skip_serializing_if = "Option::is_none")]
            output_path: Option<String>,
            files_added: usize,
            files_skipped: usize,
            compressed_members: usize,
            bytes_read: u64,
            bytes_encoded: u64,
            expansion_ratio: f64,
            duration_ms: u128,
            warnings: Vec<String>,
        }

        let data = CreationOutput {
            output_path: match target {
                ReportTarget::File(path) => Some(path.display().to_string()),
                ReportTarget::Stdout => None,
            },
            files_added: report.files_added,
            files_skipped: report.files_skipped,
            compressed_members: report.compressed_members,
            bytes_read: report.bytes_read,
            bytes_encoded: report.bytes_encoded,
            expansion_ratio: report.expansion_ratio(),
            duration_ms: report.duration.as_millis(),
            warnings: report.warnings.clone(),
        };

        let output = JsonOutput::success("create", data);
        match target {
            ReportTarget::File(_) => Self::output(&output),
            ReportTarget::Stdout => Self::output_stderr(&output),
        }
    }

    fn format_manifest_short(&self, manifest: &ArchiveManifest) -> Result<()> {
        Self::output(&JsonOutput::success("list", ManifestOutput::new(manifest)))
    }

    fn format_manifest_long(&self, manifest: &ArchiveManifest, _human_readable: bool) -> Result<()> {
        Self::output(&JsonOutput::success("list", ManifestOutput::new(manifest)))
    }

    fn format_unpack_result(&self, dest: &Path, report: &UnpackReport) -> Result<()> {
        #[derive(Serialize)]
        struct UnpackOutput {
            output_dir: String,
            files_written: usize,
            directories_created: usize,
            bytes_written: u64,
            duration_ms: u128,
        }

        let data = UnpackOutput {
            output_dir: dest.display().to_string(),
            files_written: report.files_written,
            directories_created: report.directories_created,
            bytes_written: report.bytes_written,
            duration_ms: report.duration.as_millis(),
        };

        Self::output(&JsonOutput::success("extract", data))
    }

    fn format_error(&self, error: &anyhow::Error) {
        let output = JsonOutput::<()>::error("unknown", format!("{error:?}"));
        let _ = Self::output_stderr(&output);
    }

    fn format_warning(&self, message: &str) {
        #[derive(Serialize)]
        struct WarningData<'a> {
            message: &'a str,
        }

        let output = JsonOutput::success("warning", WarningData { message });
        let _ = Self::output_stderr(&output);
    }
}
