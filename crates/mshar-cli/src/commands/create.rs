//! Create command implementation.

use crate::cli::CreateArgs;
use crate::error::convert_creation_error;
use crate::output::OutputFormatter;
use crate::output::ReportTarget;
use crate::progress::CliProgress;
use anyhow::Context;
use anyhow::Result;
use anyhow::bail;
use mshar_core::ArchiveConfig;
use mshar_core::ArchiveError;
use mshar_core::ErrorPolicy;
use mshar_core::NoopProgress;
use mshar_core::ShellArchiver;
use std::fs;
use std::io;
use std::io::Write;
use std::path::Path;
use tracing::debug;

pub fn execute(args: &CreateArgs, formatter: &dyn OutputFormatter, quiet: bool) -> Result<()> {
    if let Some(output) = &args.output
        && output.exists()
        && !args.force
    {
        bail!(
            "Output file already exists: {}\n\
             HINT: Use --force to overwrite.",
            output.display()
        );
    }

    let policy = if args.strict {
        ErrorPolicy::Strict
    } else if args.lenient {
        ErrorPolicy::Lenient
    } else {
        ErrorPolicy::Permissive
    };

    let mut config = ArchiveConfig::default()
        .with_compression(args.compress.into())
        .with_preserve_permissions(!args.no_permissions)
        .with_max_file_size(args.max_file_size)
        .with_strip_prefix(args.strip_prefix.clone())
        .with_reject_empty(args.reject_empty && !args.allow_empty);
    if let Some(level) = args.compression_level {
        config = config.with_compression_level(level);
    }

    let mut archiver = ShellArchiver::new()
        .files(&args.files)
        .config(config)
        .policy(policy);
    if let Some(pre) = read_script(args.pre.as_deref(), "pre-script")? {
        archiver = archiver.pre_script(pre);
    }
    if let Some(post) = read_script(args.post.as_deref(), "post-script")? {
        archiver = archiver.post_script(post);
    }

    let mut skipped: Vec<ArchiveError> = Vec::new();
    let result = if !quiet && !args.files.is_empty() && CliProgress::should_show() {
        let mut progress = CliProgress::new(args.files.len(), "Encoding");
        archiver.build_with_progress(&mut progress, &mut skipped)
    } else {
        archiver.build_with_progress(&mut NoopProgress, &mut skipped)
    };
    let archive = result.map_err(convert_creation_error)?;

    for err in &skipped {
        formatter.format_warning(&format!("skipped: {err}"));
    }

    let target = match &args.output {
        Some(path) => {
            fs::write(path, archive.as_str())
                .with_context(|| format!("failed to write archive '{}'", path.display()))?;
            ReportTarget::File(path)
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(archive.as_str().as_bytes())
                .and_then(|()| stdout.flush())
                .context("failed to write archive to stdout")?;
            ReportTarget::Stdout
        }
    };
    debug!(bytes = archive.text.len(), "archive written");

    formatter.format_creation_result(target, &archive.report)
}

/// Reads a pre- or post-script; `-` or no path means none.
fn read_script(path: Option<&Path>, what: &str) -> Result<Option<String>> {
    match path {
        None => Ok(None),
        Some(path) if path.as_os_str() == "-" => Ok(None),
        Some(path) => fs::read_to_string(path)
            .map(Some)
            .with_context(|| format!("failed to read {what} '{}'", path.display())),
    }
}
