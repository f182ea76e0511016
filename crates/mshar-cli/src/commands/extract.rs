//! Extract command implementation.
//!
//! Unpacks members with the in-process reader. The archive's pre-script and
//! post-script are never run.

use super::read_archive_text;
use crate::cli::ExtractArgs;
use crate::error::add_archive_context;
use crate::output::OutputFormatter;
use anyhow::Context;
use anyhow::Result;
use mshar_core::UnpackConfig;
use mshar_core::unpack_archive;
use std::env;

pub fn execute(args: &ExtractArgs, formatter: &dyn OutputFormatter) -> Result<()> {
    let output_dir = match &args.output_dir {
        Some(dir) => dir.clone(),
        None => env::current_dir().context("failed to get current directory")?,
    };

    let config = UnpackConfig {
        overwrite: args.force,
        allow_unsafe_paths: args.allow_unsafe_paths,
        preserve_permissions: args.preserve_permissions,
    };

    let text = read_archive_text(&args.archive)?;
    let report = add_archive_context(unpack_archive(&text, &output_dir, &config), &args.archive)?;

    formatter.format_unpack_result(&output_dir, &report)?;

    Ok(())
}
