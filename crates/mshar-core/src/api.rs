//! High-level public API for generating, listing and unpacking archives.

use std::path::Path;

use crate::ErrorSink;
use crate::Result;
use crate::UnpackConfig;
use crate::creation::Archive;
use crate::creation::ErrorPolicy;
use crate::creation::ShellArchiver;
use crate::extraction::unpack_members;
use crate::inspection::ArchiveManifest;
use crate::inspection::read_archive;
use crate::report::UnpackReport;

fn archiver<P: AsRef<Path>>(
    pre_script: Option<&str>,
    post_script: Option<&str>,
    files: &[P],
    policy: ErrorPolicy,
) -> ShellArchiver {
    let mut archiver = ShellArchiver::new().files(files).policy(policy);
    if let Some(pre) = pre_script {
        archiver = archiver.pre_script(pre);
    }
    if let Some(post) = post_script {
        archiver = archiver.post_script(post);
    }
    archiver
}

/// Generates an archive, collecting per-file errors in `errors`.
///
/// Files that cannot be archived are skipped; the archive covers the rest,
/// in input order.
///
/// # Examples
///
/// ```no_run
/// use mshar_core::ArchiveError;
/// use mshar_core::generate;
///
/// let mut errors: Vec<ArchiveError> = Vec::new();
/// let archive = generate(None, Some("echo done\n"), &["a.txt", "missing.txt"], &mut errors);
/// for err in &errors {
///     eprintln!("skipped: {err}");
/// }
/// print!("{archive}");
/// ```
pub fn generate<P: AsRef<Path>>(
    pre_script: Option<&str>,
    post_script: Option<&str>,
    files: &[P],
    errors: &mut dyn ErrorSink,
) -> Archive {
    archiver(pre_script, post_script, files, ErrorPolicy::Permissive)
        .build_with_sink(errors)
        .unwrap_or_else(|err| {
            errors.report(err);
            Archive::scripts_only(pre_script, post_script)
        })
}

/// Generates an archive, failing on the first file that cannot be archived.
///
/// # Errors
///
/// Returns the first per-file error; no partial archive is produced.
///
/// # Examples
///
/// ```no_run
/// use mshar_core::generate_strict;
///
/// let archive = generate_strict(Some("#!/bin/sh\n"), None, &["Cargo.toml"])?;
/// std::fs::write("bundle.shar", archive.as_str())?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn generate_strict<P: AsRef<Path>>(
    pre_script: Option<&str>,
    post_script: Option<&str>,
    files: &[P],
) -> Result<Archive> {
    archiver(pre_script, post_script, files, ErrorPolicy::Strict).build()
}

/// Generates an archive, silently skipping files that cannot be archived.
///
/// Only `report.files_skipped` tells whether anything was left out.
pub fn generate_lenient<P: AsRef<Path>>(
    pre_script: Option<&str>,
    post_script: Option<&str>,
    files: &[P],
) -> Archive {
    archiver(pre_script, post_script, files, ErrorPolicy::Lenient)
        .build()
        .unwrap_or_else(|_| Archive::scripts_only(pre_script, post_script))
}

/// Lists the members of an archive without writing anything.
///
/// # Errors
///
/// Returns [`ArchiveError::MalformedArchive`](crate::ArchiveError::MalformedArchive)
/// if a member cannot be parsed.
pub fn list_archive(text: &str) -> Result<ArchiveManifest> {
    let members = read_archive(text)?;
    Ok(ArchiveManifest::from_members(&members))
}

/// Unpacks an archive below `dest` without invoking a shell.
///
/// The pre-script and post-script are not run.
///
/// # Errors
///
/// Returns an error if the archive is malformed or a member cannot be
/// written safely; see [`unpack_members`].
///
/// # Examples
///
/// ```no_run
/// use mshar_core::UnpackConfig;
/// use mshar_core::unpack_archive;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let text = std::fs::read_to_string("bundle.shar")?;
/// let report = unpack_archive(&text, "out", &UnpackConfig::default())?;
/// println!("wrote {} files", report.files_written);
/// # Ok(())
/// # }
/// ```
pub fn unpack_archive<P: AsRef<Path>>(
    text: &str,
    dest: P,
    config: &UnpackConfig,
) -> Result<UnpackReport> {
    let members = read_archive(text)?;
    unpack_members(&members, dest.as_ref(), config)
}
