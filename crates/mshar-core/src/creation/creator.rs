//! Builder for generating shell archives with a fluent API.

use std::fmt;
use std::path::Path;
use std::path::PathBuf;
use std::time::Instant;

use tracing::debug;
use tracing::warn;

use crate::ArchiveError;
use crate::ErrorSink;
use crate::NoopProgress;
use crate::ProgressCallback;
use crate::Result;
use crate::creation::config::ArchiveConfig;
use crate::creation::config::Compression;
use crate::creation::encoder;
use crate::creation::encoder::EncodedMember;
use crate::creation::progress::ProgressTracker;
use crate::creation::report::ArchiveReport;

/// What happens when an input file cannot be archived.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ErrorPolicy {
    /// Abort on the first error; no archive is produced.
    Strict,
    /// Skip the file, report the error to the sink and keep going.
    #[default]
    Permissive,
    /// Skip the file without reporting anything.
    Lenient,
}

/// A generated shell archive.
#[derive(Debug, Clone)]
pub struct Archive {
    /// The archive script.
    pub text: String,
    /// Statistics of the generation call.
    pub report: ArchiveReport,
}

impl Archive {
    /// Archive made of the two scripts only, with an empty report.
    #[must_use]
    pub fn scripts_only(pre_script: Option<&str>, post_script: Option<&str>) -> Self {
        Self {
            text: render(pre_script, post_script, &[], 0),
            report: ArchiveReport::new(),
        }
    }

    /// Returns the archive text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Consumes the archive and returns its text.
    #[must_use]
    pub fn into_string(self) -> String {
        self.text
    }
}

impl fmt::Display for Archive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl AsRef<str> for Archive {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

/// Builder for generating shell archives.
///
/// # Examples
///
/// ```no_run
/// use mshar_core::creation::Compression;
/// use mshar_core::creation::ErrorPolicy;
/// use mshar_core::creation::ShellArchiver;
///
/// let archive = ShellArchiver::new()
///     .pre_script("echo 'unpacking...'\n")
///     .add_file("README.md")
///     .add_file("src/lib.rs")
///     .compression(Compression::Auto)
///     .policy(ErrorPolicy::Strict)
///     .build()?;
///
/// std::fs::write("bundle.shar", archive.as_str())?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Default, Clone)]
pub struct ShellArchiver {
    pre_script: Option<String>,
    post_script: Option<String>,
    files: Vec<PathBuf>,
    config: ArchiveConfig,
    policy: ErrorPolicy,
}

impl ShellArchiver {
    /// Creates a new `ShellArchiver` with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the shell text placed before the generated body.
    #[must_use]
    pub fn pre_script<S: Into<String>>(mut self, script: S) -> Self {
        self.pre_script = Some(script.into());
        self
    }

    /// Sets the shell text placed after the generated body.
    #[must_use]
    pub fn post_script<S: Into<String>>(mut self, script: S) -> Self {
        self.post_script = Some(script.into());
        self
    }

    /// Appends one input file.
    #[must_use]
    pub fn add_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.files.push(path.as_ref().to_path_buf());
        self
    }

    /// Appends several input files, keeping their order.
    #[must_use]
    pub fn files<P: AsRef<Path>>(mut self, paths: &[P]) -> Self {
        self.files.extend(paths.iter().map(|p| p.as_ref().to_path_buf()));
        self
    }

    /// Sets the full configuration.
    #[must_use]
    pub fn config(mut self, config: ArchiveConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the payload transform.
    #[must_use]
    pub fn compression(mut self, compression: Compression) -> Self {
        self.config.compression = compression;
        self
    }

    /// Sets the prefix stripped from member names.
    #[must_use]
    pub fn strip_prefix<P: AsRef<Path>>(mut self, prefix: P) -> Self {
        self.config.strip_prefix = Some(prefix.as_ref().to_path_buf());
        self
    }

    /// Sets the error policy.
    #[must_use]
    pub fn policy(mut self, policy: ErrorPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Generates the archive.
    ///
    /// Under [`ErrorPolicy::Permissive`] skipped files only show up as
    /// report warnings; use [`build_with_sink`](Self::build_with_sink) to get
    /// the errors themselves.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid, or under
    /// [`ErrorPolicy::Strict`] on the first input that cannot be archived.
    pub fn build(&self) -> Result<Archive> {
        self.build_with_progress(&mut NoopProgress, &mut crate::DiscardErrors)
    }

    /// Generates the archive, reporting skipped files to `sink`.
    ///
    /// # Errors
    ///
    /// Same as [`build`](Self::build).
    pub fn build_with_sink(&self, sink: &mut dyn ErrorSink) -> Result<Archive> {
        self.build_with_progress(&mut NoopProgress, sink)
    }

    /// Generates the archive with progress callbacks.
    ///
    /// # Errors
    ///
    /// Same as [`build`](Self::build).
    pub fn build_with_progress(
        &self,
        progress: &mut dyn ProgressCallback,
        sink: &mut dyn ErrorSink,
    ) -> Result<Archive> {
        self.config.validate()?;

        let start = Instant::now();
        let mut report = ArchiveReport::new();

        if self.files.is_empty() && self.config.reject_empty {
            match self.policy {
                ErrorPolicy::Strict => return Err(ArchiveError::EmptyInput),
                ErrorPolicy::Permissive => {
                    report.add_warning(ArchiveError::EmptyInput.to_string());
                    sink.report(ArchiveError::EmptyInput);
                }
                ErrorPolicy::Lenient => {}
            }
        }

        let mut tracker = ProgressTracker::new(progress, self.files.len());
        let mut members: Vec<EncodedMember> = Vec::with_capacity(self.files.len());

        for path in &self.files {
            tracker.on_entry_start(path);
            match encoder::encode_file(path, &self.config) {
                Ok(member) => {
                    tracker.on_bytes_read(member.raw_len);
                    report.files_added += 1;
                    report.bytes_read += member.raw_len;
                    report.bytes_encoded += member.payload.len() as u64;
                    if member.compressed {
                        report.compressed_members += 1;
                    }
                    members.push(member);
                    tracker.on_entry_complete(path);
                }
                Err(err) if !err.is_file_error() => return Err(err),
                Err(err) => {
                    report.files_skipped += 1;
                    match self.policy {
                        ErrorPolicy::Strict => return Err(err),
                        ErrorPolicy::Permissive => {
                            warn!(path = %path.display(), error = %err, "skipping file");
                            report.add_warning(err.to_string());
                            sink.report(err);
                        }
                        ErrorPolicy::Lenient => {
                            debug!(path = %path.display(), error = %err, "skipping file");
                        }
                    }
                }
            }
        }
        tracker.on_complete();

        let text = render(
            self.pre_script.as_deref(),
            self.post_script.as_deref(),
            &members,
            self.config.line_width,
        );
        report.duration = start.elapsed();

        debug!(
            files = report.files_added,
            skipped = report.files_skipped,
            bytes = text.len(),
            "archive generated"
        );

        Ok(Archive { text, report })
    }
}

/// Concatenates pre-script, prologue and blocks, and post-script.
///
/// With no members the result is exactly `pre_script + post_script`.
fn render(
    pre_script: Option<&str>,
    post_script: Option<&str>,
    members: &[EncodedMember],
    line_width: usize,
) -> String {
    let pre = pre_script.unwrap_or_default();
    let post = post_script.unwrap_or_default();
    let body_len: usize = members
        .iter()
        .map(|m| m.name.len() * 2 + m.payload.len() * (line_width + 1) / line_width.max(1) + 256)
        .sum();

    let mut out = String::with_capacity(pre.len() + post.len() + body_len + 512);
    out.push_str(pre);
    if !members.is_empty() {
        if !out.is_empty() && !out.ends_with('\n') {
            out.push('\n');
        }
        encoder::write_prologue(&mut out, members);
        for member in members {
            member.write_block(&mut out, line_width);
        }
    }
    out.push_str(post);
    out
}
