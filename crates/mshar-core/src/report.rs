//! Progress callbacks and unpacking reports.

use std::path::Path;
use std::time::Duration;

/// Statistics of an [`unpack_archive`](crate::unpack_archive) call.
#[derive(Debug, Clone, Default)]
pub struct UnpackReport {
    /// Number of files written.
    pub files_written: usize,

    /// Number of directories created.
    pub directories_created: usize,

    /// Total bytes written to disk.
    pub bytes_written: u64,

    /// Duration of the unpack operation.
    pub duration: Duration,
}

impl UnpackReport {
    /// Creates a new empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

/// Callback trait for progress reporting during archive generation.
///
/// Implement this trait to receive progress updates, e.g. for a progress bar.
///
/// # Examples
///
/// ```
/// use mshar_core::ProgressCallback;
/// use std::path::Path;
///
/// struct PrintProgress;
///
/// impl ProgressCallback for PrintProgress {
///     fn on_entry_start(&mut self, path: &Path, total: usize, current: usize) {
///         println!("[{current}/{total}] {}", path.display());
///     }
///
///     fn on_bytes_read(&mut self, _bytes: u64) {}
///
///     fn on_entry_complete(&mut self, _path: &Path) {}
///
///     fn on_complete(&mut self) {
///         println!("done");
///     }
/// }
/// ```
pub trait ProgressCallback: Send {
    /// Called before an input file is processed.
    ///
    /// `current` is 1-indexed.
    fn on_entry_start(&mut self, path: &Path, total: usize, current: usize);

    /// Called after an input file's bytes have been read.
    fn on_bytes_read(&mut self, bytes: u64);

    /// Called when an input file has been encoded.
    ///
    /// Not called for skipped files.
    fn on_entry_complete(&mut self, path: &Path);

    /// Called once when the operation finishes.
    fn on_complete(&mut self);
}

/// No-op implementation of `ProgressCallback`.
#[derive(Debug, Default)]
pub struct NoopProgress;

impl ProgressCallback for NoopProgress {
    fn on_entry_start(&mut self, _path: &Path, _total: usize, _current: usize) {}

    fn on_bytes_read(&mut self, _bytes: u64) {}

    fn on_entry_complete(&mut self, _path: &Path) {}

    fn on_complete(&mut self) {}
}
