//! Archive generation reporting.

use std::time::Duration;

/// Report of one archive generation call.
///
/// # Examples
///
/// ```
/// use mshar_core::creation::ArchiveReport;
///
/// let mut report = ArchiveReport::default();
/// report.files_added = 2;
/// report.bytes_read = 300;
/// report.bytes_encoded = 400;
///
/// assert_eq!(report.expansion_ratio(), 4.0 / 3.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ArchiveReport {
    /// Number of files encoded into the archive.
    pub files_added: usize,

    /// Number of files skipped because of errors.
    pub files_skipped: usize,

    /// Number of members stored gzip-compressed.
    pub compressed_members: usize,

    /// Total bytes read from input files.
    pub bytes_read: u64,

    /// Total bytes of base64 payload emitted (without line breaks).
    pub bytes_encoded: u64,

    /// Duration of the generation call.
    pub duration: Duration,

    /// Warnings generated during generation.
    pub warnings: Vec<String>,
}

impl ArchiveReport {
    /// Creates a new empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a warning message to the report.
    pub fn add_warning(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }

    /// Returns whether any warnings were generated.
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Returns encoded payload size divided by input size.
    ///
    /// Plain base64 sits around 1.33; compressed members can push it below 1.
    /// Returns 0.0 when nothing was read.
    #[must_use]
    pub fn expansion_ratio(&self) -> f64 {
        if self.bytes_read == 0 {
            return 0.0;
        }
        self.bytes_encoded as f64 / self.bytes_read as f64
    }

    /// Returns the number of input files processed, added or skipped.
    #[must_use]
    pub fn total_inputs(&self) -> usize {
        self.files_added + self.files_skipped
    }
}
