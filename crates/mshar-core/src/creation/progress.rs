//! Progress tracking for archive generation.

use crate::ProgressCallback;
use std::path::Path;

/// Manages progress callbacks with automatic entry counting.
///
/// # Examples
///
/// ```
/// use mshar_core::NoopProgress;
/// use mshar_core::creation::progress::ProgressTracker;
/// use std::path::Path;
///
/// let mut progress = NoopProgress;
/// let mut tracker = ProgressTracker::new(&mut progress, 2);
///
/// tracker.on_entry_start(Path::new("a.txt"));
/// tracker.on_bytes_read(12);
/// tracker.on_entry_complete(Path::new("a.txt"));
/// assert_eq!(tracker.current_entry(), 1);
/// ```
pub struct ProgressTracker<'a> {
    progress: &'a mut dyn ProgressCallback,
    /// 1-indexed for display
    current_entry: usize,
    total_entries: usize,
}

impl<'a> ProgressTracker<'a> {
    /// Creates a new progress tracker.
    #[must_use]
    pub fn new(progress: &'a mut dyn ProgressCallback, total_entries: usize) -> Self {
        Self {
            progress,
            current_entry: 0,
            total_entries,
        }
    }

    /// Reports that processing started for an entry.
    pub fn on_entry_start(&mut self, path: &Path) {
        self.current_entry += 1;
        self.progress
            .on_entry_start(path, self.total_entries, self.current_entry);
    }

    /// Reports bytes read for the current entry.
    pub fn on_bytes_read(&mut self, bytes: u64) {
        self.progress.on_bytes_read(bytes);
    }

    /// Reports that processing completed for an entry.
    pub fn on_entry_complete(&mut self, path: &Path) {
        self.progress.on_entry_complete(path);
    }

    /// Reports that the whole operation completed.
    pub fn on_complete(&mut self) {
        self.progress.on_complete();
    }

    /// Number of entries started so far.
    #[must_use]
    pub fn current_entry(&self) -> usize {
        self.current_entry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[derive(Default)]
    struct RecordingProgress {
        starts: Vec<(PathBuf, usize, usize)>,
        bytes: u64,
        completed: Vec<PathBuf>,
        finished: bool,
    }

    impl ProgressCallback for RecordingProgress {
        fn on_entry_start(&mut self, path: &Path, total: usize, current: usize) {
            self.starts.push((path.to_path_buf(), total, current));
        }

        fn on_bytes_read(&mut self, bytes: u64) {
            self.bytes += bytes;
        }

        fn on_entry_complete(&mut self, path: &Path) {
            self.completed.push(path.to_path_buf());
        }

        fn on_complete(&mut self) {
            self.finished = true;
        }
    }

    #[test]
    fn test_tracker_counts_entries() {
        let mut progress = RecordingProgress::default();
        {
            let mut tracker = ProgressTracker::new(&mut progress, 2);
            tracker.on_entry_start(Path::new("a"));
            tracker.on_bytes_read(5);
            tracker.on_entry_complete(Path::new("a"));
            tracker.on_entry_start(Path::new("b"));
            tracker.on_bytes_read(7);
            tracker.on_entry_complete(Path::new("b"));
            tracker.on_complete();
            assert_eq!(tracker.current_entry(), 2);
        }

        assert_eq!(
            progress.starts,
            vec![(PathBuf::from("a"), 2, 1), (PathBuf::from("b"), 2, 2)]
        );
        assert_eq!(progress.bytes, 12);
        assert_eq!(progress.completed.len(), 2);
        assert!(progress.finished);
    }
}
