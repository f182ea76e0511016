//! Progress bar implementation for CLI operations.

use console::Term;
use indicatif::ProgressBar;
use indicatif::ProgressStyle;
use mshar_core::ProgressCallback;
use std::path::Path;

/// CLI progress bar wrapper implementing `ProgressCallback`.
///
/// Draws on stderr, so it never mixes with an archive written to stdout.
/// Cleans up on drop.
pub struct CliProgress {
    bar: ProgressBar,
    bytes_read: u64,
}

impl CliProgress {
    /// Creates a new CLI progress bar for `total` files.
    #[must_use]
    pub fn new(total: usize, message: &str) -> Self {
        let bar = ProgressBar::new(total as u64);

        // "Encoding 15.2 MB [████████░░░░] 42/100 files notes.txt"
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{msg} [{bar:40.cyan/blue}] {pos}/{len} files {prefix}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("█▓░"),
        );

        bar.set_message(message.to_string());

        Self { bar, bytes_read: 0 }
    }

    /// Checks if we should show progress (stderr is a terminal).
    #[must_use]
    pub fn should_show() -> bool {
        Term::stderr().is_term()
    }
}

impl Drop for CliProgress {
    fn drop(&mut self) {
        self.bar.finish_and_clear();
    }
}

impl ProgressCallback for CliProgress {
    fn on_entry_start(&mut self, path: &Path, _total: usize, _current: usize) {
        self.bar.set_prefix(path.display().to_string());
    }

    fn on_bytes_read(&mut self, bytes: u64) {
        self.bytes_read += bytes;
        self.bar
            .set_message(format!("Encoding {}", humanize_bytes(self.bytes_read)));
    }

    fn on_entry_complete(&mut self, _path: &Path) {
        self.bar.inc(1);
    }

    fn on_complete(&mut self) {
        self.bar.finish_and_clear();
    }
}

/// Converts bytes to human-readable format (KB, MB, GB, TB).
fn humanize_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;
    const TB: u64 = GB * 1024;

    if bytes >= TB {
        format!("{:.1} TB", bytes as f64 / TB as f64)
    } else if bytes >= GB {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{bytes} B")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_humanize_bytes() {
        assert_eq!(humanize_bytes(0), "0 B");
        assert_eq!(humanize_bytes(512), "512 B");
        assert_eq!(humanize_bytes(1536), "1.5 KB");
        assert_eq!(humanize_bytes(1024 * 1024), "1.0 MB");
        assert_eq!(humanize_bytes(1024_u64.pow(4)), "1.0 TB");
    }

    #[test]
    fn test_progress_callback() {
        let mut progress = CliProgress::new(2, "Encoding");

        progress.on_entry_start(Path::new("a.txt"), 2, 1);
        progress.on_bytes_read(1024);
        progress.on_entry_complete(Path::new("a.txt"));
        progress.on_entry_start(Path::new("b.txt"), 2, 2);
        progress.on_bytes_read(512);
        progress.on_entry_complete(Path::new("b.txt"));

        assert_eq!(progress.bytes_read, 1536);
        assert_eq!(progress.bar.position(), 2);
        progress.on_complete();
    }
}
