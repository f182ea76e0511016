//! Human-readable output formatter with colors and styling.

use super::formatter::OutputFormatter;
use super::formatter::ReportTarget;
use anyhow::Result;
use console::Term;
use console::style;
use mshar_core::ArchiveManifest;
use mshar_core::ArchiveReport;
use mshar_core::UnpackReport;
use std::path::Path;

pub struct HumanFormatter {
    verbose: bool,
    quiet: bool,
    use_colors: bool,
    out: Term,
    err: Term,
}

impl HumanFormatter {
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self {
            verbose,
            quiet,
            use_colors: console::colors_enabled(),
            out: Term::stdout(),
            err: Term::stderr(),
        }
    }

    fn format_size(bytes: u64) -> String {
        const KB: u64 = 1024;
        const MB: u64 = KB * 1024;
        const GB: u64 = MB * 1024;

        if bytes >= GB {
            format!("{:.1} GB", bytes as f64 / GB as f64)
        } else if bytes >= MB {
            format!("{:.1} MB", bytes as f64 / MB as f64)
        } else if bytes >= KB {
            format!("{:.1} KB", bytes as f64 / KB as f64)
        } else {
            format!("{bytes} B")
        }
    }

    fn format_number(n: usize) -> String {
        let digits = n.to_string();
        let mut result = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                result.push(',');
            }
            result.push(c);
        }
        result
    }

    fn format_mode(mode: Option<u32>) -> String {
        let Some(mode) = mode else {
            return "----------".to_string();
        };
        let mut text = String::with_capacity(10);
        text.push('-');
        for shift in [6, 3, 0] {
            let bits = (mode >> shift) & 0o7;
            text.push(if bits & 0o4 == 0 { '-' } else { 'r' });
            text.push(if bits & 0o2 == 0 { '-' } else { 'w' });
            text.push(if bits & 0o1 == 0 { '-' } else { 'x' });
        }
        text
    }

    fn headline(&self, term: &Term, message: &str) {
        if self.use_colors {
            let _ = term.write_line(&format!("{} {message}", style("✓").green().bold()));
        } else {
            let _ = term.write_line(message);
        }
    }
}

impl OutputFormatter for HumanFormatter {
    fn format_creation_result(
        &self,
        target: ReportTarget<'_>,
        report: &ArchiveReport,
    ) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        let term = match target {
            ReportTarget::File(path) => {
                self.headline(&self.out, &format!("Archive created: {}", path.display()));
                &self.out
            }
            ReportTarget::Stdout => {
                // the archive already went to stdout; only show details on request
                if !self.verbose && report.files_skipped == 0 {
                    return Ok(());
                }
                self.headline(&self.err, "Archive written to stdout");
                &self.err
            }
        };

        let _ = term.write_line(&format!(
            "  Files added:      {}",
            Self::format_number(report.files_added)
        ));
        let _ = term.write_line(&format!(
            "  Input size:       {}",
            Self::format_size(report.bytes_read)
        ));
        let _ = term.write_line(&format!(
            "  Encoded size:     {}",
            Self::format_size(report.bytes_encoded)
        ));
        if report.compressed_members > 0 {
            let _ = term.write_line(&format!(
                "  Gzipped members:  {}",
                Self::format_number(report.compressed_members)
            ));
        }
        if report.files_skipped > 0 {
            let _ = term.write_line(&format!("  Files skipped:    {}", report.files_skipped));
        }

        if self.verbose {
            let _ = term.write_line(&format!(
                "  Expansion:        {:.2}x",
                report.expansion_ratio()
            ));
            let _ = term.write_line(&format!("  Duration:         {:?}", report.duration));
        }

        Ok(())
    }

    fn format_manifest_short(&self, manifest: &ArchiveManifest) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        for entry in &manifest.entries {
            let _ = self.out.write_line(&entry.name);
        }

        Ok(())
    }

    fn format_manifest_long(&self, manifest: &ArchiveManifest, human_readable: bool) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        for entry in &manifest.entries {
            let size = if human_readable {
                Self::format_size(entry.size)
            } else {
                entry.size.to_string()
            };
            let packing = if entry.compressed { "gz" } else { "--" };

            let _ = self.out.write_line(&format!(
                "{} {packing} {size:>10}  {}",
                Self::format_mode(entry.mode),
                entry.name
            ));
        }

        let _ = self.out.write_line("");
        let _ = self.out.write_line(&format!(
            "Total: {} files, {}",
            Self::format_number(manifest.total_entries),
            Self::format_size(manifest.total_size)
        ));

        Ok(())
    }

    fn format_unpack_result(&self, dest: &Path, report: &UnpackReport) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        self.headline(&self.out, &format!("Unpacked into {}", dest.display()));
        let _ = self.out.write_line(&format!(
            "  Files written:    {}",
            Self::format_number(report.files_written)
        ));
        let _ = self.out.write_line(&format!(
            "  Directories:      {}",
            Self::format_number(report.directories_created)
        ));
        let _ = self.out.write_line(&format!(
            "  Total size:       {}",
            Self::format_size(report.bytes_written)
        ));

        if self.verbose {
            let _ = self
                .out
                .write_line(&format!("  Duration:         {:?}", report.duration));
        }

        Ok(())
    }

    fn format_error(&self, error: &anyhow::Error) {
        // Always show errors, even in quiet mode
        if self.use_colors {
            let _ = self
                .err
                .write_line(&format!("{} {error:?}", style("ERROR:").red().bold()));
        } else {
            let _ = self.err.write_line(&format!("ERROR: {error:?}"));
        }
    }

    fn format_warning(&self, message: &str) {
        if self.quiet {
            return;
        }

        if self.use_colors {
            let _ = self
                .err
                .write_line(&format!("{} {message}", style("⚠").yellow().bold()));
        } else {
            let _ = self.err.write_line(&format!("WARNING: {message}"));
        }
    }
}
