//! Shell archive generation.
//!
//! Input files are read, encoded and written as shell blocks wrapped by the
//! caller's pre-script and post-script.

pub mod config;
pub mod creator;
pub mod encoder;
pub mod progress;
pub mod report;

pub use config::ArchiveConfig;
pub use config::Compression;
pub use creator::Archive;
pub use creator::ErrorPolicy;
pub use creator::ShellArchiver;
pub use report::ArchiveReport;
