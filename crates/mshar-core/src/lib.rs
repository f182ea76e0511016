//! Generator and reader for mailable shell archives.
//!
//! An mshar archive is a Bourne shell script that recreates a set of files
//! when run with `sh`. File contents travel as base64 (optionally gzipped)
//! here-documents, so the archive survives any text transport, mail
//! included. A caller-supplied pre-script runs before extraction and a
//! post-script after it.
//!
//! Three entry points differ only in how they treat files that cannot be
//! archived:
//!
//! - [`generate`] skips them and reports each error to an [`ErrorSink`]
//! - [`generate_strict`] fails on the first one
//! - [`generate_lenient`] skips them silently
//!
//! # Examples
//!
//! ```no_run
//! use mshar_core::generate_strict;
//! use mshar_core::list_archive;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let archive = generate_strict(None, Some("echo 'all files restored'\n"), &["notes.txt"])?;
//! println!("{} files, {} bytes", archive.report.files_added, archive.text.len());
//!
//! let manifest = list_archive(&archive.text)?;
//! assert_eq!(manifest.entries[0].name, "notes.txt");
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod api;
pub mod config;
pub mod creation;
pub mod error;
pub mod extraction;
pub mod format;
pub mod inspection;
pub mod report;
#[doc(hidden)]
pub mod test_utils;

// Re-export main API types
pub use api::generate;
pub use api::generate_lenient;
pub use api::generate_strict;
pub use api::list_archive;
pub use api::unpack_archive;
pub use config::UnpackConfig;
pub use creation::Archive;
pub use creation::ArchiveConfig;
pub use creation::ArchiveReport;
pub use creation::Compression;
pub use creation::ErrorPolicy;
pub use creation::ShellArchiver;
pub use error::ArchiveError;
pub use error::DiscardErrors;
pub use error::ErrorSink;
pub use error::Result;
pub use inspection::ArchiveManifest;
pub use inspection::ArchiveMember;
pub use inspection::ManifestEntry;
pub use inspection::read_archive;
pub use report::NoopProgress;
pub use report::ProgressCallback;
pub use report::UnpackReport;
