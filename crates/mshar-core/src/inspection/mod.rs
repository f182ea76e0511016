//! Archive inspection without unpacking.
//!
//! # Examples
//!
//! ```no_run
//! use mshar_core::list_archive;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let text = std::fs::read_to_string("bundle.shar")?;
//! let manifest = list_archive(&text)?;
//! for entry in &manifest.entries {
//!     println!("{}: {} bytes", entry.name, entry.size);
//! }
//! # Ok(())
//! # }
//! ```

pub mod manifest;
pub mod reader;

pub use manifest::ArchiveManifest;
pub use manifest::ManifestEntry;
pub use reader::ArchiveMember;
pub use reader::read_archive;
