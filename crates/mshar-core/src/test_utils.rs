//! Test helpers for building input file trees.
//!
//! # Panics
//!
//! All functions in this module panic on I/O errors since they are
//! designed for test use only.

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::fs;
use std::path::Path;
use std::path::PathBuf;

/// Writes each `(relative path, content)` pair below `root`.
///
/// Parent directories are created as needed. Returns the absolute paths in
/// the given order.
///
/// # Examples
///
/// ```no_run
/// use mshar_core::test_utils::write_files;
/// use std::path::Path;
///
/// let paths = write_files(Path::new("/tmp/fixture"), &[("a.txt", b"hello"), ("dir/b.bin", b"\0\x01")]);
/// assert_eq!(paths.len(), 2);
/// ```
pub fn write_files(root: &Path, entries: &[(&str, &[u8])]) -> Vec<PathBuf> {
    entries
        .iter()
        .map(|(name, content)| {
            let path = root.join(name);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).unwrap();
            }
            fs::write(&path, content).unwrap();
            path
        })
        .collect()
}

/// Deterministic pseudo-random bytes for binary fixtures.
///
/// Covers every byte value, including NUL and bytes that are not valid UTF-8.
#[must_use]
pub fn binary_content(len: usize, seed: u32) -> Vec<u8> {
    let mut state = seed.wrapping_mul(2_654_435_761).wrapping_add(1);
    (0..len)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            state.to_le_bytes()[0]
        })
        .collect()
}
