//! Archive manifest types.

use crate::inspection::reader::ArchiveMember;

/// One entry of an [`ArchiveManifest`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestEntry {
    /// Member name as written in the archive.
    pub name: String,
    /// Decoded size in bytes.
    pub size: u64,
    /// Recorded permission bits.
    pub mode: Option<u32>,
    /// Whether the payload is gzip-compressed.
    pub compressed: bool,
}

/// Listing of an archive's members without their content.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArchiveManifest {
    /// Entries in archive order.
    pub entries: Vec<ManifestEntry>,
    /// Number of entries.
    pub total_entries: usize,
    /// Sum of decoded sizes.
    pub total_size: u64,
}

impl ArchiveManifest {
    /// Builds a manifest from parsed members.
    #[must_use]
    pub fn from_members(members: &[ArchiveMember]) -> Self {
        let entries: Vec<ManifestEntry> = members
            .iter()
            .map(|m| ManifestEntry {
                name: m.name.clone(),
                size: m.data.len() as u64,
                mode: m.mode,
                compressed: m.compressed,
            })
            .collect();
        Self {
            total_entries: entries.len(),
            total_size: entries.iter().map(|e| e.size).sum(),
            entries,
        }
    }

    /// Returns whether the archive has no members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
