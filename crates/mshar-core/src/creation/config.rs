//! Configuration for shell archive generation.

use crate::ArchiveError;
use crate::Result;
use crate::format::DEFAULT_LINE_WIDTH;
use std::path::PathBuf;

/// How member payloads are transformed before base64 encoding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Compression {
    /// Plain base64. Unpacking needs only `base64`.
    #[default]
    None,
    /// Gzip every member. Unpacking also needs `gzip`.
    Gzip,
    /// Gzip a member only when that makes it smaller.
    Auto,
}

/// Configuration for shell archive generation.
///
/// # Examples
///
/// ```
/// use mshar_core::creation::ArchiveConfig;
/// use mshar_core::creation::Compression;
///
/// let config = ArchiveConfig::default()
///     .with_compression(Compression::Auto)
///     .with_compression_level(9)
///     .with_max_file_size(Some(16 * 1024 * 1024));
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct ArchiveConfig {
    /// Payload transform.
    ///
    /// Default: [`Compression::None`].
    pub compression: Compression,

    /// Gzip level (1-9), used when a member is compressed.
    ///
    /// Default: `Some(6)`.
    pub compression_level: Option<u8>,

    /// Emit a `chmod` restoring each file's permission bits.
    ///
    /// Only the `0o777` bits are recorded; setuid, setgid and sticky bits
    /// are dropped. Has no effect on platforms without unix modes.
    ///
    /// Default: `true`.
    pub preserve_permissions: bool,

    /// Maximum size of a single input file in bytes. `None` means no limit.
    ///
    /// Default: `None`.
    pub max_file_size: Option<u64>,

    /// Prefix removed from input paths to form member names.
    ///
    /// Paths that do not start with the prefix keep their full name.
    ///
    /// Default: `None` (names are the paths verbatim).
    pub strip_prefix: Option<PathBuf>,

    /// Width of base64 payload lines. Must be a positive multiple of 4.
    ///
    /// Default: 76.
    pub line_width: usize,

    /// Treat an empty file list as an error ([`ArchiveError::EmptyInput`]).
    ///
    /// Default: `false`.
    pub reject_empty: bool,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            compression: Compression::None,
            compression_level: Some(6),
            preserve_permissions: true,
            max_file_size: None,
            strip_prefix: None,
            line_width: DEFAULT_LINE_WIDTH,
            reject_empty: false,
        }
    }
}

impl ArchiveConfig {
    /// Creates a new `ArchiveConfig` with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the payload transform.
    #[must_use]
    pub fn with_compression(mut self, compression: Compression) -> Self {
        self.compression = compression;
        self
    }

    /// Sets the gzip level.
    ///
    /// # Panics
    ///
    /// Panics if the level is not in the range 1-9.
    /// Use `validate()` for non-panicking validation.
    #[must_use]
    pub fn with_compression_level(mut self, level: u8) -> Self {
        assert!((1..=9).contains(&level), "compression level must be 1-9");
        self.compression_level = Some(level);
        self
    }

    /// Sets whether permission bits are restored.
    #[must_use]
    pub fn with_preserve_permissions(mut self, preserve: bool) -> Self {
        self.preserve_permissions = preserve;
        self
    }

    /// Sets the maximum input file size.
    #[must_use]
    pub fn with_max_file_size(mut self, max_size: Option<u64>) -> Self {
        self.max_file_size = max_size;
        self
    }

    /// Sets the prefix stripped from member names.
    #[must_use]
    pub fn with_strip_prefix(mut self, prefix: Option<PathBuf>) -> Self {
        self.strip_prefix = prefix;
        self
    }

    /// Sets the base64 line width.
    #[must_use]
    pub fn with_line_width(mut self, width: usize) -> Self {
        self.line_width = width;
        self
    }

    /// Sets whether an empty file list is an error.
    #[must_use]
    pub fn with_reject_empty(mut self, reject: bool) -> Self {
        self.reject_empty = reject;
        self
    }

    /// Gzip level as understood by `flate2`.
    pub(crate) fn gzip_level(&self) -> flate2::Compression {
        self.compression_level
            .map_or_else(flate2::Compression::default, |level| {
                flate2::Compression::new(u32::from(level))
            })
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ArchiveError::InvalidConfiguration`] if:
    /// - the compression level is set but not in range 1-9
    /// - the line width is zero or not a multiple of 4
    pub fn validate(&self) -> Result<()> {
        if let Some(level) = self.compression_level
            && !(1..=9).contains(&level)
        {
            return Err(ArchiveError::InvalidConfiguration {
                reason: format!("compression level must be 1-9, got {level}"),
            });
        }
        if self.line_width == 0 || self.line_width % 4 != 0 {
            return Err(ArchiveError::InvalidConfiguration {
                reason: format!(
                    "line width must be a positive multiple of 4, got {}",
                    self.line_width
                ),
            });
        }
        Ok(())
    }
}
