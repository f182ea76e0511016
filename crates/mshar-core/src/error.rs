//! Error types for shell archive generation and unpacking.

use std::io;
use std::path::Path;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using `ArchiveError`.
pub type Result<T> = std::result::Result<T, ArchiveError>;

/// Errors that can occur while building, reading or unpacking a shell archive.
#[derive(Error, Debug)]
pub enum ArchiveError {
    /// Input file does not exist.
    #[error("file not found: {path}")]
    FileNotFound {
        /// The missing path.
        path: PathBuf,
    },

    /// Input file exists but cannot be opened or read.
    #[error("cannot read {path}: {source}")]
    FileUnreadable {
        /// The path that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Input path names something other than a regular file.
    #[error("not a regular file: {path}")]
    NotAFile {
        /// The offending path.
        path: PathBuf,
    },

    /// Input file exceeds the configured size limit.
    #[error("file too large: {path} ({size} > {max} bytes)")]
    FileTooLarge {
        /// The offending path.
        path: PathBuf,
        /// Actual size in bytes.
        size: u64,
        /// Configured limit in bytes.
        max: u64,
    },

    /// Content or file name cannot be represented safely in the script.
    #[error("cannot encode {path}: {reason}")]
    EncodingFailure {
        /// The path being encoded.
        path: PathBuf,
        /// What went wrong.
        reason: String,
    },

    /// The request contained no files and the configuration rejects that.
    #[error("no input files given")]
    EmptyInput,

    /// The caller passed a malformed argument.
    #[error("invalid argument: {reason}")]
    InvalidArgument {
        /// Description of the problem.
        reason: String,
    },

    /// The configuration is inconsistent.
    #[error("invalid configuration: {reason}")]
    InvalidConfiguration {
        /// Description of the problem.
        reason: String,
    },

    /// Archive text could not be parsed.
    #[error("malformed archive at line {line}: {reason}")]
    MalformedArchive {
        /// 1-based line number where parsing failed.
        line: usize,
        /// Description of the problem.
        reason: String,
    },

    /// A member name would escape the unpack directory.
    #[error("path traversal detected: {path}")]
    PathTraversal {
        /// The member name.
        path: PathBuf,
    },

    /// Unpacking would overwrite an existing file.
    #[error("refusing to overwrite existing file: {path}")]
    AlreadyExists {
        /// The existing path.
        path: PathBuf,
    },

    /// I/O error outside of input file reading.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl ArchiveError {
    /// Classifies an I/O error raised while opening or reading an input file.
    ///
    /// `NotFound` becomes [`ArchiveError::FileNotFound`]; everything else is
    /// reported as [`ArchiveError::FileUnreadable`].
    pub fn from_input_io(path: &Path, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            Self::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            Self::FileUnreadable {
                path: path.to_path_buf(),
                source,
            }
        }
    }

    /// Returns `true` if this error concerns a single input file.
    ///
    /// File errors are the ones the permissive and lenient policies skip over
    /// instead of aborting.
    ///
    /// # Examples
    ///
    /// ```
    /// use mshar_core::ArchiveError;
    /// use std::path::PathBuf;
    ///
    /// let err = ArchiveError::FileNotFound {
    ///     path: PathBuf::from("missing.txt"),
    /// };
    /// assert!(err.is_file_error());
    ///
    /// assert!(!ArchiveError::EmptyInput.is_file_error());
    /// ```
    #[must_use]
    pub const fn is_file_error(&self) -> bool {
        matches!(
            self,
            Self::FileNotFound { .. }
                | Self::FileUnreadable { .. }
                | Self::NotAFile { .. }
                | Self::FileTooLarge { .. }
                | Self::EncodingFailure { .. }
                | Self::InvalidArgument { .. }
        )
    }
}

/// Receives diagnostics from the permissive generator.
///
/// The generator keeps going after reporting a file error, so a sink sees
/// every problem of a call in input order.
pub trait ErrorSink {
    /// Records one error.
    fn report(&mut self, error: ArchiveError);
}

impl ErrorSink for Vec<ArchiveError> {
    fn report(&mut self, error: ArchiveError) {
        self.push(error);
    }
}

/// Sink that drops every error.
#[derive(Debug, Default, Clone, Copy)]
pub struct DiscardErrors;

impl ErrorSink for DiscardErrors {
    fn report(&mut self, _error: ArchiveError) {}
}
